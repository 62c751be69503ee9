use thiserror::Error;

/// Errors that can occur while turning path data into coefficients.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PathError {
    #[error("unsupported path command '{0}'")]
    UnsupportedCommand(char),

    #[error("malformed coordinate pair near \"{0}\"")]
    MalformedPair(String),

    #[error("a bezier curve takes 2 or 4 control points, got {0}")]
    UnsupportedDegree(usize),

    #[error("no <path> element with a d attribute found")]
    MissingPath,

    #[error("path data contains no subpaths")]
    NoSubpaths,
}
