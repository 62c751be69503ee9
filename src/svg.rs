//! SVG document plumbing: pull the path data and canvas size out of
//! SVG text. No general SVG support, just enough to feed the parser
//! the first `<path>` element's `d` attribute, which is what the
//! vectorizer upstream emits.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::PathError;

fn path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<path[^>]*>").expect("static pattern"))
}

fn d_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"d\s*=\s*"([^"]*)""#).expect("static pattern"))
}

fn dimension_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)width="([0-9.]+)pt".*?height="([0-9.]+)pt""#)
            .expect("static pattern")
    })
}

/// Extract the first `<path>` element's `d` attribute.
pub fn path_data(content: &str) -> Result<&str, PathError> {
    let element = path_re()
        .find(content)
        .ok_or(PathError::MissingPath)?
        .as_str();
    let captures = d_attr_re()
        .captures(element)
        .ok_or(PathError::MissingPath)?;
    match captures.get(1) {
        Some(m) => Ok(m.as_str()),
        None => Err(PathError::MissingPath),
    }
}

/// Canvas size in points from the `<svg>` element, if declared.
pub fn dimensions(content: &str) -> Option<(f64, f64)> {
    let captures = dimension_re().captures(content)?;
    let width = captures.get(1)?.as_str().parse().ok()?;
    let height = captures.get(2)?.as_str().parse().ok()?;
    Some((width, height))
}
