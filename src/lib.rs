//! svg2fourier: SVG path outlines → complex Fourier series.
//!
//! Converts a vector outline (an SVG path of move/line/cubic/close
//! commands) into one finite complex Fourier series per subpath: a
//! sum of rotating vectors whose superposed tips retrace the outline.
//! Coefficients are exact closed-form line integrals of the piecewise
//! bezier curve, not numeric quadrature.
//!
//! # Example
//!
//! ```
//! use svg2fourier::{analyze, FourierConfig};
//!
//! let config = FourierConfig { coefficients: 11, ..FourierConfig::default() };
//! let analysis = analyze("M0 0L10 0L10 10L0 10Z", &config)?;
//! assert_eq!(analysis.spectra.len(), 1);
//! # Ok::<(), svg2fourier::PathError>(())
//! ```

#![forbid(unsafe_code)]

pub mod coeff;
pub mod config;
pub mod curve;
pub mod error;
pub mod geom;
pub mod output;
pub mod parse;
pub mod svg;

// Re-export kurbo so downstream users get the same Rect type used by
// Analysis.bounds.
pub use kurbo;

pub use coeff::{CoefficientMap, Segmentation};
pub use config::FourierConfig;
pub use error::PathError;

use kurbo::Rect;
use log::debug;
use rayon::prelude::*;

use curve::PolyBezier;

/// The result of analyzing one path: its subpaths, their combined
/// bounding box, and one coefficient set per subpath (same order).
#[derive(Debug, Clone)]
pub struct Analysis {
    pub paths: Vec<PolyBezier>,
    pub bounds: Rect,
    pub spectra: Vec<CoefficientMap>,
}

/// Full pipeline: path data → per-subpath Fourier coefficients.
///
/// Subpaths are independent, so their coefficient sets are computed in
/// parallel and merged back in source order.
pub fn analyze(path_data: &str, config: &FourierConfig) -> Result<Analysis, PathError> {
    let subpaths = parse::Parser::parse(path_data, config.dt)?;
    let paths: Vec<PolyBezier> = subpaths.into_iter().map(PolyBezier::new).collect();
    if paths.is_empty() {
        return Err(PathError::NoSubpaths);
    }

    let bounds = paths[1..]
        .iter()
        .fold(paths[0].bounding_box(), |acc, poly| {
            acc.union(poly.bounding_box())
        });
    debug!(
        "parsed {} subpaths, {} segments, bounds {:?}",
        paths.len(),
        paths.iter().map(PolyBezier::len).sum::<usize>(),
        bounds,
    );

    let spectra: Vec<CoefficientMap> = paths
        .par_iter()
        .map(|poly| coeff::spectrum(poly, config.coefficients, config.segmentation))
        .collect();
    debug!(
        "computed {} coefficients for each of {} subpaths",
        config.coefficients,
        spectra.len(),
    );

    Ok(Analysis { paths, bounds, spectra })
}

/// Convenience: extract the path data from SVG text, then analyze it.
pub fn analyze_svg(content: &str, config: &FourierConfig) -> Result<Analysis, PathError> {
    analyze(svg::path_data(content)?, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_square_end_to_end() {
        let config = FourierConfig {
            coefficients: 5,
            ..FourierConfig::default()
        };
        let analysis = analyze("M0 0L10 0L10 10L0 10Z", &config).unwrap();
        assert_eq!(analysis.paths.len(), 1);
        assert_eq!(analysis.paths[0].len(), 4);
        assert_eq!(analysis.bounds, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(analysis.spectra.len(), 1);
        let keys: Vec<i32> = analysis.spectra[0].keys().copied().collect();
        assert_eq!(keys, vec![0, 1, -1, 2, -2]);
    }

    #[test]
    fn analyze_empty_input_is_an_error() {
        let config = FourierConfig::default();
        assert!(matches!(
            analyze("", &config),
            Err(PathError::NoSubpaths)
        ));
        assert!(matches!(
            analyze("M3 3Z", &config),
            Err(PathError::NoSubpaths)
        ));
    }

    #[test]
    fn analyze_path_with_doubled_coordinate() {
        // The parser happily emits a zero-length segment for "L0 0"
        // from (0, 0); the coefficients must stay finite under the
        // default distance-proportional split.
        let config = FourierConfig {
            coefficients: 5,
            ..FourierConfig::default()
        };
        let analysis = analyze("M0 0L0 0L4 0Z", &config).unwrap();
        assert_eq!(analysis.paths[0].len(), 3);
        for coefficient in analysis.spectra[0].values() {
            assert!(coefficient.re.is_finite() && coefficient.im.is_finite());
        }
    }

    #[test]
    fn analyze_svg_document() {
        let doc = r##"<svg width="10.0pt" height="10.0pt"><path d="M0 0L4 0L4 4Z"/></svg>"##;
        let config = FourierConfig {
            coefficients: 3,
            ..FourierConfig::default()
        };
        let analysis = analyze_svg(doc, &config).unwrap();
        assert_eq!(analysis.paths.len(), 1);
        assert_eq!(analysis.bounds, Rect::new(0.0, 0.0, 4.0, 4.0));
    }
}
