//! Wire format for the animation frontend.
//!
//! The consumer has no native complex type, so every coefficient is
//! split into a `[real, imag]` pair, keyed by frequency. Insertion
//! order of the maps is preserved, so the JSON keys stay in the
//! zigzag enumeration order the frontend replays them in.

use indexmap::IndexMap;
use serde::Serialize;

use crate::Analysis;

/// The complete drawing document sent downstream.
#[derive(Debug, Clone, Serialize)]
pub struct Drawing {
    pub lim: Limits,
    pub sets_of_coeffs: Vec<IndexMap<i32, [f64; 2]>>,
}

/// Bounding box across all subpaths.
#[derive(Debug, Clone, Serialize)]
pub struct Limits {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl From<&Analysis> for Drawing {
    fn from(analysis: &Analysis) -> Drawing {
        let bounds = analysis.bounds;
        let sets_of_coeffs = analysis
            .spectra
            .iter()
            .map(|spectrum| {
                spectrum
                    .iter()
                    .map(|(&n, &c)| (n, [c.re, c.im]))
                    .collect()
            })
            .collect();
        Drawing {
            lim: Limits {
                x: [bounds.x0, bounds.x1],
                y: [bounds.y0, bounds.y1],
            },
            sets_of_coeffs,
        }
    }
}
