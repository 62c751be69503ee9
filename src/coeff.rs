//! Fourier coefficient engine.
//!
//! Treats a PolyBezier as one closed parametric curve f(u), u ∈ [0, 1],
//! and computes c_n = ∫₀¹ f(u)·e^(−2πinu) du per frequency. Each
//! segment gets a contiguous sub-range of u and its integral is taken
//! in closed form: the power-basis polynomial is integrated by parts
//! against the exponential, which terminates because differentiating a
//! degree-d polynomial d+1 times leaves nothing. The only approximate
//! quantity in the pipeline is the sampled arc length used to place
//! segment boundaries in distance-proportional mode; the integrals
//! themselves are exact for the piecewise-polynomial curve.

use std::f64::consts::PI;

use indexmap::IndexMap;

use crate::curve::{Bezier, PolyBezier};
use crate::geom::Complex;

/// Frequency → coefficient, keyed in zigzag enumeration order.
pub type CoefficientMap = IndexMap<i32, Complex>;

/// How segments share the global parameter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segmentation {
    /// Every segment gets the same range width, 1/n.
    Equal,
    /// Each segment's range width is proportional to its arc length,
    /// so the traced pen tip moves at roughly constant speed.
    #[default]
    ByDistance,
}

/// The zigzag frequency enumeration: 0, 1, −1, 2, −2, 3, −3, …
pub fn zigzag(count: usize) -> impl Iterator<Item = i32> {
    let mut n = 0i32;
    (0..count).map(move |i| {
        let out = n;
        if i % 2 == 0 {
            n += i as i32 + 1;
        } else {
            n = -n;
        }
        out
    })
}

/// Compute the first `count` coefficients of `poly` under the zigzag
/// enumeration.
pub fn spectrum(
    poly: &PolyBezier,
    count: usize,
    segmentation: Segmentation,
) -> CoefficientMap {
    let ranges = ranges(poly, segmentation);
    let mut coefficients = CoefficientMap::with_capacity(count);
    for n in zigzag(count) {
        coefficients.insert(n, coefficient_over(poly, n, &ranges, segmentation));
    }
    coefficients
}

/// Compute a single coefficient. Convenience entry point; `spectrum`
/// computes the segment ranges once for all frequencies.
pub fn coefficient(poly: &PolyBezier, n: i32, segmentation: Segmentation) -> Complex {
    coefficient_over(poly, n, &ranges(poly, segmentation), segmentation)
}

fn ranges(poly: &PolyBezier, segmentation: Segmentation) -> Vec<(f64, f64)> {
    match segmentation {
        Segmentation::Equal => equal_ranges(poly.len()),
        Segmentation::ByDistance => distance_ranges(poly),
    }
}

/// Contiguous sub-ranges of [0, 1] of equal width, one per segment.
fn equal_ranges(count: usize) -> Vec<(f64, f64)> {
    let n = count as f64;
    (0..count)
        .map(|k| (k as f64 / n, (k + 1) as f64 / n))
        .collect()
}

/// Contiguous sub-ranges of [0, 1] with widths proportional to each
/// segment's (approximate) arc length. Zero-length segments get a
/// zero-width range; a subpath whose total length is zero has no
/// usable weights and falls back to the equal split.
fn distance_ranges(poly: &PolyBezier) -> Vec<(f64, f64)> {
    let total = poly.dist();
    if total == 0.0 {
        return equal_ranges(poly.len());
    }
    let mut lower = 0.0;
    poly.iter()
        .map(|seg| {
            let upper = lower + seg.dist() / total;
            let range = (lower, upper);
            lower = upper;
            range
        })
        .collect()
}

fn coefficient_over(
    poly: &PolyBezier,
    n: i32,
    ranges: &[(f64, f64)],
    segmentation: Segmentation,
) -> Complex {
    // The constant in the exponent, −2πin, shared by every segment.
    let denom = Complex::new(0.0, -2.0 * PI * n as f64);
    poly.iter()
        .zip(ranges)
        .map(|(seg, &(lower, upper))| {
            let dudt = match segmentation {
                Segmentation::Equal => poly.len() as f64,
                // A zero-length subpath fell back to the equal split
                // in `distance_ranges`.
                Segmentation::ByDistance if poly.dist() == 0.0 => poly.len() as f64,
                Segmentation::ByDistance => {
                    if seg.dist() == 0.0 {
                        // Zero-width range: nothing to integrate over.
                        return Complex::ZERO;
                    }
                    poly.dist() / seg.dist()
                }
            };
            segment_integral(seg, n, denom, lower, upper, dudt)
        })
        .sum()
}

/// Closed-form ∫ f(u)·e^(−2πinu) du over one segment's sub-range.
///
/// Tabular integration by parts of the power-basis polynomial against
/// the exponential: one term per surviving derivative, scaled by
/// ascending powers of du/dt and divided by ascending powers of the
/// exponent constant. n = 0 degenerates to the polynomial mean over
/// the segment, scaled by the range width.
fn segment_integral(
    seg: &Bezier,
    n: i32,
    denom: Complex,
    lower: f64,
    upper: f64,
    dudt: f64,
) -> Complex {
    let [a, b, c, d] = seg.power_basis();

    if n == 0 {
        return (a / 4.0 + b / 3.0 + c / 2.0 + d) / dudt;
    }

    let upper_e = Complex::cis(-2.0 * PI * n as f64 * upper);
    let lower_e = Complex::cis(-2.0 * PI * n as f64 * lower);

    match seg.degree() {
        1 => {
            // Two terms: the polynomial and its constant derivative.
            // In the power basis a = b = 0, d = p0 and c = p1 − p0.
            ((c + d) * upper_e - d * lower_e) / denom
                - (dudt * c * (upper_e - lower_e)) / (denom * denom)
        }
        _ => {
            let denom2 = denom * denom;
            let denom3 = denom2 * denom;
            let denom4 = denom3 * denom;
            let first = ((a + b + c + d) * upper_e - d * lower_e) / denom;
            let second =
                -(dudt * ((3.0 * a + 2.0 * b + c) * upper_e - c * lower_e)) / denom2;
            let third =
                (dudt * dudt * ((6.0 * a + 2.0 * b) * upper_e - 2.0 * b * lower_e))
                    / denom3;
            let fourth =
                -(dudt * dudt * dudt * 6.0 * a * (upper_e - lower_e)) / denom4;
            first + second + third + fourth
        }
    }
}
