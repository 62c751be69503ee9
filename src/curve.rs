//! Bezier segments and the PolyBezier subpath chain.
//!
//! Exactly two segment kinds exist: linear (degree 1) and cubic
//! (degree 3). Derived data (arc length, bounding box) is computed
//! once at construction and cached; segments are immutable
//! afterwards.

use kurbo::Rect;

use crate::error::PathError;
use crate::geom::{dist, lerp, solve_quadratic, Complex};

/// Control points of a segment, tagged by degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPoints {
    Linear([Complex; 2]),
    Cubic([Complex; 4]),
}

/// One bezier segment with cached derived data.
#[derive(Debug, Clone)]
pub struct Bezier {
    points: ControlPoints,
    dist: f64,
    bbox: Rect,
}

impl Bezier {
    /// Build a segment from its control points.
    ///
    /// `dt` is the sampling step for the cubic arc-length approximation.
    /// Any point count other than 2 or 4 is a construction error.
    pub fn new(points: &[Complex], dt: f64) -> Result<Bezier, PathError> {
        let points = match *points {
            [p0, p1] => ControlPoints::Linear([p0, p1]),
            [p0, p1, p2, p3] => ControlPoints::Cubic([p0, p1, p2, p3]),
            _ => return Err(PathError::UnsupportedDegree(points.len())),
        };
        let dist = match points {
            ControlPoints::Linear([p0, p1]) => dist(p0, p1),
            ControlPoints::Cubic(_) => sampled_dist(&points, dt),
        };
        let bbox = match points {
            ControlPoints::Linear([p0, p1]) => Rect::from_points(p0, p1),
            ControlPoints::Cubic(pts) => cubic_bbox(&pts),
        };
        Ok(Bezier { points, dist, bbox })
    }

    pub fn points(&self) -> &ControlPoints {
        &self.points
    }

    pub fn degree(&self) -> usize {
        match self.points {
            ControlPoints::Linear(_) => 1,
            ControlPoints::Cubic(_) => 3,
        }
    }

    pub fn start(&self) -> Complex {
        match self.points {
            ControlPoints::Linear([p0, _]) => p0,
            ControlPoints::Cubic([p0, ..]) => p0,
        }
    }

    pub fn end(&self) -> Complex {
        match self.points {
            ControlPoints::Linear([_, p1]) => p1,
            ControlPoints::Cubic([.., p3]) => p3,
        }
    }

    /// Evaluate the curve at `t` ∈ [0, 1].
    pub fn eval(&self, t: f64) -> Complex {
        eval_points(&self.points, t)
    }

    /// Arc length: exact for linear segments, sampled for cubics.
    pub fn dist(&self) -> f64 {
        self.dist
    }

    pub fn bounding_box(&self) -> Rect {
        self.bbox
    }

    /// Power-basis coefficients `a·t³ + b·t² + c·t + d`, the form the
    /// coefficient engine integrates. For linear segments a = b = 0.
    pub fn power_basis(&self) -> [Complex; 4] {
        match self.points {
            ControlPoints::Linear([p0, p1]) => {
                [Complex::ZERO, Complex::ZERO, p1 - p0, p0]
            }
            ControlPoints::Cubic([p0, p1, p2, p3]) => [
                -p0 + 3.0 * p1 - 3.0 * p2 + p3,
                3.0 * p0 - 6.0 * p1 + 3.0 * p2,
                -3.0 * p0 + 3.0 * p1,
                p0,
            ],
        }
    }
}

fn eval_points(points: &ControlPoints, t: f64) -> Complex {
    match *points {
        ControlPoints::Linear([p0, p1]) => lerp(p0, p1, t),
        ControlPoints::Cubic([p0, p1, p2, p3]) => {
            let u = 1.0 - t;
            u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
        }
    }
}

/// Piecewise-linear arc length: sample the curve at a fixed step over
/// [0, 1] and sum consecutive chord lengths. An under-approximation
/// that tightens monotonically as `dt` shrinks.
fn sampled_dist(points: &ControlPoints, dt: f64) -> f64 {
    debug_assert!(dt > 0.0);
    let steps = (1.0 / dt).ceil() as usize;
    let mut total = 0.0;
    let mut prev = eval_points(points, 0.0);
    for k in 1..=steps {
        let p = eval_points(points, (k as f64 * dt).min(1.0));
        total += dist(prev, p);
        prev = p;
    }
    total
}

/// Tight cubic bounding box: endpoints plus any interior extremum of
/// the x or y component. The component derivatives are quadratics, so
/// candidate parameters come straight out of the quadratic solver.
fn cubic_bbox(pts: &[Complex; 4]) -> Rect {
    let [p0, p1, p2, p3] = *pts;

    // Derivative of the cubic Bernstein polynomial, per component.
    let a = -3.0 * p0 + 9.0 * p1 - 9.0 * p2 + 3.0 * p3;
    let b = 6.0 * p0 - 12.0 * p1 + 6.0 * p2;
    let c = -3.0 * p0 + 3.0 * p1;

    let (tx1, tx2) = solve_quadratic(a.re, b.re, c.re);
    let (ty1, ty2) = solve_quadratic(a.im, b.im, c.im);

    let mut candidates = vec![p0, p3];
    for t in [tx1, tx2, ty1, ty2].into_iter().flatten() {
        if (0.0..=1.0).contains(&t) {
            candidates.push(eval_points(&ControlPoints::Cubic(*pts), t));
        }
    }

    let mut min = candidates[0];
    let mut max = candidates[0];
    for p in &candidates[1..] {
        min = Complex::new(min.re.min(p.re), min.im.min(p.im));
        max = Complex::new(max.re.max(p.re), max.im.max(p.im));
    }
    Rect::new(min.re, min.im, max.re, max.im)
}

/// An ordered chain of bezier segments forming one continuous subpath.
#[derive(Debug, Clone)]
pub struct PolyBezier {
    segments: Vec<Bezier>,
    dist: f64,
    bbox: Rect,
}

impl PolyBezier {
    /// Wrap a non-empty segment chain. Continuity (each segment starts
    /// where the previous one ends) is the parser's responsibility.
    pub fn new(segments: Vec<Bezier>) -> PolyBezier {
        debug_assert!(!segments.is_empty());
        debug_assert!(segments
            .windows(2)
            .all(|w| w[0].end() == w[1].start()));
        let dist = segments.iter().map(Bezier::dist).sum();
        let bbox = segments[1..]
            .iter()
            .fold(segments[0].bounding_box(), |acc, seg| {
                acc.union(seg.bounding_box())
            });
        PolyBezier { segments, dist, bbox }
    }

    /// Total arc length (sum of segment lengths).
    pub fn dist(&self) -> f64 {
        self.dist
    }

    pub fn bounding_box(&self) -> Rect {
        self.bbox
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Bezier] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bezier> {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f64 = 0.01;

    fn c(re: f64, im: f64) -> Complex {
        Complex::new(re, im)
    }

    #[test]
    fn wrong_point_count_is_a_construction_error() {
        let pts = [c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)];
        assert!(matches!(
            Bezier::new(&pts, DT),
            Err(PathError::UnsupportedDegree(3))
        ));
        assert!(matches!(
            Bezier::new(&[], DT),
            Err(PathError::UnsupportedDegree(0))
        ));
    }

    #[test]
    fn linear_dist_and_bbox_are_exact() {
        let bez = Bezier::new(&[c(1.0, 2.0), c(4.0, 6.0)], DT).unwrap();
        assert_relative_eq!(bez.dist(), 5.0);
        assert_eq!(bez.bounding_box(), Rect::new(1.0, 2.0, 4.0, 6.0));
    }

    #[test]
    fn cubic_bbox_includes_interior_extrema() {
        // Symmetric arch: peak at t = 0.5 is y = 0.75, above both
        // endpoints and below the control points.
        let bez = Bezier::new(
            &[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0), c(1.0, 0.0)],
            DT,
        )
        .unwrap();
        let bbox = bez.bounding_box();
        assert_relative_eq!(bbox.y0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bbox.y1, 0.75, epsilon = 1e-12);
        assert_relative_eq!(bbox.x0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bbox.x1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn sampled_dist_converges_under_step_halving() {
        let pts = [c(0.0, 0.0), c(1.0, 2.0), c(3.0, -1.0), c(4.0, 0.0)];
        let coarse = Bezier::new(&pts, 0.1).unwrap().dist();
        let medium = Bezier::new(&pts, 0.05).unwrap().dist();
        let fine = Bezier::new(&pts, 0.025).unwrap().dist();

        // Halving the step refines the chord partition, so the
        // estimate can only grow toward the true length.
        assert!(medium >= coarse);
        assert!(fine >= medium);
        // And the improvement per refinement shrinks.
        assert!((fine - medium) <= (medium - coarse) + 1e-12);
    }

    #[test]
    fn polybezier_aggregates_dist_and_bbox() {
        // Unit-scaled rectangle from 4 linear segments.
        let corners = [c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0)];
        let segments: Vec<Bezier> = (0..4)
            .map(|i| {
                Bezier::new(&[corners[i], corners[(i + 1) % 4]], DT).unwrap()
            })
            .collect();
        let poly = PolyBezier::new(segments);
        assert_eq!(poly.len(), 4);
        assert_relative_eq!(poly.dist(), 40.0);
        assert_eq!(poly.bounding_box(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
