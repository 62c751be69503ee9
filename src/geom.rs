//! Shared geometry primitives.
//!
//! Points are complex numbers: the real part is x and the imaginary
//! part is y. The same type doubles as the value of a Fourier
//! coefficient, so the arithmetic here covers both uses.

use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2D point / complex value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Complex {
        Complex { re, im }
    }

    /// `e^{iθ}`, the unit vector at angle `theta`.
    pub fn cis(theta: f64) -> Complex {
        Complex::new(theta.cos(), theta.sin())
    }

    /// Euclidean norm.
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }
}

impl From<Complex> for kurbo::Point {
    fn from(p: Complex) -> kurbo::Point {
        kurbo::Point::new(p.re, p.im)
    }
}

impl Add for Complex {
    type Output = Complex;
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;
    fn mul(self, rhs: f64) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;
    fn mul(self, rhs: Complex) -> Complex {
        rhs * self
    }
}

impl Div for Complex {
    type Output = Complex;
    fn div(self, rhs: Complex) -> Complex {
        let d = rhs.re * rhs.re + rhs.im * rhs.im;
        Complex::new(
            (self.re * rhs.re + self.im * rhs.im) / d,
            (self.im * rhs.re - self.re * rhs.im) / d,
        )
    }
}

impl Div<f64> for Complex {
    type Output = Complex;
    fn div(self, rhs: f64) -> Complex {
        Complex::new(self.re / rhs, self.im / rhs)
    }
}

impl Sum for Complex {
    fn sum<I: Iterator<Item = Complex>>(iter: I) -> Complex {
        iter.fold(Complex::ZERO, Add::add)
    }
}

/// Linear interpolation between two points.
pub fn lerp(p0: Complex, p1: Complex, t: f64) -> Complex {
    (1.0 - t) * p0 + t * p1
}

/// Euclidean distance between two points.
pub fn dist(p1: Complex, p2: Complex) -> f64 {
    (p1 - p2).norm()
}

/// Real roots of `a·x² + b·x + c = 0`.
///
/// A zero leading coefficient or a negative discriminant is an ordinary
/// outcome, reported as absent roots rather than an error.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> (Option<f64>, Option<f64>) {
    if a == 0.0 {
        return (None, None);
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return (None, None);
    }
    let root = disc.sqrt();
    (Some((-b + root) / (2.0 * a)), Some((-b - root) / (2.0 * a)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let p0 = Complex::new(0.0, 0.0);
        let p1 = Complex::new(4.0, 2.0);
        assert_eq!(lerp(p0, p1, 0.0), p0);
        assert_eq!(lerp(p0, p1, 1.0), p1);
        assert_eq!(lerp(p0, p1, 0.5), Complex::new(2.0, 1.0));
    }

    #[test]
    fn quadratic_two_roots() {
        // x² - 3x + 2 = (x-1)(x-2)
        let (a, b) = solve_quadratic(1.0, -3.0, 2.0);
        assert_relative_eq!(a.unwrap(), 2.0);
        assert_relative_eq!(b.unwrap(), 1.0);
    }

    #[test]
    fn quadratic_degenerate_leading_coefficient() {
        assert_eq!(solve_quadratic(0.0, 2.0, 1.0), (None, None));
    }

    #[test]
    fn quadratic_negative_discriminant() {
        assert_eq!(solve_quadratic(1.0, 0.0, 1.0), (None, None));
    }

    #[test]
    fn complex_division_inverts_multiplication() {
        let a = Complex::new(3.0, -2.0);
        let b = Complex::new(-1.5, 4.0);
        let q = (a * b) / b;
        assert_relative_eq!(q.re, a.re, epsilon = 1e-12);
        assert_relative_eq!(q.im, a.im, epsilon = 1e-12);
    }

    #[test]
    fn cis_is_unit_rotation() {
        let z = Complex::cis(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(z.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn dist_is_euclidean() {
        assert_relative_eq!(
            dist(Complex::new(0.0, 0.0), Complex::new(3.0, 4.0)),
            5.0
        );
    }
}
