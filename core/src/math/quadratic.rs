//! Quadratic Equations

use super::Float;

/// Solver for quadratic equations.
pub struct Quadratic {}

impl Quadratic {
    /// Solve the quadratic equation a * x ^ 2  + b * x + c = 0 and return the
    /// real roots in increasing order.
    ///
    /// The caller must handle the degenerate case `a == 0`.
    ///
    /// * `a` - Coefficient of x ^ 2 term.
    /// * `b` - Coefficient of x term.
    /// * `c` - Coefficient of constant term.
    pub fn solve(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
        // Find quadratic discriminant
        let discrim: f64 = b as f64 * b as f64 - 4.0f64 * a as f64 * c as f64;
        if discrim < 0.0 {
            return None;
        }

        let root_discrim = discrim.sqrt() as Float;

        // Compute quadratic _t_ values
        let q = if b < 0.0 {
            -0.5 * (b - root_discrim)
        } else {
            -0.5 * (b + root_discrim)
        };
        if q == 0.0 {
            // b == 0 and c == 0; double root at the origin.
            return Some((0.0, 0.0));
        }

        let t0 = q / a;
        let t1 = c / q;

        if t0 > t1 {
            Some((t1, t0))
        } else {
            Some((t0, t1))
        }
    }
}
