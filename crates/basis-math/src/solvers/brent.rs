//! Brent's method on a sign-changing bracket.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Finds a root of `f` inside `[a, b]`.
///
/// Combines bisection, the secant method and inverse quadratic
/// interpolation. Requires `f(a)` and `f(b)` to have opposite signs (or one
/// of them to be exactly zero).
///
/// Iteration stops when the bracket around the best estimate is narrower
/// than `config.tolerance` (an abscissa tolerance), or when the function
/// value is exactly zero.
///
/// # Errors
///
/// - [`MathError::InvalidBracket`] if the endpoints do not straddle a root
/// - [`MathError::ConvergenceFailed`] if the iteration budget runs out
///
/// # Example
///
/// ```rust
/// use basis_math::solvers::{brent, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 1.521_379_706_804_568).abs() < 1e-9);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: 0.0,
        });
    }
    if fb == 0.0 {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: 0.0,
        });
    }
    if !(fa * fb < 0.0) {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // c is the contrapoint: [b, c] always brackets the root.
    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        // Keep b as the best estimate.
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let half_width = 0.5 * (c - b);

        if half_width.abs() <= tol || fb == 0.0 {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step
                (2.0 * half_width * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let qa = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half_width * qa * (qa - r) - (b - a) * (r - 1.0)),
                    (qa - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let bound_interp = 3.0 * half_width * q - (tol * q).abs();
            let bound_prev = (e * q).abs();

            if 2.0 * p < bound_interp.min(bound_prev) {
                e = d;
                d = p / q;
            } else {
                d = half_width;
                e = d;
            }
        } else {
            d = half_width;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(half_width) };
        fb = f(b);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
        b,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_sin_near_pi() {
        let result = brent(f64::sin, 3.0, 4.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x - 0.3;
        let result = brent(f, 1.0, -1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.3, epsilon = 1e-10);
    }

    #[test]
    fn test_endpoint_is_root() {
        let f = |x: f64| x - 1.0;
        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        let err = brent(f, 2.0, 3.0, &SolverConfig::default()).unwrap_err();

        assert!(matches!(err, MathError::InvalidBracket { .. }));
    }

    #[test]
    fn test_coarse_tolerance_stops_early() {
        let f = |x: f64| x * x - 2.0;

        let coarse = brent(f, 0.0, 2.0, &SolverConfig::new(1e-3, 100)).unwrap();
        let fine = brent(f, 0.0, 2.0, &SolverConfig::new(1e-12, 100)).unwrap();

        assert!((coarse.root - std::f64::consts::SQRT_2).abs() < 1e-3);
        assert!(coarse.iterations <= fine.iterations);
    }
}
