//! Conversions between mean, eccentric, and true anomaly for elliptical orbits.
//!
//! Mean to eccentric anomaly is the only iterative step: Kepler's equation
//! `E - e·sin(E) = M` is solved by Newton–Raphson seeded at `E₀ = M`, kept inside
//! the bracket `[M - e, M + e]` by bisection fallback. The remaining conversions
//! are closed form. All angles are radians.

use log::trace;

use crate::{OrbitError, check_eccentricity, check_finite};

/// Step size below which the Newton iteration is considered converged (rad).
pub const KEPLER_TOLERANCE: f64 = 1.0e-6;
/// Newton iterations allowed before giving up with a convergence failure.
pub const KEPLER_MAX_ITERATIONS: usize = 100;

/// Newton–Raphson solver for Kepler's equation with configurable stopping rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            tolerance: KEPLER_TOLERANCE,
            max_iterations: KEPLER_MAX_ITERATIONS,
        }
    }
}

impl KeplerSolver {
    /// Solve `E - e·sin(E) - M = 0` for the eccentric anomaly.
    pub fn eccentric_anomaly(&self, mean_anomaly: f64, e: f64) -> Result<f64, OrbitError> {
        check_eccentricity(e)?;
        check_finite("mean anomaly", mean_anomaly)?;

        // The root always lies in [M - e, M + e]; Newton steps leaving the
        // bracket are replaced by bisection.
        let mut lower = mean_anomaly - e;
        let mut upper = mean_anomaly + e;
        let mut ecc_anomaly = mean_anomaly;
        for iteration in 1..=self.max_iterations {
            let f = ecc_anomaly - e * ecc_anomaly.sin() - mean_anomaly;
            if f == 0.0 {
                return Ok(ecc_anomaly);
            }
            if f > 0.0 {
                upper = ecc_anomaly;
            } else {
                lower = ecc_anomaly;
            }

            let f_prime = 1.0 - e * ecc_anomaly.cos();
            let newton = ecc_anomaly - f / f_prime;
            let accepted = (lower..=upper).contains(&newton);
            let next = if accepted {
                newton
            } else {
                0.5 * (lower + upper)
            };
            let step = (next - ecc_anomaly).abs();
            ecc_anomaly = next;
            if accepted && step < self.tolerance {
                trace!("kepler converged in {iteration} iterations (M = {mean_anomaly}, e = {e})");
                return Ok(ecc_anomaly);
            }
        }

        Err(OrbitError::ConvergenceFailure {
            mean_anomaly,
            eccentricity: e,
            iterations: self.max_iterations,
        })
    }
}

/// Mean anomaly to eccentric anomaly using the default solver settings.
pub fn mean_to_eccentric(mean_anomaly: f64, e: f64) -> Result<f64, OrbitError> {
    KeplerSolver::default().eccentric_anomaly(mean_anomaly, e)
}

/// Mean anomaly to true anomaly via the perifocal polar position.
///
/// The result lies in `(-π, π]`.
pub fn mean_to_true(mean_anomaly: f64, e: f64) -> Result<f64, OrbitError> {
    let ecc_anomaly = mean_to_eccentric(mean_anomaly, e)?;
    let x = ecc_anomaly.cos() - e;
    let y = (1.0 - e * e).sqrt() * ecc_anomaly.sin();
    Ok(y.atan2(x))
}

/// True anomaly to eccentric anomaly (closed form).
pub fn true_to_eccentric(true_anomaly: f64, e: f64) -> Result<f64, OrbitError> {
    check_eccentricity(e)?;
    check_finite("true anomaly", true_anomaly)?;
    let factor = ((1.0 - e) / (1.0 + e)).sqrt();
    Ok(2.0 * (factor * (true_anomaly / 2.0).tan()).atan())
}

/// Eccentric anomaly to mean anomaly, `M = E - e·sin(E)`.
pub fn eccentric_to_mean(ecc_anomaly: f64, e: f64) -> Result<f64, OrbitError> {
    check_eccentricity(e)?;
    check_finite("eccentric anomaly", ecc_anomaly)?;
    Ok(ecc_anomaly - e * ecc_anomaly.sin())
}

/// True anomaly to mean anomaly.
pub fn true_to_mean(true_anomaly: f64, e: f64) -> Result<f64, OrbitError> {
    eccentric_to_mean(true_to_eccentric(true_anomaly, e)?, e)
}
