//! Two-body orbit helpers: Kepler's equation, anomaly conversions, 3-1-3 frame
//! rotations, and inertial state vectors from classical elements.

pub mod anomaly;
pub mod elements;
pub mod rotation;
pub mod state;

pub use anomaly::{
    KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE, KeplerSolver, eccentric_to_mean, mean_to_eccentric,
    mean_to_true, true_to_eccentric, true_to_mean,
};
pub use elements::OrbitalElements;
pub use rotation::{Axis, perifocal_to_inertial, rotation_about_axis};
pub use state::{StateVector, state_from_elements, state_from_parts};

use thiserror::Error;

/// Errors raised by the anomaly and state-vector routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error(
        "Kepler's equation did not converge after {iterations} iterations (M = {mean_anomaly} rad, e = {eccentricity})"
    )]
    ConvergenceFailure {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
    },
    #[error("{quantity} out of domain: {value}")]
    OutOfDomain { quantity: &'static str, value: f64 },
}

/// Reject eccentricities outside the closed-ellipse range `[0, 1)`.
pub(crate) fn check_eccentricity(e: f64) -> Result<(), OrbitError> {
    if e.is_finite() && (0.0..1.0).contains(&e) {
        Ok(())
    } else {
        Err(OrbitError::OutOfDomain {
            quantity: "eccentricity",
            value: e,
        })
    }
}

/// Reject NaN and infinite angles before they reach the trigonometry.
pub(crate) fn check_finite(quantity: &'static str, value: f64) -> Result<(), OrbitError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OrbitError::OutOfDomain { quantity, value })
    }
}
