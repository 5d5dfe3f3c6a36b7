//! Formation design façade: resolves the deputy orbit for a requested geometry
//! and propagates the chief/deputy pair into a Hill-frame relative trajectory.

pub mod deputy;
pub mod geometry;
pub mod propagator;
pub mod trajectory;

pub use facade::*;
pub use formation_orbits as orbits;

mod facade;

use formation_orbits::OrbitError;

/// Top-level formation computation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormationError {
    #[error("orbit computation failed: {0}")]
    Orbit(#[from] OrbitError),
    #[error("chief inclination {inclination} rad is singular for the formation geometry (sin i ≈ 0)")]
    SingularGeometry { inclination: f64 },
    #[error("malformed schedule: duration {duration_s} s, timestep {timestep_s} s (both must be positive)")]
    MalformedSchedule { duration_s: f64, timestep_s: f64 },
    #[error("schedule needs {requested} samples, limit is {limit}")]
    SampleLimitExceeded { requested: usize, limit: usize },
}
