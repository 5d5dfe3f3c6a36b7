//! Single-call entry point used by the configuration, export, and CLI layers.

use formation_core::constants::MU_EARTH;
use formation_orbits::OrbitalElements;
use log::info;

use crate::FormationError;

pub use crate::deputy::{SINGULARITY_TOLERANCE, resolve_deputy, resolve_deputy_degrees};
pub use crate::geometry::FormationGeometry;
pub use crate::propagator::{
    RelativePropagator, RelativeSamples, Schedule, propagate, propagate_bounded,
};
pub use crate::trajectory::{RelativeSample, RelativeTrajectory};

/// Everything needed to design and propagate one chief/deputy formation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub schedule: Schedule,
    /// Chief elements (radians).
    pub chief: OrbitalElements,
    /// Requested geometry (radians).
    pub formation: FormationGeometry,
    /// Central body gravitational parameter (km³/s²).
    pub mu: f64,
    /// Optional cap on the number of samples produced.
    pub max_samples: Option<usize>,
}

impl Scenario {
    /// Scenario around Earth with no sample cap.
    pub fn new(schedule: Schedule, chief: OrbitalElements, formation: FormationGeometry) -> Self {
        Self {
            schedule,
            chief,
            formation,
            mu: MU_EARTH,
            max_samples: None,
        }
    }
}

/// Result of [`run_scenario`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormationSolution {
    /// Deputy elements (radians).
    pub deputy: OrbitalElements,
    pub trajectory: RelativeTrajectory,
}

impl FormationSolution {
    /// Deputy `(a, e, i, w, raan, m)` with the angles in degrees.
    pub fn deputy_degrees(&self) -> (f64, f64, f64, f64, f64, f64) {
        self.deputy.to_degrees()
    }
}

/// Resolve the deputy for `scenario.formation` and propagate the pair.
pub fn run_scenario(scenario: &Scenario) -> Result<FormationSolution, FormationError> {
    scenario.schedule.validate()?;
    if let Some(limit) = scenario.max_samples {
        let requested = scenario.schedule.sample_count();
        if requested > limit {
            return Err(FormationError::SampleLimitExceeded { requested, limit });
        }
    }

    let deputy = resolve_deputy(&scenario.chief, &scenario.formation)?;
    let trajectory =
        RelativePropagator::new(scenario.chief, deputy, scenario.schedule, scenario.mu)?
            .propagate()?;

    info!(
        "formation solved: deputy e = {:.6}, {} samples",
        deputy.e,
        trajectory.len()
    );
    Ok(FormationSolution { deputy, trajectory })
}
