//! Linearized relative-motion propagation of a chief/deputy pair.
//!
//! Both mean anomalies are advanced with two-body mean motion, the inertial
//! states give each satellite's argument of latitude, and a fixed 6×4 map
//! built from the relative orbit elements turns the regressor
//! `[1, Δu_elapsed, cos uC, sin uC]` into a normalized Hill-frame relative
//! state. Positions are scaled by the chief semi-major axis and velocities by
//! the chief's instantaneous speed.

use formation_core::angles::wrap_pi;
use formation_core::vector::{Vector3, scale};
use formation_orbits::{OrbitError, OrbitalElements, StateVector, state_from_elements};
use log::{debug, trace};

use crate::FormationError;
use crate::trajectory::{PREALLOCATED_SAMPLES, RelativeSample, RelativeTrajectory};

/// Propagation duration and step, both in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub duration_s: f64,
    pub timestep_s: f64,
}

impl Schedule {
    /// Build a schedule, rejecting non-positive or non-finite values.
    pub fn new(duration_s: f64, timestep_s: f64) -> Result<Self, FormationError> {
        let schedule = Self {
            duration_s,
            timestep_s,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<(), FormationError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.duration_s) && valid(self.timestep_s) {
            Ok(())
        } else {
            Err(FormationError::MalformedSchedule {
                duration_s: self.duration_s,
                timestep_s: self.timestep_s,
            })
        }
    }

    /// Number of samples `t = k·timestep` with `t < duration`.
    ///
    /// Returns zero for a malformed schedule.
    pub fn sample_count(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut count = (self.duration_s / self.timestep_s).ceil() as usize;
        while count > 0 && self.time_at(count - 1) >= self.duration_s {
            count -= 1;
        }
        while count < usize::MAX && self.time_at(count) < self.duration_s {
            count += 1;
        }
        count
    }

    /// Schedule time of sample `index`.
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.timestep_s
    }
}

/// Relative-orbit-element coefficients of the linear relative state model.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RelativeModel {
    rows: [[f64; 4]; 6],
    d_raan: f64,
}

impl RelativeModel {
    fn new(chief: &OrbitalElements, deputy: &OrbitalElements) -> Self {
        let (sin_i, cos_i) = chief.i.sin_cos();
        let ix = deputy.i - chief.i;
        let iy = sin_i * (deputy.raan - chief.raan);
        let [ecx, ecy] = chief.eccentricity_vector();
        let [edx, edy] = deputy.eccentricity_vector();
        let ex = edx - ecx;
        let ey = edy - ecy;
        let da = (deputy.a - chief.a) / chief.a;
        let d_raan = (deputy.raan - chief.raan) * cos_i;

        Self {
            rows: [
                [da, 0.0, -ex, -ey],
                [d_raan, -1.5 * da, 0.0, 0.0],
                [0.0, 0.0, -iy, ix],
                [0.0, 0.0, -ey, ex],
                [-1.5 * da, 0.0, 0.0, 0.0],
                [0.0, 0.0, ix, iy],
            ],
            d_raan,
        }
    }

    /// Normalized relative position and velocity for one sample.
    ///
    /// Row 1, column 0 is the only time-varying coefficient: `du + dR`.
    fn evaluate(&self, du: f64, regressor: &[f64; 4]) -> (Vector3, Vector3) {
        let mut rows = self.rows;
        rows[1][0] = du + self.d_raan;
        let apply = |row: &[f64; 4]| row.iter().zip(regressor).map(|(c, r)| c * r).sum::<f64>();
        (
            [apply(&rows[0]), apply(&rows[1]), apply(&rows[2])],
            [apply(&rows[3]), apply(&rows[4]), apply(&rows[5])],
        )
    }
}

/// Chief/deputy pair prepared for relative propagation.
#[derive(Debug, Clone)]
pub struct RelativePropagator {
    chief: OrbitalElements,
    deputy: OrbitalElements,
    schedule: Schedule,
    mu: f64,
    model: RelativeModel,
    chief_mean_motion: f64,
    deputy_mean_motion: f64,
}

impl RelativePropagator {
    /// Prepare a propagation; both element sets are in radians.
    ///
    /// Fails early on a malformed schedule or on elements that cannot produce
    /// a state vector.
    pub fn new(
        chief: OrbitalElements,
        deputy: OrbitalElements,
        schedule: Schedule,
        mu: f64,
    ) -> Result<Self, FormationError> {
        schedule.validate()?;
        state_from_elements(&chief, mu)?;
        state_from_elements(&deputy, mu)?;

        Ok(Self {
            model: RelativeModel::new(&chief, &deputy),
            chief_mean_motion: chief.mean_motion(mu),
            deputy_mean_motion: deputy.mean_motion(mu),
            chief,
            deputy,
            schedule,
            mu,
        })
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Lazily evaluated samples, in time order.
    pub fn samples(&self) -> RelativeSamples<'_> {
        RelativeSamples {
            propagator: self,
            index: 0,
            count: self.schedule.sample_count(),
            chief_mean_anomaly: self.chief.m,
            deputy_mean_anomaly: self.deputy.m,
            chief_latitude_origin: None,
        }
    }

    /// Evaluate every sample into a [`RelativeTrajectory`].
    pub fn propagate(&self) -> Result<RelativeTrajectory, FormationError> {
        let capacity = self.schedule.sample_count().min(PREALLOCATED_SAMPLES);
        let mut trajectory = RelativeTrajectory::with_capacity(capacity);
        for sample in self.samples() {
            trajectory.push(sample?);
        }
        debug!(
            "propagated {} samples over {} s (extents {:?} km)",
            trajectory.len(),
            self.schedule.duration_s,
            trajectory.position_extents()
        );
        Ok(trajectory)
    }

    fn states(
        &self,
        chief_mean_anomaly: f64,
        deputy_mean_anomaly: f64,
    ) -> Result<(StateVector, StateVector), OrbitError> {
        let chief = OrbitalElements {
            m: chief_mean_anomaly,
            ..self.chief
        };
        let deputy = OrbitalElements {
            m: deputy_mean_anomaly,
            ..self.deputy
        };
        Ok((
            state_from_elements(&chief, self.mu)?,
            state_from_elements(&deputy, self.mu)?,
        ))
    }
}

/// Streaming iterator over relative samples; stops after the first error.
#[derive(Debug, Clone)]
pub struct RelativeSamples<'a> {
    propagator: &'a RelativePropagator,
    index: usize,
    count: usize,
    chief_mean_anomaly: f64,
    deputy_mean_anomaly: f64,
    chief_latitude_origin: Option<f64>,
}

impl RelativeSamples<'_> {
    fn step(&mut self) -> Result<RelativeSample, FormationError> {
        let p = self.propagator;
        let timestep = p.schedule.timestep_s;

        self.chief_mean_anomaly = wrap_pi(self.chief_mean_anomaly + p.chief_mean_motion * timestep);
        self.deputy_mean_anomaly =
            wrap_pi(self.deputy_mean_anomaly + p.deputy_mean_motion * timestep);
        let (chief_state, deputy_state) =
            p.states(self.chief_mean_anomaly, self.deputy_mean_anomaly)?;

        let u_chief = wrap_pi(chief_state.true_anomaly + p.chief.w);
        let u_deputy = wrap_pi(deputy_state.true_anomaly + p.deputy.w);
        let du = wrap_pi(u_deputy - u_chief);
        let u_chief_0 = *self.chief_latitude_origin.get_or_insert(u_chief);
        let du_elapsed = wrap_pi(u_deputy - u_chief_0);

        let (sin_u, cos_u) = u_chief.sin_cos();
        let (position, velocity) = p.model.evaluate(du, &[1.0, du_elapsed, cos_u, sin_u]);
        let mut position = scale(&position, p.chief.a);
        let mut velocity = scale(&velocity, chief_state.speed());
        // Cross-track axis points opposite to the model's orbit normal.
        position[2] = -position[2];
        velocity[2] = -velocity[2];

        let time_s = p.schedule.time_at(self.index);
        trace!("t = {time_s} s: du = {du}, position = {position:?} km");
        Ok(RelativeSample {
            time_s,
            position,
            velocity,
        })
    }
}

impl Iterator for RelativeSamples<'_> {
    type Item = Result<RelativeSample, FormationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let result = self.step();
        self.index = if result.is_ok() {
            self.index + 1
        } else {
            self.count
        };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

/// Propagate `chief` and `deputy` (radians) over `schedule`.
pub fn propagate(
    chief: &OrbitalElements,
    deputy: &OrbitalElements,
    schedule: Schedule,
    mu: f64,
) -> Result<RelativeTrajectory, FormationError> {
    RelativePropagator::new(*chief, *deputy, schedule, mu)?.propagate()
}

/// Like [`propagate`], but refuses schedules needing more than `max_samples` samples.
pub fn propagate_bounded(
    chief: &OrbitalElements,
    deputy: &OrbitalElements,
    schedule: Schedule,
    mu: f64,
    max_samples: usize,
) -> Result<RelativeTrajectory, FormationError> {
    schedule.validate()?;
    let requested = schedule.sample_count();
    if requested > max_samples {
        return Err(FormationError::SampleLimitExceeded {
            requested,
            limit: max_samples,
        });
    }
    propagate(chief, deputy, schedule, mu)
}
