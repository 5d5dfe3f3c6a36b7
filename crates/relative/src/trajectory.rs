//! Hill-frame relative trajectory containers.

use formation_core::vector::Vector3;

/// Most samples reserved up front; longer trajectories grow as samples arrive.
pub const PREALLOCATED_SAMPLES: usize = 1 << 16;

/// One relative-state sample in the chief's Hill frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeSample {
    /// Schedule time of the sample (s).
    pub time_s: f64,
    /// Relative position: radial, in-track, cross-track (km).
    pub position: Vector3,
    /// Relative velocity: radial, in-track, cross-track (km/s).
    pub velocity: Vector3,
}

/// Six equal-length relative position/velocity series plus their sample times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativeTrajectory {
    pub times_s: Vec<f64>,
    pub position_x: Vec<f64>,
    pub position_y: Vec<f64>,
    pub position_z: Vec<f64>,
    pub velocity_x: Vec<f64>,
    pub velocity_y: Vec<f64>,
    pub velocity_z: Vec<f64>,
}

impl RelativeTrajectory {
    /// Empty trajectory with room for `capacity` samples on every axis.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times_s: Vec::with_capacity(capacity),
            position_x: Vec::with_capacity(capacity),
            position_y: Vec::with_capacity(capacity),
            position_z: Vec::with_capacity(capacity),
            velocity_x: Vec::with_capacity(capacity),
            velocity_y: Vec::with_capacity(capacity),
            velocity_z: Vec::with_capacity(capacity),
        }
    }

    /// Append one sample to every series.
    pub fn push(&mut self, sample: RelativeSample) {
        self.times_s.push(sample.time_s);
        self.position_x.push(sample.position[0]);
        self.position_y.push(sample.position[1]);
        self.position_z.push(sample.position[2]);
        self.velocity_x.push(sample.velocity[0]);
        self.velocity_y.push(sample.velocity[1]);
        self.velocity_z.push(sample.velocity[2]);
    }

    pub fn len(&self) -> usize {
        self.times_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times_s.is_empty()
    }

    /// Iterate the series back as per-sample records, in time order.
    pub fn samples(&self) -> impl Iterator<Item = RelativeSample> + '_ {
        (0..self.len()).map(move |k| RelativeSample {
            time_s: self.times_s[k],
            position: [self.position_x[k], self.position_y[k], self.position_z[k]],
            velocity: [self.velocity_x[k], self.velocity_y[k], self.velocity_z[k]],
        })
    }

    /// Largest absolute value reached on each position axis (km).
    pub fn position_extents(&self) -> Vector3 {
        [
            max_abs(&self.position_x),
            max_abs(&self.position_y),
            max_abs(&self.position_z),
        ]
    }
}

impl FromIterator<RelativeSample> for RelativeTrajectory {
    fn from_iter<I: IntoIterator<Item = RelativeSample>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let capacity = iter.size_hint().0.min(PREALLOCATED_SAMPLES);
        let mut trajectory = Self::with_capacity(capacity);
        for sample in iter {
            trajectory.push(sample);
        }
        trajectory
    }
}

fn max_abs(series: &[f64]) -> f64 {
    series.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}
