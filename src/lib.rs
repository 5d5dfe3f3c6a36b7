//! Chief/deputy formation design and relative trajectory generation.
//!
//! The orbital-mechanics core lives in `formation_orbits` (anomalies, frame
//! rotations, state vectors) and `formation_relative` (deputy resolution and
//! relative propagation). Configuration and export sit on top of it, so
//! multiple front-ends (CLI, GUI, batch tools) can share the same core.

pub use formation_config as config;
pub use formation_core as primitives;
pub use formation_export as export;
pub use formation_orbits as orbits;
pub use formation_relative as relative;
