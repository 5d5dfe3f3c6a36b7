//! Requested formation geometry in the radial/in-track/cross-track frame.

use formation_core::units::deg_to_rad;

/// Formation shape the deputy should fly relative to the chief.
///
/// Lengths in kilometres, angles in radians. `in_track` is carried alongside
/// `radial` for callers that check the `in_track = 2·radial` convention; the
/// deputy resolution only consumes `radial`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormationGeometry {
    /// Radial amplitude `fR` (km).
    pub radial: f64,
    /// In-track amplitude `fI` (km).
    pub in_track: f64,
    /// In-track offset of the formation centre `fO` (km).
    pub in_track_offset: f64,
    /// Cross-track amplitude `fC` (km).
    pub cross_track: f64,
    /// Argument of relative pericenter `fPhi` (rad).
    pub relative_pericenter: f64,
    /// Argument of latitude crossing `fTht` (rad).
    pub latitude_crossing: f64,
}

impl FormationGeometry {
    /// Build a geometry whose two plane angles are given in degrees.
    pub fn from_degrees(
        radial: f64,
        in_track: f64,
        in_track_offset: f64,
        cross_track: f64,
        relative_pericenter_deg: f64,
        latitude_crossing_deg: f64,
    ) -> Self {
        Self {
            radial,
            in_track,
            in_track_offset,
            cross_track,
            relative_pericenter: deg_to_rad(relative_pericenter_deg),
            latitude_crossing: deg_to_rad(latitude_crossing_deg),
        }
    }
}
