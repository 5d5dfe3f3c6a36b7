//! Deputy orbit resolution from a requested formation geometry.
//!
//! Uses the linearized eccentricity/inclination-vector separation: the radial
//! amplitude sets the relative eccentricity vector, the cross-track amplitude
//! sets the relative inclination vector, and the deputy mean anomaly is chosen
//! so its argument of latitude matches the chief's (plus any in-track offset).
//! Both satellites share the chief's semi-major axis, as the HCW model assumes.

use formation_orbits::{OrbitError, OrbitalElements, mean_to_true, true_to_mean};
use log::debug;

use crate::FormationError;
use crate::geometry::FormationGeometry;

/// `|sin i|` below which the RAAN correction is treated as singular.
pub const SINGULARITY_TOLERANCE: f64 = 1.0e-10;

/// Resolve the deputy elements (radians) realizing `geometry` around `chief` (radians).
pub fn resolve_deputy(
    chief: &OrbitalElements,
    geometry: &FormationGeometry,
) -> Result<OrbitalElements, FormationError> {
    let a_d = chief.a;

    let de = geometry.radial / chief.a;
    let [ecx, ecy] = chief.eccentricity_vector();
    let ed_x = ecx + de * geometry.relative_pericenter.cos();
    let ed_y = ecy + de * geometry.relative_pericenter.sin();
    let e_d = ed_x.hypot(ed_y);
    let w_d = ed_y.atan2(ed_x);
    if !(0.0..1.0).contains(&e_d) {
        return Err(OrbitError::OutOfDomain {
            quantity: "deputy eccentricity",
            value: e_d,
        }
        .into());
    }

    let cross_ratio = geometry.cross_track / chief.a;
    if !(-1.0..=1.0).contains(&cross_ratio) {
        return Err(OrbitError::OutOfDomain {
            quantity: "cross-track amplitude ratio",
            value: cross_ratio,
        }
        .into());
    }
    let sin_i = chief.i.sin();
    if sin_i.abs() < SINGULARITY_TOLERANCE {
        return Err(FormationError::SingularGeometry {
            inclination: chief.i,
        });
    }
    let di = cross_ratio.asin();
    let i_d = chief.i + di * geometry.latitude_crossing.cos();
    let raan_d = chief.raan + di * geometry.latitude_crossing.sin() / sin_i;

    let nu_c = mean_to_true(chief.m, chief.e)?;
    let offset = geometry.in_track_offset / a_d;
    let nu_d = nu_c + chief.w - w_d + (raan_d - chief.raan) * chief.i.cos() + offset;
    let m_d = true_to_mean(nu_d, e_d)?;

    let deputy = OrbitalElements::new(a_d, e_d, i_d, w_d, raan_d, m_d);
    debug!("resolved deputy elements: {deputy:?}");
    Ok(deputy)
}

/// Degree-boundary form of [`resolve_deputy`]: angles of `chief` and `geometry`
/// are interpreted in degrees and the deputy is returned in degrees.
pub fn resolve_deputy_degrees(
    chief_deg: &OrbitalElements,
    geometry_deg: &FormationGeometry,
) -> Result<OrbitalElements, FormationError> {
    let (a, e, i, w, raan, m) = (
        chief_deg.a,
        chief_deg.e,
        chief_deg.i,
        chief_deg.w,
        chief_deg.raan,
        chief_deg.m,
    );
    let chief = OrbitalElements::from_degrees(a, e, i, w, raan, m);
    let geometry = FormationGeometry::from_degrees(
        geometry_deg.radial,
        geometry_deg.in_track,
        geometry_deg.in_track_offset,
        geometry_deg.cross_track,
        geometry_deg.relative_pericenter,
        geometry_deg.latitude_crossing,
    );
    let (a, e, i, w, raan, m) = resolve_deputy(&chief, &geometry)?.to_degrees();
    Ok(OrbitalElements::new(a, e, i, w, raan, m))
}
