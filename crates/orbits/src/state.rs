//! Inertial position and velocity from classical elements.

use formation_core::vector::{Vector3, mat_vec, norm};

use crate::anomaly::mean_to_eccentric;
use crate::elements::OrbitalElements;
use crate::rotation::perifocal_to_inertial;
use crate::{OrbitError, check_finite};

/// Inertial state at one instant, plus the true anomaly at that instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    /// Inertial position (km).
    pub position: Vector3,
    /// Inertial velocity (km/s).
    pub velocity: Vector3,
    /// True anomaly (rad), in `(-π, π]`.
    pub true_anomaly: f64,
}

impl StateVector {
    /// Distance from the central body (km).
    pub fn radius(&self) -> f64 {
        norm(&self.position)
    }

    /// Inertial speed (km/s).
    pub fn speed(&self) -> f64 {
        norm(&self.velocity)
    }
}

/// Compute the inertial state of `elements` around a body with gravitational parameter `mu`.
pub fn state_from_elements(elements: &OrbitalElements, mu: f64) -> Result<StateVector, OrbitError> {
    if !(mu.is_finite() && mu > 0.0) {
        return Err(OrbitError::OutOfDomain {
            quantity: "gravitational parameter",
            value: mu,
        });
    }
    if !(elements.a.is_finite() && elements.a > 0.0) {
        return Err(OrbitError::OutOfDomain {
            quantity: "semi-major axis",
            value: elements.a,
        });
    }
    check_finite("inclination", elements.i)?;
    check_finite("argument of perigee", elements.w)?;
    check_finite("right ascension", elements.raan)?;

    let OrbitalElements { a, e, m, .. } = *elements;
    let ecc_anomaly = mean_to_eccentric(m, e)?;
    let (sin_e, cos_e) = ecc_anomaly.sin_cos();
    let semi_minor_factor = (1.0 - e * e).sqrt();

    // Perifocal position from the polar equation of the ellipse.
    let x = a * (cos_e - e);
    let y = a * semi_minor_factor * sin_e;
    let r = x.hypot(y);

    let speed_factor = (mu * a).sqrt() / r;
    let vx = -speed_factor * sin_e;
    let vy = speed_factor * semi_minor_factor * cos_e;

    let dcm = perifocal_to_inertial(elements.i, elements.w, elements.raan);

    Ok(StateVector {
        position: mat_vec(&dcm, &[x, y, 0.0]),
        velocity: mat_vec(&dcm, &[vx, vy, 0.0]),
        true_anomaly: y.atan2(x),
    })
}

/// Flat-argument form of [`state_from_elements`]; angles in radians.
pub fn state_from_parts(
    a: f64,
    e: f64,
    i: f64,
    w: f64,
    raan: f64,
    m: f64,
    mu: f64,
) -> Result<StateVector, OrbitError> {
    state_from_elements(&OrbitalElements::new(a, e, i, w, raan, m), mu)
}
