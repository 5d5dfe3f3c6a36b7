//! Classical Keplerian element set.

use std::f64::consts::TAU;

use formation_core::units::{deg_to_rad, rad_to_deg};

/// Six osculating Keplerian elements. Angles are stored in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis (km).
    pub a: f64,
    /// Eccentricity, `0 ≤ e < 1`.
    pub e: f64,
    /// Inclination (rad).
    pub i: f64,
    /// Argument of perigee (rad).
    pub w: f64,
    /// Right ascension of the ascending node (rad).
    pub raan: f64,
    /// Mean anomaly (rad).
    pub m: f64,
}

impl OrbitalElements {
    /// Build an element set from radians.
    pub fn new(a: f64, e: f64, i: f64, w: f64, raan: f64, m: f64) -> Self {
        Self {
            a,
            e,
            i,
            w,
            raan,
            m,
        }
    }

    /// Build an element set whose four angles are given in degrees.
    pub fn from_degrees(a: f64, e: f64, i_deg: f64, w_deg: f64, raan_deg: f64, m_deg: f64) -> Self {
        Self::new(
            a,
            e,
            deg_to_rad(i_deg),
            deg_to_rad(w_deg),
            deg_to_rad(raan_deg),
            deg_to_rad(m_deg),
        )
    }

    /// Return `(a, e, i, w, raan, m)` with the angles in degrees.
    pub fn to_degrees(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.a,
            self.e,
            rad_to_deg(self.i),
            rad_to_deg(self.w),
            rad_to_deg(self.raan),
            rad_to_deg(self.m),
        )
    }

    /// Mean motion `sqrt(mu / a³)` (rad/s).
    pub fn mean_motion(&self, mu: f64) -> f64 {
        (mu / self.a.powi(3)).sqrt()
    }

    /// Orbital period (s).
    pub fn period(&self, mu: f64) -> f64 {
        TAU / self.mean_motion(mu)
    }

    /// Perigee radius `a(1 - e)` (km).
    pub fn perigee_radius(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    /// Eccentricity vector `(e cos w, e sin w)` in the orbit plane.
    pub fn eccentricity_vector(&self) -> [f64; 2] {
        [self.e * self.w.cos(), self.e * self.w.sin()]
    }
}
