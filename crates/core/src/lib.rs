//! Core constants, unit helpers, and shared primitives for the formation flight workspace.

/// Physical constants expressed in kilometre/second units.
pub mod constants {
    /// Earth's gravitational parameter G·M (km³/s²).
    pub const MU_EARTH: f64 = 398_600.44;
    /// Earth's equatorial radius (km).
    pub const EARTH_RADIUS_KM: f64 = 6_378.14;
    /// Seconds in a 365-day year.
    pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }
}

/// Angle utilities shared by every call site that wraps an angle.
pub mod angles {
    use std::f64::consts::{PI, TAU};

    /// Wrap an angle into the principal range `(-π, π]`.
    #[inline]
    pub fn wrap_pi(angle: f64) -> f64 {
        let wrapped = (angle + PI).rem_euclid(TAU) - PI;
        if wrapped <= -PI { wrapped + TAU } else { wrapped }
    }
}

/// Minimal vector and matrix helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in kilometres or km/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Row-major 3×3 matrix.
    pub type Matrix3 = [[f64; 3]; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Matrix-vector product `m · v`.
    #[inline]
    pub fn mat_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
        [dot(&m[0], v), dot(&m[1], v), dot(&m[2], v)]
    }

    /// Matrix product `a · b`.
    pub fn mat_mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| a[row][k] * b[k][col]).sum();
            }
        }
        out
    }

    /// Matrix transpose.
    #[inline]
    pub fn transpose(m: &Matrix3) -> Matrix3 {
        [
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ]
    }
}
