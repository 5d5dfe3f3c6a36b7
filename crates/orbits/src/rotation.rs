//! Elementary direction-cosine matrices and the 3-1-3 Euler sequence.

use formation_core::vector::{Matrix3, mat_mul, transpose};

/// Principal axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Direction-cosine matrix for a rotation of `angle` radians about `axis`.
///
/// The Z form is `[[c, s, 0], [-s, c, 0], [0, 0, 1]]`; X and Y follow the same
/// sign pattern. `perifocal_to_inertial` relies on this convention.
pub fn rotation_about_axis(axis: Axis, angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::X => [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]],
        Axis::Y => [[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]],
        Axis::Z => [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]],
    }
}

/// Rotation taking perifocal coordinates to the inertial frame.
///
/// Transpose of `R_Z(w) · R_X(i) · R_Z(raan)`. The true anomaly is not part of
/// the sequence since it is already carried by the perifocal coordinates.
pub fn perifocal_to_inertial(inclination: f64, arg_perigee: f64, raan: f64) -> Matrix3 {
    let inertial_to_perifocal = mat_mul(
        &rotation_about_axis(Axis::Z, arg_perigee),
        &mat_mul(
            &rotation_about_axis(Axis::X, inclination),
            &rotation_about_axis(Axis::Z, raan),
        ),
    );
    transpose(&inertial_to_perifocal)
}
