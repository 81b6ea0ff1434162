extern crate nalgebra as na;

use na::{Vector3,Quaternion,UnitQuaternion,Rotation3};
use crate::{Float,PoseGraphError,Result};

/// Largest accepted deviation of a quaternion norm from one.
pub const ORIENTATION_NORM_TOLERANCE: Float = 1e-3;

/**
 * Accepts a loaded quaternion as an orientation only if its norm is within tolerance of one.
 * Zero or near-zero quaternions (missing orientation) fall out of the same check.
 */
pub fn checked_unit_quaternion(quat: &Quaternion<Float>, context: &str) -> Result<UnitQuaternion<Float>> {
    let norm = quat.norm();
    match (norm - 1.0).abs() {
        deviation if deviation.is_finite() && deviation <= ORIENTATION_NORM_TOLERANCE => Ok(UnitQuaternion::new_normalize(*quat)),
        _ => Err(PoseGraphError::DegenerateOrientation { context: context.to_string(), norm })
    }
}

/**
 * q and -q encode the same rotation. Pick the one with a non-negative scalar part.
 * Negative zeros are cleared so they never print as "-0".
 */
pub fn canonical(quat: UnitQuaternion<Float>) -> UnitQuaternion<Float> {
    let sign = match quat.w < 0.0 {
        true => -1.0,
        false => 1.0
    };
    UnitQuaternion::new_unchecked(Quaternion::from(quat.coords.map(|c| sign * c + 0.0)))
}

/**
 * Rotation from frame a to frame b: q_b * q_a^-1
 */
pub fn relative_rotation(a: &UnitQuaternion<Float>, b: &UnitQuaternion<Float>) -> UnitQuaternion<Float> {
    canonical(b * a.inverse())
}

/**
 * Same as relative_rotation but through rotation matrices: R_b * R_a^T
 */
pub fn relative_rotation_from_matrices(a: &UnitQuaternion<Float>, b: &UnitQuaternion<Float>) -> UnitQuaternion<Float> {
    let r_a = a.to_rotation_matrix();
    let r_b = b.to_rotation_matrix();
    let r_rel = r_b.matrix() * r_a.matrix().transpose();
    canonical(UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(r_rel)))
}

/**
 * World frame difference t_b - t_a. Not expressed in the frame of a.
 */
pub fn relative_translation(a: &Vector3<Float>, b: &Vector3<Float>) -> Vector3<Float> {
    b - a
}

/**
 * Scalar-last component order as written to pose graph files.
 */
pub fn to_xyzw(quat: &Quaternion<Float>) -> [Float;4] {
    [quat.i, quat.j, quat.k, quat.w]
}

pub fn from_xyzw(x: Float, y: Float, z: Float, w: Float) -> Quaternion<Float> {
    Quaternion::new(w, x, y, z)
}
