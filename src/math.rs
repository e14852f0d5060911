//! Matrix builders for node transforms and camera projection.
//!
//! Everything here is a pure function producing a column-major
//! [`Matrix4<f32>`]. Where cgmath already provides the exact matrix we need
//! (translation, axis rotations, uniform scale, perspective) we delegate to
//! it; `look_at` is built by hand because it produces an *object* transform
//! (basis vectors plus position), not a view matrix.

use cgmath::{Deg, InnerSpace, Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Vector4};

pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

/// Right-handed rotation about the x-axis, angle in radians.
pub fn rotation_x(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_x(Rad(angle))
}

/// Right-handed rotation about the y-axis, angle in radians.
pub fn rotation_y(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Rad(angle))
}

/// Right-handed rotation about the z-axis, angle in radians.
pub fn rotation_z(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_z(Rad(angle))
}

pub fn scale(factor: f32) -> Matrix4<f32> {
    Matrix4::from_scale(factor)
}

/// Symmetric-frustum perspective projection.
///
/// `d = 1 / tan(fov / 2)` on the diagonal, with the last row `[0, 0, -1, 0]`
/// so that clip-space `w' = -z`.
pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    cgmath::perspective(Deg(fov_deg), aspect, near, far)
}

/// Builds a transform that places an object at `position` facing `target`.
///
/// The basis is derived from world-up `[0, 1, 0]`. When the forward vector is
/// nearly parallel to world-up the cross product degenerates, so world-up is
/// perturbed by `[0.001, 0, 0]` before recomputing the right vector. The
/// columns of the result are right, up, -forward and the translation.
pub fn look_at(position: Vector3<f32>, target: Vector3<f32>) -> Matrix4<f32> {
    let world_up = Vector3::unit_y();
    let forward = target - position;
    let mut right = forward.cross(world_up);
    if right.magnitude() < 0.001 {
        right = forward.cross(world_up + Vector3::new(0.001, 0.0, 0.0));
    }
    let up = right.cross(forward);

    let forward = forward.normalize();
    let right = right.normalize();
    let up = up.normalize();

    Matrix4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        (-forward).extend(0.0),
        position.extend(1.0),
    )
}

/// The upper-left 3x3 of an affine transform: its rotation/scale part.
pub fn rotation_part(matrix: &Matrix4<f32>) -> Matrix3<f32> {
    Matrix3::from_cols(
        matrix.x.truncate(),
        matrix.y.truncate(),
        matrix.z.truncate(),
    )
}

/// Applies an affine transform to a point, using `w = 1` and dropping the
/// homogeneous coordinate afterwards.
pub fn transform_point(matrix: &Matrix4<f32>, point: [f32; 3]) -> [f32; 3] {
    let v = matrix * Vector4::new(point[0], point[1], point[2], 1.0);
    [v.x, v.y, v.z]
}
