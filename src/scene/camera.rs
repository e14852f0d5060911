//! Camera node payload.

use cgmath::{Matrix4, SquareMatrix};

use crate::math;

/// A camera payload: a projection matrix fixed at construction and a view
/// matrix the renderer refreshes each frame as the inverse of the camera
/// node's world matrix. Between frames the view matrix is stale.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Camera {
    pub projection: Matrix4<f32>,
    pub view: Matrix4<f32>,
}

impl Camera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            projection: math::perspective(fov_deg, aspect, near, far),
            view: Matrix4::identity(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(60.0, 1.0, 0.1, 1000.0)
    }
}
