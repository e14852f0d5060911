//! Per-frame traversal, state resolution and draw dispatch.

use cgmath::SquareMatrix;
use log::warn;
use thiserror::Error;

use crate::{
    graphics::GraphicsApi,
    material::{UniformValue, MODEL_MATRIX, PROJECTION_MATRIX, VIEW_MATRIX},
    scene::{LightState, NodeId, NodeKind, Scene},
};

/// Number of light slots the shader interface exposes. Scenes with more
/// lights keep only the first slots' worth in traversal order.
pub const MAX_LIGHTS: usize = 4;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The camera's world matrix could not be inverted (degenerate scale).
    #[error("camera world matrix is singular, cannot derive a view matrix")]
    SingularCamera,
    /// The node handed to `render` as the camera carries no camera payload.
    #[error("render target node is not a camera")]
    NotACamera,
}

/// Walks a scene each frame and turns it into draw calls.
pub struct Renderer {
    pub clear_color: [f32; 3],
}

impl Renderer {
    /// Sets up the fixed pipeline state every frame relies on: depth testing
    /// and standard alpha blending.
    pub fn new(api: &mut dyn GraphicsApi, clear_color: [f32; 3]) -> Self {
        api.set_depth_test(true);
        api.set_blending(true);
        Self { clear_color }
    }

    /// Renders one frame of `scene` through `camera`.
    ///
    /// Clears, refreshes the camera's view matrix, flattens the scene into
    /// meshes and lights (traversal order), resolves exactly [`MAX_LIGHTS`]
    /// light slots, then draws every visible mesh. Invisible meshes are
    /// skipped entirely -- no uniform uploads, no draw call.
    pub fn render(
        &self,
        api: &mut dyn GraphicsApi,
        scene: &mut Scene,
        camera: NodeId,
    ) -> Result<(), RenderError> {
        api.clear(self.clear_color);

        let camera_world = scene.world_matrix(camera);
        let view = camera_world.invert().ok_or(RenderError::SingularCamera)?;
        let camera_position = [camera_world.w.x, camera_world.w.y, camera_world.w.z];
        let projection = match scene.kind_mut(camera) {
            NodeKind::Camera(cam) => {
                cam.view = view;
                cam.projection
            }
            _ => return Err(RenderError::NotACamera),
        };

        let mut meshes = Vec::new();
        let mut lights = Vec::new();
        for id in scene.descendants(scene.root()) {
            match scene.kind(id) {
                NodeKind::Mesh(_) => meshes.push(id),
                NodeKind::Light(_) => lights.push(id),
                _ => {}
            }
        }

        if lights.len() > MAX_LIGHTS {
            warn!(
                "scene has {} lights; only the first {} are used",
                lights.len(),
                MAX_LIGHTS
            );
        }
        let mut slots = [LightState::off(); MAX_LIGHTS];
        for (slot, &id) in slots.iter_mut().zip(&lights) {
            *slot = resolve_light(scene, id);
        }

        for id in meshes {
            let world = scene.world_matrix(id);
            let NodeKind::Mesh(mesh) = scene.kind(id) else {
                continue;
            };
            if !mesh.visible {
                continue;
            }
            let geometry = mesh.geometry.borrow();
            let mut material = mesh.material.borrow_mut();

            api.use_program(material.program());
            api.bind_vertex_layout(mesh.layout());

            material.set_value(MODEL_MATRIX, UniformValue::Mat4(world));
            material.set_value(VIEW_MATRIX, UniformValue::Mat4(view));
            material.set_value(PROJECTION_MATRIX, UniformValue::Mat4(projection));

            if material.has_uniform("light0") {
                for (i, state) in slots.iter().enumerate() {
                    material.set_value(&format!("light{i}"), UniformValue::Light(*state));
                }
            }
            if material.has_uniform("view_position") {
                material.set_value("view_position", UniformValue::Vec3(camera_position));
            }

            material.upload_uniforms(api);
            material.update_render_settings(api);
            api.draw_arrays(material.settings().draw_style, geometry.vertex_count());
        }
        Ok(())
    }
}

/// Snapshots a light node into the slot layout the shaders consume.
/// Direction and position come from the node's own transform.
fn resolve_light(scene: &Scene, id: NodeId) -> LightState {
    match scene.kind(id) {
        NodeKind::Light(light) => LightState {
            kind: light.kind as i32,
            color: light.color,
            direction: scene.direction(id).into(),
            position: scene.position(id).into(),
            attenuation: light.attenuation,
        },
        _ => LightState::off(),
    }
}
