//! First-person movement rig.
//!
//! A pair of nodes: a base that translates and yaws, and a look attachment
//! that only pitches, so looking up and down never tilts the movement plane.
//! Attach a camera (or anything else) to the rig and feed it input each
//! frame.

use std::time::Duration;

use winit::keyboard::KeyCode;

use crate::{
    input::Input,
    scene::{NodeId, NodeKind, Scene, TransformSpace},
};

pub struct MovementRig {
    base: NodeId,
    look: NodeId,
    pub units_per_sec: f32,
    pub degrees_per_sec: f32,
    pub key_forward: KeyCode,
    pub key_back: KeyCode,
    pub key_left: KeyCode,
    pub key_right: KeyCode,
    pub key_up: KeyCode,
    pub key_down: KeyCode,
    pub key_turn_left: KeyCode,
    pub key_turn_right: KeyCode,
    pub key_look_up: KeyCode,
    pub key_look_down: KeyCode,
}

impl MovementRig {
    /// Spawns the rig's node pair under `parent`.
    pub fn new(scene: &mut Scene, parent: NodeId, units_per_sec: f32, degrees_per_sec: f32) -> Self {
        let base = scene.spawn(NodeKind::Group);
        scene.add(parent, base);
        let look = scene.spawn(NodeKind::Group);
        scene.add(base, look);
        Self {
            base,
            look,
            units_per_sec,
            degrees_per_sec,
            key_forward: KeyCode::KeyW,
            key_back: KeyCode::KeyS,
            key_left: KeyCode::KeyA,
            key_right: KeyCode::KeyD,
            key_up: KeyCode::Space,
            key_down: KeyCode::ShiftLeft,
            key_turn_left: KeyCode::ArrowLeft,
            key_turn_right: KeyCode::ArrowRight,
            key_look_up: KeyCode::ArrowUp,
            key_look_down: KeyCode::ArrowDown,
        }
    }

    /// The rig's base node; position or aim the whole rig through it.
    pub fn node(&self) -> NodeId {
        self.base
    }

    /// Parents `child` to the look attachment so it follows both yaw and
    /// pitch.
    pub fn attach(&self, scene: &mut Scene, child: NodeId) {
        scene.add(self.look, child);
    }

    /// Applies one frame of movement from the current key state.
    pub fn update(&self, scene: &mut Scene, input: &Input, dt: Duration) {
        let move_amount = self.units_per_sec * dt.as_secs_f32();
        let rotate_amount = self.degrees_per_sec.to_radians() * dt.as_secs_f32();

        if input.is_key_pressed(self.key_forward) {
            scene.translate(self.base, 0.0, 0.0, -move_amount, TransformSpace::Local);
        }
        if input.is_key_pressed(self.key_back) {
            scene.translate(self.base, 0.0, 0.0, move_amount, TransformSpace::Local);
        }
        if input.is_key_pressed(self.key_left) {
            scene.translate(self.base, -move_amount, 0.0, 0.0, TransformSpace::Local);
        }
        if input.is_key_pressed(self.key_right) {
            scene.translate(self.base, move_amount, 0.0, 0.0, TransformSpace::Local);
        }
        if input.is_key_pressed(self.key_up) {
            scene.translate(self.base, 0.0, move_amount, 0.0, TransformSpace::Local);
        }
        if input.is_key_pressed(self.key_down) {
            scene.translate(self.base, 0.0, -move_amount, 0.0, TransformSpace::Local);
        }

        if input.is_key_pressed(self.key_turn_left) {
            scene.rotate_y(self.base, rotate_amount, TransformSpace::Local);
        }
        if input.is_key_pressed(self.key_turn_right) {
            scene.rotate_y(self.base, -rotate_amount, TransformSpace::Local);
        }

        if input.is_key_pressed(self.key_look_up) {
            scene.rotate_x(self.look, rotate_amount, TransformSpace::Local);
        }
        if input.is_key_pressed(self.key_look_down) {
            scene.rotate_x(self.look, -rotate_amount, TransformSpace::Local);
        }
    }
}
