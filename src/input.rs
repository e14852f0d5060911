//! Keyboard state tracking over winit events.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Key state queries for the frame loop.
///
/// `is_key_down`/`is_key_up` are discrete -- true for the one frame the event
/// arrived in. `is_key_pressed` is continuous -- true from key-down until
/// key-up.
#[derive(Default)]
pub struct Input {
    pressed: HashSet<KeyCode>,
    down: Vec<KeyCode>,
    up: Vec<KeyCode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one winit keyboard event. OS key repeats do not re-trigger the
    /// discrete down state.
    pub fn record_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                if !event.repeat && self.pressed.insert(code) {
                    self.down.push(code);
                }
            }
            ElementState::Released => {
                self.pressed.remove(&code);
                self.up.push(code);
            }
        }
    }

    /// Clears the discrete per-frame states. Call once per frame, after the
    /// update step consumed them.
    pub fn end_frame(&mut self) {
        self.down.clear();
        self.up.clear();
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    pub fn is_key_up(&self, key: KeyCode) -> bool {
        self.up.contains(&key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}
