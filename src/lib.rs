//! arbor
//!
//! A small retained scene-graph renderer. Scenes are trees of transformable
//! nodes -- groups, cameras, meshes and lights -- and each frame the renderer
//! flattens the tree, resolves camera and light state, and issues one draw
//! call per visible mesh. All GPU work goes through an explicit-handle
//! backend trait, with an OpenGL implementation and a headless recording
//! implementation for tests and debugging.
//!
//! High-level modules
//! - `math`: matrix builders for transforms, projection and look-at
//! - `scene`: the node arena, transform composition and traversal
//! - `geometry`: attribute buffers, merge and transform baking
//! - `material`: shader programs, uniform tables and render settings
//! - `texture`: 2D texture and cube-map upload
//! - `renderer`: the per-frame traversal and draw dispatch
//! - `graphics`: the backend trait plus the GL and recording backends
//! - `resources`: OBJ geometry import
//! - `app` / `input` / `movement`: window host, key state, camera rig
//!

pub mod app;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod material;
pub mod math;
pub mod movement;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod texture;

// Re-exports commonly used types for convenience in downstream code.
pub use app::{run, Stage};
pub use cgmath::*;
pub use geometry::{AttributeData, Geometry};
pub use graphics::{gl::GlContext, DrawStyle, GraphicsApi};
pub use input::Input;
pub use material::{Material, Property, UniformValue};
pub use movement::MovementRig;
pub use renderer::{RenderError, Renderer, MAX_LIGHTS};
pub use scene::{Camera, Light, Mesh, NodeId, NodeKind, Scene, TransformSpace};
pub use texture::{CubeMap, Texture};
pub use winit::keyboard::KeyCode;
