//! Light node payloads and their resolved per-frame snapshots.

/// The flavor of a light node. The numeric values match the `light_type`
/// dispatch in the built-in shaders; 0 is reserved for an empty slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LightKind {
    Ambient = 1,
    Directional = 2,
    Point = 3,
}

/// A light node payload: color everywhere, attenuation for point lights.
/// Direction and position live on the node's transform.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    /// Constant, linear and quadratic falloff coefficients.
    pub attenuation: [f32; 3],
}

impl Light {
    /// A color-only light with no direction or falloff.
    pub fn ambient(color: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            attenuation: [1.0, 0.0, 0.0],
        }
    }

    /// A light shining along the owning node's facing direction. Point it
    /// with `Scene::set_direction`.
    pub fn directional(color: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            attenuation: [1.0, 0.0, 0.0],
        }
    }

    /// A light radiating from the owning node's position with the given
    /// falloff. Place it with `Scene::set_position`.
    pub fn point(color: [f32; 3], attenuation: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Point,
            color,
            attenuation,
        }
    }
}

/// A light resolved into the fixed-function slot layout the shaders consume.
/// `kind` 0 marks an unused slot.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LightState {
    pub kind: i32,
    pub color: [f32; 3],
    pub direction: [f32; 3],
    pub position: [f32; 3],
    pub attenuation: [f32; 3],
}

impl LightState {
    /// The placeholder slot used to pad short light lists.
    pub fn off() -> Self {
        Self {
            kind: 0,
            color: [1.0, 1.0, 1.0],
            direction: [0.0, 0.0, -1.0],
            position: [0.0, 0.0, 0.0],
            attenuation: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::off()
    }
}
