//! Uniform bindings: typed values resolved to program locations.

use cgmath::Matrix4;

use crate::{
    graphics::{GraphicsApi, ProgramId, RawUniform, TextureId, UniformLocation},
    scene::light::LightState,
};

/// A typed value destined for one shader global.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum UniformValue {
    Int(i32),
    Bool(bool),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4(Matrix4<f32>),
    Sampler2d { texture: TextureId, unit: u32 },
    SamplerCube { texture: TextureId, unit: u32 },
    /// A whole light struct; uploads through five sub-locations.
    Light(LightState),
}

impl UniformValue {
    fn to_raw(self) -> Option<RawUniform> {
        Some(match self {
            UniformValue::Int(v) => RawUniform::Int(v),
            UniformValue::Bool(v) => RawUniform::Int(v as i32),
            UniformValue::Float(v) => RawUniform::Float(v),
            UniformValue::Vec2(v) => RawUniform::Vec2(v),
            UniformValue::Vec3(v) => RawUniform::Vec3(v),
            UniformValue::Vec4(v) => RawUniform::Vec4(v),
            UniformValue::Mat4(m) => RawUniform::Mat4(m.into()),
            UniformValue::Sampler2d { texture, unit } => RawUniform::Sampler2d { texture, unit },
            UniformValue::SamplerCube { texture, unit } => {
                RawUniform::SamplerCube { texture, unit }
            }
            UniformValue::Light(_) => return None,
        })
    }
}

/// Sub-locations of a light struct uniform, resolved per field.
#[derive(Clone, Copy, Default, Debug)]
struct LightLocations {
    kind: Option<UniformLocation>,
    color: Option<UniformLocation>,
    direction: Option<UniformLocation>,
    position: Option<UniformLocation>,
    attenuation: Option<UniformLocation>,
}

#[derive(Clone, Copy, Debug)]
enum Location {
    Single(Option<UniformLocation>),
    Light(LightLocations),
}

/// A uniform binding: the current value plus the location it resolved to in
/// one program. Unresolved locations skip upload silently -- a program simply
/// may not declare the variable.
#[derive(Debug)]
pub struct Uniform {
    pub value: UniformValue,
    location: Location,
}

impl Uniform {
    pub fn new(value: UniformValue) -> Self {
        Self {
            value,
            location: Location::Single(None),
        }
    }

    /// Resolves the location of `name` in `program`. Call once after link.
    /// Light values resolve one sub-location per struct field.
    pub fn locate(&mut self, api: &mut dyn GraphicsApi, program: ProgramId, name: &str) {
        self.location = match self.value {
            UniformValue::Light(_) => Location::Light(LightLocations {
                kind: api.uniform_location(program, &format!("{name}.light_type")),
                color: api.uniform_location(program, &format!("{name}.color")),
                direction: api.uniform_location(program, &format!("{name}.direction")),
                position: api.uniform_location(program, &format!("{name}.position")),
                attenuation: api.uniform_location(program, &format!("{name}.attenuation")),
            }),
            _ => Location::Single(api.uniform_location(program, name)),
        };
    }

    /// Pushes the current value to the program. A no-op for every part whose
    /// location did not resolve.
    pub fn upload(&self, api: &mut dyn GraphicsApi) {
        match (self.location, self.value) {
            (Location::Single(Some(location)), value) => {
                if let Some(raw) = value.to_raw() {
                    api.set_uniform(location, raw);
                }
            }
            (Location::Light(locations), UniformValue::Light(state)) => {
                if let Some(location) = locations.kind {
                    api.set_uniform(location, RawUniform::Int(state.kind));
                }
                if let Some(location) = locations.color {
                    api.set_uniform(location, RawUniform::Vec3(state.color));
                }
                if let Some(location) = locations.direction {
                    api.set_uniform(location, RawUniform::Vec3(state.direction));
                }
                if let Some(location) = locations.position {
                    api.set_uniform(location, RawUniform::Vec3(state.position));
                }
                if let Some(location) = locations.attenuation {
                    api.set_uniform(location, RawUniform::Vec3(state.attenuation));
                }
            }
            _ => {}
        }
    }

    /// Whether any part of this binding resolved to a program location.
    pub fn is_resolved(&self) -> bool {
        match self.location {
            Location::Single(location) => location.is_some(),
            Location::Light(locations) => {
                locations.kind.is_some()
                    || locations.color.is_some()
                    || locations.direction.is_some()
                    || locations.position.is_some()
                    || locations.attenuation.is_some()
            }
        }
    }
}
