//! Materials: one linked GPU program, its uniform table, and render settings.

pub mod standard;
pub mod uniform;

use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix};
use thiserror::Error;

pub use uniform::{Uniform, UniformValue};

use crate::graphics::{DrawStyle, GraphicsApi, ProgramId, ShaderError};

/// Uniform names every material carries.
pub const MODEL_MATRIX: &str = "model_matrix";
pub const VIEW_MATRIX: &str = "view_matrix";
pub const PROJECTION_MATRIX: &str = "projection_matrix";

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("material has no property `{0}`")]
    NoSuchProperty(String),
    #[error("property `{name}` expects a {expected} value")]
    PropertyType { name: String, expected: &'static str },
}

/// Which built-in shader pair a material was constructed from. Controls the
/// per-frame render-settings hook; only the textured variant applies the
/// surface flags.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MaterialKind {
    #[default]
    Custom,
    Textured,
    Lambert,
    Phong,
    CubeMap,
    EnvironmentMap,
}

/// Fixed-function state applied around a material's draw calls.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RenderSettings {
    pub draw_style: DrawStyle,
    /// Renders both faces (culling off) when set.
    pub double_side: bool,
    pub wireframe: bool,
    pub line_width: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            draw_style: DrawStyle::Triangles,
            double_side: true,
            wireframe: false,
            line_width: 1.0,
        }
    }
}

/// A value assignable through the material's public property surface.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Property {
    Int(i32),
    Bool(bool),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4(Matrix4<f32>),
    DrawStyle(DrawStyle),
}

impl Property {
    fn into_uniform(self) -> Option<UniformValue> {
        Some(match self {
            Property::Int(v) => UniformValue::Int(v),
            Property::Bool(v) => UniformValue::Bool(v),
            Property::Float(v) => UniformValue::Float(v),
            Property::Vec2(v) => UniformValue::Vec2(v),
            Property::Vec3(v) => UniformValue::Vec3(v),
            Property::Vec4(v) => UniformValue::Vec4(v),
            Property::Mat4(v) => UniformValue::Mat4(v),
            Property::DrawStyle(_) => return None,
        })
    }
}

/// One compiled-and-linked program plus everything needed to drive it: the
/// uniform table (always including the model/view/projection matrices) and
/// the render settings.
#[derive(Debug)]
pub struct Material {
    program: ProgramId,
    kind: MaterialKind,
    uniforms: HashMap<String, Uniform>,
    settings: RenderSettings,
}

impl Material {
    /// Compiles and links the shader pair. Compiler/linker diagnostics abort
    /// construction and carry the driver's message verbatim.
    pub fn new(
        api: &mut dyn GraphicsApi,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let program = api.compile_program(vertex_source, fragment_source)?;
        let mut material = Self {
            program,
            kind: MaterialKind::Custom,
            uniforms: HashMap::new(),
            settings: RenderSettings::default(),
        };
        for name in [MODEL_MATRIX, VIEW_MATRIX, PROJECTION_MATRIX] {
            material.add_uniform(name, UniformValue::Mat4(Matrix4::identity()));
        }
        Ok(material)
    }

    pub(crate) fn with_kind(mut self, kind: MaterialKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn program(&self) -> ProgramId {
        self.program
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Registers a uniform under `name`. Locations are resolved later by
    /// [`Material::locate_uniforms`].
    pub fn add_uniform(&mut self, name: impl Into<String>, value: UniformValue) {
        self.uniforms.insert(name.into(), Uniform::new(value));
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    pub fn uniform(&self, name: &str) -> Option<&Uniform> {
        self.uniforms.get(name)
    }

    /// Replaces the value of an existing uniform, keeping its resolved
    /// location. Returns `false` when no uniform of that name exists.
    pub fn set_value(&mut self, name: &str, value: UniformValue) -> bool {
        match self.uniforms.get_mut(name) {
            Some(uniform) => {
                uniform.value = value;
                true
            }
            None => false,
        }
    }

    /// Resolves every registered uniform's location in the program. Call once
    /// after construction, when all uniforms are registered.
    pub fn locate_uniforms(&mut self, api: &mut dyn GraphicsApi) {
        let program = self.program;
        for (name, uniform) in &mut self.uniforms {
            uniform.locate(api, program, name);
        }
    }

    /// Pushes every registered uniform's current value to the program.
    /// Bindings whose location never resolved are skipped.
    pub fn upload_uniforms(&self, api: &mut dyn GraphicsApi) {
        for uniform in self.uniforms.values() {
            uniform.upload(api);
        }
    }

    /// Routes `name` to the uniform table or the render settings. Unknown
    /// names and wrongly-typed setting values fail fast.
    pub fn set_property(&mut self, name: &str, value: Property) -> Result<(), MaterialError> {
        if let Some(uniform) = self.uniforms.get_mut(name) {
            let value = value
                .into_uniform()
                .ok_or_else(|| MaterialError::PropertyType {
                    name: name.to_string(),
                    expected: "uniform",
                })?;
            uniform.value = value;
            return Ok(());
        }
        match name {
            "draw_style" => match value {
                Property::DrawStyle(style) => self.settings.draw_style = style,
                _ => {
                    return Err(MaterialError::PropertyType {
                        name: name.to_string(),
                        expected: "draw style",
                    });
                }
            },
            "double_side" => match value {
                Property::Bool(flag) => self.settings.double_side = flag,
                _ => {
                    return Err(MaterialError::PropertyType {
                        name: name.to_string(),
                        expected: "bool",
                    });
                }
            },
            "wireframe" => match value {
                Property::Bool(flag) => self.settings.wireframe = flag,
                _ => {
                    return Err(MaterialError::PropertyType {
                        name: name.to_string(),
                        expected: "bool",
                    });
                }
            },
            "line_width" => match value {
                Property::Float(width) => self.settings.line_width = width,
                _ => {
                    return Err(MaterialError::PropertyType {
                        name: name.to_string(),
                        expected: "float",
                    });
                }
            },
            _ => return Err(MaterialError::NoSuchProperty(name.to_string())),
        }
        Ok(())
    }

    /// Applies a batch of property updates; stops at the first failure.
    pub fn set_properties<'a, I>(&mut self, properties: I) -> Result<(), MaterialError>
    where
        I: IntoIterator<Item = (&'a str, Property)>,
    {
        for (name, value) in properties {
            self.set_property(name, value)?;
        }
        Ok(())
    }

    /// Per-frame fixed-function hook, invoked right before drawing. The base
    /// behavior is a no-op; the textured variant pushes its surface flags.
    pub fn update_render_settings(&self, api: &mut dyn GraphicsApi) {
        if self.kind == MaterialKind::Textured {
            api.set_cull_face(!self.settings.double_side);
            api.set_wireframe(self.settings.wireframe);
            api.set_line_width(self.settings.line_width);
        }
    }

    /// Releases the GPU program.
    pub fn dispose(self, api: &mut dyn GraphicsApi) {
        api.delete_program(self.program);
    }
}
