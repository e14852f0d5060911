//! Graphics backend abstraction.
//!
//! Every core type (attributes, materials, the renderer) talks to the
//! [`GraphicsApi`] trait instead of a concrete graphics library. The contract
//! is handle-based: each call names the buffer/program/layout it operates on,
//! so nothing in the crate depends on ambient "currently bound" state. The
//! [`gl`] module provides the real OpenGL backend; [`record`] provides a
//! headless backend that logs every call.

pub mod gl;
pub mod record;

use thiserror::Error;

/// Handle to one GPU-resident vertex buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BufferId(pub(crate) u32);

/// Handle to one compiled-and-linked shader program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ProgramId(pub(crate) u32);

/// Handle to one texture object (2D or cube map).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TextureId(pub(crate) u32);

/// Handle to one vertex layout (the per-mesh attribute binding table).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VertexLayoutId(pub(crate) u32);

/// Slot of a vertex attribute inside a program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AttributeLocation(pub(crate) u32);

/// Resolved location of a uniform variable inside a program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UniformLocation(pub(crate) u32);

/// Primitive topology used to interpret a vertex buffer during a draw call.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DrawStyle {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Channel order of a pixel buffer handed to texture upload.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Texture sampling filter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Filter {
    Nearest,
    Linear,
    LinearMipmapLinear,
}

/// Texture coordinate wrapping mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Wrap {
    Repeat,
    ClampToEdge,
}

/// Sampling settings applied when a texture is uploaded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextureSettings {
    pub mag_filter: Filter,
    pub min_filter: Filter,
    pub wrap: Wrap,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            mag_filter: Filter::Linear,
            min_filter: Filter::LinearMipmapLinear,
            wrap: Wrap::Repeat,
        }
    }
}

/// A single uniform value at the wire level.
///
/// Composite values (booleans, matrices, light structs) are lowered to these
/// before they reach a backend.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RawUniform {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Column-major 4x4 matrix.
    Mat4([[f32; 4]; 4]),
    Sampler2d { texture: TextureId, unit: u32 },
    SamplerCube { texture: TextureId, unit: u32 },
}

/// Shader stage, for compile diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Fatal program construction failures. The driver diagnostic is carried
/// verbatim in `log`.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program failed to link:\n{log}")]
    Link { log: String },
    #[error("shader object allocation failed: {0}")]
    Allocate(String),
}

/// The backend contract the renderer and resource types are written against.
///
/// Ordering discipline is the only requirement: compile/link before use,
/// resolve locations once after link, configure a layout before drawing with
/// it. All handles are explicit; backends may translate to bind-then-configure
/// internally.
pub trait GraphicsApi {
    fn create_buffer(&mut self) -> BufferId;
    /// Full upload; no partial updates. The data is flat `f32`s.
    fn upload_buffer(&mut self, buffer: BufferId, data: &[f32]);
    fn delete_buffer(&mut self, buffer: BufferId);

    /// Compiles and links a program. Diagnostics abort construction and are
    /// surfaced verbatim.
    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ShaderError>;
    fn use_program(&mut self, program: ProgramId);
    fn delete_program(&mut self, program: ProgramId);
    /// `None` when the program does not declare the attribute.
    fn attribute_location(&mut self, program: ProgramId, name: &str) -> Option<AttributeLocation>;
    /// `None` when the program does not declare the uniform.
    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    fn create_vertex_layout(&mut self) -> VertexLayoutId;
    fn bind_vertex_layout(&mut self, layout: VertexLayoutId);
    /// Configures vertex fetch for `location` from `buffer` inside `layout`:
    /// tightly packed floats, `arity` components per vertex.
    fn enable_attribute(
        &mut self,
        layout: VertexLayoutId,
        location: AttributeLocation,
        buffer: BufferId,
        arity: u32,
    );

    fn set_uniform(&mut self, location: UniformLocation, value: RawUniform);

    fn create_texture(&mut self) -> TextureId;
    fn upload_texture(
        &mut self,
        texture: TextureId,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
        settings: &TextureSettings,
    );
    /// Uploads one cube-map face; `face` indexes +X,-X,+Y,-Y,+Z,-Z.
    fn upload_cube_face(
        &mut self,
        texture: TextureId,
        face: usize,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
    );
    /// Applies sampling settings once all six faces are uploaded.
    fn finish_cube_map(&mut self, texture: TextureId, settings: &TextureSettings);
    fn delete_texture(&mut self, texture: TextureId);

    fn set_depth_test(&mut self, enabled: bool);
    fn set_blending(&mut self, enabled: bool);
    fn set_cull_face(&mut self, enabled: bool);
    fn set_wireframe(&mut self, enabled: bool);
    fn set_line_width(&mut self, width: f32);
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clears the color and depth buffers.
    fn clear(&mut self, color: [f32; 3]);
    /// Non-indexed draw over `vertex_count` vertices of the bound layout.
    fn draw_arrays(&mut self, style: DrawStyle, vertex_count: usize);
}
