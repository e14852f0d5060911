//! Headless backend that records every call it receives.
//!
//! Useful for inspecting draw submission without a window, and it is what the
//! test suite renders against. By default every program variable resolves; a
//! restricted variable set can be supplied to exercise the silent-skip path
//! for variables a shader does not declare.

use std::collections::HashSet;

use super::{
    AttributeLocation, BufferId, DrawStyle, GraphicsApi, PixelFormat, ProgramId, RawUniform,
    ShaderError, TextureId, TextureSettings, UniformLocation, VertexLayoutId,
};

/// One recorded backend call.
#[derive(Clone, PartialEq, Debug)]
pub enum Call {
    CreateBuffer(BufferId),
    UploadBuffer { buffer: BufferId, len: usize },
    DeleteBuffer(BufferId),
    CompileProgram(ProgramId),
    UseProgram(ProgramId),
    DeleteProgram(ProgramId),
    CreateVertexLayout(VertexLayoutId),
    BindVertexLayout(VertexLayoutId),
    EnableAttribute {
        layout: VertexLayoutId,
        location: AttributeLocation,
        buffer: BufferId,
        arity: u32,
    },
    SetUniform {
        location: UniformLocation,
        value: RawUniform,
    },
    CreateTexture(TextureId),
    UploadTexture { texture: TextureId, width: u32, height: u32 },
    UploadCubeFace { texture: TextureId, face: usize },
    FinishCubeMap(TextureId),
    DeleteTexture(TextureId),
    SetDepthTest(bool),
    SetBlending(bool),
    SetCullFace(bool),
    SetWireframe(bool),
    SetLineWidth(f32),
    SetViewport { width: u32, height: u32 },
    Clear([f32; 3]),
    DrawArrays { style: DrawStyle, vertex_count: usize },
}

#[derive(Default)]
pub struct RecordingApi {
    pub calls: Vec<Call>,
    /// When `Some`, only these names resolve to locations.
    variables: Option<HashSet<String>>,
    uniform_names: Vec<String>,
    attribute_names: Vec<String>,
    buffers: u32,
    programs: u32,
    textures: u32,
    layouts: u32,
}

impl RecordingApi {
    /// A backend where every program variable resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose programs only declare the given variable names.
    /// Light-struct uniforms must list their fields (`"light0.color"` etc.).
    pub fn with_program_variables<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: Some(variables.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    fn declares(&self, name: &str) -> bool {
        self.variables
            .as_ref()
            .is_none_or(|names| names.contains(name))
    }

    /// The variable name a resolved uniform location stands for.
    pub fn uniform_name(&self, location: UniformLocation) -> &str {
        &self.uniform_names[location.0 as usize]
    }

    /// Every recorded uniform write as `(variable name, value)` pairs.
    pub fn uniform_writes(&self) -> Vec<(&str, &RawUniform)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetUniform { location, value } => {
                    Some((self.uniform_name(*location), value))
                }
                _ => None,
            })
            .collect()
    }

    /// Every recorded draw as `(style, vertex count)` pairs.
    pub fn draw_calls(&self) -> Vec<(DrawStyle, usize)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::DrawArrays { style, vertex_count } => Some((*style, *vertex_count)),
                _ => None,
            })
            .collect()
    }

    /// Forgets everything recorded so far; handles stay valid.
    pub fn clear_log(&mut self) {
        self.calls.clear();
    }
}

impl GraphicsApi for RecordingApi {
    fn create_buffer(&mut self) -> BufferId {
        let id = BufferId(self.buffers);
        self.buffers += 1;
        self.calls.push(Call::CreateBuffer(id));
        id
    }

    fn upload_buffer(&mut self, buffer: BufferId, data: &[f32]) {
        self.calls.push(Call::UploadBuffer {
            buffer,
            len: data.len(),
        });
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.calls.push(Call::DeleteBuffer(buffer));
    }

    fn compile_program(
        &mut self,
        _vertex_source: &str,
        _fragment_source: &str,
    ) -> Result<ProgramId, ShaderError> {
        let id = ProgramId(self.programs);
        self.programs += 1;
        self.calls.push(Call::CompileProgram(id));
        Ok(id)
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(Call::UseProgram(program));
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.calls.push(Call::DeleteProgram(program));
    }

    fn attribute_location(&mut self, _program: ProgramId, name: &str) -> Option<AttributeLocation> {
        if !self.declares(name) {
            return None;
        }
        self.attribute_names.push(name.to_string());
        Some(AttributeLocation(self.attribute_names.len() as u32 - 1))
    }

    fn uniform_location(&mut self, _program: ProgramId, name: &str) -> Option<UniformLocation> {
        if !self.declares(name) {
            return None;
        }
        self.uniform_names.push(name.to_string());
        Some(UniformLocation(self.uniform_names.len() as u32 - 1))
    }

    fn create_vertex_layout(&mut self) -> VertexLayoutId {
        let id = VertexLayoutId(self.layouts);
        self.layouts += 1;
        self.calls.push(Call::CreateVertexLayout(id));
        id
    }

    fn bind_vertex_layout(&mut self, layout: VertexLayoutId) {
        self.calls.push(Call::BindVertexLayout(layout));
    }

    fn enable_attribute(
        &mut self,
        layout: VertexLayoutId,
        location: AttributeLocation,
        buffer: BufferId,
        arity: u32,
    ) {
        self.calls.push(Call::EnableAttribute {
            layout,
            location,
            buffer,
            arity,
        });
    }

    fn set_uniform(&mut self, location: UniformLocation, value: RawUniform) {
        self.calls.push(Call::SetUniform { location, value });
    }

    fn create_texture(&mut self) -> TextureId {
        let id = TextureId(self.textures);
        self.textures += 1;
        self.calls.push(Call::CreateTexture(id));
        id
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        width: u32,
        height: u32,
        _format: PixelFormat,
        _pixels: &[u8],
        _settings: &TextureSettings,
    ) {
        self.calls.push(Call::UploadTexture {
            texture,
            width,
            height,
        });
    }

    fn upload_cube_face(
        &mut self,
        texture: TextureId,
        face: usize,
        _width: u32,
        _height: u32,
        _format: PixelFormat,
        _pixels: &[u8],
    ) {
        self.calls.push(Call::UploadCubeFace { texture, face });
    }

    fn finish_cube_map(&mut self, texture: TextureId, _settings: &TextureSettings) {
        self.calls.push(Call::FinishCubeMap(texture));
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.calls.push(Call::DeleteTexture(texture));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.calls.push(Call::SetDepthTest(enabled));
    }

    fn set_blending(&mut self, enabled: bool) {
        self.calls.push(Call::SetBlending(enabled));
    }

    fn set_cull_face(&mut self, enabled: bool) {
        self.calls.push(Call::SetCullFace(enabled));
    }

    fn set_wireframe(&mut self, enabled: bool) {
        self.calls.push(Call::SetWireframe(enabled));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(Call::SetLineWidth(width));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(Call::SetViewport { width, height });
    }

    fn clear(&mut self, color: [f32; 3]) {
        self.calls.push(Call::Clear(color));
    }

    fn draw_arrays(&mut self, style: DrawStyle, vertex_count: usize) {
        self.calls.push(Call::DrawArrays { style, vertex_count });
    }
}
