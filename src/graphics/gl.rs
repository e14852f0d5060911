//! OpenGL backend over [`glow`].
//!
//! Owns the GL context and a table per handle kind mapping the crate's plain
//! ids onto native GL objects. The trait surface is handle-explicit; the
//! GL-mandated bind-then-configure dance happens inside each method.

use glow::HasContext;
use log::debug;

use super::{
    AttributeLocation, BufferId, DrawStyle, Filter, GraphicsApi, PixelFormat, ProgramId,
    RawUniform, ShaderError, ShaderStage, TextureId, TextureSettings, UniformLocation,
    VertexLayoutId, Wrap,
};

/// The version directive prefixed to every shader before compilation.
const SHADER_VERSION: &str = "#version 330\n";

pub struct GlContext {
    gl: glow::Context,
    buffers: Vec<glow::NativeBuffer>,
    programs: Vec<glow::NativeProgram>,
    textures: Vec<glow::NativeTexture>,
    layouts: Vec<glow::NativeVertexArray>,
    uniforms: Vec<glow::NativeUniformLocation>,
}

impl GlContext {
    /// Wraps an already-current GL context.
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            buffers: Vec::new(),
            programs: Vec::new(),
            textures: Vec::new(),
            layouts: Vec::new(),
            uniforms: Vec::new(),
        }
    }

    fn compile_shader(
        &self,
        stage: ShaderStage,
        kind: u32,
        source: &str,
    ) -> Result<glow::NativeShader, ShaderError> {
        let versioned = format!("{SHADER_VERSION}{source}");
        unsafe {
            let shader = self
                .gl
                .create_shader(kind)
                .map_err(ShaderError::Allocate)?;
            self.gl.shader_source(shader, &versioned);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(ShaderError::Compile { stage, log });
            }
            Ok(shader)
        }
    }

    fn cube_face_target(face: usize) -> u32 {
        glow::TEXTURE_CUBE_MAP_POSITIVE_X + face as u32
    }
}

fn draw_mode(style: DrawStyle) -> u32 {
    match style {
        DrawStyle::Points => glow::POINTS,
        DrawStyle::Lines => glow::LINES,
        DrawStyle::LineStrip => glow::LINE_STRIP,
        DrawStyle::LineLoop => glow::LINE_LOOP,
        DrawStyle::Triangles => glow::TRIANGLES,
        DrawStyle::TriangleStrip => glow::TRIANGLE_STRIP,
        DrawStyle::TriangleFan => glow::TRIANGLE_FAN,
    }
}

fn gl_filter(filter: Filter) -> i32 {
    match filter {
        Filter::Nearest => glow::NEAREST as i32,
        Filter::Linear => glow::LINEAR as i32,
        Filter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR as i32,
    }
}

fn gl_wrap(wrap: Wrap) -> i32 {
    match wrap {
        Wrap::Repeat => glow::REPEAT as i32,
        Wrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
    }
}

fn gl_format(format: PixelFormat) -> u32 {
    match format {
        PixelFormat::Rgb => glow::RGB,
        PixelFormat::Rgba => glow::RGBA,
    }
}

impl GraphicsApi for GlContext {
    fn create_buffer(&mut self) -> BufferId {
        let buffer = unsafe { self.gl.create_buffer() }.expect("failed to allocate a GL buffer");
        self.buffers.push(buffer);
        BufferId(self.buffers.len() as u32 - 1)
    }

    fn upload_buffer(&mut self, buffer: BufferId, data: &[f32]) {
        let native = self.buffers[buffer.0 as usize];
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(native));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            );
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        unsafe { self.gl.delete_buffer(self.buffers[buffer.0 as usize]) };
    }

    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ShaderError> {
        let vertex = self.compile_shader(ShaderStage::Vertex, glow::VERTEX_SHADER, vertex_source)?;
        let fragment =
            match self.compile_shader(ShaderStage::Fragment, glow::FRAGMENT_SHADER, fragment_source)
            {
                Ok(fragment) => fragment,
                Err(e) => {
                    unsafe { self.gl.delete_shader(vertex) };
                    return Err(e);
                }
            };
        unsafe {
            let program = self.gl.create_program().map_err(ShaderError::Allocate)?;
            self.gl.attach_shader(program, vertex);
            self.gl.attach_shader(program, fragment);
            self.gl.link_program(program);
            self.gl.delete_shader(vertex);
            self.gl.delete_shader(fragment);
            if !self.gl.get_program_link_status(program) {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }
            debug!("linked program #{}", self.programs.len());
            self.programs.push(program);
            Ok(ProgramId(self.programs.len() as u32 - 1))
        }
    }

    fn use_program(&mut self, program: ProgramId) {
        unsafe {
            self.gl
                .use_program(Some(self.programs[program.0 as usize]))
        };
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { self.gl.delete_program(self.programs[program.0 as usize]) };
    }

    fn attribute_location(&mut self, program: ProgramId, name: &str) -> Option<AttributeLocation> {
        let native = self.programs[program.0 as usize];
        unsafe { self.gl.get_attrib_location(native, name) }.map(AttributeLocation)
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let native = self.programs[program.0 as usize];
        let location = unsafe { self.gl.get_uniform_location(native, name) }?;
        self.uniforms.push(location);
        Some(UniformLocation(self.uniforms.len() as u32 - 1))
    }

    fn create_vertex_layout(&mut self) -> VertexLayoutId {
        let layout =
            unsafe { self.gl.create_vertex_array() }.expect("failed to allocate a vertex array");
        self.layouts.push(layout);
        VertexLayoutId(self.layouts.len() as u32 - 1)
    }

    fn bind_vertex_layout(&mut self, layout: VertexLayoutId) {
        unsafe {
            self.gl
                .bind_vertex_array(Some(self.layouts[layout.0 as usize]))
        };
    }

    fn enable_attribute(
        &mut self,
        layout: VertexLayoutId,
        location: AttributeLocation,
        buffer: BufferId,
        arity: u32,
    ) {
        unsafe {
            self.gl
                .bind_vertex_array(Some(self.layouts[layout.0 as usize]));
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, Some(self.buffers[buffer.0 as usize]));
            self.gl
                .vertex_attrib_pointer_f32(location.0, arity as i32, glow::FLOAT, false, 0, 0);
            self.gl.enable_vertex_attrib_array(location.0);
            self.gl.bind_vertex_array(None);
        }
    }

    fn set_uniform(&mut self, location: UniformLocation, value: RawUniform) {
        let native = self.uniforms[location.0 as usize].clone();
        let loc = Some(&native);
        unsafe {
            match value {
                RawUniform::Int(v) => self.gl.uniform_1_i32(loc, v),
                RawUniform::Float(v) => self.gl.uniform_1_f32(loc, v),
                RawUniform::Vec2(v) => self.gl.uniform_2_f32(loc, v[0], v[1]),
                RawUniform::Vec3(v) => self.gl.uniform_3_f32(loc, v[0], v[1], v[2]),
                RawUniform::Vec4(v) => self.gl.uniform_4_f32(loc, v[0], v[1], v[2], v[3]),
                RawUniform::Mat4(m) => {
                    // columns are stored contiguously, so no transpose
                    self.gl
                        .uniform_matrix_4_f32_slice(loc, false, m.as_flattened())
                }
                RawUniform::Sampler2d { texture, unit } => {
                    self.gl.active_texture(glow::TEXTURE0 + unit);
                    self.gl.bind_texture(
                        glow::TEXTURE_2D,
                        Some(self.textures[texture.0 as usize]),
                    );
                    self.gl.uniform_1_i32(loc, unit as i32);
                }
                RawUniform::SamplerCube { texture, unit } => {
                    self.gl.active_texture(glow::TEXTURE0 + unit);
                    self.gl.bind_texture(
                        glow::TEXTURE_CUBE_MAP,
                        Some(self.textures[texture.0 as usize]),
                    );
                    self.gl.uniform_1_i32(loc, unit as i32);
                }
            }
        }
    }

    fn create_texture(&mut self) -> TextureId {
        let texture = unsafe { self.gl.create_texture() }.expect("failed to allocate a texture");
        self.textures.push(texture);
        TextureId(self.textures.len() as u32 - 1)
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
        settings: &TextureSettings,
    ) {
        let native = self.textures[texture.0 as usize];
        let format = gl_format(format);
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(native));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                width as i32,
                height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            self.gl.generate_mipmap(glow::TEXTURE_2D);
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                gl_filter(settings.mag_filter),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                gl_filter(settings.min_filter),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                gl_wrap(settings.wrap),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                gl_wrap(settings.wrap),
            );
        }
    }

    fn upload_cube_face(
        &mut self,
        texture: TextureId,
        face: usize,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
    ) {
        let native = self.textures[texture.0 as usize];
        let format = gl_format(format);
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(native));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                Self::cube_face_target(face),
                0,
                format as i32,
                width as i32,
                height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
        }
    }

    fn finish_cube_map(&mut self, texture: TextureId, settings: &TextureSettings) {
        let native = self.textures[texture.0 as usize];
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(native));
            self.gl.tex_parameter_i32(
                glow::TEXTURE_CUBE_MAP,
                glow::TEXTURE_MAG_FILTER,
                gl_filter(settings.mag_filter),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_CUBE_MAP,
                glow::TEXTURE_MIN_FILTER,
                gl_filter(settings.min_filter),
            );
            for wrap in [
                glow::TEXTURE_WRAP_S,
                glow::TEXTURE_WRAP_T,
                glow::TEXTURE_WRAP_R,
            ] {
                self.gl
                    .tex_parameter_i32(glow::TEXTURE_CUBE_MAP, wrap, gl_wrap(settings.wrap));
            }
            self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, None);
        }
    }

    fn delete_texture(&mut self, texture: TextureId) {
        unsafe { self.gl.delete_texture(self.textures[texture.0 as usize]) };
    }

    fn set_depth_test(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn set_blending(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::BLEND);
                self.gl
                    .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
    }

    fn set_cull_face(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::CULL_FACE);
            } else {
                self.gl.disable(glow::CULL_FACE);
            }
        }
    }

    fn set_wireframe(&mut self, enabled: bool) {
        let mode = if enabled { glow::LINE } else { glow::FILL };
        unsafe { self.gl.polygon_mode(glow::FRONT_AND_BACK, mode) };
    }

    fn set_line_width(&mut self, width: f32) {
        unsafe { self.gl.line_width(width) };
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
    }

    fn clear(&mut self, color: [f32; 3]) {
        unsafe {
            self.gl.clear_color(color[0], color[1], color[2], 1.0);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn draw_arrays(&mut self, style: DrawStyle, vertex_count: usize) {
        unsafe {
            self.gl
                .draw_arrays(draw_mode(style), 0, vertex_count as i32)
        };
    }
}
