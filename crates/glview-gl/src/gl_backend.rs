//! [`GlApi`] over the raw `gl` function pointers of the current context.

use std::ffi::CStr;
use std::sync::Once;

use gl::types::{GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use glview_core::{SamplerState, StageKind, TextureFilter, TextureWrap, Viewport};

use crate::api::{BufferTarget, DrawMode, Face, GlApi, PixelFormat};
use crate::bindings::{AttribLocation, UniformLocation};

pub(crate) static GL_INIT_ONCE: Once = Once::new();

/// Handle to the driver behind the current GL context.
///
/// Zero-sized; every call goes straight to the loaded function pointers.
#[derive(Debug, Clone, Copy)]
pub struct RawGl {
    _loaded: (),
}

impl RawGl {
    /// Load GL function pointers and bind a vertex array object for the
    /// demos to share.
    ///
    /// Pointers are loaded exactly once via `gl_loader`.
    ///
    /// # Safety
    ///
    /// A GL context must be current on this thread, and stay current for as
    /// long as the returned handle (or any resource built from it) is used.
    pub unsafe fn load() -> Self {
        GL_INIT_ONCE.call_once(|| {
            gl_loader::init_gl();
            gl::load_with(|s| gl_loader::get_proc_address(s).cast());

            if gl::GenVertexArrays::is_loaded() {
                let mut vao = 0;
                gl::GenVertexArrays(1, &mut vao);
                gl::BindVertexArray(vao);
                tracing::debug!(vao, "bound shared vertex array");
            }
        });

        Self { _loaded: () }
    }
}

fn stage_enum(stage: StageKind) -> GLenum {
    match stage {
        StageKind::Vertex => gl::VERTEX_SHADER,
        StageKind::Fragment => gl::FRAGMENT_SHADER,
    }
}

fn target_enum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Vertex => gl::ARRAY_BUFFER,
        BufferTarget::Index => gl::ELEMENT_ARRAY_BUFFER,
    }
}

/// Turn a GL info log buffer into text, dropping the terminator.
fn log_to_string(mut buf: Vec<u8>) -> String {
    while buf.last() == Some(&0) {
        buf.pop();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

impl GlApi for RawGl {
    fn create_shader(&self, stage: StageKind) -> GLuint {
        unsafe { gl::CreateShader(stage_enum(stage)) }
    }

    fn compile_shader(&self, shader: GLuint, source: &CStr) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
            gl::CompileShader(shader);
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        }
        status != gl::FALSE as GLint
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        let mut buf = vec![0u8; len.max(0) as usize];
        if !buf.is_empty() {
            unsafe {
                gl::GetShaderInfoLog(shader, len, std::ptr::null_mut(), buf.as_mut_ptr().cast());
            }
        }
        log_to_string(buf)
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::LinkProgram(program);
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        }
        status != gl::FALSE as GLint
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        let mut buf = vec![0u8; len.max(0) as usize];
        if !buf.is_empty() {
            unsafe {
                gl::GetProgramInfoLog(program, len, std::ptr::null_mut(), buf.as_mut_ptr().cast());
            }
        }
        log_to_string(buf)
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn attrib_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetAttribLocation(program, name.as_ptr()) }
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn uniform_1i(&self, location: UniformLocation, value: i32) {
        unsafe { gl::Uniform1i(location.raw(), value) }
    }

    fn uniform_4f(&self, location: UniformLocation, [x, y, z, w]: [f32; 4]) {
        unsafe { gl::Uniform4f(location.raw(), x, y, z, w) }
    }

    fn uniform_matrix3(&self, location: UniformLocation, value: &[f32; 9]) {
        unsafe { gl::UniformMatrix3fv(location.raw(), 1, gl::FALSE, value.as_ptr()) }
    }

    fn uniform_matrix4(&self, location: UniformLocation, value: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location.raw(), 1, gl::FALSE, value.as_ptr()) }
    }

    fn create_texture(&self) -> GLuint {
        let mut texture = 0;
        unsafe { gl::GenTextures(1, &mut texture) };
        texture
    }

    fn delete_texture(&self, texture: GLuint) {
        unsafe { gl::DeleteTextures(1, &texture) }
    }

    fn bind_texture(&self, unit: u32, texture: GLuint) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, texture);
        }
    }

    fn tex_image_2d(&self, format: PixelFormat, width: u32, height: u32, pixels: &[u8]) {
        let (internal, external) = match format {
            PixelFormat::Red => (gl::R8, gl::RED),
            PixelFormat::Rgba => (gl::RGBA8, gl::RGBA),
        };
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * format.channels()
        );
        unsafe {
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                internal as GLint,
                width as GLsizei,
                height as GLsizei,
                0,
                external,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr().cast(),
            );
        }
    }

    fn set_sampler(&self, sampler: SamplerState) {
        let wrap = match sampler.wrap {
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::ClampToEdge => gl::CLAMP_TO_EDGE,
        };
        let filter = match sampler.filter {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        };
        unsafe {
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter as GLint);
        }
    }

    fn create_buffer(&self) -> GLuint {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }

    fn delete_buffer(&self, buffer: GLuint) {
        unsafe { gl::DeleteBuffers(1, &buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, buffer: GLuint, data: &[u8]) {
        let target = target_enum(target);
        unsafe {
            gl::BindBuffer(target, buffer);
            gl::BufferData(
                target,
                data.len() as GLsizeiptr,
                data.as_ptr().cast(),
                gl::STATIC_DRAW,
            );
            gl::BindBuffer(target, 0);
        }
    }

    fn viewport(&self, viewport: Viewport) {
        unsafe { gl::Viewport(0, 0, viewport.width as GLsizei, viewport.height as GLsizei) }
    }

    fn clear(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn cull_face(&self, face: Face) {
        let face = match face {
            Face::Front => gl::FRONT,
            Face::Back => gl::BACK,
        };
        unsafe {
            gl::Enable(gl::CULL_FACE);
            gl::CullFace(face);
        }
    }

    fn enable_blend(&self) {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn enable_attrib(&self, location: AttribLocation, buffer: GLuint, components: i32) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer);
            gl::EnableVertexAttribArray(location.raw());
            gl::VertexAttribPointer(
                location.raw(),
                components,
                gl::FLOAT,
                gl::FALSE,
                0,
                std::ptr::null(),
            );
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }

    fn disable_attrib(&self, location: AttribLocation) {
        unsafe { gl::DisableVertexAttribArray(location.raw()) }
    }

    fn draw_elements(&self, mode: DrawMode, index_buffer: GLuint, count: usize) {
        let mode = match mode {
            DrawMode::Lines => gl::LINES,
            DrawMode::Triangles => gl::TRIANGLES,
        };
        unsafe {
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, index_buffer);
            gl::DrawElements(mode, count as GLsizei, gl::UNSIGNED_INT, std::ptr::null());
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }
    }
}
