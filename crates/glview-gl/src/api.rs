//! The seam between the pipeline and an OpenGL implementation.

use std::ffi::CStr;

use gl::types::{GLint, GLuint};
use glview_core::{SamplerState, StageKind, Viewport};

use crate::bindings::{AttribLocation, UniformLocation};

/// Which buffer binding point data is uploaded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Vertex,
    Index,
}

/// Pixel layouts accepted by [`GlApi::tex_image_2d`]. Both are 8 bits per
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Red,
    Rgba,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Red => 1,
            PixelFormat::Rgba => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Lines,
    Triangles,
}

/// Faces discarded by back-face culling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

/// The subset of OpenGL the demos use, with GL's object names kept as raw
/// `GLuint`s.
///
/// [`RawGl`](crate::RawGl) forwards to the loaded driver; `RecordingGl`
/// (feature `recording`) fakes a driver in-process for tests. Implementors
/// are cheap handles, cloned into every resource that has to release itself.
pub trait GlApi: Clone {
    fn create_shader(&self, stage: StageKind) -> GLuint;

    /// Upload `source` and compile. Returns the compile status.
    fn compile_shader(&self, shader: GLuint, source: &CStr) -> bool;

    fn shader_info_log(&self, shader: GLuint) -> String;

    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;

    fn attach_shader(&self, program: GLuint, shader: GLuint);

    fn detach_shader(&self, program: GLuint, shader: GLuint);

    /// Link and return the link status.
    fn link_program(&self, program: GLuint) -> bool;

    fn program_info_log(&self, program: GLuint) -> String;

    fn delete_program(&self, program: GLuint);

    fn use_program(&self, program: GLuint);

    /// Raw location, `-1` when the program has no such active attribute.
    fn attrib_location(&self, program: GLuint, name: &CStr) -> GLint;

    /// Raw location, `-1` when the program has no such active uniform.
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;

    fn uniform_1i(&self, location: UniformLocation, value: i32);

    fn uniform_4f(&self, location: UniformLocation, value: [f32; 4]);

    /// Column-major 3x3.
    fn uniform_matrix3(&self, location: UniformLocation, value: &[f32; 9]);

    /// Column-major 4x4.
    fn uniform_matrix4(&self, location: UniformLocation, value: &[f32; 16]);

    fn create_texture(&self) -> GLuint;

    fn delete_texture(&self, texture: GLuint);

    /// Make `unit` active and bind `texture` to its 2-D target.
    fn bind_texture(&self, unit: u32, texture: GLuint);

    /// Upload pixels to the texture bound on the active unit.
    fn tex_image_2d(&self, format: PixelFormat, width: u32, height: u32, pixels: &[u8]);

    /// Set filtering and wrapping on the texture bound on the active unit.
    fn set_sampler(&self, sampler: SamplerState);

    fn create_buffer(&self) -> GLuint;

    fn delete_buffer(&self, buffer: GLuint);

    /// Bind `buffer` to `target` and fill it with static data.
    fn buffer_data(&self, target: BufferTarget, buffer: GLuint, data: &[u8]);

    fn viewport(&self, viewport: Viewport);

    /// Clear color and depth.
    fn clear(&self, color: [f32; 4]);

    /// Enable culling of `face`.
    fn cull_face(&self, face: Face);

    /// Enable source-alpha blending.
    fn enable_blend(&self);

    /// Feed `location` with tightly packed `f32` tuples from `buffer`.
    fn enable_attrib(&self, location: AttribLocation, buffer: GLuint, components: i32);

    fn disable_attrib(&self, location: AttribLocation);

    /// Draw `count` `u32` indices from `index_buffer`.
    fn draw_elements(&self, mode: DrawMode, index_buffer: GLuint, count: usize);
}
