//! OpenGL plumbing for the viewer demos.
//!
//! Programs, bindings, textures and buffers are built against the
//! [`GlApi`] trait. [`RawGl`] drives the real context; with the `recording`
//! feature, `recording::RecordingGl` fakes one so the whole pipeline can be
//! tested without a window.
//!
//! [`GlContext`] ties a glium window display to a [`RawGl`] handle and does
//! the per-frame housekeeping.
//!
//! ### Warning
//!
//! Every resource type here assumes the context it was created on is current
//! on the calling thread. Nothing is `Send`.

use glium::glutin::surface::WindowSurface;
use glium::{CapabilitiesSource, Display};
use glview_core::{PipelineError, Viewport};
use tracing::{debug, error, trace};

pub mod api;
pub mod bindings;
pub mod buffer;
pub mod bytes;
mod gl_backend;
pub mod glsl;
pub mod program;
#[cfg(any(test, feature = "recording"))]
pub mod recording;
pub mod texture;
pub mod uniforms;
pub mod validate_gl;

pub use api::{BufferTarget, DrawMode, Face, GlApi, PixelFormat};
pub use bindings::{AttribLocation, BindingEntry, BindingTable, Requirement, UniformLocation};
pub use buffer::{GpuBuffer, GridBuffers, SphereBuffers};
pub use gl_backend::RawGl;
pub use glsl::GlslVersion;
pub use program::{compile_source, compile_stage, link_program, CompiledStage, ShaderProgram};
pub use texture::TextureResource;
pub use uniforms::UniformPush;

/// A window's GL context, ready for the demos to draw into.
pub struct GlContext {
    display: Display<WindowSurface>,
    gl: RawGl,
    glsl: GlslVersion,
}

impl std::fmt::Debug for GlContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlContext")
            .field("glsl", &self.glsl)
            .finish_non_exhaustive()
    }
}

impl GlContext {
    /// Load GL entry points for `display` and check it can run the demo
    /// shaders.
    pub fn new(display: Display<WindowSurface>) -> Result<Self, PipelineError> {
        let opengl_version = display.get_opengl_version_string();
        let valid_versions = &display.get_capabilities().supported_glsl_versions;
        debug!("OPENGL_VERSION {opengl_version}");
        debug!("VALID VERSIONS: {valid_versions:?}");

        let glsl = glsl::require_glsl_120(&*display)?;
        glsl::require_red_textures(&*display)?;

        // SAFETY: glium made the display's context current when it created
        // it, and the display outlives the handle.
        let gl = unsafe { RawGl::load() };

        Ok(Self { display, gl, glsl })
    }

    pub fn gl(&self) -> &RawGl {
        &self.gl
    }

    pub fn glsl(&self) -> GlslVersion {
        self.glsl
    }

    pub fn display(&self) -> &Display<WindowSurface> {
        &self.display
    }

    /// Current framebuffer size.
    pub fn viewport(&self) -> Viewport {
        let (width, height) = self.display.get_framebuffer_dimensions();
        Viewport::new(width, height)
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.display.resize((width, height));
    }

    /// Reset state left by the frame, report driver errors, and present.
    pub fn finish_frame(&self) {
        unsafe {
            validate_gl::gl_reset();
            let errors = validate_gl::drain_errors();
            if errors > 0 {
                trace!(errors, "frame left GL errors");
            }
        }

        if let Err(err) = self.display.swap_buffers() {
            error!("swap_buffers failed: {err:?}");
        }
    }
}
