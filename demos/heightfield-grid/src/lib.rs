//! Height-field grid demo.
//!
//! A 101x101 line grid is displaced in the vertex shader by a generated
//! 256x256 height texture. F1/F2 switch texture filtering and wrapping, F3
//! spins the grid, arrows and PageUp/PageDown move and scale the texture,
//! Home resets.

use std::time::Duration;

use glview_app::{Demo, FrameInput};
use glview_core::{
    GridMesh, GridTransforms, Heightfield, InputEvent, InteractionState, PipelineError,
    SamplerState, Viewport, ViewerSettings,
};
use glview_gl::{
    AttribLocation, DrawMode, GlApi, GridBuffers, ShaderProgram, TextureResource,
    UniformLocation, UniformPush,
};
use tracing::{debug, info};

pub const VERTEX_SHADER: &str = "graph.v.glsl";
pub const FRAGMENT_SHADER: &str = "graph.f.glsl";

/// Line segments per grid side.
pub const GRID_RESOLUTION: u32 = 100;

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Window title, size and the bundled shader directory.
pub fn default_settings() -> ViewerSettings {
    ViewerSettings::new(
        "My Graph",
        (640, 480),
        concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"),
    )
}

/// Locations the grid program must (or may) provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBindings {
    pub coord2d: AttribLocation,
    pub vertex_transform: UniformLocation,
    pub texture_transform: UniformLocation,
    /// Drivers may fold the sampler away; it is pushed only when present.
    pub mytexture: Option<UniformLocation>,
}

impl GridBindings {
    pub fn resolve<A: GlApi>(program: &mut ShaderProgram<A>) -> Result<Self, PipelineError> {
        Ok(Self {
            coord2d: program.require_attribute("coord2d")?,
            vertex_transform: program.require_uniform("vertex_transform")?,
            texture_transform: program.require_uniform("texture_transform")?,
            mytexture: program.optional_uniform("mytexture"),
        })
    }
}

/// Everything the grid demo owns between frames.
pub struct GridContext<A: GlApi> {
    program: ShaderProgram<A>,
    bindings: GridBindings,
    heightfield: TextureResource<A>,
    buffers: GridBuffers<A>,
    state: InteractionState,
}

impl<A: GlApi> GridContext<A> {
    /// Build the program, the height texture and the grid buffers.
    ///
    /// Nothing is uploaded unless the program links and every required
    /// binding resolves.
    pub fn new(api: &A, settings: &ViewerSettings) -> Result<Self, PipelineError> {
        let mut program = ShaderProgram::from_files(
            api,
            settings.asset(VERTEX_SHADER),
            settings.asset(FRAGMENT_SHADER),
        )?;
        let bindings = GridBindings::resolve(&mut program)?;
        let mesh = GridMesh::new(GRID_RESOLUTION)?;

        let state = InteractionState::default();
        let heightfield = TextureResource::from_heightfield(
            api,
            &Heightfield::default(),
            SamplerState::from_state(&state),
        );
        let buffers = GridBuffers::upload(api, &mesh);

        info!(
            program = program.id(),
            vertices = buffers.vertices.len(),
            indices = buffers.indices.len(),
            "grid ready"
        );
        Ok(Self {
            program,
            bindings,
            heightfield,
            buffers,
            state,
        })
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn program(&self) -> &ShaderProgram<A> {
        &self.program
    }

    pub fn bindings(&self) -> &GridBindings {
        &self.bindings
    }

    /// Apply one input event. Returns `false` for events the grid ignores.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        let handled = self.state.apply(event);
        if handled {
            debug!(?event, state = ?self.state, "grid state");
        }
        handled
    }

    /// Push this frame's uniforms and draw the grid.
    pub fn render(&self, api: &A, elapsed: Duration, viewport: Viewport) {
        let t = GridTransforms::compute(&self.state, elapsed, viewport);

        api.viewport(viewport);
        api.clear(CLEAR_COLOR);

        self.program.activate();
        api.push_sampler(self.bindings.mytexture, 0);
        api.push_mat4(Some(self.bindings.vertex_transform), &t.vertex_transform);
        api.push_mat4(Some(self.bindings.texture_transform), &t.texture_transform);

        self.heightfield.apply_sampler(t.sampler);

        api.enable_attrib(self.bindings.coord2d, self.buffers.vertices.id(), 2);
        api.draw_elements(
            DrawMode::Lines,
            self.buffers.indices.id(),
            self.buffers.indices.len(),
        );
        api.disable_attrib(self.bindings.coord2d);
    }
}

impl<A: GlApi + 'static> Demo<A> for GridContext<A> {
    fn init(api: &A, settings: &ViewerSettings) -> anyhow::Result<Self> {
        Ok(Self::new(api, settings)?)
    }

    fn handle_event(&mut self, _api: &A, event: InputEvent) {
        self.handle(event);
    }

    fn draw(&mut self, api: &A, input: &FrameInput) {
        self.render(api, input.elapsed, input.viewport);
    }
}
