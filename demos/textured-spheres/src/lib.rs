//! Textured sphere demo.
//!
//! A rotating earth is drawn with one of nine shader/texture
//! configurations; a left click moves to the next one. F3 pauses the spin.
//!
//! Textures are looked up in the asset directory next to the shaders. They
//! are not bundled; point `GLVIEW_ASSET_DIR` at a directory holding both.

use std::time::Duration;

use glview_app::{Demo, FrameInput};
use glview_core::settings::ASSET_DIR_VAR;
use glview_core::{
    ConfigCycler, DemoConfig, InputEvent, InteractionState, PipelineError, SphereMesh,
    SphereTransforms, Viewport, ViewerSettings,
};
use glview_gl::{
    AttribLocation, DrawMode, Face, GlApi, ShaderProgram, SphereBuffers, TextureResource,
    UniformLocation, UniformPush,
};
use tracing::{debug, error, warn};

/// Day-time layer, loaded only for programs that sample `mytexture_sunlit`.
pub const SUNLIT_TEXTURE: &str = "Land_shallow_topo_2048.jpg";

pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_SLICES: u32 = 30;
pub const SPHERE_STACKS: u32 = 30;

const CLEAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

const GRID: &str = "Earthmap720x360_grid.jpg";
const TOPO_ALPHA: &str = "Land_shallow_topo_alpha_2048.png";
const LIGHTS: &str = "Earth_lights_lrg.jpg";

/// Configurations in click order.
pub const DEMOS: [DemoConfig; 9] = [
    // Textured spheres
    DemoConfig::new(GRID, "sphere.v.glsl", "sphere.f.glsl"),
    DemoConfig::new(GRID, "sphere.v.glsl", "sphere_ST.f.glsl"),
    // Lighting textured surfaces
    DemoConfig::new(GRID, "sphere-gouraud.v.glsl", "sphere-gouraud.f.glsl"),
    // Glossy textures
    DemoConfig::new(TOPO_ALPHA, "sphere-gouraud.v.glsl", "sphere-gouraud-glossy.f.glsl"),
    DemoConfig::new(TOPO_ALPHA, "sphere-phong.v.glsl", "sphere-phong.f.glsl"),
    // Transparent textures
    DemoConfig::new(TOPO_ALPHA, "sphere.v.glsl", "sphere_discard.f.glsl"),
    DemoConfig::new(TOPO_ALPHA, "sphere.v.glsl", "sphere.f.glsl"),
    DemoConfig::new(TOPO_ALPHA, "sphere.v.glsl", "sphere_oceans.f.glsl"),
    // Layers of textures
    DemoConfig::new(LIGHTS, "sphere-sunlit.v.glsl", "sphere-sunlit.f.glsl"),
];

pub fn default_settings() -> ViewerSettings {
    ViewerSettings::new(
        "Textured Spheres",
        (800, 600),
        concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"),
    )
}

/// Locations resolved against one sphere program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphereBindings {
    pub v_coord: AttribLocation,
    pub v_normal: Option<AttribLocation>,
    pub m: UniformLocation,
    pub v: UniformLocation,
    pub p: UniformLocation,
    pub m_3x3_inv_transp: Option<UniformLocation>,
    pub v_inv: Option<UniformLocation>,
    pub mytexture: UniformLocation,
    pub mytexture_sunlit: Option<UniformLocation>,
    /// Required for `_ST` fragment shaders, looked up as optional otherwise.
    pub mytexture_st: Option<UniformLocation>,
}

impl SphereBindings {
    pub fn resolve<A: GlApi>(
        program: &mut ShaderProgram<A>,
        config: &DemoConfig,
    ) -> Result<Self, PipelineError> {
        let v_coord = program.require_attribute("v_coord")?;
        let v_normal = program.optional_attribute("v_normal");
        let m = program.require_uniform("m")?;
        let v = program.require_uniform("v")?;
        let p = program.require_uniform("p")?;
        let m_3x3_inv_transp = program.optional_uniform("m_3x3_inv_transp");
        let v_inv = program.optional_uniform("v_inv");
        let mytexture = program.require_uniform("mytexture")?;
        let mytexture_sunlit = program.optional_uniform("mytexture_sunlit");
        let mytexture_st = if config.uses_tiling() {
            Some(program.require_uniform("mytexture_ST")?)
        } else {
            program.optional_uniform("mytexture_ST")
        };

        Ok(Self {
            v_coord,
            v_normal,
            m,
            v,
            p,
            m_3x3_inv_transp,
            v_inv,
            mytexture,
            mytexture_sunlit,
            mytexture_st,
        })
    }
}

/// The program, bindings and textures for one [`DemoConfig`]. Built and
/// replaced as a unit.
pub struct SphereResources<A: GlApi> {
    program: ShaderProgram<A>,
    bindings: SphereBindings,
    texture: TextureResource<A>,
    sunlit: Option<TextureResource<A>>,
}

impl<A: GlApi> SphereResources<A> {
    pub fn build(
        api: &A,
        settings: &ViewerSettings,
        config: &DemoConfig,
    ) -> Result<Self, PipelineError> {
        let mut program = ShaderProgram::from_files(
            api,
            settings.asset(config.vertex_shader),
            settings.asset(config.fragment_shader),
        )?;
        let bindings = SphereBindings::resolve(&mut program, config)?;
        let texture = TextureResource::load(api, settings.asset(config.texture))?;

        let sunlit = match bindings.mytexture_sunlit {
            Some(_) => TextureResource::load(api, settings.asset(SUNLIT_TEXTURE))
                .inspect_err(|e| warn!("day-time layer unavailable: {e}"))
                .ok(),
            None => None,
        };

        Ok(Self {
            program,
            bindings,
            texture,
            sunlit,
        })
    }

    pub fn program(&self) -> &ShaderProgram<A> {
        &self.program
    }

    pub fn bindings(&self) -> &SphereBindings {
        &self.bindings
    }

    pub fn texture(&self) -> &TextureResource<A> {
        &self.texture
    }

    pub fn sunlit(&self) -> Option<&TextureResource<A>> {
        self.sunlit.as_ref()
    }
}

/// Everything the sphere demo owns between frames.
pub struct SphereContext<A: GlApi> {
    cycler: ConfigCycler<SphereResources<A>>,
    buffers: SphereBuffers<A>,
    state: InteractionState,
    settings: ViewerSettings,
}

impl<A: GlApi> SphereContext<A> {
    /// Build the first configuration and the sphere mesh. Any failure here
    /// is fatal.
    pub fn new(api: &A, settings: &ViewerSettings) -> Result<Self, PipelineError> {
        Self::with_table(api, settings, DEMOS)
    }

    /// Like [`SphereContext::new`] with a custom configuration table.
    pub fn with_table(
        api: &A,
        settings: &ViewerSettings,
        table: impl Into<Vec<DemoConfig>>,
    ) -> Result<Self, PipelineError> {
        let cycler = ConfigCycler::start(table, |config| {
            SphereResources::build(api, settings, config)
        })?;
        let mesh = SphereMesh::new(SPHERE_RADIUS, SPHERE_SLICES, SPHERE_STACKS)?;
        let buffers = SphereBuffers::upload(api, &mesh);

        Ok(Self {
            cycler,
            buffers,
            state: InteractionState::rotating(),
            settings: settings.clone(),
        })
    }

    pub fn cycler(&self) -> &ConfigCycler<SphereResources<A>> {
        &self.cycler
    }

    pub fn active(&self) -> &SphereResources<A> {
        self.cycler.active()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Switch to the next configuration. On failure the current one stays
    /// active and the error is returned.
    pub fn advance(&mut self, api: &A) -> Result<(), PipelineError> {
        let settings = &self.settings;
        self.cycler
            .advance(|config| SphereResources::build(api, settings, config))
            .map(|_| ())
    }

    pub fn handle(&mut self, api: &A, event: InputEvent) {
        if self.state.apply(event) {
            debug!(?event, rotate = self.state.rotate(), "sphere state");
            return;
        }
        if let Err(err) = self.advance(api) {
            error!(
                index = self.cycler.cursor(),
                "could not switch configuration: {err}"
            );
        }
    }

    pub fn render(&self, api: &A, elapsed: Duration, viewport: Viewport) {
        let t = SphereTransforms::compute(&self.state, elapsed, viewport);
        let active = self.cycler.active();
        let b = &active.bindings;

        api.viewport(viewport);
        api.clear(CLEAR_COLOR);
        api.enable_blend();

        active.program.activate();
        api.push_mat4(Some(b.m), &t.model);
        api.push_mat3(b.m_3x3_inv_transp, &t.normal_matrix);
        api.push_mat4(Some(b.v), &t.view);
        api.push_mat4(b.v_inv, &t.view_inverse);
        api.push_mat4(Some(b.p), &t.projection);
        api.push_vec4(b.mytexture_st, t.texture_st);

        active.texture.bind(0);
        api.push_sampler(Some(b.mytexture), 0);
        if let Some(sunlit) = &active.sunlit {
            sunlit.bind(1);
            api.push_sampler(b.mytexture_sunlit, 1);
        }

        api.enable_attrib(b.v_coord, self.buffers.positions.id(), 3);
        if let Some(normal) = b.v_normal {
            api.enable_attrib(normal, self.buffers.normals.id(), 3);
        }

        // Inside first, then outside, so translucent texels show the far side.
        for face in [Face::Front, Face::Back] {
            api.cull_face(face);
            api.draw_elements(
                DrawMode::Triangles,
                self.buffers.indices.id(),
                self.buffers.indices.len(),
            );
        }

        api.disable_attrib(b.v_coord);
        if let Some(normal) = b.v_normal {
            api.disable_attrib(normal);
        }
    }
}

impl<A: GlApi + 'static> Demo<A> for SphereContext<A> {
    fn init(api: &A, settings: &ViewerSettings) -> anyhow::Result<Self> {
        Self::new(api, settings).map_err(|err| match err {
            err @ PipelineError::ResourceNotFound { .. } => anyhow::Error::new(err).context(format!(
                "textures are not bundled; set {ASSET_DIR_VAR} to a directory holding \
                 the textures and the shaders (currently {})",
                settings.asset_dir.display()
            )),
            other => other.into(),
        })
    }

    fn handle_event(&mut self, api: &A, event: InputEvent) {
        self.handle(api, event);
    }

    fn draw(&mut self, api: &A, input: &FrameInput) {
        self.render(api, input.elapsed, input.viewport);
    }
}
