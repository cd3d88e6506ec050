use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use glview_app::{Demo, FrameInput};
use glview_core::{DemoConfig, InputEvent, PipelineError, SphereMesh, Viewport, ViewerSettings};
use glview_gl::recording::{Call, RecordingGl, UniformValue};
use glview_gl::{DrawMode, Face};
use textured_spheres::{SphereContext, DEMOS, SUNLIT_TEXTURE};

const VIEWPORT: Viewport = Viewport {
    width: 800,
    height: 600,
};

/// A scratch asset directory with the bundled shaders, the test fixtures and
/// small generated stand-ins for every texture in `textures`. Removed on drop.
struct Assets {
    dir: PathBuf,
    settings: ViewerSettings,
}

impl Deref for Assets {
    type Target = ViewerSettings;

    fn deref(&self) -> &ViewerSettings {
        &self.settings
    }
}

impl Drop for Assets {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn assets(name: &str, textures: &[&str]) -> Assets {
    let dir = std::env::temp_dir().join(format!("textured-spheres-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    for source in [manifest.join("shaders"), manifest.join("tests/fixtures")] {
        for entry in std::fs::read_dir(source).unwrap() {
            let path = entry.unwrap().path();
            std::fs::copy(&path, dir.join(path.file_name().unwrap())).unwrap();
        }
    }

    for texture in textures {
        write_texture(&dir.join(texture));
    }
    let settings = ViewerSettings::new("spheres", (64, 64), dir.clone());
    Assets { dir, settings }
}

/// Formatted log output collected in memory.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLog {
    fn lines_at(&self, level: &str) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_owned)
            .collect()
    }
}

fn write_texture(path: &Path) {
    if path.extension().is_some_and(|e| e == "png") {
        image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    } else {
        image::RgbImage::from_pixel(4, 2, image::Rgb([200, 100, 50]))
            .save(path)
            .unwrap();
    }
}

fn all_textures() -> Vec<&'static str> {
    let mut names: Vec<_> = DEMOS.iter().map(|d| d.texture).collect();
    names.push(SUNLIT_TEXTURE);
    names.sort();
    names.dedup();
    names
}

fn frame() -> FrameInput {
    FrameInput {
        elapsed: Duration::from_millis(1500),
        viewport: VIEWPORT,
        frame: 0,
    }
}

#[test]
fn draws_the_sphere_twice_with_opposite_culling() {
    let gl = RecordingGl::new();
    let settings = assets("draw", &all_textures());
    let mut spheres = SphereContext::init(&gl, &settings).unwrap();

    gl.clear_calls();
    spheres.draw(&gl, &frame());

    let expected = SphereMesh::new(1.0, 30, 30).unwrap().indices().len();
    let culls_and_draws: Vec<_> = gl
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::CullFace(_) | Call::DrawElements { .. }))
        .collect();
    assert_eq!(culls_and_draws.len(), 4);
    assert_eq!(culls_and_draws[0], Call::CullFace(Face::Front));
    assert_eq!(culls_and_draws[2], Call::CullFace(Face::Back));
    for draw in [&culls_and_draws[1], &culls_and_draws[3]] {
        assert!(matches!(
            draw,
            Call::DrawElements { mode: DrawMode::Triangles, count, .. } if *count == expected
        ));
    }

    // The first program has no normals.
    let attribs = gl
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::EnableAttrib { .. }))
        .count();
    assert_eq!(attribs, 1);
}

#[test]
fn tiling_uniform_is_pushed_only_for_st_shaders() {
    let gl = RecordingGl::new();
    let settings = assets("tiling", &all_textures());
    let mut spheres = SphereContext::new(&gl, &settings).unwrap();
    assert!(spheres.active().bindings().mytexture_st.is_none());

    spheres.handle(&gl, InputEvent::AdvanceConfig);
    assert_eq!(spheres.cycler().active_index(), 1);
    assert!(spheres.active().bindings().mytexture_st.is_some());

    gl.clear_calls();
    spheres.render(&gl, Duration::ZERO, VIEWPORT);
    let program = spheres.active().program().id();
    assert_eq!(
        gl.uniform_values(program, "mytexture_ST"),
        [UniformValue::Vec4([2.0, 1.0, 0.0, -0.05])]
    );
}

#[test]
fn clicking_through_every_configuration_returns_to_the_start() {
    let gl = RecordingGl::new();
    let settings = assets("cycle", &all_textures());
    let mut spheres = SphereContext::new(&gl, &settings).unwrap();
    let programs_at_start = gl.live_programs();

    for expected in (1..DEMOS.len()).chain([0]) {
        spheres.handle(&gl, InputEvent::AdvanceConfig);
        assert_eq!(spheres.cycler().active_index(), expected);
        // Only the active program survives a switch.
        assert_eq!(gl.live_programs(), programs_at_start);

        let sunlit = spheres.active().sunlit().is_some();
        assert_eq!(sunlit, DEMOS[expected].vertex_shader == "sphere-sunlit.v.glsl");
    }
}

#[test]
fn missing_day_texture_only_warns() {
    let gl = RecordingGl::new();
    let textures: Vec<_> = all_textures()
        .into_iter()
        .filter(|t| *t != SUNLIT_TEXTURE)
        .collect();
    let settings = assets("no-sunlit", &textures);
    let sunlit_only = [DEMOS[8]];

    let spheres = SphereContext::with_table(&gl, &settings, sunlit_only).unwrap();
    assert!(spheres.active().bindings().mytexture_sunlit.is_some());
    assert!(spheres.active().sunlit().is_none());

    gl.clear_calls();
    spheres.render(&gl, Duration::ZERO, VIEWPORT);
    let program = spheres.active().program().id();
    assert!(gl.uniform_values(program, "mytexture_sunlit").is_empty());
    assert_eq!(gl.draw_calls().len(), 2);
}

#[test]
fn failed_switch_keeps_the_active_configuration() {
    let gl = RecordingGl::new();
    let settings = assets("broken", &all_textures());
    let table = [
        DEMOS[0],
        DemoConfig::new(DEMOS[0].texture, "sphere.v.glsl", "sphere_broken_ST.f.glsl"),
        DEMOS[2],
    ];
    let mut spheres = SphereContext::with_table(&gl, &settings, table).unwrap();
    let first_program = spheres.active().program().id();

    let err = spheres.advance(&gl).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingRequiredBinding { ref name, .. } if name == "mytexture_ST"
    ));
    assert_eq!(spheres.cycler().cursor(), 1);
    assert_eq!(spheres.cycler().active_index(), 0);
    assert_eq!(spheres.active().program().id(), first_program);
    assert_eq!(gl.live_programs(), 1);

    // Still drawable.
    gl.clear_calls();
    spheres.render(&gl, Duration::ZERO, VIEWPORT);
    assert_eq!(gl.draw_calls().len(), 2);

    spheres.advance(&gl).unwrap();
    assert_eq!(spheres.cycler().active_index(), 2);
    assert_eq!(spheres.cycler().active_config(), &DEMOS[2]);
}

#[test]
fn missing_first_texture_is_fatal() {
    let gl = RecordingGl::new();
    let settings = assets("no-textures", &[]);
    let err = SphereContext::<RecordingGl>::init(&gl, &settings)
        .err()
        .unwrap();

    assert!(format!("{err:#}").contains("GLVIEW_ASSET_DIR"), "got {err:#}");

    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::ResourceNotFound { path, .. }) if path.ends_with(DEMOS[0].texture)
    ));
    assert!(gl.draw_calls().is_empty());
    assert_eq!(gl.live_programs(), 0);
    assert_eq!(gl.live_textures(), 0);
    assert_eq!(gl.live_buffers(), 0);
}

#[test]
fn f3_pauses_the_spin() {
    let gl = RecordingGl::new();
    let settings = assets("pause", &all_textures());
    let mut spheres = SphereContext::new(&gl, &settings).unwrap();
    assert!(spheres.state().rotate());

    spheres.handle(&gl, InputEvent::ToggleRotate);
    assert!(!spheres.state().rotate());
    assert_eq!(spheres.cycler().active_index(), 0);

    let program = spheres.active().program().id();
    gl.clear_calls();
    spheres.render(&gl, Duration::from_secs(1), VIEWPORT);
    spheres.render(&gl, Duration::from_secs(7), VIEWPORT);
    let models = gl.uniform_values(program, "m");
    assert_eq!(models.len(), 2);
    assert_eq!(models[0], models[1]);
}

#[test]
fn failed_switch_is_logged_once() {
    let gl = RecordingGl::new();
    let settings = assets("log-once", &all_textures());
    let table = [
        DEMOS[0],
        DemoConfig::new(DEMOS[0].texture, "sphere.v.glsl", "sphere_broken_ST.f.glsl"),
    ];
    let mut spheres = SphereContext::with_table(&gl, &settings, table).unwrap();

    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        spheres.handle(&gl, InputEvent::AdvanceConfig);
    });

    let errors = log.lines_at("ERROR");
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("mytexture_ST"), "{errors:?}");
    assert!(log
        .lines_at("WARN")
        .iter()
        .all(|line| !line.contains("mytexture_ST")));
    assert_eq!(spheres.cycler().active_index(), 0);
}
