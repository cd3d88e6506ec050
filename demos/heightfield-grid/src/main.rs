use heightfield_grid::{default_settings, GridContext};

fn main() -> anyhow::Result<()> {
    let settings = default_settings().with_env_overrides();
    glview_app::run_demo::<GridContext<glview_gl::RawGl>>(settings)
}
