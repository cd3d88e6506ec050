//! Textured sphere viewer.
//!
//! The earth textures are not shipped with the crate. Run with
//! `GLVIEW_ASSET_DIR` pointing at a directory holding the images listed in
//! `textured_spheres::DEMOS` together with the `shaders/` files, otherwise
//! startup fails with a missing-file error.

use textured_spheres::{default_settings, SphereContext};

fn main() -> anyhow::Result<()> {
    let settings = default_settings().with_env_overrides();
    glview_app::run_demo::<SphereContext<glview_gl::RawGl>>(settings)
}
