//! GLSL version detection.
//!
//! The demo shaders are written against GLSL 1.20 (`attribute`/`varying`),
//! so a context that cannot compile 1.20 is rejected before any resource is
//! created. The height texture is uploaded as `R8`, which also needs GL 3.0
//! or `ARB_texture_rg`.

use glium::{Api, CapabilitiesSource, Version};
use glview_core::PipelineError;

/// Desktop GLSL versions the demo shaders can run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GlslVersion {
    Glsl120,
    Glsl140,
}

/// Best usable version among `supported`, or `None` if 1.20 is missing.
///
/// glium reports GLSL `1.x0` as `Version(Gl, 1, x)`. Core profiles drop 1.20
/// even when they list newer versions.
pub fn best_version(supported: &[Version]) -> Option<GlslVersion> {
    let has = |minor| supported.iter().any(|v| *v == Version(Api::Gl, 1, minor));

    if !has(2) {
        return None;
    }
    if has(4) {
        Some(GlslVersion::Glsl140)
    } else {
        Some(GlslVersion::Glsl120)
    }
}

/// Whether single-channel `R8` textures can be created.
pub fn supports_red_textures(gl_version: &Version, arb_texture_rg: bool) -> bool {
    arb_texture_rg || (gl_version.0 == Api::Gl && gl_version.1 >= 3)
}

/// Check the context before building programs.
pub fn require_glsl_120(ctx: &impl CapabilitiesSource) -> Result<GlslVersion, PipelineError> {
    let supported = &ctx.get_capabilities().supported_glsl_versions;
    let version = best_version(supported).ok_or_else(|| {
        PipelineError::UnsupportedContext(format!(
            "GLSL 1.20 is not available (context offers {supported:?})"
        ))
    })?;
    tracing::info!(?version, "GLSL support detected");
    Ok(version)
}

/// Refuse contexts that cannot hold the `R8` height texture.
pub fn require_red_textures(ctx: &impl CapabilitiesSource) -> Result<(), PipelineError> {
    let version = ctx.get_version();
    if supports_red_textures(version, ctx.get_extensions().gl_arb_texture_rg) {
        Ok(())
    } else {
        Err(PipelineError::UnsupportedContext(format!(
            "R8 textures need GL 3.0 or ARB_texture_rg (context is {version:?})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_newest_supported() {
        let versions = [Version(Api::Gl, 1, 1), Version(Api::Gl, 1, 2), Version(Api::Gl, 1, 4)];
        assert_eq!(best_version(&versions), Some(GlslVersion::Glsl140));
        assert_eq!(best_version(&versions[..2]), Some(GlslVersion::Glsl120));
    }

    #[test]
    fn test_rejects_es_only_contexts() {
        let versions = [Version(Api::GlEs, 1, 0), Version(Api::Gl, 1, 1)];
        assert_eq!(best_version(&versions), None);
    }

    #[test]
    fn test_rejects_core_profile_without_120() {
        // What a 3.3 core context reports: 1.40 and up, no 1.20.
        let versions = [
            Version(Api::GlEs, 1, 0),
            Version(Api::Gl, 1, 4),
            Version(Api::Gl, 1, 5),
            Version(Api::Gl, 3, 3),
        ];
        assert_eq!(best_version(&versions), None);
    }

    #[test]
    fn test_red_textures_need_gl3_or_extension() {
        assert!(!supports_red_textures(&Version(Api::Gl, 2, 1), false));
        assert!(supports_red_textures(&Version(Api::Gl, 2, 1), true));
        assert!(supports_red_textures(&Version(Api::Gl, 3, 0), false));
        assert!(!supports_red_textures(&Version(Api::GlEs, 3, 0), false));
    }
}
