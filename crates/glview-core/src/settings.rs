//! Host settings for a demo window.
//!
//! Each demo supplies defaults; a couple of environment variables can
//! override them. Nothing is persisted.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Overrides the directory shaders and textures are loaded from.
pub const ASSET_DIR_VAR: &str = "GLVIEW_ASSET_DIR";

/// Overrides the initial window size, as `WIDTHxHEIGHT`.
pub const WINDOW_SIZE_VAR: &str = "GLVIEW_WINDOW_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub asset_dir: PathBuf,
}

impl ViewerSettings {
    pub fn new(
        title: impl Into<String>,
        (width, height): (u32, u32),
        asset_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            asset_dir: asset_dir.into(),
        }
    }

    /// Apply `GLVIEW_ASSET_DIR` and `GLVIEW_WINDOW_SIZE` from the process
    /// environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var_os(ASSET_DIR_VAR).map(PathBuf::from),
            std::env::var(WINDOW_SIZE_VAR).ok(),
        )
    }

    /// Apply overrides from already-read values. An unparsable size is
    /// reported and ignored.
    pub fn with_overrides(
        mut self,
        asset_dir: Option<PathBuf>,
        window_size: Option<String>,
    ) -> Self {
        if let Some(dir) = asset_dir {
            self.asset_dir = dir;
        }
        if let Some(size) = window_size {
            match parse_window_size(&size) {
                Some((width, height)) => {
                    self.width = width;
                    self.height = height;
                }
                None => warn!("ignoring {WINDOW_SIZE_VAR}={size:?}, expected WIDTHxHEIGHT"),
            }
        }
        self
    }

    /// Resolve a path from a demo table against the asset directory.
    pub fn asset(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.asset_dir.join(relative)
    }
}

fn parse_window_size(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.trim().split_once(['x', 'X'])?;
    let width = w.trim().parse().ok().filter(|&w: &u32| w > 0)?;
    let height = h.trim().parse().ok().filter(|&h: &u32| h > 0)?;
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ViewerSettings {
        ViewerSettings::new("My Graph", (640, 480), "demos/heightfield-grid")
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        assert_eq!(defaults().with_overrides(None, None), defaults());
    }

    #[test]
    fn test_overrides_apply() {
        let settings = defaults().with_overrides(Some("/srv/assets".into()), Some("1024x768".into()));
        assert_eq!(settings.asset_dir, PathBuf::from("/srv/assets"));
        assert_eq!((settings.width, settings.height), (1024, 768));
        assert_eq!(settings.asset("graph.v.glsl"), PathBuf::from("/srv/assets/graph.v.glsl"));
    }

    #[test]
    fn test_bad_window_size_is_ignored() {
        for bad in ["", "800", "0x600", "800x", "axb", "-1x5"] {
            let settings = defaults().with_overrides(None, Some(bad.into()));
            assert_eq!((settings.width, settings.height), (640, 480), "{bad:?}");
        }
    }

    #[test]
    fn test_window_size_parsing_is_lenient() {
        assert_eq!(parse_window_size(" 800 X 600 "), Some((800, 600)));
    }
}
