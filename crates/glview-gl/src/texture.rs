//! 2-D textures: the generated height field and decoded image files.

use std::path::{Path, PathBuf};

use gl::types::GLuint;
use glview_core::{Heightfield, PipelineError, SamplerState, TextureFilter, TextureWrap};
use image::ImageReader;
use tracing::{debug, error};

use crate::api::{GlApi, PixelFormat};

/// Sampling used for image files: smooth and tiling.
pub const IMAGE_SAMPLER: SamplerState = SamplerState {
    filter: TextureFilter::Linear,
    wrap: TextureWrap::Repeat,
};

/// An uploaded 2-D texture, deleted on drop.
pub struct TextureResource<A: GlApi> {
    api: A,
    id: GLuint,
    /// File the pixels came from, `None` for generated data.
    path: Option<PathBuf>,
    width: u32,
    height: u32,
}

impl<A: GlApi> TextureResource<A> {
    fn upload(
        api: &A,
        format: PixelFormat,
        width: u32,
        height: u32,
        pixels: &[u8],
        sampler: SamplerState,
        path: Option<PathBuf>,
    ) -> Self {
        let id = api.create_texture();
        api.bind_texture(0, id);
        api.tex_image_2d(format, width, height, pixels);
        api.set_sampler(sampler);
        debug!(texture = id, width, height, ?format, "uploaded");
        Self {
            api: api.clone(),
            id,
            path,
            width,
            height,
        }
    }

    /// Upload a height field as a single-channel texture.
    pub fn from_heightfield(api: &A, field: &Heightfield, sampler: SamplerState) -> Self {
        let size = field.size();
        Self::upload(api, PixelFormat::Red, size, size, field.texels(), sampler, None)
    }

    /// Upload tightly packed RGBA8 pixels, bottom row first.
    pub fn from_rgba(
        api: &A,
        width: u32,
        height: u32,
        pixels: &[u8],
        sampler: SamplerState,
    ) -> Self {
        Self::upload(api, PixelFormat::Rgba, width, height, pixels, sampler, None)
    }

    /// Decode an image file and upload it with [`IMAGE_SAMPLER`].
    ///
    /// Rows are flipped so the first row of the file lands at `t = 1`.
    pub fn load(api: &A, path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let image = decode(path).inspect_err(|e| error!("{e}"))?;
        let (width, height) = image.dimensions();
        let mut texture = Self::from_rgba(api, width, height, image.as_raw(), IMAGE_SAMPLER);
        texture.path = Some(path.to_path_buf());
        Ok(texture)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bind to texture unit `unit`.
    pub fn bind(&self, unit: u32) {
        self.api.bind_texture(unit, self.id);
    }

    /// Bind to unit 0 and replace its filtering and wrapping.
    pub fn apply_sampler(&self, sampler: SamplerState) {
        self.bind(0);
        self.api.set_sampler(sampler);
    }
}

impl<A: GlApi> Drop for TextureResource<A> {
    fn drop(&mut self) {
        self.api.delete_texture(self.id);
    }
}

fn decode(path: &Path) -> Result<image::RgbaImage, PipelineError> {
    let not_found = |source| PipelineError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    };
    let image = ImageReader::open(path)
        .map_err(not_found)?
        .with_guessed_format()
        .map_err(not_found)?
        .decode()
        .map_err(|e| PipelineError::TextureDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(image.flipv().into_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Call, RecordingGl};

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("glview-gl-{}-{name}", std::process::id()));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_heightfield_upload() {
        let gl = RecordingGl::new();
        let field = Heightfield::default();
        let sampler = SamplerState {
            filter: TextureFilter::Nearest,
            wrap: TextureWrap::ClampToEdge,
        };
        let texture = TextureResource::from_heightfield(&gl, &field, sampler);
        assert_eq!((texture.width(), texture.height()), (256, 256));
        assert!(texture.path().is_none());
        assert!(gl.calls().contains(&Call::TexImage2D {
            format: PixelFormat::Red,
            width: 256,
            height: 256
        }));
        assert!(gl.calls().contains(&Call::SetSampler(sampler)));
        drop(texture);
        assert_eq!(gl.live_textures(), 0);
    }

    #[test]
    fn test_png_is_decoded_and_flipped() {
        // 1x2: red on top, blue below.
        let mut img = image::RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        let path = std::env::temp_dir().join(format!("glview-gl-{}-flip.png", std::process::id()));
        img.save(&path).unwrap();

        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(decoded.get_pixel(0, 1).0, [255, 0, 0, 255]);

        let gl = RecordingGl::new();
        let texture = TextureResource::load(&gl, &path).unwrap();
        assert_eq!((texture.width(), texture.height()), (1, 2));
        assert_eq!(texture.path(), Some(path.as_path()));
        assert!(gl.calls().contains(&Call::SetSampler(IMAGE_SAMPLER)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_image_is_not_found() {
        let gl = RecordingGl::new();
        let err = TextureResource::load(&gl, "no/such/texture.jpg").err().unwrap();
        assert!(matches!(err, PipelineError::ResourceNotFound { .. }));
        assert_eq!(gl.live_textures(), 0);
    }

    #[test]
    fn test_garbage_image_is_decode_error() {
        let path = temp_file("garbage.jpg", b"definitely not a jpeg");
        let gl = RecordingGl::new();
        let err = TextureResource::load(&gl, &path).err().unwrap();
        assert!(matches!(err, PipelineError::TextureDecode { .. }));
        assert!(gl.calls().is_empty());
        std::fs::remove_file(path).ok();
    }
}
