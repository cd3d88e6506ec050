//! Shader source loading.

use std::ffi::{CStr, CString};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Sources above this size are refused.
pub const MAX_SOURCE_LEN: usize = 10 * 1024 * 1024;

/// Full contents of a shader file, null-terminated for the GL compiler.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    path: PathBuf,
    text: CString,
}

impl ShaderSource {
    /// Read `path` fully into memory.
    ///
    /// The buffer grows as needed while reading and is trimmed to the exact
    /// byte count afterwards.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PipelineError::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let mut bytes = Vec::new();
        file.take(MAX_SOURCE_LEN as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(|source| PipelineError::ResourceNotFound {
                path: path.to_path_buf(),
                source,
            })?;

        if bytes.len() > MAX_SOURCE_LEN {
            return Err(PipelineError::SourceTooLarge {
                path: path.to_path_buf(),
                limit: MAX_SOURCE_LEN,
            });
        }
        bytes.shrink_to_fit();

        Self::from_bytes(path, bytes)
    }

    /// Wrap in-memory bytes, as if they had been read from `path`.
    pub fn from_bytes(path: impl AsRef<Path>, bytes: Vec<u8>) -> Result<Self, PipelineError> {
        let path = path.as_ref().to_path_buf();
        let text = CString::new(bytes).map_err(|e| PipelineError::InvalidSource {
            offset: e.nul_position(),
            path: path.clone(),
        })?;
        Ok(Self { path, text })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The source with its trailing NUL, ready for `glShaderSource`.
    pub fn as_c_str(&self) -> &CStr {
        &self.text
    }

    /// Length in bytes, not counting the terminator.
    pub fn len(&self) -> usize {
        self.text.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A directory under the system temp dir, removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(test: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("glview-source-{}-{test}", std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn file(&self, name: &str, contents: &[u8]) -> PathBuf {
            let path = self.0.join(name);
            std::fs::write(&path, contents).unwrap();
            path
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_load_reads_whole_file() {
        // Larger than the default stdio buffer so the read has to grow.
        let body = "void main() {}\n".repeat(2000);
        let scratch = Scratch::new("whole");
        let path = scratch.file("whole.glsl", body.as_bytes());

        let source = ShaderSource::load(&path).unwrap();
        assert_eq!(source.len(), body.len());
        assert_eq!(source.as_c_str().to_bytes(), body.as_bytes());
        assert_eq!(source.as_c_str().to_bytes_with_nul().last(), Some(&0));
        assert_eq!(source.path(), path.as_path());
    }

    #[test]
    fn test_load_empty_file() {
        let scratch = Scratch::new("empty");
        let path = scratch.file("empty.glsl", b"");
        let source = ShaderSource::load(&path).unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn test_load_accepts_exactly_the_limit() {
        let scratch = Scratch::new("at-limit");
        let path = scratch.file("big.glsl", &vec![b' '; MAX_SOURCE_LEN]);

        let source = ShaderSource::load(&path).unwrap();
        assert_eq!(source.len(), MAX_SOURCE_LEN);
    }

    #[test]
    fn test_load_rejects_one_byte_over() {
        let scratch = Scratch::new("over-limit");
        let path = scratch.file("huge.glsl", &vec![b' '; MAX_SOURCE_LEN + 1]);

        match ShaderSource::load(&path).unwrap_err() {
            PipelineError::SourceTooLarge { path: p, limit } => {
                assert_eq!(p, path);
                assert_eq!(limit, MAX_SOURCE_LEN);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = ShaderSource::load("does/not/exist.v.glsl").unwrap_err();
        assert!(matches!(err, PipelineError::ResourceNotFound { .. }));
        assert!(err.to_string().contains("exist.v.glsl"), "got {err}");
    }

    #[test]
    fn test_interior_nul_rejected() {
        let err = ShaderSource::from_bytes("bad.glsl", b"void\0main".to_vec()).unwrap_err();
        match err {
            PipelineError::InvalidSource { offset, .. } => assert_eq!(offset, 4),
            other => panic!("unexpected {other:?}"),
        }
    }
}
