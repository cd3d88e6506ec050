use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// What kind of program input a binding names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Attribute,
    Uniform,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Attribute => f.write_str("attribute"),
            BindingKind::Uniform => f.write_str("uniform"),
        }
    }
}

/// Errors that abort building a program, its bindings or its resources.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error opening {path:?}: {source}")]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is larger than {limit} bytes")]
    SourceTooLarge { path: PathBuf, limit: usize },

    #[error("{path:?} contains a NUL byte at offset {offset}")]
    InvalidSource { path: PathBuf, offset: usize },

    #[error("{path:?}: {stage} shader failed to compile:\n{log}")]
    CompileError {
        path: PathBuf,
        stage: StageKind,
        log: String,
    },

    #[error("glLinkProgram failed:\n{log}")]
    LinkError { log: String },

    #[error("Could not bind {kind} {name}")]
    MissingRequiredBinding { kind: BindingKind, name: String },

    #[error("Could not decode texture {path:?}: {reason}")]
    TextureDecode { path: PathBuf, reason: String },

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Heightfield side must be at least 2 texels, got {0}")]
    InvalidHeightfield(u32),

    #[error("Configuration table is empty")]
    EmptyConfigTable,

    #[error("Unsupported GL context: {0}")]
    UnsupportedContext(String),
}
