//! Shader compilation and program linking.
//!
//! [`compile_stage`] and [`link_program`] surface the driver's info logs as
//! [`PipelineError`]s. Every GL object is owned by a value that releases it
//! on drop, so an error at any step leaves nothing behind.

use std::path::Path;

use gl::types::GLuint;
use glview_core::{PipelineError, ShaderSource, StageKind};
use tracing::debug;

use crate::api::GlApi;
use crate::bindings::BindingTable;

/// A successfully compiled shader stage.
pub struct CompiledStage<A: GlApi> {
    api: A,
    id: GLuint,
    kind: StageKind,
}

impl<A: GlApi> CompiledStage<A> {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }
}

impl<A: GlApi> Drop for CompiledStage<A> {
    fn drop(&mut self) {
        self.api.delete_shader(self.id);
    }
}

/// Load `path` and compile it as a `kind` shader.
pub fn compile_stage<A: GlApi>(
    api: &A,
    path: impl AsRef<Path>,
    kind: StageKind,
) -> Result<CompiledStage<A>, PipelineError> {
    let source = ShaderSource::load(path.as_ref())?;
    compile_source(api, &source, kind)
}

/// Compile already-loaded source.
pub fn compile_source<A: GlApi>(
    api: &A,
    source: &ShaderSource,
    kind: StageKind,
) -> Result<CompiledStage<A>, PipelineError> {
    let stage = CompiledStage {
        api: api.clone(),
        id: api.create_shader(kind),
        kind,
    };

    if !api.compile_shader(stage.id, source.as_c_str()) {
        let log = api.shader_info_log(stage.id);
        debug!(shader = stage.id, "{} did not compile", source.path().display());
        // `stage` drops here and deletes the shader.
        return Err(PipelineError::CompileError {
            path: source.path().to_path_buf(),
            stage: kind,
            log,
        });
    }

    debug!(shader = stage.id, "compiled {}", source.path().display());
    Ok(stage)
}

/// A linked program, the two stages it was linked from, and the bindings
/// resolved against it.
pub struct ShaderProgram<A: GlApi> {
    api: A,
    id: GLuint,
    bindings: BindingTable,
    // Dropped after the program itself.
    vertex: CompiledStage<A>,
    fragment: CompiledStage<A>,
}

/// Attach both stages to a fresh program and link it.
///
/// On failure the program and both stages are released.
pub fn link_program<A: GlApi>(
    vertex: CompiledStage<A>,
    fragment: CompiledStage<A>,
) -> Result<ShaderProgram<A>, PipelineError> {
    let api = vertex.api.clone();
    let id = api.create_program();
    api.attach_shader(id, vertex.id);
    api.attach_shader(id, fragment.id);

    if !api.link_program(id) {
        let log = api.program_info_log(id);
        debug!(program = id, "link failed");
        api.delete_program(id);
        return Err(PipelineError::LinkError { log });
    }

    debug!(program = id, "linked");
    Ok(ShaderProgram {
        api,
        id,
        bindings: BindingTable::default(),
        vertex,
        fragment,
    })
}

impl<A: GlApi> ShaderProgram<A> {
    /// Compile both files and link them.
    pub fn from_files(
        api: &A,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, PipelineError> {
        let vertex = compile_stage(api, vertex_path, StageKind::Vertex)?;
        let fragment = compile_stage(api, fragment_path, StageKind::Fragment)?;
        link_program(vertex, fragment)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub(crate) fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    /// Make this the current program.
    pub fn activate(&self) {
        self.api.use_program(self.id);
    }
}

impl<A: GlApi> Drop for ShaderProgram<A> {
    fn drop(&mut self) {
        self.api.detach_shader(self.id, self.vertex.id);
        self.api.detach_shader(self.id, self.fragment.id);
        self.api.delete_program(self.id);
    }
}
