//! An in-process stand-in for a GL driver.
//!
//! [`RecordingGl`] keeps just enough object state to compile, link and look
//! up bindings, and logs every state-changing call so tests can assert on
//! what a frame would have sent to the GPU.
//!
//! Compilation fails when a source contains `#error`. Linking fails when a
//! stage has no `main(`. Active inputs are whatever `attribute` and `uniform`
//! declarations the sources contain, numbered from zero in declaration order.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;
use std::rc::Rc;

use gl::types::{GLint, GLuint};
use glview_core::{SamplerState, StageKind, Viewport};

use crate::api::{BufferTarget, DrawMode, Face, GlApi, PixelFormat};
use crate::bindings::{AttribLocation, UniformLocation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Vec4([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
}

/// One recorded driver call. Queries (locations, logs) are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader { shader: GLuint, stage: StageKind },
    CompileShader { shader: GLuint },
    DeleteShader { shader: GLuint },
    CreateProgram { program: GLuint },
    AttachShader { program: GLuint, shader: GLuint },
    DetachShader { program: GLuint, shader: GLuint },
    LinkProgram { program: GLuint },
    DeleteProgram { program: GLuint },
    UseProgram { program: GLuint },
    Uniform { location: GLint, value: UniformValue },
    CreateTexture { texture: GLuint },
    DeleteTexture { texture: GLuint },
    BindTexture { unit: u32, texture: GLuint },
    TexImage2D { format: PixelFormat, width: u32, height: u32 },
    SetSampler(SamplerState),
    CreateBuffer { buffer: GLuint },
    DeleteBuffer { buffer: GLuint },
    BufferData { target: BufferTarget, buffer: GLuint, len: usize },
    Viewport(Viewport),
    Clear([f32; 4]),
    CullFace(Face),
    EnableBlend,
    EnableAttrib { location: GLuint, buffer: GLuint, components: i32 },
    DisableAttrib { location: GLuint },
    DrawElements { mode: DrawMode, index_buffer: GLuint, count: usize },
}

struct Shader {
    stage: StageKind,
    source: String,
    log: String,
}

#[derive(Default)]
struct Program {
    attached: Vec<GLuint>,
    log: String,
    /// Filled on a successful link.
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Default)]
struct State {
    next_id: GLuint,
    shaders: HashMap<GLuint, Shader>,
    programs: HashMap<GLuint, Program>,
    textures: HashSet<GLuint>,
    buffers: HashSet<GLuint>,
    calls: Vec<Call>,
}

impl State {
    fn fresh_id(&mut self) -> GLuint {
        self.next_id += 1;
        self.next_id
    }
}

/// Fake driver handle. Clones share one driver.
#[derive(Clone, Default)]
pub struct RecordingGl {
    state: Rc<RefCell<State>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Forget recorded calls, keeping object state.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn draw_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::DrawElements { .. }))
            .collect()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    /// Name of the uniform at `location` in `program`, if it has one.
    pub fn uniform_name(&self, program: GLuint, location: GLint) -> Option<String> {
        let state = self.state.borrow();
        let index = usize::try_from(location).ok()?;
        state.programs.get(&program)?.uniforms.get(index).cloned()
    }

    /// Values pushed to the uniform called `name` while `program` was in use.
    pub fn uniform_values(&self, program: GLuint, name: &str) -> Vec<UniformValue> {
        let mut current = 0;
        let mut values = Vec::new();
        for call in self.calls() {
            match call {
                Call::UseProgram { program } => current = program,
                Call::Uniform { location, value }
                    if current == program
                        && self.uniform_name(program, location).as_deref() == Some(name) =>
                {
                    values.push(value)
                }
                _ => {}
            }
        }
        values
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

/// Names declared with `qualifier` (`attribute` or `uniform`) in `source`.
fn declared(source: &str, qualifier: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in source.lines() {
        let line = line.split("//").next().unwrap_or_default();
        for statement in line.split(';') {
            let mut words = statement.split_whitespace();
            if words.next() != Some(qualifier) {
                continue;
            }
            let mut words = words.skip_while(|w| matches!(*w, "lowp" | "mediump" | "highp"));
            // Type name.
            if words.next().is_none() {
                continue;
            }
            let rest: String = words.collect::<Vec<_>>().join(" ");
            for name in rest.split(',') {
                let name = name.split('[').next().unwrap_or_default().trim();
                if !name.is_empty() && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}

impl GlApi for RecordingGl {
    fn create_shader(&self, stage: StageKind) -> GLuint {
        let mut state = self.state.borrow_mut();
        let shader = state.fresh_id();
        state.shaders.insert(
            shader,
            Shader {
                stage,
                source: String::new(),
                log: String::new(),
            },
        );
        state.calls.push(Call::CreateShader { shader, stage });
        shader
    }

    fn compile_shader(&self, shader: GLuint, source: &CStr) -> bool {
        self.record(Call::CompileShader { shader });
        let mut state = self.state.borrow_mut();
        let Some(object) = state.shaders.get_mut(&shader) else {
            return false;
        };
        object.source = source.to_string_lossy().into_owned();
        match object
            .source
            .lines()
            .enumerate()
            .find(|(_, l)| l.trim_start().starts_with("#error"))
        {
            Some((line, text)) => {
                object.log = format!("0:{}: error: {}", line + 1, text.trim());
                false
            }
            None => {
                object.log.clear();
                true
            }
        }
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: GLuint) {
        self.record(Call::DeleteShader { shader });
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let program = state.fresh_id();
        state.programs.insert(program, Program::default());
        state.calls.push(Call::CreateProgram { program });
        program
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(Call::AttachShader { program, shader });
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(Call::DetachShader { program, shader });
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.retain(|s| *s != shader);
        }
    }

    fn link_program(&self, program: GLuint) -> bool {
        self.record(Call::LinkProgram { program });
        let mut state = self.state.borrow_mut();
        let State {
            shaders, programs, ..
        } = &mut *state;
        let Some(object) = programs.get_mut(&program) else {
            return false;
        };

        let mut attributes = Vec::new();
        let mut uniforms: Vec<String> = Vec::new();
        for id in &object.attached {
            let Some(shader) = shaders.get(id) else {
                object.log = format!("error: shader {id} does not exist");
                return false;
            };
            if !shader.source.contains("main(") {
                object.log = format!("error: {} shader does not define main()", shader.stage);
                return false;
            }
            if shader.stage == StageKind::Vertex {
                attributes.extend(declared(&shader.source, "attribute"));
            }
            for name in declared(&shader.source, "uniform") {
                if !uniforms.contains(&name) {
                    uniforms.push(name);
                }
            }
        }

        object.log.clear();
        object.attributes = attributes;
        object.uniforms = uniforms;
        true
    }

    fn program_info_log(&self, program: GLuint) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: GLuint) {
        self.record(Call::DeleteProgram { program });
        self.state.borrow_mut().programs.remove(&program);
    }

    fn use_program(&self, program: GLuint) {
        self.record(Call::UseProgram { program });
    }

    fn attrib_location(&self, program: GLuint, name: &CStr) -> GLint {
        let state = self.state.borrow();
        let name = name.to_string_lossy();
        state
            .programs
            .get(&program)
            .and_then(|p| p.attributes.iter().position(|a| *a == name))
            .map_or(-1, |i| i as GLint)
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        let state = self.state.borrow();
        let name = name.to_string_lossy();
        state
            .programs
            .get(&program)
            .and_then(|p| p.uniforms.iter().position(|u| *u == name))
            .map_or(-1, |i| i as GLint)
    }

    fn uniform_1i(&self, location: UniformLocation, value: i32) {
        self.record(Call::Uniform {
            location: location.raw(),
            value: UniformValue::Int(value),
        });
    }

    fn uniform_4f(&self, location: UniformLocation, value: [f32; 4]) {
        self.record(Call::Uniform {
            location: location.raw(),
            value: UniformValue::Vec4(value),
        });
    }

    fn uniform_matrix3(&self, location: UniformLocation, value: &[f32; 9]) {
        self.record(Call::Uniform {
            location: location.raw(),
            value: UniformValue::Mat3(*value),
        });
    }

    fn uniform_matrix4(&self, location: UniformLocation, value: &[f32; 16]) {
        self.record(Call::Uniform {
            location: location.raw(),
            value: UniformValue::Mat4(*value),
        });
    }

    fn create_texture(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let texture = state.fresh_id();
        state.textures.insert(texture);
        state.calls.push(Call::CreateTexture { texture });
        texture
    }

    fn delete_texture(&self, texture: GLuint) {
        self.record(Call::DeleteTexture { texture });
        self.state.borrow_mut().textures.remove(&texture);
    }

    fn bind_texture(&self, unit: u32, texture: GLuint) {
        self.record(Call::BindTexture { unit, texture });
    }

    fn tex_image_2d(&self, format: PixelFormat, width: u32, height: u32, pixels: &[u8]) {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize * format.channels(),
            "pixel data does not match {width}x{height} {format:?}"
        );
        self.record(Call::TexImage2D {
            format,
            width,
            height,
        });
    }

    fn set_sampler(&self, sampler: SamplerState) {
        self.record(Call::SetSampler(sampler));
    }

    fn create_buffer(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let buffer = state.fresh_id();
        state.buffers.insert(buffer);
        state.calls.push(Call::CreateBuffer { buffer });
        buffer
    }

    fn delete_buffer(&self, buffer: GLuint) {
        self.record(Call::DeleteBuffer { buffer });
        self.state.borrow_mut().buffers.remove(&buffer);
    }

    fn buffer_data(&self, target: BufferTarget, buffer: GLuint, data: &[u8]) {
        self.record(Call::BufferData {
            target,
            buffer,
            len: data.len(),
        });
    }

    fn viewport(&self, viewport: Viewport) {
        self.record(Call::Viewport(viewport));
    }

    fn clear(&self, color: [f32; 4]) {
        self.record(Call::Clear(color));
    }

    fn cull_face(&self, face: Face) {
        self.record(Call::CullFace(face));
    }

    fn enable_blend(&self) {
        self.record(Call::EnableBlend);
    }

    fn enable_attrib(&self, location: AttribLocation, buffer: GLuint, components: i32) {
        self.record(Call::EnableAttrib {
            location: location.raw(),
            buffer,
            components,
        });
    }

    fn disable_attrib(&self, location: AttribLocation) {
        self.record(Call::DisableAttrib {
            location: location.raw(),
        });
    }

    fn draw_elements(&self, mode: DrawMode, index_buffer: GLuint, count: usize) {
        self.record(Call::DrawElements {
            mode,
            index_buffer,
            count,
        });
    }
}
