//! Attribute and uniform lookup against a linked program.
//!
//! GL reports a missing name as location `-1`. Here that case is an
//! `Option::None` instead, and the location types can only be made from a
//! successful lookup, so an unbound slot cannot reach a `glUniform*` call.

use std::ffi::CString;

use gl::types::{GLint, GLuint};
use glview_core::{BindingKind, PipelineError};
use tracing::{debug, warn};

use crate::api::GlApi;
use crate::program::ShaderProgram;

/// A resolved vertex attribute slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribLocation(GLuint);

impl AttribLocation {
    pub(crate) fn from_raw(raw: GLint) -> Option<Self> {
        (raw >= 0).then_some(Self(raw as GLuint))
    }

    pub fn raw(self) -> GLuint {
        self.0
    }
}

/// A resolved uniform slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub(crate) fn from_raw(raw: GLint) -> Option<Self> {
        (raw >= 0).then_some(Self(raw))
    }

    pub fn raw(self) -> GLint {
        self.0
    }
}

/// Whether a missing binding aborts setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

/// One lookup made against a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    pub kind: BindingKind,
    pub name: String,
    pub requirement: Requirement,
    /// `None` when the program has no active input of that name.
    pub location: Option<GLint>,
}

/// Every name looked up against a [`ShaderProgram`], required and optional.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    entries: Vec<BindingEntry>,
}

impl BindingTable {
    fn record(&mut self, entry: BindingEntry) {
        self.entries.retain(|e| !(e.kind == entry.kind && e.name == entry.name));
        self.entries.push(entry);
    }

    pub fn get(&self, kind: BindingKind, name: &str) -> Option<&BindingEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.name == name)
    }

    pub fn required(&self) -> impl Iterator<Item = &BindingEntry> {
        self.entries
            .iter()
            .filter(|e| e.requirement == Requirement::Required)
    }

    pub fn optional(&self) -> impl Iterator<Item = &BindingEntry> {
        self.entries
            .iter()
            .filter(|e| e.requirement == Requirement::Optional)
    }

    /// Optional names the program did not provide.
    pub fn unbound(&self) -> impl Iterator<Item = &BindingEntry> {
        self.optional().filter(|e| e.location.is_none())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: GlApi> ShaderProgram<A> {
    fn resolve(
        &mut self,
        kind: BindingKind,
        name: &str,
        requirement: Requirement,
    ) -> Result<Option<GLint>, PipelineError> {
        // A name GL cannot even be asked about is simply not there.
        let raw = match CString::new(name) {
            Ok(c_name) => match kind {
                BindingKind::Attribute => self.api().attrib_location(self.id(), &c_name),
                BindingKind::Uniform => self.api().uniform_location(self.id(), &c_name),
            },
            Err(_) => -1,
        };
        let location = (raw >= 0).then_some(raw);

        self.bindings_mut().record(BindingEntry {
            kind,
            name: name.to_string(),
            requirement,
            location,
        });

        match (location, requirement) {
            (Some(raw), _) => {
                debug!(program = self.id(), "{kind} {name} -> {raw}");
                Ok(Some(raw))
            }
            (None, Requirement::Optional) => {
                warn!(program = self.id(), "Could not bind {kind} {name}");
                Ok(None)
            }
            (None, Requirement::Required) => Err(PipelineError::MissingRequiredBinding {
                kind,
                name: name.to_string(),
            }),
        }
    }

    /// Look up a vertex attribute. A missing required attribute is an error;
    /// a missing optional one is `Ok(None)` and a warning.
    pub fn resolve_attribute(
        &mut self,
        name: &str,
        requirement: Requirement,
    ) -> Result<Option<AttribLocation>, PipelineError> {
        Ok(self
            .resolve(BindingKind::Attribute, name, requirement)?
            .and_then(AttribLocation::from_raw))
    }

    /// Look up a uniform. A missing required uniform is an error; a missing
    /// optional one is `Ok(None)` and a warning.
    pub fn resolve_uniform(
        &mut self,
        name: &str,
        requirement: Requirement,
    ) -> Result<Option<UniformLocation>, PipelineError> {
        Ok(self
            .resolve(BindingKind::Uniform, name, requirement)?
            .and_then(UniformLocation::from_raw))
    }

    pub fn require_attribute(&mut self, name: &str) -> Result<AttribLocation, PipelineError> {
        self.resolve_attribute(name, Requirement::Required)?
            .ok_or_else(|| PipelineError::MissingRequiredBinding {
                kind: BindingKind::Attribute,
                name: name.to_string(),
            })
    }

    pub fn optional_attribute(&mut self, name: &str) -> Option<AttribLocation> {
        self.resolve_attribute(name, Requirement::Optional)
            .ok()
            .flatten()
    }

    pub fn require_uniform(&mut self, name: &str) -> Result<UniformLocation, PipelineError> {
        self.resolve_uniform(name, Requirement::Required)?
            .ok_or_else(|| PipelineError::MissingRequiredBinding {
                kind: BindingKind::Uniform,
                name: name.to_string(),
            })
    }

    pub fn optional_uniform(&mut self, name: &str) -> Option<UniformLocation> {
        self.resolve_uniform(name, Requirement::Optional)
            .ok()
            .flatten()
    }
}
