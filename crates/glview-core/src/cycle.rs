//! Shader/texture configuration table and the cycler that swaps between its
//! entries.

use tracing::{debug, info};

use crate::error::PipelineError;

/// One row of a demo table: the texture plus the two shader stages that
/// sample it. Paths are relative to the demo's asset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    pub texture: &'static str,
    pub vertex_shader: &'static str,
    pub fragment_shader: &'static str,
}

impl DemoConfig {
    pub const fn new(
        texture: &'static str,
        vertex_shader: &'static str,
        fragment_shader: &'static str,
    ) -> Self {
        Self {
            texture,
            vertex_shader,
            fragment_shader,
        }
    }

    /// `_ST` fragment shaders read a tiling/offset uniform the others lack.
    pub fn uses_tiling(&self) -> bool {
        self.fragment_shader.contains("_ST")
    }
}

struct Active<T> {
    index: usize,
    resources: T,
}

/// Holds a fixed table of [`DemoConfig`]s and the resources built for the
/// active one.
///
/// Switching builds the new resources first and only then drops the old
/// ones, so a failed build never leaves the cycler without an active set.
pub struct ConfigCycler<T> {
    table: Vec<DemoConfig>,
    cursor: usize,
    active: Active<T>,
}

impl<T> ConfigCycler<T> {
    /// Build the first entry of `table`. Failure here is fatal to the caller.
    pub fn start<E>(
        table: impl Into<Vec<DemoConfig>>,
        build: impl FnOnce(&DemoConfig) -> Result<T, E>,
    ) -> Result<Self, E>
    where
        E: From<PipelineError>,
    {
        let table = table.into();
        let first = *table.first().ok_or(PipelineError::EmptyConfigTable)?;
        info!(
            texture = first.texture,
            vs = first.vertex_shader,
            fs = first.fragment_shader,
            "building configuration 0"
        );
        let resources = build(&first)?;
        Ok(Self {
            table,
            cursor: 0,
            active: Active {
                index: 0,
                resources,
            },
        })
    }

    /// Move to the next entry, wrapping after the last, and build it.
    ///
    /// On success the previous resources are dropped after the new ones are
    /// in place. On failure the previous resources stay active and the error
    /// is returned; the cursor has still moved, so the next call tries the
    /// entry after the failed one.
    pub fn advance<E>(&mut self, build: impl FnOnce(&DemoConfig) -> Result<T, E>) -> Result<&T, E>
    where
        E: std::fmt::Display,
    {
        self.cursor = (self.cursor + 1) % self.table.len();
        let config = self.table[self.cursor];
        info!(
            index = self.cursor,
            texture = config.texture,
            vs = config.vertex_shader,
            fs = config.fragment_shader,
            "switching configuration"
        );

        match build(&config) {
            Ok(resources) => {
                let previous = std::mem::replace(
                    &mut self.active,
                    Active {
                        index: self.cursor,
                        resources,
                    },
                );
                drop(previous);
                Ok(&self.active.resources)
            }
            Err(err) => {
                debug!(
                    index = self.cursor,
                    active = self.active.index,
                    "configuration failed, keeping the active one"
                );
                Err(err)
            }
        }
    }

    /// Index of the most recently attempted entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the entry whose resources are active.
    pub fn active_index(&self) -> usize {
        self.active.index
    }

    pub fn active_config(&self) -> &DemoConfig {
        &self.table[self.active.index]
    }

    pub fn active(&self) -> &T {
        &self.active.resources
    }

    pub fn active_mut(&mut self) -> &mut T {
        &mut self.active.resources
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
