//! Static vertex and index buffers.

use gl::types::GLuint;
use glview_core::{GridMesh, SphereMesh};

use crate::api::{BufferTarget, GlApi};
use crate::bytes::AsBytes;

/// A GPU buffer filled once at creation and released on drop.
pub struct GpuBuffer<A: GlApi> {
    api: A,
    id: GLuint,
    target: BufferTarget,
    /// Number of elements uploaded (vertices or indices).
    len: usize,
}

impl<A: GlApi> GpuBuffer<A> {
    pub fn new<T: AsBytes>(api: &A, target: BufferTarget, items: &[T]) -> Self {
        let id = api.create_buffer();
        api.buffer_data(target, id, T::slice_as_bytes(items));
        Self {
            api: api.clone(),
            id,
            target,
            len: items.len(),
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<A: GlApi> Drop for GpuBuffer<A> {
    fn drop(&mut self) {
        self.api.delete_buffer(self.id);
    }
}

/// Vertex and index buffers for a [`GridMesh`].
pub struct GridBuffers<A: GlApi> {
    pub vertices: GpuBuffer<A>,
    pub indices: GpuBuffer<A>,
}

impl<A: GlApi> GridBuffers<A> {
    pub fn upload(api: &A, mesh: &GridMesh) -> Self {
        Self {
            vertices: GpuBuffer::new(api, BufferTarget::Vertex, mesh.vertices()),
            indices: GpuBuffer::new(api, BufferTarget::Index, mesh.indices()),
        }
    }
}

/// Position, normal and index buffers for a [`SphereMesh`].
pub struct SphereBuffers<A: GlApi> {
    pub positions: GpuBuffer<A>,
    pub normals: GpuBuffer<A>,
    pub indices: GpuBuffer<A>,
}

impl<A: GlApi> SphereBuffers<A> {
    pub fn upload(api: &A, mesh: &SphereMesh) -> Self {
        Self {
            positions: GpuBuffer::new(api, BufferTarget::Vertex, mesh.positions()),
            normals: GpuBuffer::new(api, BufferTarget::Vertex, mesh.normals()),
            indices: GpuBuffer::new(api, BufferTarget::Index, mesh.indices()),
        }
    }
}
