//! Uniform pushes that tolerate unbound locations.

use glam::{Mat3, Mat4, Vec4};

use crate::api::GlApi;
use crate::bindings::UniformLocation;

/// Push helpers over any [`GlApi`]. Each one is a no-op when the location is
/// `None`, which is how optional bindings a shader variant lacks are skipped.
pub trait UniformPush {
    fn push_mat4(&self, location: Option<UniformLocation>, value: &Mat4);

    fn push_mat3(&self, location: Option<UniformLocation>, value: &Mat3);

    fn push_vec4(&self, location: Option<UniformLocation>, value: Vec4);

    /// Point a sampler uniform at a texture unit.
    fn push_sampler(&self, location: Option<UniformLocation>, unit: u32);
}

impl<A: GlApi> UniformPush for A {
    fn push_mat4(&self, location: Option<UniformLocation>, value: &Mat4) {
        if let Some(location) = location {
            self.uniform_matrix4(location, &value.to_cols_array());
        }
    }

    fn push_mat3(&self, location: Option<UniformLocation>, value: &Mat3) {
        if let Some(location) = location {
            self.uniform_matrix3(location, &value.to_cols_array());
        }
    }

    fn push_vec4(&self, location: Option<UniformLocation>, value: Vec4) {
        if let Some(location) = location {
            self.uniform_4f(location, value.to_array());
        }
    }

    fn push_sampler(&self, location: Option<UniformLocation>, unit: u32) {
        if let Some(location) = location {
            self.uniform_1i(location, unit as i32);
        }
    }
}
