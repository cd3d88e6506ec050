//! Per-frame transform derivation.
//!
//! Pure functions of [`InteractionState`], elapsed time and the viewport.
//! Pushing the results to a program is done by `glview-gl`.

use std::time::Duration;

use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::interaction::InteractionState;

/// Vertical field of view shared by both demos.
pub const FIELD_OF_VIEW_DEG: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 10.0;

/// Grid rotation speed in degrees per second.
pub const GRID_SPIN_DEG_PER_SEC: f32 = 10.0;

/// Sphere rotation speed in degrees per second.
pub const SPHERE_SPIN_DEG_PER_SEC: f32 = 30.0;

/// Tiling (xy) and offset (zw) handed to `_ST` fragment shaders.
pub const SPHERE_TEXTURE_ST: Vec4 = Vec4::new(2.0, 1.0, 0.0, -0.05);

/// Drawable size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. A minimised (zero-height) window reports 1.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            FIELD_OF_VIEW_DEG.to_radians(),
            self.aspect(),
            NEAR_PLANE,
            FAR_PLANE,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

/// Filtering and wrapping applied to the sampled texture before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerState {
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
}

impl SamplerState {
    pub fn from_state(state: &InteractionState) -> Self {
        Self {
            filter: if state.interpolate() {
                TextureFilter::Linear
            } else {
                TextureFilter::Nearest
            },
            wrap: if state.clamp() {
                TextureWrap::ClampToEdge
            } else {
                TextureWrap::Repeat
            },
        }
    }
}

fn spin(elapsed: Duration, deg_per_sec: f32) -> f32 {
    (elapsed.as_secs_f32() * deg_per_sec).to_radians()
}

/// Matrices for the height-field grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransforms {
    pub vertex_transform: Mat4,
    pub texture_transform: Mat4,
    pub sampler: SamplerState,
}

impl GridTransforms {
    pub fn compute(state: &InteractionState, elapsed: Duration, viewport: Viewport) -> Self {
        let model = if state.rotate() {
            Mat4::from_rotation_z(spin(elapsed, GRID_SPIN_DEG_PER_SEC))
        } else {
            Mat4::IDENTITY
        };
        let view = Mat4::look_at_rh(Vec3::new(0.0, -2.0, 2.0), Vec3::ZERO, Vec3::Z);
        let vertex_transform = viewport.projection() * view * model;

        let offset = state.offset();
        let texture_transform = Mat4::from_scale(Vec3::new(state.scale(), state.scale(), 1.0))
            * Mat4::from_translation(Vec3::new(offset.x, offset.y, 0.0));

        Self {
            vertex_transform,
            texture_transform,
            sampler: SamplerState::from_state(state),
        }
    }
}

/// Matrices for the textured sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereTransforms {
    pub model: Mat4,
    /// Transpose of the inverse of the model's upper 3x3, for normals.
    pub normal_matrix: Mat3,
    pub view: Mat4,
    pub view_inverse: Mat4,
    pub projection: Mat4,
    pub texture_st: Vec4,
}

impl SphereTransforms {
    pub fn compute(state: &InteractionState, elapsed: Duration, viewport: Viewport) -> Self {
        let anim = if state.rotate() {
            Mat4::from_rotation_y(spin(elapsed, SPHERE_SPIN_DEG_PER_SEC))
        } else {
            Mat4::IDENTITY
        };
        // Sphere poles sit on Z; stand them up on Y.
        let fix_orientation = Mat4::from_rotation_x((-90.0f32).to_radians());
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0)) * anim * fix_orientation;
        let view = Mat4::look_at_rh(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -2.0), Vec3::Y);

        Self {
            model,
            normal_matrix: Mat3::from_mat4(model).inverse().transpose(),
            view,
            view_inverse: view.inverse(),
            projection: viewport.projection(),
            texture_st: SPHERE_TEXTURE_ST,
        }
    }
}
