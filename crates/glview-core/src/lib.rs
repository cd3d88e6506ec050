//! Shared, GL-free building blocks for the glview demos.
//!
//! Everything in this crate is plain data and math so it can be tested
//! without a GPU context:
//!
//! - [`source`] reads shader text into a null-terminated buffer.
//! - [`mesh`] builds the grid and sphere geometry.
//! - [`heightfield`] generates the grid demo's height texture.
//! - [`interaction`] holds the state driven by discrete input events.
//! - [`frame`] derives per-frame transforms from that state.
//! - [`cycle`] holds the sphere demo's configuration table and cycler.
//! - [`settings`] and [`logging`] are the ambient host configuration.

pub mod cycle;
pub mod error;
pub mod frame;
pub mod heightfield;
pub mod interaction;
pub mod logging;
pub mod mesh;
pub mod settings;
pub mod source;

pub use cycle::{ConfigCycler, DemoConfig};
pub use error::{BindingKind, PipelineError, StageKind};
pub use frame::{GridTransforms, SamplerState, SphereTransforms, TextureFilter, TextureWrap, Viewport};
pub use heightfield::Heightfield;
pub use interaction::{InputEvent, InteractionState};
pub use mesh::{GridMesh, SphereMesh};
pub use settings::ViewerSettings;
pub use source::ShaderSource;
