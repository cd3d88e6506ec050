//! The [`Demo`] trait and [`FrameInput`], the interface between a demo and
//! the window host.
//!
//! The host calls [`Demo::init`] once the GL context exists, forwards mapped
//! input through [`Demo::handle_event`], then calls [`Demo::draw`] every
//! redraw with a [`FrameInput`].

use std::time::Duration;

use glview_core::{InputEvent, Viewport, ViewerSettings};
use glview_gl::GlApi;

/// Per-frame information handed to [`Demo::draw`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Time since the demo was initialized.
    pub elapsed: Duration,
    /// Current framebuffer size in pixels.
    pub viewport: Viewport,
    /// Monotonically increasing frame counter.
    pub frame: u64,
}

/// A demo that owns all of its GL resources.
///
/// Implement it generically over `A: GlApi` so the same code runs against the
/// window's driver and against a fake one in tests.
///
/// # Example
///
/// ```rust,ignore
/// struct Clear;
///
/// impl<A: GlApi> Demo<A> for Clear {
///     fn init(_api: &A, _settings: &ViewerSettings) -> anyhow::Result<Self> {
///         Ok(Clear)
///     }
///
///     fn handle_event(&mut self, _api: &A, _event: InputEvent) {}
///
///     fn draw(&mut self, api: &A, input: &FrameInput) {
///         api.viewport(input.viewport);
///         api.clear([0.0, 0.0, 0.0, 1.0]);
///     }
/// }
/// ```
pub trait Demo<A: GlApi>: Sized + 'static {
    /// Build every resource the demo needs.
    ///
    /// An error here is fatal: the host reports it and never starts the
    /// event loop.
    fn init(api: &A, settings: &ViewerSettings) -> anyhow::Result<Self>;

    /// React to one input event. Called between frames.
    fn handle_event(&mut self, api: &A, event: InputEvent);

    /// Render one frame into the current framebuffer.
    fn draw(&mut self, api: &A, input: &FrameInput);
}
