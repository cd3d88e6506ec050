//! Inputs from the window host and the view state they drive.

use glam::Vec2;

/// Texture-space distance moved by one pan event.
pub const PAN_STEP: f32 = 0.03;

/// Factor applied by one zoom event.
pub const ZOOM_STEP: f32 = 1.5;

/// Discrete, named input events. The host maps raw keys and buttons onto
/// these; the demos never see key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    Reset,
    ToggleInterpolate,
    ToggleClamp,
    ToggleRotate,
    /// Switch to the next shader/texture configuration (sphere demo).
    AdvanceConfig,
}

/// View and texture parameters read by the per-frame transform pipeline.
///
/// Only the methods below mutate it, and none of them touch the GPU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    offset: Vec2,
    scale: f32,
    interpolate: bool,
    clamp: bool,
    rotate: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            interpolate: false,
            clamp: false,
            rotate: false,
        }
    }
}

impl InteractionState {
    /// Default state with rotation already running.
    pub fn rotating() -> Self {
        Self {
            rotate: true,
            ..Self::default()
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn interpolate(&self) -> bool {
        self.interpolate
    }

    pub fn clamp(&self) -> bool {
        self.clamp
    }

    pub fn rotate(&self) -> bool {
        self.rotate
    }

    pub fn toggle_interpolate(&mut self) {
        self.interpolate = !self.interpolate;
    }

    pub fn toggle_clamp(&mut self) {
        self.clamp = !self.clamp;
    }

    pub fn toggle_rotate(&mut self) {
        self.rotate = !self.rotate;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset += Vec2::new(dx, dy);
    }

    /// Multiply the scale; `factor > 1` zooms in.
    pub fn zoom(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Recentre and unzoom. Flags are left alone.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
    }

    /// Apply one event. Returns `false` for events this state does not own,
    /// so the caller can route them elsewhere.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PanLeft => self.pan(-PAN_STEP, 0.0),
            InputEvent::PanRight => self.pan(PAN_STEP, 0.0),
            InputEvent::PanUp => self.pan(0.0, PAN_STEP),
            InputEvent::PanDown => self.pan(0.0, -PAN_STEP),
            InputEvent::ZoomIn => self.zoom(ZOOM_STEP),
            InputEvent::ZoomOut => self.zoom(1.0 / ZOOM_STEP),
            InputEvent::Reset => self.reset(),
            InputEvent::ToggleInterpolate => self.toggle_interpolate(),
            InputEvent::ToggleClamp => self.toggle_clamp(),
            InputEvent::ToggleRotate => self.toggle_rotate(),
            InputEvent::AdvanceConfig => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-5 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_zoom_composes_multiplicatively() {
        for (f1, f2) in [(1.5, 1.5), (2.0, 0.25), (0.9, 3.3)] {
            let mut twice = InteractionState::default();
            twice.zoom(f1);
            twice.zoom(f2);
            let mut once = InteractionState::default();
            once.zoom(f1 * f2);
            assert!(approx(twice.scale(), once.scale()), "{f1} {f2}");
        }
    }

    #[test]
    fn test_pan_composes_additively() {
        let mut twice = InteractionState::default();
        twice.pan(0.1, -0.2);
        twice.pan(0.3, 0.05);
        let mut once = InteractionState::default();
        once.pan(0.4, -0.15);
        assert!(twice.offset().abs_diff_eq(once.offset(), 1e-6));
    }

    #[test]
    fn test_double_toggle_restores_flags() {
        let start = InteractionState::default();
        let mut state = start;
        state.toggle_interpolate();
        assert!(state.interpolate());
        state.toggle_interpolate();
        state.toggle_clamp();
        assert!(state.clamp());
        state.toggle_clamp();
        state.toggle_rotate();
        assert!(state.rotate());
        state.toggle_rotate();
        assert_eq!(state, start);
    }

    #[test]
    fn test_reset_restores_view_but_not_flags() {
        let mut state = InteractionState::default();
        state.pan(4.0, -2.0);
        state.zoom(7.0);
        state.toggle_clamp();
        state.reset();
        assert_eq!(state.offset(), Vec2::ZERO);
        assert_eq!(state.scale(), 1.0);
        assert!(state.clamp());
    }

    #[test]
    fn test_events_map_to_steps() {
        let mut state = InteractionState::default();
        assert!(state.apply(InputEvent::PanRight));
        assert!(state.apply(InputEvent::PanUp));
        assert!(state.offset().abs_diff_eq(Vec2::new(PAN_STEP, PAN_STEP), 1e-6));
        state.apply(InputEvent::PanLeft);
        state.apply(InputEvent::PanDown);
        assert!(state.offset().abs_diff_eq(Vec2::ZERO, 1e-6));

        state.apply(InputEvent::ZoomIn);
        assert_eq!(state.scale(), ZOOM_STEP);
        state.apply(InputEvent::ZoomOut);
        assert!(approx(state.scale(), 1.0));

        state.apply(InputEvent::ToggleRotate);
        assert!(state.rotate());
    }

    #[test]
    fn test_advance_is_not_a_view_event() {
        let mut state = InteractionState::rotating();
        let before = state;
        assert!(!state.apply(InputEvent::AdvanceConfig));
        assert_eq!(state, before);
    }
}
