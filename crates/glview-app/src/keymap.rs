//! Translation of window input into [`InputEvent`]s.

use glium::winit::event::MouseButton;
use glium::winit::keyboard::KeyCode;
use glview_core::InputEvent;

/// Map a physical key. Keys the demos do not use map to `None`.
pub fn map_key(code: KeyCode) -> Option<InputEvent> {
    let event = match code {
        KeyCode::F1 => InputEvent::ToggleInterpolate,
        KeyCode::F2 => InputEvent::ToggleClamp,
        KeyCode::F3 => InputEvent::ToggleRotate,
        KeyCode::ArrowLeft => InputEvent::PanLeft,
        KeyCode::ArrowRight => InputEvent::PanRight,
        KeyCode::ArrowUp => InputEvent::PanUp,
        KeyCode::ArrowDown => InputEvent::PanDown,
        KeyCode::PageUp => InputEvent::ZoomIn,
        KeyCode::PageDown => InputEvent::ZoomOut,
        KeyCode::Home => InputEvent::Reset,
        _ => return None,
    };
    Some(event)
}

/// Map a mouse button press.
pub fn map_mouse(button: MouseButton) -> Option<InputEvent> {
    match button {
        MouseButton::Left => Some(InputEvent::AdvanceConfig),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys_toggle() {
        assert_eq!(map_key(KeyCode::F1), Some(InputEvent::ToggleInterpolate));
        assert_eq!(map_key(KeyCode::F2), Some(InputEvent::ToggleClamp));
        assert_eq!(map_key(KeyCode::F3), Some(InputEvent::ToggleRotate));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(InputEvent::PanLeft));
        assert_eq!(map_key(KeyCode::ArrowDown), Some(InputEvent::PanDown));
        assert_eq!(map_key(KeyCode::PageUp), Some(InputEvent::ZoomIn));
        assert_eq!(map_key(KeyCode::PageDown), Some(InputEvent::ZoomOut));
        assert_eq!(map_key(KeyCode::Home), Some(InputEvent::Reset));
    }

    #[test]
    fn test_unmapped_input() {
        assert_eq!(map_key(KeyCode::KeyQ), None);
        assert_eq!(map_mouse(MouseButton::Right), None);
        assert_eq!(map_mouse(MouseButton::Left), Some(InputEvent::AdvanceConfig));
    }
}
