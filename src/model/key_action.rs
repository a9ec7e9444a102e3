//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Panning
    /// Move the view so more of the left side of the map shows. Default: h/←
    PanLeft,
    /// Move the view so more of the right side of the map shows. Default: l/→
    PanRight,
    /// Move the view so more of the top of the map shows. Default: k/↑
    PanUp,
    /// Move the view so more of the bottom of the map shows. Default: j/↓
    PanDown,

    // Zoom
    /// Zoom in around the viewport centre. Default: +/=
    ZoomIn,
    /// Zoom out around the viewport centre. Default: -
    ZoomOut,
    /// Back to offset 0, zoom 1. Default: 0/Home
    ResetView,

    // Application
    /// Exit the application. Default: q/Esc/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Screen-space pan direction as `(dx, dy)` unit signs, if this is a pan.
    ///
    /// Signs are for the offset: panning left reveals content to the left,
    /// so the offset grows.
    pub fn pan_direction(self) -> Option<(f64, f64)> {
        match self {
            Self::PanLeft => Some((1.0, 0.0)),
            Self::PanRight => Some((-1.0, 0.0)),
            Self::PanUp => Some((0.0, 1.0)),
            Self::PanDown => Some((0.0, -1.0)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_actions_have_directions() {
        assert_eq!(KeyAction::PanLeft.pan_direction(), Some((1.0, 0.0)));
        assert_eq!(KeyAction::PanDown.pan_direction(), Some((0.0, -1.0)));
    }

    #[test]
    fn non_pan_actions_have_no_direction() {
        assert_eq!(KeyAction::ZoomIn.pan_direction(), None);
        assert_eq!(KeyAction::Quit.pan_direction(), None);
        assert_eq!(KeyAction::ResetView.pan_direction(), None);
    }

    #[test]
    fn opposite_pans_cancel() {
        let (lx, ly) = KeyAction::PanLeft.pan_direction().unwrap();
        let (rx, ry) = KeyAction::PanRight.pan_direction().unwrap();
        assert_eq!(lx + rx, 0.0);
        assert_eq!(ly + ry, 0.0);
    }
}
