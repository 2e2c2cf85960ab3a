//=========================================================================
// Input Event Types
//
// Defines the internal representation of discrete input events delivered
// to states.
//
// This module abstracts away platform-specific input (e.g. Winit, SDL)
// into a unified, engine-friendly format. Each event read from the
// platform is forwarded exactly once to the active state.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    Control::event_loop ──► InputSnapshot
//         ↓
//    State::get_event(event, scale)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Toggles the FPS readout in the window caption.
    F5,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== Scale ===============================================================

/// Ratio of render-space size to window-space size, per axis.
///
/// Pointer coordinates arrive in window pixels. States draw into a
/// fixed-size render surface, so clicks must be multiplied by this
/// ratio before hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    /// Render and window sizes match.
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts a window-space point into render space.
    pub fn to_render(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (x * self.x, y * self.y)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=== InputEvent ==========================================================

/// A single discrete event read from the platform.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: Keyboard events with modifier state
/// - **MouseButtonDown/MouseButtonUp**: Mouse button events at the cursor
/// - **MouseMoved**: Cursor position in window pixels
/// - **Resized**: Window inner size changed
/// - **Quit**: The user or OS asked the program to close
///
/// Pointer coordinates are in window space (pixels, top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
        x: f32,
        y: f32,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
        x: f32,
        y: f32,
    },

    MouseMoved { x: f32, y: f32 },

    Resized { width: u32, height: u32 },

    /// Close requested. States decide whether this sets their quit flag.
    Quit,
}

//--- Implementation ------------------------------------------------------

impl InputEvent {
    /// Pointer position translated into render space, for pointer events.
    pub fn render_position(&self, scale: Scale) -> Option<(f32, f32)> {
        match *self {
            Self::MouseMoved { x, y }
            | Self::MouseButtonDown { x, y, .. }
            | Self::MouseButtonUp { x, y, .. } => Some(scale.to_render((x, y))),
            _ => None,
        }
    }

    /// Returns `true` for a key press of `key`, ignoring modifiers.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        matches!(self, Self::KeyDown { key: k, .. } if *k == key)
    }

    /// Returns `true` for a key release of `key`, ignoring modifiers.
    pub fn is_key_up(&self, key: KeyCode) -> bool {
        matches!(self, Self::KeyUp { key: k, .. } if *k == key)
    }
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// The system does not distinguish between left/right variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key held (either left or right).
    pub shift: bool,

    /// Ctrl key held (either left or right, Command on macOS).
    pub ctrl: bool,

    /// Alt key held (either left or right, Option on macOS).
    pub alt: bool,
}

//--- Modifier Constants --------------------------------------------------

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn key_predicates_ignore_modifiers() {
        let event = InputEvent::KeyDown { key: KeyCode::F5, modifiers: Modifiers::SHIFT };
        assert!(event.is_key_down(KeyCode::F5));
        assert!(!event.is_key_up(KeyCode::F5));
        assert!(!event.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn render_position_applies_scale() {
        let event = InputEvent::MouseMoved { x: 100.0, y: 50.0 };
        assert_eq!(event.render_position(Scale::new(2.0, 0.5)), Some((200.0, 25.0)));
        assert_eq!(key_down(KeyCode::KeyA).render_position(Scale::IDENTITY), None);
    }

    #[test]
    fn click_position_applies_scale() {
        let scale = Scale::new(2.0, 0.5);
        let down = InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            x: 100.0,
            y: 50.0,
        };
        let up = InputEvent::MouseButtonUp {
            button: MouseButton::Right,
            modifiers: Modifiers::CTRL,
            x: 10.0,
            y: 8.0,
        };

        assert_eq!(down.render_position(scale), Some((200.0, 25.0)));
        assert_eq!(up.render_position(scale), Some((20.0, 4.0)));
        assert_eq!(InputEvent::Quit.render_position(scale), None);
    }

    #[test]
    fn scale_defaults_to_identity() {
        assert_eq!(Scale::default(), Scale::IDENTITY);
        assert_eq!(Scale::IDENTITY.to_render((3.0, 4.0)), (3.0, 4.0));
    }
}
