//=========================================================================
// Input Processor
//=========================================================================
//
// Translates winit window events into engine `InputEvent`s.
//
//   WindowEvent → InputProcessor::translate() → InputEvent → InputBuffer
//
// Modifier state is cached from `ModifiersChanged` and stamped on every
// key and button event that follows; button events also carry the
// last pointer position. Key repeats and keys with no engine code are
// dropped here.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
    /// Last reported pointer position, stamped on button events.
    cursor: (f32, f32),
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
            cursor: (0.0, 0.0),
        }
    }

    /// Translates one window event. Returns `None` for events the engine
    /// does not model; `ModifiersChanged` only updates the cache.
    pub(crate) fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = Modifiers::from(state.state());
                None
            }
            WindowEvent::KeyboardInput { event, .. } => self.key(event),
            WindowEvent::MouseInput { state, button, .. } => Some(self.button(*button, *state)),
            WindowEvent::CursorMoved { position, .. } => Some(self.cursor_moved(*position)),
            WindowEvent::Resized(size) => Some(Self::resized(*size)),
            _ => None,
        }
    }

    //--- Per-kind Conversion ----------------------------------------------

    fn key(&self, event: &KeyEvent) -> Option<InputEvent> {
        if event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };

        match KeyCode::from(code) {
            KeyCode::Unidentified => None,
            key => Some(self.key_state(key, event.state)),
        }
    }

    fn key_state(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }

    fn button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.modifiers;
        let (x, y) = self.cursor;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers, x, y },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers, x, y },
        }
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> InputEvent {
        let (x, y) = (position.x as f32, position.y as f32);
        self.cursor = (x, y);
        InputEvent::MouseMoved { x, y }
    }

    fn resized(size: PhysicalSize<u32>) -> InputEvent {
        InputEvent::Resized {
            width: size.width,
            height: size.height,
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit already folds macOS Cmd into Ctrl and Option into Alt.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

macro_rules! same_named_keys {
    ($code:expr; $($name:ident),* $(,)?) => {
        match $code {
            $(WinitKeyCode::$name => KeyCode::$name,)*
            _ => KeyCode::Unidentified,
        }
    };
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        same_named_keys!(code;
            Digit0, Digit1, Digit2, Digit3, Digit4,
            Digit5, Digit6, Digit7, Digit8, Digit9,
            KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
            KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
            KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
            ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
            Space, Enter, Escape, Tab, Backspace, Delete,
            F5,
        )
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        state.set(ModifiersState::SHIFT, shift);
        state.set(ModifiersState::CONTROL, ctrl);
        state.set(ModifiersState::ALT, alt);
        state
    }

    #[test]
    fn starts_with_no_modifiers() {
        assert_eq!(InputProcessor::new().modifiers, Modifiers::NONE);
    }

    #[test]
    fn modifiers_are_stamped_on_buttons() {
        let mut processor = InputProcessor::new();
        processor.modifiers = Modifiers::from(modifiers(true, false, true));

        assert_eq!(
            processor.button(WinitMouseButton::Left, ElementState::Pressed),
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                modifiers: Modifiers { shift: true, ctrl: false, alt: true },
                x: 0.0,
                y: 0.0,
            }
        );
    }

    #[test]
    fn key_state_maps_press_and_release() {
        let mut processor = InputProcessor::new();
        processor.modifiers = Modifiers::CTRL;

        assert_eq!(
            processor.key_state(KeyCode::KeyS, ElementState::Pressed),
            InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }
        );
        assert_eq!(
            processor.key_state(KeyCode::KeyS, ElementState::Released),
            InputEvent::KeyUp { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }
        );
    }

    #[test]
    fn buttons_carry_last_cursor_position() {
        let mut processor = InputProcessor::new();

        assert_eq!(
            processor.cursor_moved(PhysicalPosition::new(12.5, 40.0)),
            InputEvent::MouseMoved { x: 12.5, y: 40.0 }
        );
        assert_eq!(
            processor.button(WinitMouseButton::Right, ElementState::Released),
            InputEvent::MouseButtonUp {
                button: MouseButton::Right,
                modifiers: Modifiers::NONE,
                x: 12.5,
                y: 40.0,
            }
        );
    }

    #[test]
    fn resize_conversion() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.translate(&WindowEvent::Resized(PhysicalSize::new(800, 600))),
            Some(InputEvent::Resized { width: 800, height: 600 })
        );
    }

    #[test]
    fn unmodelled_events_are_ignored() {
        let mut processor = InputProcessor::new();
        assert_eq!(processor.translate(&WindowEvent::Focused(true)), None);
        assert_eq!(processor.translate(&WindowEvent::CloseRequested), None);
    }

    #[test]
    fn key_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
        assert_eq!(KeyCode::from(WinitKeyCode::F5), KeyCode::F5);
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }
}
