//=========================================================================
// Input Snapshot
//=========================================================================
//
// Snapshot of currently-held input controls, handed to every
// `State::update` call.
//
// Architecture:
//   InputEvent → process_event() → HashSet (held) + per-poll deltas → query
//
// Poll lifecycle (driven by Control::event_loop):
//   begin_poll() → process_event()* → end_poll() → State::update(.., &snapshot, ..)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputSnapshot =======================================================

/// Held controls plus the transitions observed during the latest poll.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    //--- Persistent State (survives poll boundary) -----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Poll Deltas (reset by begin_poll) -------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,

    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Poll Processing --------------------------------------------------

    /// Clears the per-poll deltas. Held controls are kept.
    pub(crate) fn begin_poll(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.last_mouse_position = self.mouse_position;
    }

    /// Folds one event into the snapshot.
    pub(crate) fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button, modifiers, .. } => {
                self.modifiers = modifiers;
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button, modifiers, .. } => {
                self.modifiers = modifiers;
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
            }
            InputEvent::Resized { .. } | InputEvent::Quit => {}
        }
    }

    /// Computes the mouse delta for the poll.
    pub(crate) fn end_poll(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key went UP → DOWN during the latest poll.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns `true` if key went DOWN → UP during the latest poll.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Mouse position in window coordinates. Multiply by the frame's
    /// [`Scale`](super::Scale) to get render coordinates.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Iterates over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn poll(snapshot: &mut InputSnapshot, events: &[InputEvent]) {
        snapshot.begin_poll();
        for event in events {
            snapshot.process_event(event);
        }
        snapshot.end_poll();
    }

    #[test]
    fn pressed_only_on_transition_poll() {
        let mut snapshot = InputSnapshot::new();

        poll(&mut snapshot, &[key_down(KeyCode::KeyA)]);
        assert!(snapshot.is_key_pressed(KeyCode::KeyA));
        assert!(snapshot.is_key_down(KeyCode::KeyA));

        poll(&mut snapshot, &[]);
        assert!(!snapshot.is_key_pressed(KeyCode::KeyA));
        assert!(snapshot.is_key_down(KeyCode::KeyA));

        poll(&mut snapshot, &[key_up(KeyCode::KeyA)]);
        assert!(!snapshot.is_key_down(KeyCode::KeyA));
        assert!(snapshot.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn tap_within_one_poll_records_both_transitions() {
        let mut snapshot = InputSnapshot::new();

        poll(&mut snapshot, &[key_down(KeyCode::Space), key_up(KeyCode::Space)]);

        assert!(snapshot.is_key_pressed(KeyCode::Space));
        assert!(snapshot.is_key_released(KeyCode::Space));
        assert!(!snapshot.is_key_down(KeyCode::Space));
    }

    #[test]
    fn spurious_release_is_ignored() {
        let mut snapshot = InputSnapshot::new();
        poll(&mut snapshot, &[key_up(KeyCode::KeyZ)]);
        assert!(!snapshot.is_key_released(KeyCode::KeyZ));
    }

    #[test]
    fn mouse_buttons_tracked() {
        let mut snapshot = InputSnapshot::new();

        poll(&mut snapshot, &[InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::SHIFT,
            x: 4.0,
            y: 8.0,
        }]);
        assert!(snapshot.is_button_pressed(MouseButton::Left));
        assert!(snapshot.is_button_down(MouseButton::Left));
        assert_eq!(snapshot.modifiers(), Modifiers::SHIFT);

        poll(&mut snapshot, &[InputEvent::MouseButtonUp {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            x: 4.0,
            y: 8.0,
        }]);
        assert!(snapshot.is_button_released(MouseButton::Left));
        assert!(!snapshot.is_button_down(MouseButton::Left));
    }

    #[test]
    fn mouse_delta_spans_one_poll() {
        let mut snapshot = InputSnapshot::new();

        poll(&mut snapshot, &[InputEvent::MouseMoved { x: 100.0, y: 100.0 }]);
        assert_eq!(snapshot.mouse_delta(), (100.0, 100.0));

        poll(&mut snapshot, &[InputEvent::MouseMoved { x: 150.0, y: 120.0 }]);
        assert_eq!(snapshot.mouse_delta(), (50.0, 20.0));
        assert_eq!(snapshot.mouse_position(), (150.0, 120.0));

        poll(&mut snapshot, &[]);
        assert_eq!(snapshot.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn window_events_leave_snapshot_untouched() {
        let mut snapshot = InputSnapshot::new();

        poll(&mut snapshot, &[
            InputEvent::Resized { width: 640, height: 480 },
            InputEvent::Quit,
        ]);

        assert_eq!(snapshot.keys_down().count(), 0);
        assert_eq!(snapshot.mouse_position(), (0.0, 0.0));
    }
}
