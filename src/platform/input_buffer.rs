//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame holding area between winit callbacks and the core channel.
//
// Events are kept in arrival order and none are coalesced; the core
// forwards every one of them to the active state. The only filter is a
// key-down identical to the event just before it, which winit can
// report twice for one press.
//
//=========================================================================

//=== Standard Library ====================================================

use std::mem::take;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const EVENTS_BASE: usize = 128;

        Self {
            events: Vec::with_capacity(EVENTS_BASE),
        }
    }

    pub(crate) fn push(&mut self, event: InputEvent) {
        let duplicate_key_down =
            matches!(event, InputEvent::KeyDown { .. }) && self.events.last() == Some(&event);
        if !duplicate_key_down {
            self.events.push(event);
        }
    }

    /// Takes this frame's events, or `None` if nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        Some(take(&mut self.events))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
