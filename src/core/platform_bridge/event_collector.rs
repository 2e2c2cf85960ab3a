//=========================================================================
// Event Collector
//=========================================================================
//
// Channel-backed event source with bounded polling and disconnect
// detection.
//
// Architecture:
//   Receiver<PlatformEvent> → poll() → Vec<InputEvent> → TickControl
//
// Bounded polling keeps one poll from starving the frame. Pacing is the
// frame clock's job, so an empty queue returns immediately.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::{EventSource, PlatformEvent, TickControl};
use crate::core::input::InputEvent;

//=== EventCollector ======================================================

const MAX_MESSAGES_PER_POLL: usize = 100;

/// Drains platform messages into per-iteration event lists.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver }
    }

    fn handle_message(message: PlatformEvent, events: &mut Vec<InputEvent>) {
        match message {
            PlatformEvent::Inputs(batch) => events.extend(batch),
            // Delivered to the active state like any other input; the
            // state decides whether closing the window quits.
            PlatformEvent::WindowClosed => {
                trace!("Window close forwarded as Quit");
                events.push(InputEvent::Quit);
            }
        }
    }
}

impl EventSource for EventCollector {
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> TickControl {
        let mut drained = 0;

        while drained < MAX_MESSAGES_PER_POLL {
            match self.receiver.try_recv() {
                Ok(message) => {
                    Self::handle_message(message, events);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_MESSAGES_PER_POLL {
            warn!("Event queue backlog: drained {} messages this poll", drained);
        }

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
