//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core contract: the messages crossing the thread boundary
// in both directions, the platform error type, and the event source
// seam the main loop polls.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// One frame's input, in the order the platform read it.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Requests sent from core back to the platform.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoreEvent {
    /// Replace the window title.
    SetCaption(String),

    /// Resize the window's inner area.
    RequestSize { width: u32, height: u32 },

    /// The loop has ended; close the window and exit.
    Shutdown,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(String),
}

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventSource =========================================================

/// Supplies the raw input events for one loop iteration.
///
/// Implementations must not block. `Exit` means the platform is gone and
/// the loop should stop even though no state asked to quit.
pub trait EventSource {
    /// Appends every event available right now to `events`, in arrival order.
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> TickControl;
}
