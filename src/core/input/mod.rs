//=========================================================================
// Input
//=========================================================================
//
// Platform-neutral input events and the held-controls snapshot that
// the controller maintains on behalf of the active state.
//
// Architecture:
//   InputEvent ──► Control::event_loop ──┬─► InputSnapshot (held keys, mouse)
//                                        └─► State::get_event()
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod snapshot;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton, Scale};
pub use snapshot::InputSnapshot;
