//=========================================================================
// Core
//=========================================================================
//
// Everything that runs on the core (non-platform) thread.
//
// Components:
// - `state`: State contract, registry, machine, persistence bag
// - `control`: Controller and loop body (clock, viewport)
// - `input`: Input events and the per-frame snapshot
// - `surface`: Render surface and presenter seam
// - `platform_bridge`: Messages and the event source seam to the platform
// - `error`: Fatal state errors
//
// None of these depend on winit; the core can be driven from tests with
// a scripted `EventSource` and a recording `Presenter`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod control;
pub mod error;
pub mod input;
pub mod platform_bridge;
pub mod state;
pub mod surface;

//=== Public API ==========================================================

pub use control::{Control, ControlConfig};
pub use error::StateError;
pub use state::{State, StateCore, StateKey, StateMachine, StateRegistry};
