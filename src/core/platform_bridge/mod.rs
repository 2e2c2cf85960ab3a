//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit today) with the core loop.
//
// This module defines the contract between platform implementations and
// core logic, so a backend can be swapped (or replaced by a scripted
// source in tests) without touching the state machine.
//
// Components:
// - `interface`: Messages, errors, and the `EventSource` seam
// - `event_collector`: Channel-backed `EventSource`
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::{EventSource, PlatformError, TickControl};

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub(crate) use interface::{CoreEvent, PlatformEvent};
