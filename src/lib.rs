//=========================================================================
// Aetheric States
//=========================================================================
//
// Scene flow for real-time applications: a finite-state machine of
// application screens driven by a fixed-rate update/render loop.
//
// Typical usage:
// ```no_run
// use aetheric_states::prelude::*;
//
// struct Menu { core: StateCore<&'static str> }
//
// impl State<&'static str> for Menu {
//     fn core(&self) -> &StateCore<&'static str> { &self.core }
//     fn core_mut(&mut self) -> &mut StateCore<&'static str> { &mut self.core }
// }
//
// fn main() -> Result<(), EngineError> {
//     EngineBuilder::new()
//         .with_caption("Menu Demo")
//         .build()
//         .init(|registry| registry.register("menu", |_| Menu { core: StateCore::new() }))
//         .run("menu")
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the state machine, controller, input, and surface types.
// It is public so tests and custom front ends can drive `Control`
// directly; applications normally go through `Engine`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit backend and is not part of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError};
