//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_states::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// State system
pub use crate::core::state::{
    FactoryContext, Persist, PersistKey, PersistValue, State, StateCore, StateKey, StateRegistry,
};

// Input
pub use crate::core::input::{InputEvent, InputSnapshot, KeyCode, Modifiers, MouseButton, Scale};

// Rendering seam
pub use crate::core::surface::{Color, FrameBuffer};

// Errors
pub use crate::core::error::StateError;
