//=========================================================================
// Core Errors
//=========================================================================
//
// Every variant here is fatal. A transition to a scene that does not
// exist means the registry or a state's `next` is misconfigured, and
// there is no state to fall back to.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== StateError ==========================================================

/// Errors raised while starting or flipping states.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The requested identifier is absent from the registry.
    #[error("Cannot find state: {key}")]
    UnknownState { key: String },

    /// A state requested a transition without naming its successor.
    #[error("State {from} finished without a next state")]
    MissingNext { from: String },

    /// `update` was called before any state was started.
    #[error("No active state; call start_state before updating")]
    NotStarted,
}

impl StateError {
    pub(crate) fn unknown(key: &impl std::fmt::Debug) -> Self {
        Self::UnknownState { key: format!("{:?}", key) }
    }

    pub(crate) fn missing_next(from: &impl std::fmt::Debug) -> Self {
        Self::MissingNext { from: format!("{:?}", from) }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
