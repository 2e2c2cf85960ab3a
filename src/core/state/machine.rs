//=========================================================================
// State Machine
//=========================================================================
//
// Owns the registry and the single live state, and arbitrates flips.
//
// Per update:
//   1. active.quit  → done = true, nothing else runs
//   2. active.done  → flip: cleanup() → factory() → startup(now, persist)
//   3. active.update(surface, input, now, dt, scale)
//
// Quit wins over a pending flip, so a state that sets both never has
// its cleanup run and its successor is never built.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::{FactoryContext, Persist, State, StateKey, StateRegistry};
use crate::core::error::StateError;
use crate::core::input::{InputEvent, InputSnapshot, Scale};
use crate::core::surface::FrameBuffer;

//=== StateMachine ========================================================

/// Generic finite-state machine over registered scenes.
pub struct StateMachine<K: StateKey> {
    registry: StateRegistry<K>,
    state: Option<Box<dyn State<K>>>,
    state_name: Option<K>,
    previous: Option<K>,
    done: bool,
    now: f64,
    render_size: (u32, u32),
}

impl<K: StateKey> StateMachine<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a machine with no active state.
    ///
    /// `render_size` is reported to factories through [`FactoryContext`].
    pub fn new(registry: StateRegistry<K>, render_size: (u32, u32)) -> Self {
        Self {
            registry,
            state: None,
            state_name: None,
            previous: None,
            done: false,
            now: 0.0,
            render_size,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Builds a fresh instance of `key` and makes it the active state.
    ///
    /// # Errors
    ///
    /// [`StateError::UnknownState`] if `key` is not registered. The
    /// active state and its name are left untouched.
    pub fn start_state(&mut self, key: K, now: f64, persist: Persist) -> Result<(), StateError> {
        let factory = self.registry.resolve(&key)?;
        let ctx = FactoryContext::new(&self.registry, now, self.render_size);

        let mut instance = factory(&ctx);
        instance.startup(now, persist);

        info!("Started state {:?}", key);
        self.state = Some(instance);
        self.state_name = Some(key);
        self.now = now;
        Ok(())
    }

    /// Runs one iteration of the transition protocol, then updates the
    /// (possibly new) active state.
    ///
    /// # Errors
    ///
    /// Fails if no state was started or if a requested flip cannot be
    /// resolved. Both are fatal configuration errors.
    pub fn update(
        &mut self,
        surface: &mut FrameBuffer,
        input: &InputSnapshot,
        now: f64,
        dt: f64,
        scale: Scale,
    ) -> Result<(), StateError> {
        self.now = now;

        let core = self.state.as_ref().ok_or(StateError::NotStarted)?.core();
        if core.is_quit() {
            if !self.done {
                info!("State {:?} requested quit", self.state_name);
                self.done = true;
            }
            return Ok(());
        }
        if core.is_done() {
            self.flip_state()?;
        }

        if let Some(state) = self.state.as_mut() {
            state.update(surface, input, now, dt, scale);
        }
        Ok(())
    }

    /// Tears down the active state and starts the one it named as `next`.
    ///
    /// The outgoing state's `cleanup()` runs only once the successor is
    /// known to be registered; on error the active state is unchanged.
    pub fn flip_state(&mut self) -> Result<(), StateError> {
        let (Some(current), Some(state)) = (self.state_name, self.state.as_mut()) else {
            return Err(StateError::NotStarted);
        };

        let next = state
            .core()
            .next()
            .ok_or_else(|| StateError::missing_next(&current))?;
        if !self.registry.contains(&next) {
            return Err(StateError::unknown(&next));
        }

        debug!("Flipping state {:?} -> {:?}", current, next);
        let persist = state.cleanup();

        self.start_state(next, self.now, persist)?;
        self.previous = Some(current);
        if let Some(state) = self.state.as_mut() {
            state.core_mut().previous = Some(current);
        }
        Ok(())
    }

    /// Forwards one event to whichever state is active right now.
    pub fn get_event(&mut self, event: &InputEvent, scale: Scale) {
        match self.state.as_mut() {
            Some(state) => state.get_event(event, scale),
            None => trace!("Dropping {:?}: no active state", event),
        }
    }

    //--- Accessors --------------------------------------------------------

    /// `true` once the active state has requested quit.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn state_name(&self) -> Option<K> {
        self.state_name
    }

    /// Identifier active before the latest flip. `None` until one occurs.
    pub fn previous_name(&self) -> Option<K> {
        self.previous
    }

    pub fn state(&self) -> Option<&dyn State<K>> {
        self.state.as_deref()
    }

    /// Timestamp of the latest start or update.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn registry(&self) -> &StateRegistry<K> {
        &self.registry
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
