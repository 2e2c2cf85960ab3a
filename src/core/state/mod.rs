//=========================================================================
// State System
//=========================================================================
//
// The lifecycle contract every scene implements, plus the registry and
// machine that drive it.
//
// Architecture:
//   StateMachine
//     ├─ registry: StateRegistry<K>   (K → factory, ordered)
//     └─ state: Box<dyn State<K>>     (exactly one live instance)
//
// Lifecycle of one visit:
//   factory(ctx) → startup(now, persist) → { get_event | update }* → cleanup()
//
// A fresh instance is built on every entry. Nothing survives a visit
// except what `cleanup()` puts in the returned `Persist`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, InputSnapshot, Scale};
use crate::core::surface::FrameBuffer;

//=== Module Declarations =================================================

mod machine;
mod persist;
mod registry;

//=== Public API ==========================================================

pub use machine::StateMachine;
pub use persist::{Persist, PersistKey, PersistType, PersistValue};
pub use registry::{FactoryContext, StateFactory, StateRegistry};

//=== State Key Trait =====================================================

/// Marker trait for state identifiers.
///
/// Typically implemented by a game-specific enum. String identifiers
/// work out of the box through the `&'static str` implementation.
pub trait StateKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

impl StateKey for &'static str {}

//=== StateCore ===========================================================

/// Attributes shared by every state: transition requests, timestamps,
/// and the persistence bag received at startup.
///
/// Concrete states embed one and return it from [`State::core`].
#[derive(Debug, Clone)]
pub struct StateCore<K: StateKey> {
    done: bool,
    quit: bool,
    next: Option<K>,
    pub(crate) previous: Option<K>,
    start_time: f64,
    now: f64,
    persist: Persist,
}

impl<K: StateKey> StateCore<K> {
    pub fn new() -> Self {
        Self {
            done: false,
            quit: false,
            next: None,
            previous: None,
            start_time: 0.0,
            now: 0.0,
            persist: Persist::new(),
        }
    }

    //--- Transition Requests ----------------------------------------------

    /// Requests a flip to `next` at the top of the next update.
    pub fn finish(&mut self, next: K) {
        self.next = Some(next);
        self.done = true;
    }

    /// Requests program termination. Takes priority over a pending flip.
    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    //--- Accessors --------------------------------------------------------

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    pub fn next(&self) -> Option<K> {
        self.next
    }

    /// The state that was active before this one. `None` until a flip
    /// has led here.
    pub fn previous(&self) -> Option<K> {
        self.previous
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Milliseconds since `startup`.
    pub fn elapsed(&self) -> f64 {
        self.now - self.start_time
    }

    pub fn persist(&self) -> &Persist {
        &self.persist
    }

    /// Mutable bag access; whatever is here when `cleanup` runs is
    /// carried forward.
    pub fn persist_mut(&mut self) -> &mut Persist {
        &mut self.persist
    }

    pub fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    //--- Lifecycle Defaults -----------------------------------------------

    /// Seeds timestamps and the incoming bag.
    pub fn startup(&mut self, now: f64, persist: Persist) {
        self.persist = persist;
        self.start_time = now;
        self.now = now;
    }

    /// Clears `done` and hands over the bag.
    pub fn cleanup(&mut self) -> Persist {
        self.done = false;
        std::mem::take(&mut self.persist)
    }
}

impl<K: StateKey> Default for StateCore<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== State Trait =========================================================

/// A scene: a self-contained mode with its own input, update, and
/// drawing behavior.
///
/// Only `core` and `core_mut` are required. Override `startup` and
/// `cleanup` when data must cross a flip, `get_event` to react to
/// input, and `update`/`draw` to animate and render.
///
/// ```rust
/// use aetheric_states::core::input::{InputEvent, Scale};
/// use aetheric_states::core::state::{State, StateCore};
///
/// struct Credits {
///     core: StateCore<&'static str>,
/// }
///
/// impl State<&'static str> for Credits {
///     fn core(&self) -> &StateCore<&'static str> { &self.core }
///     fn core_mut(&mut self) -> &mut StateCore<&'static str> { &mut self.core }
///
///     fn get_event(&mut self, event: &InputEvent, _scale: Scale) {
///         match event {
///             InputEvent::Quit => {
///                 self.core.set_done(true);
///                 self.core.quit();
///             }
///             InputEvent::KeyUp { .. } => self.core.finish("lobby"),
///             _ => {}
///         }
///     }
/// }
/// ```
pub trait State<K: StateKey>: Send {
    fn core(&self) -> &StateCore<K>;

    fn core_mut(&mut self) -> &mut StateCore<K>;

    /// Called once, right after construction and before any event or
    /// update. Default stores `now` and `persist`.
    fn startup(&mut self, now: f64, persist: Persist) {
        self.core_mut().startup(now, persist);
    }

    /// Called once, right before the instance is dropped. Must clear
    /// `done` and return the bag for the next state. Default does both.
    fn cleanup(&mut self) -> Persist {
        self.core_mut().cleanup()
    }

    /// Receives one discrete event. `scale` maps window pointer
    /// coordinates to render space. Must not draw.
    fn get_event(&mut self, _event: &InputEvent, _scale: Scale) {}

    /// Called once per loop iteration while active. `dt` is the real
    /// elapsed milliseconds since the previous iteration and varies.
    /// Default records `now` then draws.
    fn update(
        &mut self,
        surface: &mut FrameBuffer,
        _input: &InputSnapshot,
        now: f64,
        _dt: f64,
        _scale: Scale,
    ) {
        self.core_mut().set_now(now);
        self.draw(surface);
    }

    /// Renders the current visual state. Invoked from `update`.
    fn draw(&self, _surface: &mut FrameBuffer) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
