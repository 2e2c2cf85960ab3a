//=========================================================================
// State Registry
//=========================================================================
//
// Ordered mapping from identifier to the factory that builds a fresh
// instance of that state.
//
// The registry is populated before the loop starts by whatever
// discovers scenes (static table, generated code, plugin loader). The
// machine only calls `resolve`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{State, StateKey};
use crate::core::error::StateError;

//=== FactoryContext ======================================================

/// Read-only view of the owning controller, passed to factories.
#[derive(Debug, Clone, Copy)]
pub struct FactoryContext<'a, K: StateKey> {
    registry: &'a StateRegistry<K>,
    now: f64,
    render_size: (u32, u32),
}

impl<'a, K: StateKey> FactoryContext<'a, K> {
    pub(crate) fn new(registry: &'a StateRegistry<K>, now: f64, render_size: (u32, u32)) -> Self {
        Self { registry, now, render_size }
    }

    /// Timestamp the new instance is about to be started with.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Size of the surface the state will draw into.
    pub fn render_size(&self) -> (u32, u32) {
        self.render_size
    }

    /// Registered identifiers in registration order (e.g. for a lobby
    /// listing every game).
    pub fn keys(&self) -> impl Iterator<Item = K> + 'a {
        self.registry.keys()
    }
}

//=== StateFactory ========================================================

/// Builds a fresh state instance on every entry.
pub type StateFactory<K> = Box<dyn Fn(&FactoryContext<'_, K>) -> Box<dyn State<K>> + Send>;

// Pins the closure to the higher-ranked factory signature.
fn erase<K, F>(factory: F) -> F
where
    K: StateKey,
    F: Fn(&FactoryContext<'_, K>) -> Box<dyn State<K>> + Send,
{
    factory
}

//=== StateRegistry =======================================================

/// Ordered `K → factory` registry.
pub struct StateRegistry<K: StateKey> {
    order: Vec<K>,
    factories: HashMap<K, StateFactory<K>>,
}

impl<K: StateKey> StateRegistry<K> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            factories: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers the factory for `key`, replacing any previous one.
    ///
    /// A replaced entry keeps its original position in the iteration order.
    ///
    /// ```rust
    /// # use aetheric_states::core::state::{State, StateCore, StateRegistry};
    /// # struct Lobby { core: StateCore<&'static str> }
    /// # impl State<&'static str> for Lobby {
    /// #     fn core(&self) -> &StateCore<&'static str> { &self.core }
    /// #     fn core_mut(&mut self) -> &mut StateCore<&'static str> { &mut self.core }
    /// # }
    /// let mut registry = StateRegistry::new();
    /// registry.register("lobby", |_ctx| Lobby { core: StateCore::new() });
    /// assert!(registry.contains(&"lobby"));
    /// ```
    pub fn register<F, T>(&mut self, key: K, factory: F)
    where
        F: Fn(&FactoryContext<'_, K>) -> T + Send + 'static,
        T: State<K> + 'static,
    {
        let boxed: StateFactory<K> = Box::new(erase(move |ctx| {
            let state: Box<dyn State<K>> = Box::new(factory(ctx));
            state
        }));

        if self.factories.insert(key, boxed).is_some() {
            warn!("State {:?} was already registered and has been replaced", key);
        } else {
            debug!("Registered state {:?}", key);
            self.order.push(key);
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the factory for `key`.
    ///
    /// # Errors
    ///
    /// [`StateError::UnknownState`] when `key` was never registered.
    pub fn resolve(&self, key: &K) -> Result<&StateFactory<K>, StateError> {
        self.factories.get(key).ok_or_else(|| StateError::unknown(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.factories.contains_key(key)
    }

    /// Identifiers in registration order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: StateKey> Default for StateRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> std::fmt::Debug for StateRegistry<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateRegistry")
            .field("keys", &self.order)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::StateCore;
    use proptest::prelude::*;

    struct Tagged {
        core: StateCore<&'static str>,
    }

    impl State<&'static str> for Tagged {
        fn core(&self) -> &StateCore<&'static str> {
            &self.core
        }
        fn core_mut(&mut self) -> &mut StateCore<&'static str> {
            &mut self.core
        }
    }

    fn tagged() -> impl Fn(&FactoryContext<'_, &'static str>) -> Tagged + Send {
        |_| Tagged { core: StateCore::new() }
    }

    #[test]
    fn resolve_unknown_is_error() {
        let registry: StateRegistry<&'static str> = StateRegistry::new();
        assert_eq!(
            registry.resolve(&"missing").err(),
            Some(StateError::UnknownState { key: "\"missing\"".to_owned() })
        );
    }

    #[test]
    fn resolve_registered_builds_instances() {
        let mut registry = StateRegistry::new();
        registry.register("menu", tagged());

        let ctx = FactoryContext::new(&registry, 42.0, (320, 240));
        let factory = registry.resolve(&"menu").expect("registered");
        let state = factory(&ctx);

        assert!(!state.core().is_done());
        assert_eq!(ctx.now(), 42.0);
        assert_eq!(ctx.render_size(), (320, 240));
    }

    #[test]
    fn overwrite_replaces_factory_but_keeps_position() {
        let mut registry = StateRegistry::new();
        registry.register("a", tagged());
        registry.register("b", tagged());
        registry.register("a", tagged());

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn factory_context_lists_keys_in_order() {
        let mut registry = StateRegistry::new();
        registry.register("splash", tagged());
        registry.register("lobby", tagged());
        registry.register("credits", tagged());

        let ctx = FactoryContext::new(&registry, 0.0, (1, 1));
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["splash", "lobby", "credits"]);
    }

    #[test]
    fn factories_build_fresh_instances() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        let counter = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&counter);

        let mut registry = StateRegistry::new();
        registry.register("game", move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Tagged { core: StateCore::new() }
        });

        let ctx = FactoryContext::new(&registry, 0.0, (1, 1));
        let factory = registry.resolve(&"game").expect("registered");
        factory(&ctx);
        factory(&ctx);

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    proptest! {
        #[test]
        fn registration_order_is_first_insertion_order(keys in prop::collection::vec(0u8..16, 0..40)) {
            const NAMES: [&str; 16] = [
                "k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7",
                "k8", "k9", "k10", "k11", "k12", "k13", "k14", "k15",
            ];

            let mut registry = StateRegistry::new();
            let mut expected: Vec<&'static str> = Vec::new();
            for &k in &keys {
                let name = NAMES[k as usize];
                registry.register(name, tagged());
                if !expected.contains(&name) {
                    expected.push(name);
                }
            }

            prop_assert_eq!(registry.keys().collect::<Vec<_>>(), expected.clone());
            for name in NAMES {
                prop_assert_eq!(registry.contains(&name), expected.contains(&name));
                prop_assert_eq!(registry.resolve(&name).is_ok(), expected.contains(&name));
            }
        }
    }
}
