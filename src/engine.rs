//=========================================================================
// Engine
//=========================================================================
//
// Main entry point: configuration, state registration, and the runtime
// that wires the platform to the core loop.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run(initial)──>  [Runtime]
//         │                                   │                      │
//         ├─ with_fps()                       └─ registers states    ├─ starts initial state
//         ├─ with_caption()                                          ├─ spawns core thread
//         └─ with_resolutions() ...                                  └─ runs platform, joins
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;

use crossbeam_channel::bounded;
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::control::{Control, ControlConfig};
use crate::core::error::StateError;
use crate::core::platform_bridge::{EventCollector, PlatformError, PlatformEvent};
use crate::core::state::{StateKey, StateRegistry};
use crate::core::surface::Presenter;
use crate::platform::{self, Platform, WindowPresenter};

//=== EngineError =========================================================

/// Fatal errors surfaced by [`Engine::run`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// A state could not be started or flipped to.
    #[error(transparent)]
    State(#[from] StateError),

    /// The windowing backend failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("Failed to spawn core thread: {0}")]
    CoreThreadSpawn(#[from] std::io::Error),

    #[error("Core thread panicked")]
    CoreThreadPanicked,
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **FPS**: 60.0
/// - **Channel capacity**: 128 messages
/// - **Caption**: `"Aetheric"`
/// - **Render size**: 1280x720, window starts at the same size
/// - **Resolutions**: 640x360, 1280x720, 1920x1080
///
/// # Examples
///
/// ```no_run
/// use aetheric_states::prelude::*;
///
/// struct Title {
///     core: StateCore<&'static str>,
/// }
///
/// impl State<&'static str> for Title {
///     fn core(&self) -> &StateCore<&'static str> { &self.core }
///     fn core_mut(&mut self) -> &mut StateCore<&'static str> { &mut self.core }
///
///     fn get_event(&mut self, event: &InputEvent, _scale: Scale) {
///         if matches!(event, InputEvent::Quit) {
///             self.core.quit();
///         }
///     }
/// }
///
/// EngineBuilder::<&'static str>::new()
///     .with_fps(30.0)
///     .with_caption("Demo")
///     .build()
///     .init(|registry| {
///         registry.register("title", |_| Title { core: StateCore::new() });
///     })
///     .run("title")
///     .expect("engine failed");
/// ```
pub struct EngineBuilder<K: StateKey> {
    config: ControlConfig,
    window_size: Option<(u32, u32)>,
    channel_capacity: usize,
    _phantom: std::marker::PhantomData<K>,
}

impl<K: StateKey> EngineBuilder<K> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ControlConfig::default(),
            window_size: None,
            channel_capacity: 128,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the loop rate cap.
    ///
    /// `dt` handed to states is measured, so a slow frame shows up as a
    /// larger `dt` rather than a slower simulation.
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`.
    pub fn with_fps(mut self, fps: f64) -> Self {
        assert!(fps > 0.0, "FPS must be positive, got {}", fps);
        self.config.fps = fps;
        self
    }

    /// Sets the capacity of the platform → core channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.config.caption = caption.into();
        self
    }

    /// Sets the size of the surface states draw into.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_render_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Render size must be non-zero, got {}x{}", width, height);
        self.config.render_size = (width, height);
        self
    }

    /// Sets the initial window size. Defaults to the render size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window_size = Some((width, height));
        self
    }

    /// Sets the window sizes a resize snaps between.
    ///
    /// # Panics
    ///
    /// Panics unless `resolutions` is sorted smallest first without
    /// duplicates.
    pub fn with_resolutions(mut self, resolutions: Vec<(u32, u32)>) -> Self {
        assert!(
            resolutions.windows(2).all(|pair| pair[0] < pair[1]),
            "Resolutions must be sorted smallest first"
        );
        self.config.resolutions = resolutions;
        self
    }

    /// Starts with the FPS caption on. F5 toggles it at runtime.
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.config.show_fps = show;
        self
    }

    /// Builds the engine with an empty registry.
    pub fn build(self) -> Engine<K> {
        let mut config = self.config;
        config.window_size = self.window_size.unwrap_or(config.render_size);

        info!(
            "Building engine (FPS: {}, channel: {}, render: {:?})",
            config.fps, self.channel_capacity, config.render_size
        );

        Engine {
            registry: StateRegistry::new(),
            config,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl<K: StateKey> Default for EngineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runtime that owns the state registry until [`Engine::run`].
///
/// ```text
/// Engine::run (Main Thread)
///   ├─► Control::main (Core Thread @ FPS)
///   │     └─► StateMachine → active State
///   │
///   └─► Platform (winit event loop)
///         └─► Window, input batching
///
/// platform → core: crossbeam channel (PlatformEvent)
/// core → platform: EventLoopProxy (CoreEvent)
/// ```
pub struct Engine<K: StateKey> {
    registry: StateRegistry<K>,
    config: ControlConfig,
    channel_capacity: usize,
}

impl<K: StateKey> Engine<K> {
    //--- Initialization ---------------------------------------------------

    /// Registers states before the engine runs.
    ///
    /// May be called more than once; later registrations of the same key
    /// replace earlier ones.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut StateRegistry<K>),
    {
        info!("Registering states");
        init_fn(&mut self.registry);
        info!("{} states registered", self.registry.len());
        self
    }

    pub fn registry(&self) -> &StateRegistry<K> {
        &self.registry
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Starts `initial` and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Starts `initial` on the calling thread; an unknown key returns
    ///    before any window or thread exists
    /// 2. Creates the winit event loop and the platform → core channel
    /// 3. Spawns the core thread running [`Control::main`]
    /// 4. Runs the platform loop until the core asks it to shut down
    /// 5. Joins the core thread
    ///
    /// # Errors
    ///
    /// The first fatal [`StateError`] from the loop, or a platform or
    /// thread failure.
    ///
    /// # Panics
    ///
    /// winit panics if called off the main thread on macOS/iOS.
    pub fn run(self, initial: K) -> Result<(), EngineError> {
        info!("Starting engine runtime (FPS: {})", self.config.fps);

        let caption = self.config.caption.clone();
        let window_size = self.config.window_size;

        //--- 1. Initial state ---------------------------------------------
        let mut control = Control::new(self.registry, self.config);
        control.start_state(initial)?;

        //--- 2. Event loop and channel ------------------------------------
        let event_loop = platform::create_event_loop()?;
        let proxy = event_loop.create_proxy();
        let (tx, rx) = bounded::<PlatformEvent>(self.channel_capacity);
        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 3. Core thread -----------------------------------------------
        let core_handle = thread::Builder::new()
            .name("aetheric-core".to_owned())
            .spawn(move || {
                let mut source = EventCollector::new(rx);
                let mut presenter = WindowPresenter::new(proxy);
                let result = control.main(&mut source, &mut presenter);
                if let Err(e) = &result {
                    error!("Core loop failed: {}", e);
                }
                presenter.close();
                result
            })?;
        info!("Core thread spawned");

        //--- 4. Platform --------------------------------------------------
        let platform_result = Platform::new(tx, caption, window_size).run(event_loop);
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 5. Join ------------------------------------------------------
        let core_result = core_handle.join().map_err(|_| {
            error!("Core thread panicked");
            EngineError::CoreThreadPanicked
        })?;

        core_result?;
        platform_result?;
        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{State, StateCore};

    type Key = &'static str;

    struct Idle {
        core: StateCore<Key>,
    }

    impl State<Key> for Idle {
        fn core(&self) -> &StateCore<Key> {
            &self.core
        }

        fn core_mut(&mut self) -> &mut StateCore<Key> {
            &mut self.core
        }
    }

    fn idle() -> Idle {
        Idle { core: StateCore::new() }
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<Key>::new();
        assert_eq!(builder.config.fps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.config.render_size, (1280, 720));
        assert!(!builder.config.show_fps);
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn builder_with_fps_panics_on_zero() {
        EngineBuilder::<Key>::new().with_fps(0.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::<Key>::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Render size must be non-zero")]
    fn builder_with_render_size_panics_on_zero() {
        EngineBuilder::<Key>::new().with_render_size(0, 720);
    }

    #[test]
    #[should_panic(expected = "Resolutions must be sorted")]
    fn builder_rejects_unsorted_resolutions() {
        EngineBuilder::<Key>::new().with_resolutions(vec![(1920, 1080), (640, 360)]);
    }

    #[test]
    fn window_size_defaults_to_render_size() {
        let engine = EngineBuilder::<Key>::new().with_render_size(320, 180).build();
        assert_eq!(engine.config().window_size, (320, 180));

        let engine = EngineBuilder::<Key>::new()
            .with_render_size(320, 180)
            .with_window_size(640, 360)
            .build();
        assert_eq!(engine.config().window_size, (640, 360));
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::<Key>::new()
            .with_fps(120.0)
            .with_channel_capacity(256)
            .with_caption("Demo")
            .with_show_fps(true)
            .with_resolutions(vec![(800, 600), (1024, 768)])
            .build();

        assert_eq!(engine.config().fps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.config().caption, "Demo");
        assert!(engine.config().show_fps);
        assert_eq!(engine.config().resolutions, vec![(800, 600), (1024, 768)]);
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_populates_registry() {
        let engine = EngineBuilder::<Key>::new().build().init(|registry| {
            registry.register("title", |_| idle());
            registry.register("game", |_| idle());
        });

        assert_eq!(engine.registry().keys().collect::<Vec<_>>(), vec!["title", "game"]);
    }

    #[test]
    fn run_with_unknown_initial_state_fails_before_platform() {
        let engine = EngineBuilder::<Key>::new()
            .build()
            .init(|registry| registry.register("title", |_| idle()));

        match engine.run("missing") {
            Err(EngineError::State(StateError::UnknownState { .. })) => {}
            other => panic!("Expected UnknownState, got {:?}", other),
        }
    }
}
