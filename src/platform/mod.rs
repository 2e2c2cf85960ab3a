//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges winit (OS-level events) with the core thread.
//
// Architecture:
// ```text
//  Main Thread:                       Core Thread:
//  ┌───────────────────────────┐     ┌────────────────────┐
//  │  winit EventLoop<Core..>  │     │  Control::main     │
//  │   ↓                       │     │   ↑                │
//  │  InputProcessor           │     │  EventCollector    │
//  │   ↓                       │     │                    │
//  │  InputBuffer              │     │  WindowPresenter   │
//  │   ↓ RedrawRequested       │     │   │                │
//  │  Sender<PlatformEvent> ───┼────►│   │                │
//  │                           │     │   │                │
//  │  user_event(CoreEvent) ◄──┼─────┼───┘ EventLoopProxy │
//  └───────────────────────────┘     └────────────────────┘
// ```
//
// - RedrawRequested is the frame boundary: buffered input is flushed as
//   one `PlatformEvent::Inputs`.
// - A close request is forwarded, not acted on. The window goes away
//   when the core sends `CoreEvent::Shutdown`, or if the core is gone.
// - winit requires the main thread on macOS/iOS, so this runs on the
//   thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;
mod presenter;

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

pub(crate) use presenter::WindowPresenter;

//=== Event Loop ==========================================================

/// Creates the winit loop that carries `CoreEvent`s back from the core.
///
/// Must be called on the main thread, once per process.
pub(crate) fn create_event_loop() -> Result<EventLoop<CoreEvent>, PlatformError> {
    EventLoop::<CoreEvent>::with_user_event()
        .build()
        .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))
}

//=== Platform ============================================================

/// Window owner and input aggregator. Not `Send`; stays on the main thread.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    caption: String,
    window_size: (u32, u32),
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(event_sender: Sender<PlatformEvent>, caption: String, window_size: (u32, u32)) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            caption,
            window_size,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit loop until the core requests shutdown.
    ///
    /// # Errors
    ///
    /// [`PlatformError::EventLoopExecution`] if winit reports a failure.
    pub(crate) fn run(mut self, event_loop: EventLoop<CoreEvent>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");
        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends the buffered frame. Returns `false` once the core has hung up.
    fn flush_input_buffer(&mut self) -> bool {
        let Some(events) = self.buffer.drain() else {
            return true;
        };

        trace!(target: "platform::input", "Flushing {} events", events.len());

        let total = events.len();
        if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {} events", total);
            return false;
        }
        true
    }

    /// Forwards a close request. Returns `false` once the core has hung up.
    fn forward_close(&mut self) -> bool {
        // Input from the closing frame arrives ahead of the close itself.
        self.flush_input_buffer() && self.event_sender.send(PlatformEvent::WindowClosed).is_ok()
    }

    fn handle_core_event(&mut self, event_loop: &ActiveEventLoop, event: CoreEvent) {
        match event {
            CoreEvent::SetCaption(caption) => {
                if let Some(window) = &self.window {
                    window.set_title(&caption);
                }
                self.caption = caption;
            }
            CoreEvent::RequestSize { width, height } => {
                debug!(target: "platform", "Resizing window to {}x{}", width, height);
                self.window_size = (width, height);
                if let Some(window) = &self.window {
                    // Some platforms apply the size asynchronously and
                    // report it later through `Resized`.
                    let _ = window.request_inner_size(PhysicalSize::new(width, height));
                }
            }
            CoreEvent::Shutdown => {
                info!(target: "platform", "Core finished, closing window");
                event_loop.exit();
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== winit Integration ===================================================

impl ApplicationHandler<CoreEvent> for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.window_size;
        let attrs = WindowAttributes::default()
            .with_title(self.caption.clone())
            .with_inner_size(PhysicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                if !self.forward_close() {
                    warn!(target: "platform", "Core thread gone, exiting directly");
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.flush_input_buffer() {
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            other => {
                if let Some(event) = self.input_processor.translate(other) {
                    self.buffer.push(event);
                }
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: CoreEvent) {
        self.handle_core_event(event_loop, event);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::control::{Control, ControlConfig};
    use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton, Scale};
    use crate::core::platform_bridge::{EventCollector, EventSource, TickControl};
    use crate::core::state::{State, StateCore, StateRegistry};
    use crate::core::surface::NullPresenter;
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, Mutex};

    fn platform() -> (Platform, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        (Platform::new(tx, "Test".to_owned(), (640, 360)), rx)
    }

    fn space() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx) = platform();
        assert!(platform.window().is_none());
    }

    #[test]
    fn flush_empty_buffer_sends_nothing() {
        let (mut platform, rx) = platform();
        assert!(platform.flush_input_buffer());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_sends_one_batch() {
        let (mut platform, rx) = platform();
        platform.buffer.push(space());
        platform.buffer.push(InputEvent::MouseMoved { x: 1.0, y: 1.0 });

        assert!(platform.flush_input_buffer());
        match rx.try_recv() {
            Ok(PlatformEvent::Inputs(events)) => {
                assert_eq!(events, vec![space(), InputEvent::MouseMoved { x: 1.0, y: 1.0 }]);
            }
            other => panic!("Expected Inputs, got {:?}", other),
        }
        assert!(platform.flush_input_buffer());
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn flush_reports_disconnected_core() {
        let (mut platform, rx) = platform();
        drop(rx);
        platform.buffer.push(space());
        assert!(!platform.flush_input_buffer());
    }

    #[test]
    fn close_flushes_pending_input_first() {
        let (mut platform, rx) = platform();
        platform.buffer.push(space());

        assert!(platform.forward_close());
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::Inputs(_))));
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::WindowClosed)));
    }

    #[test]
    fn close_reports_disconnected_core() {
        let (mut platform, rx) = platform();
        drop(rx);
        assert!(!platform.forward_close());
    }

    //--- Platform to State ------------------------------------------------

    /// Records every event it is handed.
    struct Journal {
        core: StateCore<&'static str>,
        seen: Arc<Mutex<Vec<InputEvent>>>,
    }

    impl State<&'static str> for Journal {
        fn core(&self) -> &StateCore<&'static str> {
            &self.core
        }

        fn core_mut(&mut self) -> &mut StateCore<&'static str> {
            &mut self.core
        }

        fn get_event(&mut self, event: &InputEvent, _scale: Scale) {
            self.seen.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn buffered_input_reaches_state_in_arrival_order() {
        let (mut platform, rx) = platform();
        let frame = vec![
            InputEvent::MouseMoved { x: 10.0, y: 10.0 },
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
                x: 10.0,
                y: 10.0,
            },
            InputEvent::MouseMoved { x: 50.0, y: 50.0 },
            InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
                x: 50.0,
                y: 50.0,
            },
            InputEvent::KeyUp { key: KeyCode::Space, modifiers: Modifiers::NONE },
            InputEvent::MouseMoved { x: 60.0, y: 55.0 },
        ];
        for event in &frame {
            platform.buffer.push(event.clone());
        }
        assert!(platform.flush_input_buffer());

        let mut collector = EventCollector::new(rx);
        let mut events = Vec::new();
        assert_eq!(collector.poll(&mut events), TickControl::Continue);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = StateRegistry::new();
        let journal = Arc::clone(&seen);
        registry.register("journal", move |_| Journal {
            core: StateCore::new(),
            seen: Arc::clone(&journal),
        });
        let config = ControlConfig {
            caption: "Test".to_owned(),
            fps: 0.0,
            render_size: (64, 36),
            window_size: (64, 36),
            resolutions: vec![(64, 36)],
            show_fps: false,
        };
        let mut control = Control::new(registry, config);
        control.start_state("journal").unwrap();
        control.event_loop(&events, &mut NullPresenter);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), frame.len());
        assert_eq!(*seen, frame);
        assert!(control.input().is_button_released(MouseButton::Left));
        assert_eq!(control.input().mouse_position(), (60.0, 55.0));
    }
}
