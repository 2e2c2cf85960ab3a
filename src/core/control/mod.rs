//=========================================================================
// Control
//=========================================================================
//
// The controller: owns the state machine together with everything a
// frame needs (clock, viewport, input snapshot, render surface) and
// runs the loop body.
//
// One iteration:
// ```text
//   clock.tick(fps) ─► dt
//   source.poll()   ─► events ─► event_loop() ─► State::get_event (each)
//   update(dt)      ─► StateMachine::update (quit / flip / update)
//   render()        ─► Presenter::present (+ FPS caption)
// ```
//
// Everything runs on one thread; every hook returns before the next
// one starts.
//
//=========================================================================

//=== Submodules ==========================================================

mod clock;
mod viewport;

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::error::StateError;
use crate::core::input::{InputEvent, InputSnapshot, KeyCode};
use crate::core::platform_bridge::{EventSource, TickControl};
use crate::core::state::{Persist, StateKey, StateMachine, StateRegistry};
use crate::core::surface::{FrameBuffer, Presenter};

//=== Public API ==========================================================

pub use clock::FrameClock;
pub use viewport::Viewport;

//=== ControlConfig =======================================================

/// Loop and display settings for a [`Control`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    /// Base window caption.
    pub caption: String,

    /// Target iterations per second. `0.0` runs uncapped.
    pub fps: f64,

    /// Size of the surface states draw into.
    pub render_size: (u32, u32),

    /// Initial window size.
    pub window_size: (u32, u32),

    /// Window sizes a resize snaps between, smallest first.
    pub resolutions: Vec<(u32, u32)>,

    /// Show the measured frame rate in the caption.
    pub show_fps: bool,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            caption: "Aetheric".to_owned(),
            fps: 60.0,
            render_size: (1280, 720),
            window_size: (1280, 720),
            resolutions: vec![(640, 360), (1280, 720), (1920, 1080)],
            show_fps: false,
        }
    }
}

//=== Control =============================================================

/// Controller for the whole program.
pub struct Control<K: StateKey> {
    machine: StateMachine<K>,
    caption: String,
    fps: f64,
    show_fps: bool,
    clock: FrameClock,
    viewport: Viewport,
    input: InputSnapshot,
    render_surface: FrameBuffer,
    now: f64,
    events: Vec<InputEvent>,
}

impl<K: StateKey> Control<K> {
    //--- Construction -----------------------------------------------------

    pub fn new(registry: StateRegistry<K>, config: ControlConfig) -> Self {
        let ControlConfig {
            caption,
            fps,
            render_size,
            window_size,
            resolutions,
            show_fps,
        } = config;

        Self {
            machine: StateMachine::new(registry, render_size),
            caption,
            fps,
            show_fps,
            clock: FrameClock::new(),
            viewport: Viewport::new(render_size, window_size, resolutions),
            input: InputSnapshot::new(),
            render_surface: FrameBuffer::new(render_size.0, render_size.1),
            now: 0.0,
            events: Vec::with_capacity(64),
        }
    }

    //--- Startup ----------------------------------------------------------

    /// Starts `key` with an empty bag. Call once before the first iteration.
    pub fn start_state(&mut self, key: K) -> Result<(), StateError> {
        self.start_state_with(key, Persist::new())
    }

    /// Starts `key` with a caller-supplied bag.
    pub fn start_state_with(&mut self, key: K, persist: Persist) -> Result<(), StateError> {
        self.machine.start_state(key, self.now, persist)
    }

    //--- Main Loop --------------------------------------------------------

    /// Runs iterations until the active state quits or the event source
    /// goes away.
    ///
    /// # Errors
    ///
    /// Propagates the first [`StateError`]; the loop does not continue
    /// past a failed flip.
    pub fn main<E, P>(&mut self, source: &mut E, presenter: &mut P) -> Result<(), StateError>
    where
        E: EventSource + ?Sized,
        P: Presenter + ?Sized,
    {
        info!("Entering main loop ({} fps target)", self.fps);

        while !self.is_done() {
            if self.step(source, presenter)? == TickControl::Exit {
                break;
            }
        }

        info!("Main loop exited (done: {})", self.is_done());
        Ok(())
    }

    /// Runs a single loop iteration.
    pub fn step<E, P>(&mut self, source: &mut E, presenter: &mut P) -> Result<TickControl, StateError>
    where
        E: EventSource + ?Sized,
        P: Presenter + ?Sized,
    {
        let dt = self.clock.tick(self.fps);

        let mut events = std::mem::take(&mut self.events);
        events.clear();
        let control = source.poll(&mut events);
        self.event_loop(&events, presenter);
        self.events = events;

        if control == TickControl::Exit {
            info!("Event source disconnected");
            return Ok(TickControl::Exit);
        }

        self.update(dt)?;
        self.render(presenter);

        Ok(if self.is_done() { TickControl::Exit } else { TickControl::Continue })
    }

    //--- Loop Stages ------------------------------------------------------

    /// Forwards each event, in order, to the state active when it is read.
    ///
    /// F5 toggles the FPS caption. The first resize of a poll snaps the
    /// viewport; later ones in the same poll are discarded.
    pub fn event_loop<P>(&mut self, events: &[InputEvent], presenter: &mut P)
    where
        P: Presenter + ?Sized,
    {
        self.input.begin_poll();
        let mut resized = false;

        for event in events {
            match *event {
                InputEvent::KeyDown { key: KeyCode::F5, .. } => self.toggle_show_fps(presenter),
                InputEvent::Resized { width, height } => {
                    if resized {
                        trace!("Discarding queued resize to {}x{}", width, height);
                        continue;
                    }
                    resized = true;
                    if let Some(size) = self.viewport.on_resize((width, height)) {
                        presenter.request_window_size(size);
                    }
                }
                _ => {}
            }

            self.input.process_event(event);
            self.machine.get_event(event, self.viewport.scale());
        }

        self.input.end_poll();
    }

    /// Samples the clock and runs the state machine for this frame.
    pub fn update(&mut self, dt: f64) -> Result<(), StateError> {
        self.now = self.clock.now();
        self.machine.update(
            &mut self.render_surface,
            &self.input,
            self.now,
            dt,
            self.viewport.scale(),
        )
    }

    /// Hands the finished frame to the presenter.
    pub fn render<P>(&mut self, presenter: &mut P)
    where
        P: Presenter + ?Sized,
    {
        presenter.present(&self.render_surface, &self.viewport);

        if self.show_fps {
            let caption = format!("{} - {:.2} FPS", self.caption, self.clock.fps());
            presenter.set_caption(&caption);
        }
    }

    fn toggle_show_fps<P>(&mut self, presenter: &mut P)
    where
        P: Presenter + ?Sized,
    {
        self.show_fps = !self.show_fps;
        debug!("FPS display {}", if self.show_fps { "on" } else { "off" });
        if !self.show_fps {
            presenter.set_caption(&self.caption);
        }
    }

    //--- Accessors --------------------------------------------------------

    /// `true` once the program should exit.
    pub fn is_done(&self) -> bool {
        self.machine.is_done()
    }

    pub fn machine(&self) -> &StateMachine<K> {
        &self.machine
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn surface(&self) -> &FrameBuffer {
        &self.render_surface
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn show_fps(&self) -> bool {
        self.show_fps
    }

    /// Timestamp of the latest update, in ms since the controller was built.
    pub fn now(&self) -> f64 {
        self.now
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
