//=========================================================================
// Window Presenter
//=========================================================================
//
// Core-side handle for the window. Lives on the core thread and turns
// `Presenter` calls into `CoreEvent`s for the winit loop.
//
// Frames are not uploaded: the render surface stays on the core thread
// and `present` only counts.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};
use winit::event_loop::EventLoopProxy;

//=== Internal Dependencies ===============================================

use crate::core::control::Viewport;
use crate::core::platform_bridge::CoreEvent;
use crate::core::surface::{FrameBuffer, Presenter};

//=== WindowPresenter =====================================================

pub(crate) struct WindowPresenter {
    proxy: EventLoopProxy<CoreEvent>,
    caption: Option<String>,
    frames: u64,
}

impl WindowPresenter {
    pub(crate) fn new(proxy: EventLoopProxy<CoreEvent>) -> Self {
        Self {
            proxy,
            caption: None,
            frames: 0,
        }
    }

    fn send(&self, event: CoreEvent) {
        if self.proxy.send_event(event).is_err() {
            debug!(target: "platform", "Event loop closed, dropping window request");
        }
    }
}

impl Presenter for WindowPresenter {
    fn present(&mut self, frame: &FrameBuffer, viewport: &Viewport) {
        self.frames += 1;
        trace!(
            target: "platform",
            "Frame {} ({:?} -> {:?})",
            self.frames,
            frame.size(),
            viewport.window_size()
        );
    }

    /// Sent only when the text changes; the FPS caption is set every frame.
    fn set_caption(&mut self, caption: &str) {
        if self.caption.as_deref() == Some(caption) {
            return;
        }
        self.caption = Some(caption.to_owned());
        self.send(CoreEvent::SetCaption(caption.to_owned()));
    }

    fn request_window_size(&mut self, (width, height): (u32, u32)) {
        self.send(CoreEvent::RequestSize { width, height });
    }

    fn close(&mut self) {
        debug!(target: "platform", "Requesting platform shutdown after {} frames", self.frames);
        self.send(CoreEvent::Shutdown);
    }
}
