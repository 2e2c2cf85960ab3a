//=========================================================================
// Viewport
//=========================================================================
//
// Relates the fixed render size to the current window size.
//
// Window resizes snap to a configured list of resolutions: growing the
// window moves one step up the list, shrinking moves one step down, and
// the ends of the list are sticky.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::input::Scale;

//=== Viewport ============================================================

/// Render size, window size, and the pointer scale between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    render_size: (u32, u32),
    window_size: (u32, u32),
    resolutions: Vec<(u32, u32)>,
    scale: Scale,
}

impl Viewport {
    /// Creates a viewport whose window starts at `window_size`.
    ///
    /// `resolutions` should be ordered smallest to largest.
    pub fn new(render_size: (u32, u32), window_size: (u32, u32), resolutions: Vec<(u32, u32)>) -> Self {
        let mut viewport = Self {
            render_size,
            window_size,
            resolutions,
            scale: Scale::IDENTITY,
        };
        viewport.set_scale();
        viewport
    }

    //--- Queries ----------------------------------------------------------

    pub fn render_size(&self) -> (u32, u32) {
        self.render_size
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn resolutions(&self) -> &[(u32, u32)] {
        &self.resolutions
    }

    /// Render/window ratio used to map pointer coordinates.
    pub fn scale(&self) -> Scale {
        self.scale
    }

    //--- Resizing ---------------------------------------------------------

    /// Handles a window resize to `size`.
    ///
    /// Returns the window size the display should adopt, or `None` when
    /// `size` already is the current window size. If the current size is
    /// not one of the configured resolutions, `size` is adopted as-is.
    pub fn on_resize(&mut self, size: (u32, u32)) -> Option<(u32, u32)> {
        if size == self.window_size {
            return None;
        }

        let new_size = match self.resolutions.iter().position(|&r| r == self.window_size) {
            Some(index) => {
                let target = if size > self.window_size {
                    index.checked_add(1)
                } else {
                    index.checked_sub(1)
                };
                target
                    .and_then(|i| self.resolutions.get(i).copied())
                    .unwrap_or(self.window_size)
            }
            None => size,
        };

        debug!("Window resize {:?} -> {:?}", size, new_size);
        self.window_size = new_size;
        self.set_scale();
        Some(new_size)
    }

    fn set_scale(&mut self) {
        let (rw, rh) = self.render_size;
        let (ww, wh) = self.window_size;
        self.scale = Scale::new(
            rw as f32 / ww.max(1) as f32,
            rh as f32 / wh.max(1) as f32,
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
