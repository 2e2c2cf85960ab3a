//=========================================================================
// Render Surface
//=========================================================================
//
// The drawable surface states render into, and the presenter seam that
// carries a finished frame to the display.
//
// Architecture:
//   State::draw(&mut FrameBuffer)   (render size, fixed)
//          ↓
//   Control::render() ──► Presenter::present(&FrameBuffer, &Viewport)
//                                   (scales to window size)
//
// Pixel rasterization beyond fill/set_pixel belongs to the scene
// content, not to this crate.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::control::Viewport;

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

//=== FrameBuffer =========================================================

/// Fixed-size pixel buffer in render space.
///
/// Owned by the controller and lent to the active state once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Creates a buffer cleared to black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Writes one pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

//=== Presenter ===========================================================

/// Display-side collaborator fed by the controller.
///
/// Implementations run on the logic thread and must not block.
///
/// Pixel output is up to the implementation. The window that
/// `Engine::run` opens does not display the `FrameBuffer`: its presenter
/// forwards caption, size and shutdown requests and drops every frame.
/// To show or capture it, read `Control::surface` or pass your own
/// presenter to `Control::main`.
pub trait Presenter {
    /// Receives a finished frame. `viewport` gives the window size the
    /// render-size buffer should be scaled to.
    fn present(&mut self, frame: &FrameBuffer, viewport: &Viewport);

    /// Sets the window caption.
    fn set_caption(&mut self, _caption: &str) {}

    /// Asks the display to resize its window.
    fn request_window_size(&mut self, _size: (u32, u32)) {}

    /// Called once after the loop ends.
    fn close(&mut self) {}
}

/// Presenter that discards every frame. Useful for headless runs.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: &FrameBuffer, _viewport: &Viewport) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
