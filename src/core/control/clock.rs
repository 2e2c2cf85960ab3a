//=========================================================================
// Frame Clock
//=========================================================================
//
// Caps the loop at a target rate and measures the real time between
// iterations.
//
// `tick(fps)` sleeps off whatever is left of the frame budget, then
// returns the milliseconds elapsed since the previous tick. States get
// that value as `dt` and must not assume it is constant.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

//=== FrameClock ==========================================================

const FPS_WINDOW: usize = 10;

/// Fixed-rate throttle and frame timer.
#[derive(Debug)]
pub struct FrameClock {
    origin: Instant,
    last_tick: Instant,
    recent: VecDeque<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last_tick: now,
            recent: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// Waits until at least `1/fps` seconds have passed since the last
    /// tick and returns the elapsed milliseconds. `fps <= 0` never waits.
    pub fn tick(&mut self, fps: f64) -> f64 {
        if fps > 0.0 {
            let budget = Duration::from_secs_f64(1.0 / fps);
            let spent = self.last_tick.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f64() * 1000.0;
        self.last_tick = now;

        if self.recent.len() == FPS_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(dt);
        dt
    }

    /// Average rate over the last few ticks. `0.0` before any tick.
    pub fn fps(&self) -> f64 {
        let total: f64 = self.recent.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.recent.len() as f64 * 1000.0 / total
    }

    /// Milliseconds since the clock was created.
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_zero_before_first_tick() {
        assert_eq!(FrameClock::new().fps(), 0.0);
    }

    #[test]
    fn capped_tick_waits_for_frame_budget() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);

        let dt = clock.tick(100.0);
        assert!(dt >= 9.5, "100 fps cap should give ~10ms frames, got {dt}");
    }

    #[test]
    fn uncapped_tick_returns_non_negative_dt() {
        let mut clock = FrameClock::new();
        assert!(clock.tick(0.0) >= 0.0);
        assert!(clock.tick(-1.0) >= 0.0);
    }

    #[test]
    fn now_is_monotonic() {
        let mut clock = FrameClock::new();
        let before = clock.now();
        clock.tick(200.0);
        assert!(clock.now() >= before);
    }

    #[test]
    fn fps_reflects_capped_rate() {
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            clock.tick(50.0);
        }
        let fps = clock.fps();
        assert!(fps > 0.0 && fps <= 51.0, "fps should not exceed cap, got {fps}");
    }
}
