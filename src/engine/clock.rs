//! Frame-time clamping and stopwatch bookkeeping.
//!
//! The animation callback is the sole driver of physics updates. After a
//! background-tab pause the reported elapsed time can be huge, so each model
//! clamps it to a small per-model maximum before integrating; that bounds
//! the number of fixed substeps executed in one frame.

use serde::{Deserialize, Serialize};

/// Per-frame elapsed-time clamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FrameClock {
    /// Maximum elapsed time accepted per frame (seconds).
    max_frame_dt: f64,
}

impl FrameClock {
    /// Create a clock with the given per-frame cap in seconds.
    ///
    /// # Panics
    ///
    /// Panics if the cap is not positive and finite.
    #[must_use]
    pub fn new(max_frame_dt: f64) -> Self {
        assert!(max_frame_dt > 0.0, "frame cap must be positive");
        assert!(max_frame_dt.is_finite(), "frame cap must be finite");
        Self { max_frame_dt }
    }

    /// The configured cap in seconds.
    #[must_use]
    pub const fn max_frame_dt(&self) -> f64 {
        self.max_frame_dt
    }

    /// Clamp a raw elapsed time to `[0, max_frame_dt]`.
    #[must_use]
    pub fn clamp(&self, elapsed: f64) -> f64 {
        if elapsed.is_finite() {
            elapsed.clamp(0.0, self.max_frame_dt)
        } else {
            self.max_frame_dt
        }
    }
}

/// A start/stop stopwatch accumulating frame time while running.
///
/// Used directly by the pendulum/spring pages and driven by the gate
/// flip-flop on the cart page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed: f64,
    running: bool,
}

impl Stopwatch {
    /// Create a stopped stopwatch at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed seconds.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether the stopwatch is currently accumulating.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Start (or resume) accumulating.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Restart from zero and run.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Stop accumulating; elapsed time is preserved.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and zero.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
    }

    /// Advance by one frame's clamped elapsed time.
    pub fn tick(&mut self, dt: f64) {
        if self.running && dt > 0.0 {
            self.elapsed += dt;
        }
    }
}
