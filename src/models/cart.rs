//! Cart on a horizontal track pulled by a hanging mass over a pulley.
//!
//! # Governing Equation
//!
//! ```text
//! (M + m)·a = m·g − 2·c·v
//! ```
//!
//! Both the cart and the hanging mass move, so drag acts on both bodies,
//! hence the factor 2. Two draggable optical gates toggle a stopwatch on
//! every crossing; the simulation halts at the end stop.

use serde::{Deserialize, Serialize};

use crate::config::CartConfig;
use crate::engine::clock::FrameClock;
use crate::engine::integrator::advance;
use crate::events::GateTimer;

/// Track length (m).
pub const TRACK_LENGTH: f64 = 2.49;

/// Position of the end stop where the run halts (m).
pub const STOP_X: f64 = 2.32;

/// Largest admissible gate position (m).
pub const MAX_GATE: f64 = 2.3;

/// Integration substep (s).
const SUBSTEP: f64 = 0.01;

/// Positions this close to zero count as "at the start line".
const LAUNCH_EPS: f64 = 1e-9;

/// Cart parameters, mirrored from the UI sliders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CartParams {
    /// Cart mass M (kg).
    pub cart_mass: f64,
    /// Hanging mass m (kg).
    pub hanging_mass: f64,
    /// Linear drag coefficient c (N·s/m).
    pub drag: f64,
    /// Surface gravity g (m/s²).
    pub gravity: f64,
}

impl Default for CartParams {
    fn default() -> Self {
        Self {
            cart_mass: 1.5,
            hanging_mass: 0.2,
            drag: 0.05,
            gravity: 9.8,
        }
    }
}

impl From<&CartConfig> for CartParams {
    fn from(config: &CartConfig) -> Self {
        Self {
            cart_mass: config.cart_mass,
            hanging_mass: config.hanging_mass,
            drag: config.drag,
            gravity: 9.8,
        }
    }
}

/// Cart-and-pulley rig with two timing gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtwoodCart {
    /// Position along the track (m).
    pub x: f64,
    /// Velocity (m/s).
    pub v: f64,
    gate_a: f64,
    gate_b: f64,
    running: bool,
    timer: GateTimer,
    clock: FrameClock,
}

impl Default for AtwoodCart {
    fn default() -> Self {
        Self::new()
    }
}

impl AtwoodCart {
    /// Create a cart at the start line with the default gate layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0.0,
            v: 0.0,
            gate_a: 0.000_001,
            gate_b: 1.6,
            running: false,
            timer: GateTimer::new(),
            clock: FrameClock::new(1.0 / 15.0),
        }
    }

    /// Whether the cart is moving (not yet at the end stop).
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Gate positions `(a, b)`.
    #[must_use]
    pub const fn gates(&self) -> (f64, f64) {
        (self.gate_a, self.gate_b)
    }

    /// The stopwatch driven by gate crossings.
    #[must_use]
    pub const fn timer(&self) -> &GateTimer {
        &self.timer
    }

    /// Move gate A; positions are clamped to `[0, MAX_GATE]`.
    pub fn set_gate_a(&mut self, x: f64) {
        self.gate_a = x.clamp(0.0, MAX_GATE);
    }

    /// Move gate B; positions are clamped to `[0, MAX_GATE]`.
    pub fn set_gate_b(&mut self, x: f64) {
        self.gate_b = x.clamp(0.0, MAX_GATE);
    }

    /// Release the cart.
    ///
    /// A gate sitting exactly on the start line would never register its
    /// first crossing (the cart starts on it), so in that case the
    /// stopwatch is started immediately.
    pub fn start(&mut self) {
        self.running = true;
        let at_start = self.x.abs() < LAUNCH_EPS;
        let gate_at_zero = self.gate_a.abs() < LAUNCH_EPS || self.gate_b.abs() < LAUNCH_EPS;
        if at_start && gate_at_zero {
            self.timer.force_start();
        }
    }

    /// Advance by one frame of (unclamped) elapsed time.
    ///
    /// The stopwatch accumulates whenever it is running, even after the
    /// cart has reached the end stop.
    pub fn step(&mut self, dt: f64, params: &CartParams) {
        let dt = self.clock.clamp(dt);

        if self.running {
            let x_prev = self.x;
            let total = params.cart_mass + params.hanging_mass;
            let f = |y: &[f64; 2]| {
                [
                    y[1],
                    (params.hanging_mass * params.gravity - 2.0 * params.drag * y[1]) / total,
                ]
            };
            let mut y = [self.x, self.v];
            advance(&mut y, dt, SUBSTEP, &f);
            self.x = y[0];
            self.v = y[1];

            if self.x < 0.0 {
                self.x = 0.0;
                self.v = 0.0;
            }
            if self.x >= STOP_X {
                self.x = STOP_X;
                self.v = 0.0;
                self.running = false;
            }

            self.timer.observe(x_prev, self.x, self.gate_a, self.gate_b);
        }

        self.timer.tick(dt);
    }

    /// Put the cart back on the start line and zero the stopwatch.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.v = 0.0;
        self.running = false;
        self.timer.reset();
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

#[cfg(feature = "wasm")]
mod wasm {
    use super::{AtwoodCart, CartParams};
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct WasmTrackCart {
        inner: AtwoodCart,
        params: CartParams,
    }

    #[wasm_bindgen]
    impl WasmTrackCart {
        #[wasm_bindgen(constructor)]
        #[must_use]
        pub fn new() -> Self {
            Self {
                inner: AtwoodCart::new(),
                params: CartParams::default(),
            }
        }

        pub fn set_params(&mut self, cart_mass: f64, hanging_mass: f64, drag: f64) {
            self.params.cart_mass = cart_mass;
            self.params.hanging_mass = hanging_mass;
            self.params.drag = drag;
        }

        pub fn set_gate_a(&mut self, x: f64) {
            self.inner.set_gate_a(x);
        }

        pub fn set_gate_b(&mut self, x: f64) {
            self.inner.set_gate_b(x);
        }

        pub fn start(&mut self) {
            self.inner.start();
        }

        pub fn step(&mut self, dt: f64) {
            self.inner.step(dt, &self.params);
        }

        #[must_use]
        pub fn get_x(&self) -> f64 {
            self.inner.x
        }

        #[must_use]
        pub fn get_v(&self) -> f64 {
            self.inner.v
        }

        #[must_use]
        pub fn get_stopwatch(&self) -> f64 {
            self.inner.timer().elapsed()
        }

        pub fn reset(&mut self) {
            self.inner.reset();
        }
    }

    impl Default for WasmTrackCart {
        fn default() -> Self {
            Self::new()
        }
    }
}
