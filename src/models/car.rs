//! Car on a straight road with traction-limited drive.
//!
//! # Governing Equations
//!
//! ```text
//! F_drive = min((throttle / 0.9)·μ·m·g, μ·m·g)
//! F_drag  = k·v·|v|
//! a       = (F_drive − F_drag) / m
//! ```
//!
//! Drive force grows linearly with throttle but saturates at the grip
//! limit: pushing past 90 % throttle only spins the wheels. Checkpoint
//! markers along the road latch time and speed on first passage.

use serde::{Deserialize, Serialize};

use crate::config::CarConfig;
use crate::engine::clock::FrameClock;
use crate::engine::integrator::advance;
use crate::events::CheckpointLatch;

/// Road length (m).
pub const ROAD_LENGTH: f64 = 180.0;

/// Default checkpoint marker positions (m).
pub const DEFAULT_CHECKPOINTS: [f64; 4] = [40.0, 80.0, 120.0, 160.0];

/// Gravity for the traction limit (m/s²).
const G: f64 = 9.8;

/// Integration substep (s).
const SUBSTEP: f64 = 0.01;

/// Car parameters, mirrored from the UI sliders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CarParams {
    /// Throttle in percent (0–120; slip begins above 90).
    pub throttle_percent: f64,
    /// Vehicle mass m (kg).
    pub mass: f64,
    /// Quadratic air drag coefficient k (kg/m).
    pub air_drag: f64,
    /// Tyre grip coefficient μ.
    pub grip: f64,
}

impl Default for CarParams {
    fn default() -> Self {
        Self {
            throttle_percent: 60.0,
            mass: 1200.0,
            air_drag: 0.0,
            grip: 0.8,
        }
    }
}

impl From<&CarConfig> for CarParams {
    fn from(config: &CarConfig) -> Self {
        Self {
            throttle_percent: config.throttle_percent,
            mass: config.mass,
            air_drag: config.air_drag,
            grip: config.grip,
        }
    }
}

impl CarParams {
    /// Traction-capped drive force (N).
    #[must_use]
    pub fn drive_force(&self) -> f64 {
        let throttle = self.throttle_percent.clamp(0.0, 120.0) / 100.0;
        let traction_limit = self.grip * self.mass * G;
        ((throttle / 0.9) * traction_limit).min(traction_limit)
    }
}

/// Car driving down a straight road with checkpoint timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    /// Position along the road (m).
    pub x: f64,
    /// Velocity (m/s).
    pub v: f64,
    /// Elapsed run time (s).
    pub time: f64,
    running: bool,
    checkpoints: Vec<CheckpointLatch>,
    clock: FrameClock,
}

impl Default for Car {
    fn default() -> Self {
        Self::new()
    }
}

impl Car {
    /// Create a car at the start line with the default checkpoint layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0.0,
            v: 0.0,
            time: 0.0,
            running: false,
            checkpoints: DEFAULT_CHECKPOINTS
                .iter()
                .map(|&x| CheckpointLatch::new(x))
                .collect(),
            clock: FrameClock::new(1.0 / 20.0),
        }
    }

    /// Whether the run is in progress.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Checkpoint latches in road order.
    #[must_use]
    pub fn checkpoints(&self) -> &[CheckpointLatch] {
        &self.checkpoints
    }

    /// Move a checkpoint marker; its record is cleared.
    pub fn set_checkpoint(&mut self, index: usize, x: f64) {
        if let Some(cp) = self.checkpoints.get_mut(index) {
            cp.position = x.clamp(0.0, ROAD_LENGTH);
            cp.clear();
        }
    }

    /// Begin (or resume) the run.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Suspend the run without losing state.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Advance by one frame of (unclamped) elapsed time.
    pub fn step(&mut self, dt: f64, params: &CarParams) {
        if !self.running {
            return;
        }
        let dt = self.clock.clamp(dt);

        let drive = params.drive_force();
        let mass = params.mass.max(1.0);
        let f = |y: &[f64; 2]| {
            let v = y[1];
            [v, (drive - params.air_drag * v * v.abs()) / mass]
        };
        let mut y = [self.x, self.v];
        advance(&mut y, dt, SUBSTEP, &f);
        self.x = y[0];
        self.v = y[1];
        self.time += dt;

        for cp in &mut self.checkpoints {
            cp.observe(self.x, self.time, self.v);
        }
    }

    /// Put the car back on the start line and clear all checkpoint records.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.v = 0.0;
        self.time = 0.0;
        self.running = false;
        for cp in &mut self.checkpoints {
            cp.clear();
        }
    }
}
