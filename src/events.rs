//! Event detection: gate crossings, checkpoint latches, rest detection.
//!
//! Detectors are evaluated once per frame against the updated state. They
//! never feed back into the integration itself; they toggle stopwatches,
//! latch measurement records, or mark entities for removal.

use serde::{Deserialize, Serialize};

use crate::engine::clock::Stopwatch;

/// Whether a position moved across (or onto) a gate between two frames.
///
/// Crossing means the sign of `position - gate` changed. A frame in which
/// the position did not move never counts, so a body parked exactly on a
/// gate does not re-trigger every frame.
#[must_use]
pub fn gate_crossed(prev: f64, curr: f64, gate: f64) -> bool {
    (prev - gate) * (curr - gate) <= 0.0 && prev != curr
}

/// Two-crossing stopwatch flip-flop for a pair of track gates.
///
/// The first crossing of either gate starts timing from zero; the next
/// crossing of either gate stops it. Further crossings start a fresh
/// measurement.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GateTimer {
    stopwatch: Stopwatch,
}

impl GateTimer {
    /// Create a stopped timer at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed seconds of the current (or last) measurement.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.stopwatch.elapsed()
    }

    /// Whether a measurement is in progress.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.stopwatch.is_running()
    }

    /// Examine one frame's motion against both gates and toggle accordingly.
    pub fn observe(&mut self, prev: f64, curr: f64, gate_a: f64, gate_b: f64) {
        let crossed = gate_crossed(prev, curr, gate_a) || gate_crossed(prev, curr, gate_b);
        if !crossed {
            return;
        }
        if self.stopwatch.is_running() {
            self.stopwatch.stop();
        } else {
            self.stopwatch.restart();
        }
    }

    /// Start timing from zero without a crossing.
    ///
    /// Covers the launch special case: a cart starting exactly at zero with
    /// a gate at zero would otherwise never register its first crossing.
    pub fn force_start(&mut self) {
        self.stopwatch.restart();
    }

    /// Accumulate frame time while running.
    pub fn tick(&mut self, dt: f64) {
        self.stopwatch.tick(dt);
    }

    /// Stop and zero.
    pub fn reset(&mut self) {
        self.stopwatch.reset();
    }
}

/// Measurement captured when a checkpoint is first reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointRecord {
    /// Elapsed run time at the hit (s).
    pub time: f64,
    /// Instantaneous speed at the hit (m/s).
    pub speed: f64,
}

/// One-shot latch recording time and speed the first time a position
/// reaches the marker. Idempotent until explicitly cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointLatch {
    /// Marker position along the road (m).
    pub position: f64,
    /// Recorded hit, if any.
    pub record: Option<CheckpointRecord>,
}

impl CheckpointLatch {
    /// Create an unlatched checkpoint at `position`.
    #[must_use]
    pub const fn new(position: f64) -> Self {
        Self {
            position,
            record: None,
        }
    }

    /// Latch (time, speed) if the marker has been reached and nothing is
    /// recorded yet.
    pub fn observe(&mut self, x: f64, time: f64, speed: f64) {
        if self.record.is_none() && x >= self.position {
            self.record = Some(CheckpointRecord { time, speed });
        }
    }

    /// Clear the recorded hit.
    pub fn clear(&mut self) {
        self.record = None;
    }
}

/// Sustained-condition timer: fires once a condition has held continuously
/// for a threshold duration.
///
/// Used for projectile rest detection (speed below threshold while near the
/// ground for 0.35 s).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RestDetector {
    /// How long the condition must hold (s).
    hold: f64,
    /// Time accumulated while the condition held (s).
    accumulated: f64,
}

impl RestDetector {
    /// Create a detector with the given hold duration.
    #[must_use]
    pub const fn new(hold: f64) -> Self {
        Self {
            hold,
            accumulated: 0.0,
        }
    }

    /// Feed one frame; returns true once the condition has held long enough.
    pub fn update(&mut self, condition: bool, dt: f64) -> bool {
        if condition {
            self.accumulated += dt;
        } else {
            self.accumulated = 0.0;
        }
        self.accumulated > self.hold
    }

    /// Whether the condition has already held long enough.
    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.accumulated > self.hold
    }

    /// Zero the accumulated time.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
