//! Shared numeric utilities: denominator flooring, the celestial-body
//! gravity lookup used to caption the gravity slider, and the fixed-window
//! sample trace behind the x(t)/θ(t) plots.

use serde::{Deserialize, Serialize};

/// Smallest denominator accepted for mass/length divisions.
///
/// Slider values are pre-clamped to physically sensible ranges by the UI,
/// but a division by an accidental zero must degrade to a huge-but-finite
/// acceleration rather than propagate NaN through the state vector.
pub const MIN_DENOM: f64 = 1e-6;

/// Floor a denominator away from zero, preserving nothing below [`MIN_DENOM`].
#[must_use]
pub fn floored(value: f64) -> f64 {
    value.max(MIN_DENOM)
}

/// Celestial bodies with surface gravity, for slider captions.
///
/// Matching is on `g` rounded to one decimal, the resolution of the slider.
const CELESTIAL_G: [(&str, f64); 14] = [
    ("Ceres", 0.27),
    ("Pluto", 0.62),
    ("Eris", 0.82),
    ("Callisto", 1.24),
    ("Europa", 1.31),
    ("Titan", 1.35),
    ("Ganymede", 1.43),
    ("Moon", 1.62),
    ("Io", 1.80),
    ("Mercury", 3.70),
    ("Mars", 3.71),
    ("Uranus", 8.69),
    ("Venus", 8.87),
    ("Earth", 9.8),
];

/// Name of the celestial body whose surface gravity matches `g` at slider
/// resolution (0.1 m/s²), if any.
#[must_use]
pub fn body_for_gravity(g: f64) -> Option<&'static str> {
    let round1 = |v: f64| (v * 10.0).round() / 10.0;
    let target = round1(g);
    CELESTIAL_G
        .iter()
        .find(|(_, body_g)| (round1(*body_g) - target).abs() < f64::EPSILON)
        .map(|(name, _)| *name)
}

/// Plot window in seconds; samples past it are not recorded.
pub const TRACE_SPAN: f64 = 60.0;

/// Hard cap on stored samples.
const TRACE_CAP: usize = 4000;

/// Fixed-window sample buffer for the time-series plots.
///
/// Records `(t, value)` pairs for the first [`TRACE_SPAN`] seconds after the
/// trace was (re)started, capped at a maximum point count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    points: Vec<(f64, f64)>,
}

impl Trace {
    /// An empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample; ignored outside the window or past the cap.
    pub fn push(&mut self, t: f64, value: f64) {
        if t <= TRACE_SPAN + 1e-9 && self.points.len() < TRACE_CAP {
            self.points.push((t, value));
        }
    }

    /// Recorded `(t, value)` samples in insertion order.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Discard all samples.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
