//! Spring-mass oscillator models.
//!
//! # Governing Equation
//!
//! ```text
//! m·ẍ + c·ẋ + k·x + μ·m·g·sign(ẋ) = 0
//! ```
//!
//! [`SpringOscillator`] keeps only the viscous term. [`FrictionSpring`] adds
//! Coulomb friction with a stiction branch: near zero velocity, if the
//! spring force cannot exceed the static friction bound the mass is held at
//! rest instead of being dragged through a sign-flip chatter.

use serde::{Deserialize, Serialize};

use crate::config::SpringConfig;
use crate::energy::{Dissipation, EnergyBudget};
use crate::engine::clock::FrameClock;
use crate::engine::integrator::{advance, advance_with};
use crate::support::{floored, Trace};

/// Gravity used for the friction normal force (m/s²).
const G: f64 = 9.8;

/// Integration substep (s).
const SUBSTEP: f64 = 1.0 / 240.0;

/// Velocity band treated as "at rest" by the stiction branch (m/s).
const STICTION_EPS: f64 = 1e-4;

/// Largest displacement the grab interaction admits (m).
///
/// Half the free span between the wall stop and the end of the rail, at the
/// scene's 220 px/m scale.
pub const MAX_DISPLACEMENT: f64 = (300.0 - 10.0) * 0.5 / 220.0;

/// Displacement limit of the plain oscillator's slider (±50 cm).
pub const SLIDER_LIMIT: f64 = 0.5;

/// Spring parameters, mirrored from the UI sliders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpringParams {
    /// Load mass m (kg).
    pub mass: f64,
    /// Spring stiffness k (N/m).
    pub stiffness: f64,
    /// Viscous damping c (kg/s).
    pub damping: f64,
    /// Dry friction coefficient μ.
    pub friction: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 50.0,
            damping: 0.05,
            friction: 0.10,
        }
    }
}

impl From<&SpringConfig> for SpringParams {
    fn from(config: &SpringConfig) -> Self {
        Self {
            mass: config.mass,
            stiffness: config.stiffness,
            damping: config.damping,
            friction: config.friction,
        }
    }
}

/// Viscously damped spring-mass oscillator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringOscillator {
    /// Displacement from equilibrium (m).
    pub x: f64,
    /// Velocity (m/s).
    pub v: f64,
    clock: FrameClock,
}

impl Default for SpringOscillator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpringOscillator {
    /// Create an oscillator at equilibrium.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0.0,
            v: 0.0,
            clock: FrameClock::new(1.0 / 15.0),
        }
    }

    /// Place the mass at `x` (clamped to the slider range) at rest.
    pub fn set_displacement(&mut self, x: f64) {
        self.x = x.clamp(-SLIDER_LIMIT, SLIDER_LIMIT);
        self.v = 0.0;
    }

    /// Advance by one frame of (unclamped) elapsed time.
    pub fn step(&mut self, dt: f64, params: &SpringParams) {
        let dt = self.clock.clamp(dt);
        let mass = floored(params.mass);
        let k_over_m = params.stiffness / mass;
        let c_over_m = params.damping / mass;
        let f = |y: &[f64; 2]| [y[1], -k_over_m * y[0] - c_over_m * y[1]];

        let mut y = [self.x, self.v];
        advance(&mut y, dt, SUBSTEP, &f);
        self.x = y[0];
        self.v = y[1];
    }

    /// Return to equilibrium at rest.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.v = 0.0;
    }
}

/// Spring-mass oscillator with dry friction, stiction, and an x(t) trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrictionSpring {
    /// Displacement from equilibrium (m).
    pub x: f64,
    /// Velocity (m/s).
    pub v: f64,
    /// Time since the last release (s).
    pub time: f64,
    dissipation: Dissipation,
    trace: Trace,
    clock: FrameClock,
}

impl Default for FrictionSpring {
    fn default() -> Self {
        Self::new()
    }
}

impl FrictionSpring {
    /// Create an oscillator at equilibrium.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0.0,
            v: 0.0,
            time: 0.0,
            dissipation: Dissipation::new(),
            trace: Trace::new(),
            clock: FrameClock::new(1.0 / 20.0),
        }
    }

    /// Energy dissipated since the last release (J).
    #[must_use]
    pub fn dissipated(&self) -> f64 {
        self.dissipation.value()
    }

    /// Recorded x(t) samples since the last release.
    #[must_use]
    pub fn trace(&self) -> &[(f64, f64)] {
        self.trace.points()
    }

    /// Place the mass at `x` (clamped to the free span) at rest.
    ///
    /// Grabbing restarts the measurement: the dissipation accumulator and
    /// the x(t) trace are cleared.
    pub fn set_displacement(&mut self, x: f64) {
        self.x = x.clamp(-MAX_DISPLACEMENT, MAX_DISPLACEMENT);
        self.v = 0.0;
        self.time = 0.0;
        self.dissipation.reset();
        self.trace.clear();
    }

    /// Advance by one frame of (unclamped) elapsed time.
    ///
    /// After every substep the stiction hold is re-applied and the substep's
    /// losses `(c·v² + μ·m·g·|v|)·h` are added to the accumulator.
    pub fn step(&mut self, dt: f64, params: &SpringParams) {
        let dt = self.clock.clamp(dt);
        let mass = floored(params.mass);
        let break_force = params.friction * mass * G;
        let f = |y: &[f64; 2]| {
            let (x, v) = (y[0], y[1]);
            let spring = -params.stiffness * x;
            if v.abs() < STICTION_EPS && spring.abs() <= break_force {
                return [v, 0.0];
            }
            let viscous = -params.damping * v;
            let dry = -break_force * sign(v);
            [v, (spring + viscous + dry) / mass]
        };

        let mut y = [self.x, self.v];
        advance_with(&mut y, dt, SUBSTEP, &f, |y, h| {
            // Hold the mass once the spring can no longer break static friction.
            if y[1].abs() < STICTION_EPS && (params.stiffness * y[0]).abs() <= break_force {
                y[1] = 0.0;
            }
            let v = y[1];
            self.dissipation
                .accumulate((params.damping * v * v + break_force * v.abs()) * h);
        });
        self.x = y[0];
        self.v = y[1];

        self.time += dt;
        self.trace.push(self.time, self.x);
    }

    /// Instantaneous energy breakdown; U is the elastic energy ½kx².
    #[must_use]
    pub fn energy_budget(&self, params: &SpringParams) -> EnergyBudget {
        EnergyBudget {
            kinetic: 0.5 * params.mass * self.v * self.v,
            potential: 0.5 * params.stiffness * self.x * self.x,
            dissipated: self.dissipation.value(),
        }
    }

    /// Return to equilibrium and clear the measurement.
    pub fn reset(&mut self) {
        self.set_displacement(0.0);
    }
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
