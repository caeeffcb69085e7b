//! Damped pendulum models.
//!
//! # Governing Equation
//!
//! ```text
//! θ̇ = ω
//! ω̇ = −(g/L)·sin θ − γ·ω
//! ```
//!
//! Two damping conventions coexist, matching the two demonstration pages
//! they drive: [`Pendulum`] uses `γ = c/m`, while [`EnergyPendulum`] uses
//! `γ = c/(m·L)` so its dissipated power `c·(L·ω)²` closes the energy
//! budget exactly.

use serde::{Deserialize, Serialize};

use crate::config::PendulumConfig;
use crate::energy::{Dissipation, EnergyBudget};
use crate::engine::clock::FrameClock;
use crate::engine::integrator::{advance, advance_with};
use crate::support::{floored, Trace};

/// Largest release angle the grab interaction admits (rad).
pub const MAX_ANGLE: f64 = 170.0 * std::f64::consts::PI / 180.0;

/// Integration substep (s).
const SUBSTEP: f64 = 1.0 / 240.0;

/// Pendulum parameters, mirrored from the UI sliders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendulumParams {
    /// Rod length L (m).
    pub length: f64,
    /// Bob mass m (kg).
    pub mass: f64,
    /// Damping coefficient c.
    pub drag: f64,
    /// Surface gravity g (m/s²).
    pub gravity: f64,
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            length: 1.0,
            mass: 1.0,
            drag: 0.05,
            gravity: 9.8,
        }
    }
}

impl From<&PendulumConfig> for PendulumParams {
    fn from(config: &PendulumConfig) -> Self {
        Self {
            length: config.length,
            mass: config.mass,
            drag: config.drag,
            gravity: config.gravity,
        }
    }
}

/// Plain damped pendulum (no energy bookkeeping).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pendulum {
    /// Angle from the vertical (rad).
    pub theta: f64,
    /// Angular velocity (rad/s).
    pub omega: f64,
    clock: FrameClock,
}

impl Default for Pendulum {
    fn default() -> Self {
        Self::new()
    }
}

impl Pendulum {
    /// Create a pendulum released from the default 20° angle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            theta: 20.0_f64.to_radians(),
            omega: 0.0,
            clock: FrameClock::new(1.0 / 15.0),
        }
    }

    /// Place the bob at `theta` (clamped to ±170°) at rest.
    pub fn set_angle(&mut self, theta: f64) {
        self.theta = theta.clamp(-MAX_ANGLE, MAX_ANGLE);
        self.omega = 0.0;
    }

    /// Advance by one frame of (unclamped) elapsed time.
    pub fn step(&mut self, dt: f64, params: &PendulumParams) {
        let dt = self.clock.clamp(dt);
        let g_over_l = params.gravity / floored(params.length);
        let gamma = params.drag / floored(params.mass);
        let f = |y: &[f64; 2]| [y[1], -g_over_l * y[0].sin() - gamma * y[1]];

        let mut y = [self.theta, self.omega];
        advance(&mut y, dt, SUBSTEP, &f);
        self.theta = y[0];
        self.omega = y[1];
    }

    /// Return to the release angle at rest.
    pub fn reset(&mut self, theta0: f64) {
        self.set_angle(theta0);
    }
}

/// Damped pendulum with dissipation accounting and a θ(t) trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyPendulum {
    /// Angle from the vertical (rad).
    pub theta: f64,
    /// Angular velocity (rad/s).
    pub omega: f64,
    /// Time since the last release (s).
    pub time: f64,
    dissipation: Dissipation,
    trace: Trace,
    clock: FrameClock,
}

impl Default for EnergyPendulum {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyPendulum {
    /// Create a pendulum hanging at rest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            theta: 0.0,
            omega: 0.0,
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

    /// Recorded θ(t) samples since the last release.
    #[must_use]
    pub fn trace(&self) -> &[(f64, f64)] {
        self.trace.points()
    }

    /// Place the bob at `theta` (clamped to ±170°) at rest.
    ///
    /// Grabbing the bob restarts the measurement: the dissipation
    /// accumulator and the θ(t) trace are cleared.
    pub fn set_angle(&mut self, theta: f64) {
        self.theta = theta.clamp(-MAX_ANGLE, MAX_ANGLE);
        self.omega = 0.0;
        self.time = 0.0;
        self.dissipation.reset();
        self.trace.clear();
    }

    /// Advance by one frame of (unclamped) elapsed time.
    ///
    /// The dissipation accumulator is updated on the same substep grid as
    /// the state so that `U + K + D` stays constant.
    pub fn step(&mut self, dt: f64, params: &PendulumParams) {
        let dt = self.clock.clamp(dt);
        let length = floored(params.length);
        let g_over_l = params.gravity / length;
        let gamma = params.drag / (floored(params.mass) * length);
        let f = |y: &[f64; 2]| [y[1], -g_over_l * y[0].sin() - gamma * y[1]];

        let mut y = [self.theta, self.omega];
        advance_with(&mut y, dt, SUBSTEP, &f, |y, h| {
            let tangential = length * y[1];
            self.dissipation
                .accumulate(params.drag * tangential * tangential * h);
        });
        self.theta = y[0];
        self.omega = y[1];

        self.time += dt;
        self.trace.push(self.time, self.theta);
    }

    /// Instantaneous energy breakdown; U is zero at the bottom of the swing.
    #[must_use]
    pub fn energy_budget(&self, params: &PendulumParams) -> EnergyBudget {
        let tangential = params.length * self.omega;
        EnergyBudget {
            kinetic: 0.5 * params.mass * tangential * tangential,
            potential: params.mass * params.gravity * params.length * (1.0 - self.theta.cos()),
            dissipated: self.dissipation.value(),
        }
    }

    /// Return to rest at the bottom and clear the measurement.
    pub fn reset(&mut self) {
        self.set_angle(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undamped() -> PendulumParams {
        PendulumParams {
            drag: 0.0,
            ..PendulumParams::default()
        }
    }

    #[test]
    fn test_small_angle_period() {
        // T = 2π√(L/g) for small amplitudes.
        let params = undamped();
        let mut p = Pendulum::new();
        p.set_angle(0.05);

        let period = 2.0 * std::f64::consts::PI * (params.length / params.gravity).sqrt();
        let dt = 1.0 / 60.0;
        let steps = (period / dt).round() as usize;
        for _ in 0..steps {
            p.step(dt, &params);
        }

        assert!(
            (p.theta - 0.05).abs() < 0.002,
            "after one period theta = {}",
            p.theta
        );
    }

    #[test]
    fn test_undamped_energy_conserved() {
        let params = undamped();
        let mut p = EnergyPendulum::new();
        p.set_angle(0.8);
        let e0 = p.energy_budget(&params).total();

        for _ in 0..600 {
            p.step(1.0 / 60.0, &params);
        }

        let e1 = p.energy_budget(&params).total();
        assert!(
            ((e1 - e0) / e0).abs() < 1e-6,
            "energy drifted from {e0} to {e1}"
        );
    }

    #[test]
    fn test_damped_budget_closed() {
        // With drag, U + K + D should still track the initial energy.
        let params = PendulumParams {
            drag: 0.3,
            ..PendulumParams::default()
        };
        let mut p = EnergyPendulum::new();
        p.set_angle(1.0);
        let e0 = p.energy_budget(&params).total();

        for _ in 0..1200 {
            p.step(1.0 / 60.0, &params);
        }

        let budget = p.energy_budget(&params);
        assert!(budget.dissipated > 0.0);
        assert!(
            ((budget.total() - e0) / e0).abs() < 0.03,
            "budget total drifted from {e0} to {}",
            budget.total()
        );
    }

    #[test]
    fn test_damped_amplitude_decays() {
        let params = PendulumParams {
            drag: 0.5,
            ..PendulumParams::default()
        };
        let mut p = Pendulum::new();
        p.set_angle(1.0);

        for _ in 0..1800 {
            p.step(1.0 / 60.0, &params);
        }

        let energy = 0.5 * (params.length * p.omega).powi(2)
            + params.gravity * params.length * (1.0 - p.theta.cos());
        let initial = params.gravity * params.length * (1.0 - 1.0_f64.cos());
        assert!(energy < 0.5 * initial, "damping too weak: {energy}");
    }

    #[test]
    fn test_set_angle_clamps() {
        let mut p = EnergyPendulum::new();
        p.set_angle(3.1);
        assert!((p.theta - MAX_ANGLE).abs() < 1e-12);
        p.set_angle(-3.1);
        assert!((p.theta + MAX_ANGLE).abs() < 1e-12);
    }

    #[test]
    fn test_grab_clears_measurement() {
        let params = PendulumParams::default();
        let mut p = EnergyPendulum::new();
        p.set_angle(1.0);
        for _ in 0..120 {
            p.step(1.0 / 60.0, &params);
        }
        assert!(p.dissipated() > 0.0);
        assert!(!p.trace().is_empty());

        p.set_angle(0.5);
        assert_eq!(p.dissipated(), 0.0);
        assert!(p.trace().is_empty());
        assert_eq!(p.time, 0.0);
    }

    #[test]
    fn test_frame_time_clamped() {
        // A background-tab resume must not fast-forward the swing.
        let params = undamped();
        let mut a = EnergyPendulum::new();
        let mut b = EnergyPendulum::new();
        a.set_angle(0.8);
        b.set_angle(0.8);

        a.step(10.0, &params);
        b.step(1.0 / 20.0, &params);
        assert!((a.theta - b.theta).abs() < 1e-12);
    }

    #[test]
    fn test_params_from_config() {
        let config = PendulumConfig::default();
        let params = PendulumParams::from(&config);
        assert!((params.length - 1.0).abs() < f64::EPSILON);
        assert!((params.gravity - 9.8).abs() < f64::EPSILON);
    }
}
