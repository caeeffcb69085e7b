//! Energy bookkeeping: dissipation accumulators and U|K|D budgets.
//!
//! Non-conservative forces (viscous drag, dry friction) remove mechanical
//! energy irreversibly. Each simulation keeps one running total of that
//! removed energy, updated on the same substep grid as the state
//! integration so that `kinetic + potential + dissipated` stays equal to
//! the initial mechanical energy.

use serde::{Deserialize, Serialize};

/// Floor applied to the budget total before computing bar fractions.
const TOTAL_FLOOR: f64 = 1e-12;

/// Running total of mechanical energy removed by non-conservative forces.
///
/// Monotonically non-decreasing except on explicit [`reset`](Self::reset)
/// (parameter change, drag-start, reset action).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dissipation(f64);

impl Dissipation {
    /// A zeroed accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated energy in joules. Always `>= 0`.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Add one substep's dissipated energy `power * h`.
    ///
    /// Negative or non-finite contributions are discarded; instantaneous
    /// dissipated power is non-negative by construction, so a negative value
    /// here would only ever come from a bug upstream and must not make the
    /// accumulator decrease.
    pub fn accumulate(&mut self, energy: f64) {
        if energy.is_finite() && energy > 0.0 {
            self.0 += energy;
        }
    }

    /// Zero the accumulator.
    pub fn reset(&mut self) {
        self.0 = 0.0;
    }
}

/// Instantaneous energy breakdown of a simulation.
///
/// The rendering layer draws this as a horizontal bar with three segments
/// (potential | kinetic | dissipated) whose widths are [`fractions`](Self::fractions)
/// of the running total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyBudget {
    /// Kinetic energy (J).
    pub kinetic: f64,
    /// Potential energy relative to the model's reference level (J).
    pub potential: f64,
    /// Energy dissipated so far (J).
    pub dissipated: f64,
}

impl EnergyBudget {
    /// Total mechanical energy including losses.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential + self.dissipated
    }

    /// `(potential, kinetic, dissipated)` as fractions of the total.
    ///
    /// The total is floored at a tiny positive value so the bar stays
    /// drawable when the system is at rest at the reference level.
    #[must_use]
    pub fn fractions(&self) -> (f64, f64, f64) {
        let total = self.total().max(TOTAL_FLOOR);
        (
            self.potential / total,
            self.kinetic / total,
            self.dissipated / total,
        )
    }
}
