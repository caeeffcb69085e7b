//! # fizika
//!
//! Numerical core for a family of interactive school-physics demonstrations:
//! projectile flight with drag, damped pendulums, spring oscillators with
//! viscous and dry friction, an Atwood-like cart on a track, and a car with
//! traction-limited drive.
//!
//! Each model owns a small continuous state vector advanced by a shared
//! fixed-substep RK4 driver, keeps an energy budget (kinetic + potential +
//! dissipated), and reports timing events (gate crossings, checkpoint hits,
//! rest detection). The rendering/UI layer is external: it passes a clamped
//! frame time and a parameter snapshot in, and reads state back for drawing.
//!
//! ## Example
//!
//! ```rust
//! use fizika::prelude::*;
//!
//! let mut pendulum = EnergyPendulum::new();
//! let params = PendulumParams { length: 1.0, mass: 1.0, drag: 0.05, gravity: 9.8 };
//! pendulum.set_angle(0.4);
//! pendulum.step(1.0 / 60.0, &params);
//! let budget = pendulum.energy_budget(&params);
//! assert!(budget.total() > 0.0);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Numerical code choices are intentional
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::needless_range_loop,
)]

pub mod config;
pub mod energy;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod support;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::energy::{Dissipation, EnergyBudget};
    pub use crate::engine::clock::{FrameClock, Stopwatch};
    pub use crate::engine::integrator::{advance, advance_with, rk4_step};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{SimError, SimResult};
    pub use crate::events::{CheckpointLatch, GateTimer, RestDetector};
    pub use crate::models::car::{Car, CarParams};
    pub use crate::models::cart::{AtwoodCart, CartParams};
    pub use crate::models::pendulum::{EnergyPendulum, Pendulum, PendulumParams};
    pub use crate::models::projectile::{ProjectileParams, ProjectileRange};
    pub use crate::models::spring::{FrictionSpring, SpringOscillator, SpringParams};
}

/// Re-export for public API
pub use error::{SimError, SimResult};
