//! Physical models, each advanced by the shared fixed-substep RK4 driver.
//!
//! Every model exposes the same shape of API: a `Params` struct mirroring
//! the UI sliders, a `step(dt, &params)` that clamps the frame time and
//! integrates, and accessors the rendering layer reads back for drawing.

pub mod car;
pub mod cart;
pub mod pendulum;
pub mod projectile;
pub mod spring;

pub use car::{Car, CarParams};
pub use cart::{AtwoodCart, CartParams};
pub use pendulum::{EnergyPendulum, Pendulum, PendulumParams};
pub use projectile::{ProjectileParams, ProjectileRange, Shot, Target};
pub use spring::{FrictionSpring, SpringOscillator, SpringParams};
