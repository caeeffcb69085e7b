//! Shared simulation machinery.
//!
//! - Fixed-substep RK4 driver, generic over state dimensionality
//! - Frame-time clamping and stopwatch bookkeeping
//! - Deterministic RNG (PCG) for reproducible entity placement

pub mod clock;
pub mod integrator;
pub mod rng;

pub use clock::{FrameClock, Stopwatch};
pub use integrator::{advance, advance_with, rk4_step};
pub use rng::SimRng;
