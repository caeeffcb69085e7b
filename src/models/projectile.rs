//! Projectile range: a cannon firing drag-affected balls at a random target.
//!
//! # Governing Equations
//!
//! ```text
//! ẋ = vx          v̇x = −air·vx
//! ẏ = vy          v̇y = g − air·vy
//! ```
//!
//! The scene lives in screen coordinates: +y points down and gravity is
//! positive. Ground bounces damp both velocity components by `e = √0.9`,
//! so each peak carries 90 % of the previous peak's height.

use serde::{Deserialize, Serialize};

use crate::config::ProjectileConfig;
use crate::engine::clock::FrameClock;
use crate::engine::integrator::advance;
use crate::engine::rng::SimRng;
use crate::events::RestDetector;

/// Scene width (scene units).
pub const WORLD_W: f64 = 960.0;

/// Scene height (scene units).
pub const WORLD_H: f64 = 480.0;

/// Ball radius.
pub const BALL_RADIUS: f64 = 9.0;

/// Target radius.
pub const TARGET_RADIUS: f64 = 2.0 * BALL_RADIUS;

/// Cannon pivot x position.
pub const LAUNCHER_X: f64 = 120.0;

/// Cannon wheel radius; the pivot sits this far above the ground line.
pub const WHEEL_RADIUS: f64 = 24.0;

/// Barrel length from pivot to muzzle.
pub const MUZZLE_LENGTH: f64 = 63.0;

/// Launch speed cap.
pub const MAX_LAUNCH_SPEED: f64 = 800.0;

/// Drag distance to launch speed conversion.
const AIM_DIVISOR: f64 = 6.0;

/// Trail length cap; oldest points are trimmed.
const TRAIL_CAP: usize = 300;

/// Speed below which a grounded ball counts as resting.
const REST_SPEED: f64 = 12.0;

/// Vertical band above the ground line that counts as "near ground".
const REST_BAND: f64 = 1.5;

/// How long the rest condition must hold before removal (s).
const REST_HOLD: f64 = 0.35;

/// Horizontal margin past the scene edges before removal.
const OFFSCREEN_MARGIN: f64 = 10.0;

/// Margin the target keeps from scene edges.
const SPAWN_MARGIN: f64 = 20.0;

/// Minimum distance from the cannon pivot to a fresh target.
const MIN_TARGET_DIST: f64 = 300.0;

/// Placement attempts before the deterministic fallback.
const SPAWN_TRIES: usize = 8;

/// Integration substep (s).
const SUBSTEP: f64 = 1.0 / 240.0;

/// The ground line's y coordinate.
#[must_use]
pub fn ground_y() -> f64 {
    (WORLD_H * 0.92).round()
}

/// Projectile parameters, mirrored from the UI sliders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileParams {
    /// Gravity g, +y down (scene units/s²).
    pub gravity: f64,
    /// Linear air drag coefficient (1/s).
    pub air_drag: f64,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            air_drag: 0.05,
        }
    }
}

impl From<&ProjectileConfig> for ProjectileParams {
    fn from(config: &ProjectileConfig) -> Self {
        Self {
            gravity: config.gravity,
            air_drag: config.air_drag,
        }
    }
}

/// One ball in flight, with its fading trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    /// Position.
    pub x: f64,
    /// Position, +y down.
    pub y: f64,
    /// Velocity.
    pub vx: f64,
    /// Velocity, +y down.
    pub vy: f64,
    /// Whether this ball has struck the target.
    pub hit: bool,
    trail: Vec<(f64, f64)>,
    rest: RestDetector,
}

impl Shot {
    fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            hit: false,
            trail: vec![(x, y)],
            rest: RestDetector::new(REST_HOLD),
        }
    }

    /// Recent positions, oldest first.
    #[must_use]
    pub fn trail(&self) -> &[(f64, f64)] {
        &self.trail
    }

    /// Speed magnitude.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

/// The target disc.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    /// Center position.
    pub x: f64,
    /// Center position, +y down.
    pub y: f64,
    /// Radius.
    pub radius: f64,
}

/// The full range: cannon, live shots, and the current target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileRange {
    shots: Vec<Shot>,
    target: Target,
    angle: f64,
    rng: SimRng,
    clock: FrameClock,
}

impl ProjectileRange {
    /// Create a range with a seeded target placement.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let target = spawn_target(&mut rng);
        Self {
            shots: Vec::new(),
            target,
            angle: -std::f64::consts::FRAC_PI_4,
            rng,
            clock: FrameClock::new(1.0 / 30.0),
        }
    }

    /// Live shots, oldest first.
    #[must_use]
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// The current target.
    #[must_use]
    pub const fn target(&self) -> Target {
        self.target
    }

    /// Current aim angle (rad, screen convention).
    #[must_use]
    pub const fn aim_angle(&self) -> f64 {
        self.angle
    }

    /// Cannon pivot position.
    #[must_use]
    pub fn pivot(&self) -> (f64, f64) {
        (LAUNCHER_X, ground_y() - WHEEL_RADIUS)
    }

    /// Muzzle position at the current aim angle.
    #[must_use]
    pub fn muzzle(&self) -> (f64, f64) {
        let (px, py) = self.pivot();
        (
            px + self.angle.cos() * MUZZLE_LENGTH,
            py + self.angle.sin() * MUZZLE_LENGTH,
        )
    }

    /// Point the barrel at a scene position.
    pub fn aim_at(&mut self, x: f64, y: f64) {
        let (px, py) = self.pivot();
        self.angle = (y - py).atan2(x - px);
    }

    /// Aim at a scene position and fire.
    ///
    /// Launch speed is proportional to the distance from the pivot to the
    /// aim point, capped at [`MAX_LAUNCH_SPEED`].
    pub fn fire_at(&mut self, x: f64, y: f64) {
        self.aim_at(x, y);
        let (px, py) = self.pivot();
        let dist = (x - px).hypot(y - py);
        let v0 = (dist / AIM_DIVISOR).min(MAX_LAUNCH_SPEED);
        let (mx, my) = self.muzzle();
        self.launch(mx, my, v0 * self.angle.cos(), v0 * self.angle.sin());
    }

    /// Spawn a ball directly with the given state.
    pub fn launch(&mut self, x: f64, y: f64, vx: f64, vy: f64) {
        self.shots.push(Shot::new(x, y, vx, vy));
    }

    /// Advance all live shots by one frame of (unclamped) elapsed time.
    pub fn step(&mut self, dt: f64, params: &ProjectileParams) {
        let dt = self.clock.clamp(dt);
        let floor = ground_y() - BALL_RADIUS;
        let restitution = 0.9_f64.sqrt();
        let f = |y: &[f64; 4]| {
            [
                y[2],
                y[3],
                -params.air_drag * y[2],
                params.gravity - params.air_drag * y[3],
            ]
        };

        for shot in &mut self.shots {
            let mut y = [shot.x, shot.y, shot.vx, shot.vy];
            advance(&mut y, dt, SUBSTEP, &f);
            shot.x = y[0];
            shot.y = y[1];
            shot.vx = y[2];
            shot.vy = y[3];

            shot.trail.push((shot.x, shot.y));
            if shot.trail.len() > TRAIL_CAP {
                let excess = shot.trail.len() - TRAIL_CAP;
                shot.trail.drain(..excess);
            }

            // Ground bounce: reflect and damp once the descending ball
            // sinks past the ground line.
            if shot.y > floor && shot.vy > 0.0 {
                shot.y = floor;
                shot.vy = -shot.vy * restitution;
                shot.vx *= restitution;
            }

            let d = (shot.x - self.target.x).hypot(shot.y - self.target.y);
            if d <= self.target.radius {
                shot.hit = true;
                self.target = spawn_target(&mut self.rng);
            }

            let near_ground = shot.y >= floor - REST_BAND;
            shot.rest.update(shot.speed() < REST_SPEED && near_ground, dt);
        }

        self.shots.retain(|shot| {
            let offscreen = shot.x < -OFFSCREEN_MARGIN || shot.x > WORLD_W + OFFSCREEN_MARGIN;
            let rested = shot.rest.is_elapsed();
            !(shot.hit || offscreen || rested)
        });
    }

    /// Remove every live shot.
    pub fn reset(&mut self) {
        self.shots.clear();
    }
}

/// Place a fresh target in the right-hand part of the scene.
///
/// Uniform within the valid region; positions closer than
/// [`MIN_TARGET_DIST`] to the cannon pivot are retried a bounded number of
/// times, then the last candidate is pushed away from the pivot and clamped
/// back into the region.
fn spawn_target(rng: &mut SimRng) -> Target {
    let x_min = (WORLD_W * 0.55).max(SPAWN_MARGIN + TARGET_RADIUS);
    let x_max = WORLD_W - SPAWN_MARGIN - TARGET_RADIUS;
    let y_min = SPAWN_MARGIN + TARGET_RADIUS;
    let y_max = ground_y() - SPAWN_MARGIN - TARGET_RADIUS;
    let (px, py) = (LAUNCHER_X, ground_y() - WHEEL_RADIUS);

    let mut x = 0.0;
    let mut y = 0.0;
    for _ in 0..SPAWN_TRIES {
        x = rng.gen_range_f64(x_min, x_max);
        y = rng.gen_range_f64(y_min, y_max);
        if (x - px).hypot(y - py) >= MIN_TARGET_DIST {
            return Target {
                x,
                y,
                radius: TARGET_RADIUS,
            };
        }
    }

    // Push the last candidate out along the ray from the pivot.
    let d = (x - px).hypot(y - py).max(1e-9);
    Target {
        x: (px + (x - px) / d * MIN_TARGET_DIST).clamp(x_min, x_max),
        y: (py + (y - py) / d * MIN_TARGET_DIST).clamp(y_min, y_max),
        radius: TARGET_RADIUS,
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

#[cfg(feature = "wasm")]
mod wasm {
    use super::{ProjectileParams, ProjectileRange};
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct WasmProjectileRange {
        inner: ProjectileRange,
        params: ProjectileParams,
    }

    #[wasm_bindgen]
    impl WasmProjectileRange {
        #[wasm_bindgen(constructor)]
        #[must_use]
        pub fn new(seed: u64) -> Self {
            Self {
                inner: ProjectileRange::new(seed),
                params: ProjectileParams::default(),
            }
        }

        pub fn set_params(&mut self, gravity: f64, air_drag: f64) {
            self.params.gravity = gravity;
            self.params.air_drag = air_drag;
        }

        pub fn aim_at(&mut self, x: f64, y: f64) {
            self.inner.aim_at(x, y);
        }

        pub fn fire_at(&mut self, x: f64, y: f64) {
            self.inner.fire_at(x, y);
        }

        pub fn step(&mut self, dt: f64) {
            self.inner.step(dt, &self.params);
        }

        #[must_use]
        pub fn shot_count(&self) -> usize {
            self.inner.shots().len()
        }

        #[must_use]
        pub fn target_x(&self) -> f64 {
            self.inner.target().x
        }

        #[must_use]
        pub fn target_y(&self) -> f64 {
            self.inner.target().y
        }

        #[must_use]
        pub fn get_state_json(&self) -> String {
            serde_json::to_string(&self.inner).unwrap_or_default()
        }

        pub fn reset(&mut self) {
            self.inner.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vacuum() -> ProjectileParams {
        ProjectileParams {
            gravity: 9.8,
            air_drag: 0.0,
        }
    }

    #[test]
    fn test_same_seed_same_target() {
        let a = ProjectileRange::new(42);
        let b = ProjectileRange::new(42);
        assert_eq!(a.target().x, b.target().x);
        assert_eq!(a.target().y, b.target().y);
    }

    #[test]
    fn test_target_inside_valid_region() {
        for seed in 0..50 {
            let range = ProjectileRange::new(seed);
            let t = range.target();
            assert!(t.x >= WORLD_W * 0.55);
            assert!(t.x <= WORLD_W - SPAWN_MARGIN - TARGET_RADIUS);
            assert!(t.y >= SPAWN_MARGIN + TARGET_RADIUS);
            assert!(t.y <= ground_y() - SPAWN_MARGIN - TARGET_RADIUS);
            let (px, py) = range.pivot();
            assert!((t.x - px).hypot(t.y - py) >= MIN_TARGET_DIST);
        }
    }

    #[test]
    fn test_launch_speed_capped() {
        let mut range = ProjectileRange::new(1);
        // Aim point ~6000 units away: uncapped speed would be ~1000.
        range.fire_at(LAUNCHER_X + 6000.0, ground_y() - WHEEL_RADIUS);
        let shot = &range.shots()[0];
        assert!((shot.speed() - MAX_LAUNCH_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_shot_starts_at_muzzle() {
        let mut range = ProjectileRange::new(1);
        range.fire_at(LAUNCHER_X + 120.0, ground_y() - WHEEL_RADIUS - 120.0);
        let (mx, my) = range.muzzle();
        let shot = &range.shots()[0];
        assert!((shot.x - mx).abs() < 1e-9);
        assert!((shot.y - my).abs() < 1e-9);
    }

    #[test]
    fn test_vacuum_flight_is_parabolic() {
        let params = vacuum();
        let mut range = ProjectileRange::new(1);
        range.launch(200.0, 100.0, 50.0, 0.0);

        let mut t = 0.0;
        for _ in 0..60 {
            range.step(1.0 / 60.0, &params);
            t += 1.0 / 60.0;
        }

        let shot = &range.shots()[0];
        assert!((shot.x - (200.0 + 50.0 * t)).abs() < 1e-9);
        assert!((shot.y - (100.0 + 0.5 * params.gravity * t * t)).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_peaks_decay_by_restitution_squared() {
        let params = vacuum();
        let mut range = ProjectileRange::new(1);
        range.launch(480.0, 150.0, 0.0, 0.0);

        let mut peaks = Vec::new();
        let mut prev_vy = 0.0;
        for _ in 0..20_000 {
            range.step(1.0 / 240.0, &params);
            if range.shots().is_empty() {
                break;
            }
            let shot = &range.shots()[0];
            // Apex: vertical velocity flips from upward (−) to downward (+).
            if prev_vy < 0.0 && shot.vy >= 0.0 {
                peaks.push(ground_y() - BALL_RADIUS - shot.y);
            }
            prev_vy = shot.vy;
        }

        assert!(peaks.len() >= 3, "only {} peaks observed", peaks.len());
        for pair in peaks.windows(2) {
            let ratio = pair[1] / pair[0];
            assert!(
                (ratio - 0.9).abs() < 0.02,
                "peak ratio {ratio} (peaks {pair:?})"
            );
        }
    }

    #[test]
    fn test_resting_ball_removed() {
        let params = ProjectileParams {
            gravity: 9.8,
            air_drag: 0.5,
        };
        let mut range = ProjectileRange::new(1);
        range.launch(480.0, ground_y() - BALL_RADIUS, 5.0, 0.0);

        for _ in 0..120 {
            range.step(1.0 / 60.0, &params);
        }
        assert!(range.shots().is_empty(), "slow grounded ball not removed");
    }

    #[test]
    fn test_offscreen_ball_removed() {
        let params = vacuum();
        let mut range = ProjectileRange::new(1);
        range.launch(WORLD_W - 20.0, 100.0, 600.0, 0.0);

        for _ in 0..30 {
            range.step(1.0 / 30.0, &params);
        }
        assert!(range.shots().is_empty());
    }

    #[test]
    fn test_hit_respawns_target_and_removes_shot() {
        let params = vacuum();
        let mut range = ProjectileRange::new(1);
        let before = range.target();
        // Drop a ball straight onto the target.
        range.launch(before.x, before.y - 40.0, 0.0, 0.0);

        for _ in 0..300 {
            range.step(1.0 / 60.0, &params);
            if range.shots().is_empty() {
                break;
            }
        }

        assert!(range.shots().is_empty(), "hit shot not removed");
        let after = range.target();
        assert!(
            (after.x - before.x).abs() > f64::EPSILON || (after.y - before.y).abs() > f64::EPSILON,
            "target did not move"
        );
    }

    #[test]
    fn test_trail_capped() {
        let params = ProjectileParams {
            gravity: 0.0,
            air_drag: 0.0,
        };
        let mut range = ProjectileRange::new(1);
        // Slow drift keeps the ball on screen for the whole run.
        range.launch(100.0, 100.0, 10.0, 0.0);

        for _ in 0..400 {
            range.step(1.0 / 60.0, &params);
        }
        assert_eq!(range.shots()[0].trail().len(), 300);
    }

    #[test]
    fn test_reset_clears_shots() {
        let mut range = ProjectileRange::new(1);
        range.fire_at(400.0, 200.0);
        range.fire_at(500.0, 150.0);
        assert_eq!(range.shots().len(), 2);
        range.reset();
        assert!(range.shots().is_empty());
    }
}
