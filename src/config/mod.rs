//! Configuration system with YAML schema and validation.
//!
//! Holds per-model parameter defaults together with the closed ranges the
//! UI sliders enforce. Loading goes through serde, then `validator` range
//! checks, then semantic checks that span more than one field.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{SimError, SimResult};

/// Top-level simulation configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Simulation metadata.
    #[serde(default)]
    pub simulation: SimulationMeta,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Per-model parameter defaults and slider bounds.
    #[validate(nested)]
    #[serde(default)]
    pub models: ModelsConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl SimConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::default()
    }

    /// Validate constraints that span more than one field.
    fn validate_semantic(&self) -> SimResult<()> {
        let cart = &self.models.cart;
        if cart.gate_a > cart.gate_b {
            return Err(SimError::config(format!(
                "Cart gate A ({}) must not be past gate B ({})",
                cart.gate_a, cart.gate_b
            )));
        }

        let pendulum = &self.models.pendulum;
        if pendulum.release_angle_deg.abs() > 170.0 {
            return Err(SimError::config(
                "Pendulum release angle must stay within ±170°",
            ));
        }

        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            simulation: SimulationMeta::default(),
            reproducibility: ReproducibilityConfig::default(),
            models: ModelsConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SimConfigBuilder {
    seed: Option<u64>,
    gravity: Option<f64>,
}

impl SimConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the surface gravity used by the projectile and pendulum models.
    #[must_use]
    pub const fn gravity(mut self, g: f64) -> Self {
        self.gravity = Some(g);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SimConfig {
        let mut config = SimConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }

        if let Some(g) = self.gravity {
            config.models.projectile.gravity = g;
            config.models.pendulum.gravity = g;
        }

        config
    }
}

/// Simulation metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationMeta {
    /// Simulation name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Reproducibility settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproducibilityConfig {
    /// Master seed for all RNG (target respawn placement).
    pub seed: u64,
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Per-model configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ModelsConfig {
    /// Projectile range configuration.
    #[validate(nested)]
    #[serde(default)]
    pub projectile: ProjectileConfig,
    /// Pendulum configuration.
    #[validate(nested)]
    #[serde(default)]
    pub pendulum: PendulumConfig,
    /// Spring oscillator configuration.
    #[validate(nested)]
    #[serde(default)]
    pub spring: SpringConfig,
    /// Track cart configuration.
    #[validate(nested)]
    #[serde(default)]
    pub cart: CartConfig,
    /// Car motion configuration.
    #[validate(nested)]
    #[serde(default)]
    pub car: CarConfig,
}

/// Projectile range configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectileConfig {
    /// Surface gravity (m/s², slider 0–10).
    #[validate(range(min = 0.0, max = 10.0))]
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    /// Linear air drag coefficient (1/s, slider 0–1).
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_air_drag")]
    pub air_drag: f64,
}

const fn default_gravity() -> f64 {
    9.8
}

const fn default_air_drag() -> f64 {
    0.05
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            air_drag: default_air_drag(),
        }
    }
}

/// Pendulum configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PendulumConfig {
    /// Bob mass (kg, slider 0.1–5).
    #[validate(range(min = 0.1, max = 5.0))]
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Rod length (m, slider 0.2–4).
    #[validate(range(min = 0.2, max = 4.0))]
    #[serde(default = "default_length")]
    pub length: f64,
    /// Damping coefficient (slider 0–1).
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_air_drag")]
    pub drag: f64,
    /// Surface gravity (m/s², slider 1–40).
    #[validate(range(min = 1.0, max = 40.0))]
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    /// Release angle (degrees from vertical).
    #[validate(range(min = -170.0, max = 170.0))]
    #[serde(default = "default_release_angle")]
    pub release_angle_deg: f64,
}

const fn default_mass() -> f64 {
    1.0
}

const fn default_length() -> f64 {
    1.0
}

const fn default_release_angle() -> f64 {
    20.0
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            mass: default_mass(),
            length: default_length(),
            drag: default_air_drag(),
            gravity: default_gravity(),
            release_angle_deg: default_release_angle(),
        }
    }
}

/// Spring oscillator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpringConfig {
    /// Load mass (kg, slider 0.1–5).
    #[validate(range(min = 0.1, max = 5.0))]
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Spring stiffness (N/m, slider 5–200).
    #[validate(range(min = 5.0, max = 200.0))]
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Viscous damping coefficient (kg/s, slider 0–2).
    #[validate(range(min = 0.0, max = 2.0))]
    #[serde(default = "default_air_drag")]
    pub damping: f64,
    /// Dry friction coefficient (slider 0–1).
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_friction")]
    pub friction: f64,
}

const fn default_stiffness() -> f64 {
    50.0
}

const fn default_friction() -> f64 {
    0.10
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: default_mass(),
            stiffness: default_stiffness(),
            damping: default_air_drag(),
            friction: default_friction(),
        }
    }
}

/// Track cart configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartConfig {
    /// Cart mass (kg, slider 0.5–5).
    #[validate(range(min = 0.5, max = 5.0))]
    #[serde(default = "default_cart_mass")]
    pub cart_mass: f64,
    /// Hanging mass driving the cart (kg, slider 0.05–2).
    #[validate(range(min = 0.05, max = 2.0))]
    #[serde(default = "default_hanging_mass")]
    pub hanging_mass: f64,
    /// Linear drag coefficient (kg/s, slider 0–0.6).
    #[validate(range(min = 0.0, max = 0.6))]
    #[serde(default = "default_air_drag")]
    pub drag: f64,
    /// First optical gate position (m, within the timed span).
    #[validate(range(min = 0.0, max = 2.3))]
    #[serde(default = "default_gate_a")]
    pub gate_a: f64,
    /// Second optical gate position (m).
    #[validate(range(min = 0.0, max = 2.3))]
    #[serde(default = "default_gate_b")]
    pub gate_b: f64,
}

const fn default_cart_mass() -> f64 {
    1.5
}

const fn default_hanging_mass() -> f64 {
    0.2
}

const fn default_gate_a() -> f64 {
    0.000_001
}

const fn default_gate_b() -> f64 {
    1.6
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            cart_mass: default_cart_mass(),
            hanging_mass: default_hanging_mass(),
            drag: default_air_drag(),
            gate_a: default_gate_a(),
            gate_b: default_gate_b(),
        }
    }
}

/// Car motion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CarConfig {
    /// Throttle in percent (slider 0–120; slip begins above 90).
    #[validate(range(min = 0.0, max = 120.0))]
    #[serde(default = "default_throttle")]
    pub throttle_percent: f64,
    /// Vehicle mass (kg, slider 600–3000).
    #[validate(range(min = 600.0, max = 3000.0))]
    #[serde(default = "default_car_mass")]
    pub mass: f64,
    /// Quadratic air drag coefficient (kg/m, slider 0–2).
    #[validate(range(min = 0.0, max = 2.0))]
    #[serde(default)]
    pub air_drag: f64,
    /// Tyre grip coefficient (slider 0–1).
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_grip")]
    pub grip: f64,
}

const fn default_throttle() -> f64 {
    60.0
}

const fn default_car_mass() -> f64 {
    1200.0
}

const fn default_grip() -> f64 {
    0.8
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            throttle_percent: default_throttle(),
            mass: default_car_mass(),
            air_drag: 0.0,
            grip: default_grip(),
        }
    }
}
