use crate::bodies::BodyKind;
use crate::error::PhysicsError;
use crate::math::{Vector2, DEFAULT_ZOOM_LEVEL};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Newtonian constant of gravitation in m³·kg⁻¹·s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67384e-11;

/// Seconds in one day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Wall-clock seconds between clock ticks
pub const DEFAULT_TICK_INTERVAL: f64 = 1.0 / 25.0;

/// Numerical integration scheme used for each sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum IntegratorType {
    /// Kick then drift: velocity from acceleration, position from the new velocity
    #[default]
    SymplecticEuler,

    /// Velocity Verlet, two force evaluations per sub-step
    VelocityVerlet,
}

/// Configuration parameters for the physics engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PhysicsConfig {
    /// Gravitational constant applied to every pair
    pub gravitational_constant: f64,

    /// Number of sub-steps each engine step is divided into
    pub substeps: u32,

    /// Integration scheme used for each sub-step
    pub integrator: IntegratorType,

    /// Separations below this are treated as collisions instead of producing a force
    pub min_separation: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            substeps: 1,
            integrator: IntegratorType::default(),
            min_separation: 1.0e-3,
        }
    }
}

impl PhysicsConfig {
    /// Checks that the configuration can drive an engine
    pub fn validate(&self) -> Result<()> {
        if self.substeps == 0 {
            return Err(PhysicsError::InvalidParameter("substeps must be at least 1".to_string()));
        }
        if !(self.gravitational_constant.is_finite() && self.gravitational_constant >= 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "gravitational constant must be finite and non-negative, got {}",
                self.gravitational_constant
            )));
        }
        if !(self.min_separation.is_finite() && self.min_separation >= 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "min separation must be finite and non-negative, got {}",
                self.min_separation
            )));
        }
        Ok(())
    }
}

/// Configuration parameters for a scene clock
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Simulated seconds advanced by one tick
    pub base_dt: f64,

    /// Wall-clock seconds (after speed scaling) per tick
    pub tick_interval: f64,

    /// Upper bound on ticks run for a single wall-clock step
    pub max_ticks_per_step: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            base_dt: SECONDS_PER_DAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            max_ticks_per_step: 4,
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_dt.is_finite() && self.base_dt > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "base dt must be positive, got {}",
                self.base_dt
            )));
        }
        if !(self.tick_interval.is_finite() && self.tick_interval > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "tick interval must be positive, got {}",
                self.tick_interval
            )));
        }
        if self.max_ticks_per_step == 0 {
            return Err(PhysicsError::InvalidParameter(
                "max ticks per step must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initial state of one body in a preset
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BodyConfig {
    pub kind: BodyKind,
    pub name: String,
    /// Mass in kilograms
    pub mass: f64,
    /// Physical radius in meters
    pub radius: f64,
    pub position: Vector2,
    pub velocity: Vector2,
    /// Period used to size the trace so it shows about one and a half orbits
    pub orbital_period: f64,
    /// Whether the user may change the mass
    pub mass_settable: bool,
}

/// Which preset a scene represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SceneKind {
    SunEarth,
    SunEarthMoon,
    EarthMoon,
    EarthSpaceStation,
}

/// Everything needed to construct a scene
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SceneConfig {
    pub kind: SceneKind,
    pub bodies: Vec<BodyConfig>,
    pub physics: PhysicsConfig,
    pub clock: ClockConfig,
    /// Zoom scale giving the default framing at the default zoom level
    pub default_zoom_scale: f64,
    /// Model point shown at the center of the stage
    pub zoom_center: Vector2,
    pub default_zoom_level: i32,
}

impl SceneConfig {
    /// Creates a config with default physics, clock and framing
    pub fn new(kind: SceneKind, bodies: Vec<BodyConfig>) -> Self {
        Self {
            kind,
            bodies,
            physics: PhysicsConfig::default(),
            clock: ClockConfig::default(),
            default_zoom_scale: 1.0,
            zoom_center: Vector2::ZERO,
            default_zoom_level: DEFAULT_ZOOM_LEVEL,
        }
    }
}
