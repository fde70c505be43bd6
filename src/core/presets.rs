//! The four built-in configurations.
//!
//! Masses, radii, distances and speeds are the reference values for the Sun,
//! Earth, Moon and International Space Station. Per-scene tick length and
//! sub-step counts are tuned per configuration and kept as data here.

use crate::bodies::BodyKind;
use crate::core::config::{
    BodyConfig, ClockConfig, PhysicsConfig, SceneConfig, SceneKind, SECONDS_PER_DAY,
};
use crate::math::Vector2;

pub const SUN_MASS: f64 = 1.989e30;
pub const SUN_RADIUS: f64 = 6.955e8;

pub const EARTH_MASS: f64 = 5.9746e24;
pub const EARTH_RADIUS: f64 = 6.371e6;
/// Closest approach of the Earth to the Sun
pub const EARTH_PERIHELION: f64 = 147_098_290e3;
pub const EARTH_ORBITAL_SPEED_AT_PERIHELION: f64 = 30_300.0;
pub const EARTH_ORBITAL_PERIOD: f64 = 365.0 * SECONDS_PER_DAY;

pub const MOON_MASS: f64 = 7.3477e22;
pub const MOON_RADIUS: f64 = 1737.1e3;
/// Closest approach of the Moon to the Earth
pub const MOON_PERIGEE: f64 = 391_370e3;
/// Moon speed relative to the Earth, directed along -x at perigee
pub const MOON_SPEED: f64 = -1.01e3;
pub const MOON_ORBITAL_PERIOD: f64 = 27.322 * SECONDS_PER_DAY;

pub const SPACE_STATION_MASS: f64 = 369_914.0;
pub const SPACE_STATION_RADIUS: f64 = 109.0;
/// Altitude above the Earth's surface
pub const SPACE_STATION_PERIGEE: f64 = 347_000.0;
pub const SPACE_STATION_SPEED: f64 = 7_706.0;
pub const SPACE_STATION_ORBITAL_PERIOD: f64 = 91.4 * 60.0;

fn body(
    kind: BodyKind,
    name: &str,
    mass: f64,
    radius: f64,
    position: Vector2,
    velocity: Vector2,
    orbital_period: f64,
) -> BodyConfig {
    BodyConfig {
        kind,
        name: name.to_string(),
        mass,
        radius,
        position,
        velocity,
        orbital_period,
        mass_settable: true,
    }
}

fn scene(
    kind: SceneKind,
    bodies: Vec<BodyConfig>,
    base_dt: f64,
    substeps: u32,
    zoom_scale: f64,
    center: Vector2,
) -> SceneConfig {
    let mut config = SceneConfig::new(kind, bodies);
    config.physics = PhysicsConfig {
        substeps,
        ..PhysicsConfig::default()
    };
    config.clock = ClockConfig {
        base_dt,
        ..ClockConfig::default()
    };
    config.default_zoom_scale = zoom_scale;
    config.zoom_center = center;
    config
}

fn sun(orbital_period: f64) -> BodyConfig {
    body(
        BodyKind::Star,
        "sun",
        SUN_MASS,
        SUN_RADIUS,
        Vector2::ZERO,
        Vector2::ZERO,
        orbital_period,
    )
}

/// Star with one planet at perihelion
pub fn sun_earth() -> SceneConfig {
    scene(
        SceneKind::SunEarth,
        vec![
            sun(EARTH_ORBITAL_PERIOD),
            body(
                BodyKind::Planet,
                "earth",
                EARTH_MASS,
                EARTH_RADIUS,
                Vector2::new(EARTH_PERIHELION, 0.0),
                Vector2::new(0.0, EARTH_ORBITAL_SPEED_AT_PERIHELION),
                EARTH_ORBITAL_PERIOD,
            ),
        ],
        SECONDS_PER_DAY,
        10,
        1.25,
        Vector2::ZERO,
    )
}

/// Star, planet and a moon riding along with the planet
pub fn sun_earth_moon() -> SceneConfig {
    scene(
        SceneKind::SunEarthMoon,
        vec![
            sun(EARTH_ORBITAL_PERIOD),
            body(
                BodyKind::Planet,
                "earth",
                EARTH_MASS,
                EARTH_RADIUS,
                Vector2::new(EARTH_PERIHELION, 0.0),
                Vector2::new(0.0, EARTH_ORBITAL_SPEED_AT_PERIHELION),
                EARTH_ORBITAL_PERIOD,
            ),
            body(
                BodyKind::Moon,
                "moon",
                MOON_MASS,
                MOON_RADIUS,
                Vector2::new(EARTH_PERIHELION, MOON_PERIGEE),
                Vector2::new(MOON_SPEED, EARTH_ORBITAL_SPEED_AT_PERIHELION),
                EARTH_ORBITAL_PERIOD,
            ),
        ],
        SECONDS_PER_DAY,
        40,
        1.25,
        Vector2::ZERO,
    )
}

/// Planet and moon; the planet recoils so the pair has no net momentum
pub fn earth_moon() -> SceneConfig {
    let earth_recoil = -MOON_SPEED * MOON_MASS / EARTH_MASS;
    scene(
        SceneKind::EarthMoon,
        vec![
            body(
                BodyKind::Planet,
                "earth",
                EARTH_MASS,
                EARTH_RADIUS,
                Vector2::new(EARTH_PERIHELION, 0.0),
                Vector2::new(earth_recoil, 0.0),
                MOON_ORBITAL_PERIOD,
            ),
            body(
                BodyKind::Moon,
                "moon",
                MOON_MASS,
                MOON_RADIUS,
                Vector2::new(EARTH_PERIHELION, MOON_PERIGEE),
                Vector2::new(MOON_SPEED, 0.0),
                MOON_ORBITAL_PERIOD,
            ),
        ],
        SECONDS_PER_DAY / 3.0,
        10,
        400.0,
        Vector2::new(EARTH_PERIHELION, 0.0),
    )
}

/// Planet with a satellite in low orbit
pub fn earth_space_station() -> SceneConfig {
    scene(
        SceneKind::EarthSpaceStation,
        vec![
            body(
                BodyKind::Planet,
                "earth",
                EARTH_MASS,
                EARTH_RADIUS,
                Vector2::ZERO,
                Vector2::ZERO,
                SPACE_STATION_ORBITAL_PERIOD,
            ),
            body(
                BodyKind::Satellite,
                "space station",
                SPACE_STATION_MASS,
                SPACE_STATION_RADIUS,
                Vector2::new(SPACE_STATION_PERIGEE + EARTH_RADIUS + SPACE_STATION_RADIUS, 0.0),
                Vector2::new(0.0, SPACE_STATION_SPEED),
                SPACE_STATION_ORBITAL_PERIOD,
            ),
        ],
        SECONDS_PER_DAY * 9e-4,
        40,
        21_600.0,
        Vector2::ZERO,
    )
}

/// All presets in the order they are offered to the user
pub fn all() -> Vec<SceneConfig> {
    vec![sun_earth(), sun_earth_moon(), earth_moon(), earth_space_station()]
}
