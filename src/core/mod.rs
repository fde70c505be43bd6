pub mod config;
pub mod storage;
pub mod events;
pub mod property;
pub mod clock;
pub mod engine;
pub mod scene;
pub mod presets;
pub mod model;

pub use self::config::{
    BodyConfig, ClockConfig, IntegratorType, PhysicsConfig, SceneConfig, SceneKind,
    GRAVITATIONAL_CONSTANT, SECONDS_PER_DAY,
};
pub use self::storage::BodyStorage;
pub use self::events::{BodyEvent, BodyEventType, CollisionEvent, EventQueue};
pub use self::property::{ListenerId, Observer, Property, RewindableProperty};
pub use self::clock::{Clock, Tickable, TimeSpeed};
pub use self::engine::{PhysicsEngine, UserEdits};
pub use self::scene::Scene;
pub use self::model::{DisplayOptions, GravityAndOrbitsModel};

/// A unique identifier for a body within one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Position of the body in insertion order
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
