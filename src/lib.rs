pub mod math;
pub mod core;
pub mod bodies;
pub mod forces;
pub mod integration;

/// Re-export common types for easier usage
pub use crate::core::{
    BodyHandle, GravityAndOrbitsModel, PhysicsConfig, PhysicsEngine, Scene, SceneConfig, SceneKind,
    TimeSpeed,
};
pub use crate::bodies::{Body, BodyKind, DragTarget};
pub use crate::math::{ModelViewTransform, Vector2};

/// Error types for the simulation
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Invalid state: {0}")]
        InvalidState(String),
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
