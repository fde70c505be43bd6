use crate::core::config::IntegratorType;
use crate::forces::AccelerationField;
use crate::integration::{SymplecticEulerIntegrator, VelocityVerletIntegrator};
use crate::math::Vector2;

/// Snapshot of one body as seen by the integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Acceleration from the most recent force evaluation
    pub acceleration: Vector2,
    pub mass: f64,
    pub radius: f64,
    /// False once the body has collided; inactive states exert and feel no force
    pub active: bool,
    /// Held in place by the user: still attracts others, but is not moved
    pub pinned: bool,
}

impl BodyState {
    /// True if the integrator should move this state
    #[inline]
    pub fn is_free(&self) -> bool {
        self.active && !self.pinned
    }
}

/// Trait for numerical integration algorithms
pub trait Integrator {
    /// Advances every free state by `dt` under `field`
    fn integrate(&self, states: &mut [BodyState], field: &dyn AccelerationField, dt: f64);

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}

/// Builds the integrator selected in the physics configuration
pub fn integrator_for(kind: IntegratorType) -> Box<dyn Integrator> {
    match kind {
        IntegratorType::SymplecticEuler => Box::new(SymplecticEulerIntegrator::new()),
        IntegratorType::VelocityVerlet => Box::new(VelocityVerletIntegrator::new()),
    }
}

/// Evaluates the field for the current positions into a fresh buffer
pub(crate) fn evaluate(states: &[BodyState], field: &dyn AccelerationField) -> Vec<Vector2> {
    let mut accelerations = vec![Vector2::ZERO; states.len()];
    field.accumulate_accelerations(states, &mut accelerations);
    accelerations
}
