use crate::forces::AccelerationField;
use crate::integration::integrator::evaluate;
use crate::integration::{BodyState, Integrator};

/// Symplectic Euler integrator (semi-implicit Euler).
///
/// Velocity is kicked by the current acceleration first and the position then
/// drifts with the *new* velocity, which keeps orbits from slowly spiralling
/// the way explicit Euler does.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymplecticEulerIntegrator;

impl SymplecticEulerIntegrator {
    /// Creates a new Symplectic Euler integrator
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for SymplecticEulerIntegrator {
    fn integrate(&self, states: &mut [BodyState], field: &dyn AccelerationField, dt: f64) {
        let accelerations = evaluate(states, field);

        for (state, acceleration) in states.iter_mut().zip(accelerations) {
            if !state.active {
                continue;
            }
            state.acceleration = acceleration;
            if state.pinned {
                continue;
            }

            state.velocity += acceleration * dt;
            state.position += state.velocity * dt;
        }
    }

    fn name(&self) -> &str {
        "SymplecticEuler"
    }
}
