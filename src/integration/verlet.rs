use crate::forces::AccelerationField;
use crate::integration::integrator::evaluate;
use crate::integration::{BodyState, Integrator};

/// Velocity Verlet integrator.
///
/// Drifts with the current velocity and acceleration, re-evaluates the field
/// at the new positions, then averages the two accelerations for the kick.
#[derive(Debug, Default, Clone, Copy)]
pub struct VelocityVerletIntegrator;

impl VelocityVerletIntegrator {
    /// Creates a new Velocity Verlet integrator
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for VelocityVerletIntegrator {
    fn integrate(&self, states: &mut [BodyState], field: &dyn AccelerationField, dt: f64) {
        let a_old = evaluate(states, field);

        // x_n+1 = x_n + v_n dt + a_n dt^2 / 2
        for (state, a) in states.iter_mut().zip(a_old.iter()) {
            if state.is_free() {
                state.position += state.velocity * dt + *a * (0.5 * dt * dt);
            }
        }

        let a_new = evaluate(states, field);

        // v_n+1 = v_n + (a_n + a_n+1) dt / 2
        for ((state, a0), a1) in states.iter_mut().zip(a_old).zip(a_new) {
            if !state.active {
                continue;
            }
            state.acceleration = a1;
            if state.pinned {
                continue;
            }
            state.velocity += (a0 + a1) * (0.5 * dt);
        }
    }

    fn name(&self) -> &str {
        "VelocityVerlet"
    }
}
