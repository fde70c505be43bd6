//! Fixed-step integrators for the N-body state.
//!
//! The engine copies its bodies into a flat [`BodyState`] slice, advances the
//! slice sub-step by sub-step, and writes the result back once per step.

mod integrator;
mod symplectic_euler;
mod verlet;

pub use self::integrator::{integrator_for, BodyState, Integrator};
pub use self::symplectic_euler::SymplecticEulerIntegrator;
pub use self::verlet::VelocityVerletIntegrator;
