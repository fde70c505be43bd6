use crate::integration::BodyState;
use crate::math::Vector2;

/// Something that assigns an acceleration to every body from the current state
pub trait AccelerationField {
    /// Writes the acceleration of each state into `out` (same length as `states`).
    /// Inactive states receive zero and contribute nothing.
    fn accumulate_accelerations(&self, states: &[BodyState], out: &mut [Vector2]);
}

/// Pairwise Newtonian gravity over every unordered pair of active bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    /// Gravitational constant
    pub gravitational_constant: f64,

    /// Pairs closer than this exert no force; the engine treats them as collided
    pub min_separation: f64,

    /// When false every acceleration is zero and bodies coast in straight lines
    pub enabled: bool,
}

impl NewtonianGravity {
    pub fn new(gravitational_constant: f64, min_separation: f64) -> Self {
        Self {
            gravitational_constant,
            min_separation,
            enabled: true,
        }
    }

    /// Force exerted on `a` by `b`: `G m_a m_b / r²` directed from `a` toward `b`.
    ///
    /// Returns `None` when the separation is below `min_separation`, where the
    /// inverse-square law would blow up.
    pub fn pair_force(&self, a: &BodyState, b: &BodyState) -> Option<Vector2> {
        let offset = b.position - a.position;
        let distance_squared = offset.length_squared();
        let min_squared = self.min_separation * self.min_separation;
        if distance_squared <= min_squared || distance_squared == 0.0 {
            return None;
        }

        let distance = distance_squared.sqrt();
        let magnitude = self.gravitational_constant * a.mass * b.mass / distance_squared;
        Some(offset * (magnitude / distance))
    }

    /// Magnitude of the force between two point masses `distance` apart
    pub fn force_magnitude(&self, mass_a: f64, mass_b: f64, distance: f64) -> f64 {
        if distance <= self.min_separation || distance == 0.0 {
            return 0.0;
        }
        self.gravitational_constant * mass_a * mass_b / (distance * distance)
    }

    /// Net force on each state, summed over every unordered pair
    pub fn accumulate_forces(&self, states: &[BodyState], out: &mut [Vector2]) {
        debug_assert_eq!(states.len(), out.len());
        out.iter_mut().for_each(|f| *f = Vector2::ZERO);
        if !self.enabled {
            return;
        }

        for i in 0..states.len() {
            if !states[i].active {
                continue;
            }
            for j in (i + 1)..states.len() {
                if !states[j].active {
                    continue;
                }
                if let Some(force) = self.pair_force(&states[i], &states[j]) {
                    // equal and opposite
                    out[i] += force;
                    out[j] -= force;
                }
            }
        }
    }
}

impl AccelerationField for NewtonianGravity {
    fn accumulate_accelerations(&self, states: &[BodyState], out: &mut [Vector2]) {
        self.accumulate_forces(states, out);
        for (acceleration, state) in out.iter_mut().zip(states) {
            if state.active {
                *acceleration /= state.mass;
            }
        }
    }
}
