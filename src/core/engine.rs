use log::{debug, trace};

use crate::bodies::Body;
use crate::core::clock::Tickable;
use crate::core::events::{BodyEvent, BodyEventType, CollisionEvent, EventQueue};
use crate::core::{BodyHandle, BodyStorage, PhysicsConfig};
use crate::error::PhysicsError;
use crate::forces::{all_pairs, NewtonianGravity, Pair};
use crate::integration::{integrator_for, BodyState, Integrator};
use crate::math::{Bounds2, Vector2};
use crate::Result;

/// Outcome of handing pending user edits to the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserEdits {
    /// At least one body was modified by the user
    pub modified: bool,

    /// The edits caused a state save
    pub saved: bool,
}

/// Advances a fixed set of bodies under mutual Newtonian gravity
pub struct PhysicsEngine {
    /// All bodies, in the order they were added
    bodies: BodyStorage<Body>,

    /// Configuration for the simulation
    config: PhysicsConfig,

    gravity: NewtonianGravity,

    integrator: Box<dyn Integrator>,

    /// Queue of physics events
    events: EventQueue,

    /// Total simulated time stepped by this engine since the last reset/rewind
    time: f64,
}

impl PhysicsEngine {
    /// Creates an engine with default settings
    pub fn new() -> Self {
        Self::from_valid_config(PhysicsConfig::default())
    }

    /// Creates an engine with the given configuration
    pub fn with_config(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            gravity: NewtonianGravity::new(config.gravitational_constant, config.min_separation),
            integrator: integrator_for(config.integrator),
            config,
            events: EventQueue::new(),
            time: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Name of the integrator in use
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// Simulated time stepped since construction or the last reset/rewind
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_gravity_enabled(&self) -> bool {
        self.gravity.enabled
    }

    /// Turns gravity on or off for every body; collisions stay active either way
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity.enabled = enabled;
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    /// Registers a body and returns its handle
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = self.bodies.add(body);
        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Added,
            body: handle,
        });
        handle
    }

    pub fn get_body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.get_body(handle)
    }

    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies.get_body_mut(handle)
    }

    pub fn bodies(&self) -> &BodyStorage<Body> {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Every unordered pair of bodies
    pub fn pairs(&self) -> Vec<Pair> {
        let handles: Vec<BodyHandle> = self.bodies.handles().collect();
        all_pairs(&handles)
    }

    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Runs the simulation forward by `dt`, split into the configured number of sub-steps
    pub fn step(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            debug_assert!(dt >= 0.0, "negative time step {}", dt);
            return;
        }
        self.events.clear();

        let substeps = self.config.substeps.max(1);
        let sub_dt = dt / substeps as f64;
        trace!("step dt={} substeps={}", dt, substeps);

        let mut states = self.snapshot();
        let mut collisions = Vec::new();
        // pairs that already overlap must never feel the inverse-square kick
        detect_collisions(&mut states, self.config.min_separation, &mut collisions);
        for _ in 0..substeps {
            self.integrator.integrate(&mut states, &self.gravity, sub_dt);
            self.time += sub_dt;
            detect_collisions(&mut states, self.config.min_separation, &mut collisions);
        }

        self.apply_states(&states);

        for (a, b) in collisions {
            debug!("bodies {:?} and {:?} collided at t={}", a, b, self.time);
            self.events.add_collision_event(CollisionEvent {
                body_a: a,
                body_b: b,
                time: self.time,
            });
            for handle in [a, b] {
                if let Ok(body) = self.bodies.get_body_mut(handle) {
                    if !body.is_collided() {
                        body.mark_collided();
                        self.events.add_body_event(BodyEvent {
                            event_type: BodyEventType::Collided,
                            body: handle,
                        });
                    }
                }
            }
        }

        for (_, body) in self.bodies.iter_mut() {
            if body.is_collided() {
                body.tick_explosion();
            } else {
                body.record_path_point();
            }
        }
    }

    /// Recomputes gravity force and acceleration for every body without advancing time
    pub fn update_force_vectors(&mut self) {
        let states = self.snapshot();
        let mut forces = vec![Vector2::ZERO; states.len()];
        self.gravity.accumulate_forces(&states, &mut forces);

        for ((_, body), (state, force)) in self.bodies.iter_mut().zip(states.iter().zip(forces)) {
            if state.active {
                body.set_dynamics(force / state.mass, force);
            } else {
                body.set_dynamics(Vector2::ZERO, Vector2::ZERO);
            }
        }
    }

    /// Anchors every body's current state as its rewind point
    pub fn save_state(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.save();
        }
    }

    /// Restores every body to its rewind point and refreshes force vectors
    pub fn rewind(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.rewind();
        }
        self.time = 0.0;
        self.events.clear();
        self.update_force_vectors();
    }

    /// Restores every body to its construction-time state
    pub fn reset(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.reset();
        }
        self.time = 0.0;
        self.events.clear();
        self.update_force_vectors();
    }

    /// Handles user edits recorded on bodies since the last call.
    ///
    /// Every edit is queued as a body event, at most once per body and kind
    /// until the next step, and refreshes the force vectors. A
    /// velocity edit made while `paused` also saves the state, so a later
    /// rewind returns to the edited configuration; `rewinding` suppresses that.
    pub fn process_user_events(&mut self, paused: bool, rewinding: bool) -> UserEdits {
        let mut edits = UserEdits::default();

        for (handle, body) in self.bodies.iter_mut() {
            for event_type in body.take_pending_events() {
                edits.modified = true;
                if event_type == BodyEventType::UserModifiedVelocity && paused && !rewinding {
                    edits.saved = true;
                }
                self.events.replace_body_event(BodyEvent { event_type, body: handle });
            }
        }

        if edits.modified {
            self.update_force_vectors();
        }
        if edits.saved {
            debug!("user velocity edit while paused, saving state");
            self.save_state();
        }
        edits
    }

    /// Handles of bodies whose centers lie outside `bounds`
    pub fn bodies_out_of_bounds(&self, bounds: &Bounds2) -> Vec<BodyHandle> {
        self.bodies
            .iter()
            .filter(|(_, body)| !body.is_collided() && !bounds.contains_point(body.position()))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Total linear momentum of the bodies still in play
    pub fn total_momentum(&self) -> Vector2 {
        self.live_bodies().map(|b| b.velocity() * b.mass()).sum()
    }

    /// Total kinetic energy of the bodies still in play
    pub fn total_kinetic_energy(&self) -> f64 {
        self.live_bodies()
            .map(|b| 0.5 * b.mass() * b.velocity().length_squared())
            .sum()
    }

    /// Gravitational potential energy summed over every live pair (zero with gravity off)
    pub fn total_potential_energy(&self) -> f64 {
        if !self.gravity.enabled {
            return 0.0;
        }
        let live: Vec<&Body> = self.live_bodies().collect();
        let mut energy = 0.0;
        for (i, a) in live.iter().enumerate() {
            for b in &live[i + 1..] {
                let distance = a.position().distance(&b.position());
                if distance > self.config.min_separation {
                    energy -= self.gravity.gravitational_constant * a.mass() * b.mass() / distance;
                }
            }
        }
        energy
    }

    pub fn total_energy(&self) -> f64 {
        self.total_kinetic_energy() + self.total_potential_energy()
    }

    /// Returns the handle of a body by name
    pub fn find_body(&self, name: &str) -> Result<BodyHandle> {
        self.bodies
            .iter()
            .find(|(_, body)| body.name() == name)
            .map(|(handle, _)| handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("no body named {:?}", name)))
    }

    fn live_bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().map(|(_, b)| b).filter(|b| !b.is_collided())
    }

    fn snapshot(&self) -> Vec<BodyState> {
        self.bodies
            .iter()
            .map(|(_, body)| BodyState {
                position: body.position(),
                velocity: body.velocity(),
                acceleration: body.acceleration(),
                mass: body.mass(),
                radius: body.radius(),
                active: !body.is_collided(),
                pinned: body.is_user_controlling_position(),
            })
            .collect()
    }

    fn apply_states(&mut self, states: &[BodyState]) {
        for ((_, body), state) in self.bodies.iter_mut().zip(states) {
            // already inert before this step
            if body.is_collided() {
                continue;
            }
            if !state.pinned {
                body.set_kinematics(state.position, state.velocity);
            }
            body.set_dynamics(state.acceleration, state.acceleration * state.mass);
        }
    }
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Tickable for PhysicsEngine {
    fn tick(&mut self, dt: f64) {
        self.step(dt);
    }
}

/// Marks every active pair that overlaps (or is closer than `min_separation`)
/// as inactive with zero velocity, appending the pair to `collisions`.
fn detect_collisions(
    states: &mut [BodyState],
    min_separation: f64,
    collisions: &mut Vec<(BodyHandle, BodyHandle)>,
) {
    let mut hit = Vec::new();
    for i in 0..states.len() {
        if !states[i].active {
            continue;
        }
        for j in (i + 1)..states.len() {
            if !states[j].active {
                continue;
            }
            let distance = states[i].position.distance(&states[j].position);
            if distance < states[i].radius + states[j].radius || distance <= min_separation {
                hit.push((i, j));
            }
        }
    }

    for (i, j) in hit {
        for k in [i, j] {
            states[k].active = false;
            states[k].velocity = Vector2::ZERO;
            states[k].acceleration = Vector2::ZERO;
        }
        collisions.push((BodyHandle(i as u32), BodyHandle(j as u32)));
    }
}
