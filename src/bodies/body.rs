use std::collections::VecDeque;
use std::f64::consts::PI;

use crate::bodies::body_flags::BodyFlags;
use crate::bodies::BodyKind;
use crate::core::config::BodyConfig;
use crate::core::events::BodyEventType;
use crate::core::property::{Observer, RewindableProperty};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::Result;

/// Trace length used until a body is given an orbital period
pub const DEFAULT_MAX_PATH_LENGTH: usize = 1000;

/// Number of path points needed to show one and a half orbits of `orbital_period`
/// when one point is recorded every `dt` seconds.
pub fn path_capacity(orbital_period: f64, dt: f64) -> usize {
    if !(orbital_period.is_finite() && orbital_period > 0.0 && dt > 0.0) {
        return DEFAULT_MAX_PATH_LENGTH;
    }
    ((1.5 * orbital_period / dt).ceil() as usize).max(2)
}

/// What the user is dragging on a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Position,
    Velocity,
}

/// A point mass moving under mutual gravitation.
///
/// Position, velocity, mass, radius and the collided flag are rewindable;
/// everything else is derived or view-facing state.
pub struct Body {
    kind: BodyKind,
    name: String,

    position: RewindableProperty<Vector2>,
    velocity: RewindableProperty<Vector2>,
    mass: RewindableProperty<f64>,
    collided: RewindableProperty<bool>,

    /// Follows the mass through the construction-time density
    radius: RewindableProperty<f64>,
    density: f64,

    acceleration: Vector2,
    force: Vector2,

    path: VecDeque<Vector2>,
    max_path_length: usize,

    flags: BodyFlags,
    clock_ticks_since_explosion: u32,

    /// User modifications not yet seen by the engine
    pending_events: Vec<BodyEventType>,
}

impl Body {
    /// Creates a body; mass and radius must be positive and finite
    pub fn new(
        kind: BodyKind,
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: Vector2,
        velocity: Vector2,
    ) -> Result<Self> {
        validate_mass(mass)?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "radius must be positive and finite, got {}",
                radius
            )));
        }
        if !(position.is_finite() && velocity.is_finite()) {
            return Err(PhysicsError::InvalidParameter(
                "initial position and velocity must be finite".to_string(),
            ));
        }

        Ok(Self {
            kind,
            name: name.into(),
            position: RewindableProperty::new(position),
            velocity: RewindableProperty::new(velocity),
            mass: RewindableProperty::new(mass),
            collided: RewindableProperty::new(false),
            radius: RewindableProperty::new(radius),
            density: mass / sphere_volume(radius),
            acceleration: Vector2::ZERO,
            force: Vector2::ZERO,
            path: VecDeque::new(),
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            flags: BodyFlags::empty(),
            clock_ticks_since_explosion: 0,
            pending_events: Vec::new(),
        })
    }

    /// Creates a body from a preset entry, sizing its trace for ticks of `dt` seconds
    pub fn from_config(config: &BodyConfig, dt: f64) -> Result<Self> {
        let mut body = Self::new(
            config.kind,
            config.name.clone(),
            config.mass,
            config.radius,
            config.position,
            config.velocity,
        )?;
        body.set_mass_settable(config.mass_settable);
        body.set_max_path_length(path_capacity(config.orbital_period, dt));
        Ok(body)
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vector2 {
        self.position.get()
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity.get()
    }

    pub fn mass(&self) -> f64 {
        self.mass.get()
    }

    pub fn radius(&self) -> f64 {
        self.radius.get()
    }

    /// Density fixed at construction, used to derive the radius from the mass
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Gravitational acceleration from the last force evaluation
    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    /// Net gravitational force from the last force evaluation
    pub fn force(&self) -> Vector2 {
        self.force
    }

    pub fn is_collided(&self) -> bool {
        self.collided.get()
    }

    pub fn clock_ticks_since_explosion(&self) -> u32 {
        self.clock_ticks_since_explosion
    }

    /// Recent positions, oldest first
    pub fn path(&self) -> impl Iterator<Item = &Vector2> + '_ {
        self.path.iter()
    }

    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    pub fn max_path_length(&self) -> usize {
        self.max_path_length
    }

    /// Changes the trace capacity, dropping the oldest points if needed
    pub fn set_max_path_length(&mut self, max_path_length: usize) {
        self.max_path_length = max_path_length.max(1);
        while self.path.len() > self.max_path_length {
            self.path.pop_front();
        }
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
    }

    pub fn is_mass_settable(&self) -> bool {
        self.flags.contains(BodyFlags::MASS_SETTABLE)
    }

    pub fn set_mass_settable(&mut self, settable: bool) {
        self.flags.set(BodyFlags::MASS_SETTABLE, settable);
    }

    pub fn is_user_controlling_position(&self) -> bool {
        self.flags.contains(BodyFlags::USER_CONTROLLED_POSITION)
    }

    pub fn is_user_controlling_velocity(&self) -> bool {
        self.flags.contains(BodyFlags::USER_CONTROLLED_VELOCITY)
    }

    /// True if position, velocity or mass differ from the construction-time values
    pub fn differs_from_initial(&self) -> bool {
        self.position.differs_from_initial()
            || self.velocity.differs_from_initial()
            || self.mass.differs_from_initial()
    }

    /// Observable position, for views
    pub fn position_property(&mut self) -> Observer<'_, Vector2> {
        self.position.observer()
    }

    /// Observable velocity, for views
    pub fn velocity_property(&mut self) -> Observer<'_, Vector2> {
        self.velocity.observer()
    }

    /// Observable mass, for views
    pub fn mass_property(&mut self) -> Observer<'_, f64> {
        self.mass.observer()
    }

    /// Observable radius, for views
    pub fn radius_property(&mut self) -> Observer<'_, f64> {
        self.radius.observer()
    }

    /// Observable collided flag, for views
    pub fn collided_property(&mut self) -> Observer<'_, bool> {
        self.collided.observer()
    }

    /// Sets the mass without recording a user modification
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        validate_mass(mass)?;
        self.mass.set(mass);
        self.sync_radius();
        Ok(())
    }

    /// Marks the start of a drag; integration leaves a dragged position alone
    pub fn begin_drag(&mut self, target: DragTarget) {
        self.flags.insert(drag_flag(target));
    }

    /// Marks the end of a drag
    pub fn end_drag(&mut self, target: DragTarget) {
        self.flags.remove(drag_flag(target));
    }

    /// Moves the body on behalf of the user
    pub fn user_set_position(&mut self, position: Vector2) -> Result<()> {
        self.ensure_editable()?;
        if !position.is_finite() {
            return Err(PhysicsError::InvalidParameter("position must be finite".to_string()));
        }
        self.position.set(position);
        self.pending_events.push(BodyEventType::UserModifiedPosition);
        Ok(())
    }

    /// Changes the velocity on behalf of the user
    pub fn user_set_velocity(&mut self, velocity: Vector2) -> Result<()> {
        self.ensure_editable()?;
        if !velocity.is_finite() {
            return Err(PhysicsError::InvalidParameter("velocity must be finite".to_string()));
        }
        self.velocity.set(velocity);
        self.pending_events.push(BodyEventType::UserModifiedVelocity);
        Ok(())
    }

    /// Changes the mass on behalf of the user; rejected unless the body is mass-settable
    pub fn user_set_mass(&mut self, mass: f64) -> Result<()> {
        self.ensure_editable()?;
        if !self.is_mass_settable() {
            return Err(PhysicsError::InvalidParameter(format!(
                "mass of {} is not user settable",
                self.name
            )));
        }
        self.set_mass(mass)?;
        self.pending_events.push(BodyEventType::UserModifiedMass);
        Ok(())
    }

    /// Drains the user modifications recorded since the last call
    pub fn take_pending_events(&mut self) -> Vec<BodyEventType> {
        std::mem::take(&mut self.pending_events)
    }

    /// Restores the construction-time state
    pub fn reset(&mut self) {
        self.position.reset();
        self.velocity.reset();
        self.mass.reset();
        self.collided.reset();
        self.radius.reset();
        self.clear_transient();
    }

    /// Anchors the current state as the rewind point
    pub fn save(&mut self) {
        self.position.save();
        self.velocity.save();
        self.mass.save();
        self.collided.save();
        self.radius.save();
    }

    /// Restores the state stored by the last [`save`](Self::save)
    pub fn rewind(&mut self) {
        self.position.rewind();
        self.velocity.rewind();
        self.mass.rewind();
        self.collided.rewind();
        self.radius.rewind();
        self.clear_transient();
    }

    pub(crate) fn set_kinematics(&mut self, position: Vector2, velocity: Vector2) {
        self.position.set(position);
        self.velocity.set(velocity);
    }

    pub(crate) fn set_dynamics(&mut self, acceleration: Vector2, force: Vector2) {
        self.acceleration = acceleration;
        self.force = force;
    }

    /// Makes the body inert: zero velocity, no forces
    pub(crate) fn mark_collided(&mut self) {
        self.collided.set(true);
        self.velocity.set(Vector2::ZERO);
        self.acceleration = Vector2::ZERO;
        self.force = Vector2::ZERO;
        self.clock_ticks_since_explosion = 0;
    }

    pub(crate) fn tick_explosion(&mut self) {
        self.clock_ticks_since_explosion = self.clock_ticks_since_explosion.saturating_add(1);
    }

    /// Appends the current position, evicting the oldest once full
    pub(crate) fn record_path_point(&mut self) {
        if self.path.len() >= self.max_path_length {
            self.path.pop_front();
        }
        self.path.push_back(self.position.get());
    }

    /// Collided bodies stay inert until reset or rewind
    fn ensure_editable(&self) -> Result<()> {
        if self.is_collided() {
            return Err(PhysicsError::InvalidState(format!(
                "{} has collided and cannot be edited",
                self.name
            )));
        }
        Ok(())
    }

    fn clear_transient(&mut self) {
        self.path.clear();
        self.clock_ticks_since_explosion = 0;
        self.acceleration = Vector2::ZERO;
        self.force = Vector2::ZERO;
        self.flags
            .remove(BodyFlags::USER_CONTROLLED_POSITION | BodyFlags::USER_CONTROLLED_VELOCITY);
        self.pending_events.clear();
    }

    fn sync_radius(&mut self) {
        let radius = (3.0 * self.mass.get() / (4.0 * PI * self.density)).cbrt();
        self.radius.set(radius);
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Body")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("position", self.position.value())
            .field("velocity", self.velocity.value())
            .field("mass", self.mass.value())
            .field("radius", self.radius.value())
            .field("collided", self.collided.value())
            .finish()
    }
}

fn drag_flag(target: DragTarget) -> BodyFlags {
    match target {
        DragTarget::Position => BodyFlags::USER_CONTROLLED_POSITION,
        DragTarget::Velocity => BodyFlags::USER_CONTROLLED_VELOCITY,
    }
}

fn validate_mass(mass: f64) -> Result<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        log::warn!("rejected non-positive mass {}", mass);
        Err(PhysicsError::InvalidParameter(format!(
            "mass must be positive and finite, got {}",
            mass
        )))
    }
}

#[inline]
fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius.powi(3)
}
