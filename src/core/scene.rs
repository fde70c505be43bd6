use log::{debug, warn};

use crate::bodies::{Body, DragTarget};
use crate::core::clock::{Clock, TimeSpeed};
use crate::core::config::{SceneConfig, SceneKind};
use crate::core::engine::PhysicsEngine;
use crate::core::property::{Observer, Property};
use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::math::{Bounds2, ModelViewTransform, Vector2};
use crate::Result;

/// One selectable preset: its own bodies, engine, clock and framing.
///
/// Scenes are built once and never reconfigured; switching configuration
/// means switching which scene is active.
pub struct Scene {
    config: SceneConfig,
    engine: PhysicsEngine,
    clock: Clock,
    active: bool,
    zoom_level: Property<i32>,
    transform: ModelViewTransform,
    deviated_from_defaults: Property<bool>,
    /// Set while [`rewind`](Self::rewind) flushes edits; those never become the rewind point
    rewinding: bool,
}

impl Scene {
    /// Builds the scene's bodies, engine and clock from a preset
    pub fn new(config: SceneConfig) -> Result<Self> {
        if config.bodies.is_empty() {
            return Err(PhysicsError::InvalidParameter(format!(
                "scene {:?} has no bodies",
                config.kind
            )));
        }

        let clock = Clock::new(config.clock.clone())?;
        let mut engine = PhysicsEngine::with_config(config.physics.clone())?;
        for body_config in &config.bodies {
            engine.add_body(Body::from_config(body_config, clock.base_dt())?);
        }
        engine.update_force_vectors();

        let transform = ModelViewTransform::for_zoom(
            config.default_zoom_scale,
            config.zoom_center,
            config.default_zoom_level,
        )?;

        Ok(Self {
            zoom_level: Property::new(config.default_zoom_level),
            config,
            engine,
            clock,
            active: false,
            transform,
            deviated_from_defaults: Property::new(false),
            rewinding: false,
        })
    }

    pub fn kind(&self) -> SceneKind {
        self.config.kind
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&Body> {
        self.engine.get_body(handle)
    }

    /// Direct access for views; call [`process_user_events`](Self::process_user_events)
    /// after recording user edits through it
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.engine.get_body_mut(handle)
    }

    pub fn find_body(&self, name: &str) -> Result<BodyHandle> {
        self.engine.find_body(name)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activates or deactivates the scene; only an active scene's clock runs
    pub fn set_active(&mut self, active: bool, playing: bool) {
        if self.active != active {
            debug!("scene {:?} active={}", self.config.kind, active);
        }
        self.active = active;
        self.clock.set_running(active && playing);
    }

    /// Follows the global play/pause state (ignored while inactive)
    pub fn set_playing(&mut self, playing: bool) {
        self.clock.set_running(self.active && playing);
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn set_time_speed(&mut self, speed: TimeSpeed) {
        self.clock.set_speed(speed);
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.engine.set_gravity_enabled(enabled);
        self.engine.update_force_vectors();
    }

    /// Advances the scene by `wall_dt` seconds of real time; inactive scenes never change
    pub fn step(&mut self, wall_dt: f64) -> u32 {
        if !self.active {
            return 0;
        }
        self.clock.step(wall_dt, &mut self.engine)
    }

    /// Advances exactly one tick while paused; inactive scenes refuse
    pub fn step_once(&mut self) -> Result<()> {
        if !self.active {
            return Err(PhysicsError::InvalidState(format!(
                "scene {:?} is not active",
                self.config.kind
            )));
        }
        self.clock.step_once(&mut self.engine)
    }

    pub fn simulation_time(&self) -> f64 {
        self.clock.simulation_time()
    }

    pub fn zoom_level(&self) -> i32 {
        self.zoom_level.get()
    }

    /// Observable zoom level, for views; change it through [`set_zoom_level`](Self::set_zoom_level)
    pub fn zoom_level_property(&mut self) -> Observer<'_, i32> {
        self.zoom_level.observer()
    }

    /// Changes the zoom level and rebuilds the transform
    pub fn set_zoom_level(&mut self, level: i32) -> Result<()> {
        let transform = ModelViewTransform::for_zoom(
            self.config.default_zoom_scale,
            self.config.zoom_center,
            level,
        )?;
        self.transform = transform;
        self.zoom_level.set(level);
        Ok(())
    }

    pub fn reset_zoom(&mut self) -> Result<()> {
        self.set_zoom_level(self.config.default_zoom_level)
    }

    pub fn transform(&self) -> &ModelViewTransform {
        &self.transform
    }

    /// Model-space rectangle currently visible on the stage
    pub fn model_bounds(&self) -> Bounds2 {
        self.transform.model_bounds()
    }

    pub fn deviated_from_defaults(&self) -> bool {
        self.deviated_from_defaults.get()
    }

    /// Observable "differs from the preset" flag, for views
    pub fn deviated_from_defaults_property(&mut self) -> Observer<'_, bool> {
        self.deviated_from_defaults.observer()
    }

    pub fn is_rewinding(&self) -> bool {
        self.rewinding
    }

    pub fn begin_drag(&mut self, handle: BodyHandle, target: DragTarget) -> Result<()> {
        self.engine.get_body_mut(handle)?.begin_drag(target);
        Ok(())
    }

    pub fn end_drag(&mut self, handle: BodyHandle, target: DragTarget) -> Result<()> {
        self.engine.get_body_mut(handle)?.end_drag(target);
        Ok(())
    }

    pub fn user_set_position(&mut self, handle: BodyHandle, position: Vector2) -> Result<()> {
        self.engine.get_body_mut(handle)?.user_set_position(position)?;
        self.process_user_events();
        Ok(())
    }

    /// Sets a velocity on behalf of the user; while paused this also saves the state
    pub fn user_set_velocity(&mut self, handle: BodyHandle, velocity: Vector2) -> Result<()> {
        self.engine.get_body_mut(handle)?.user_set_velocity(velocity)?;
        self.process_user_events();
        Ok(())
    }

    pub fn user_set_mass(&mut self, handle: BodyHandle, mass: f64) -> Result<()> {
        self.engine.get_body_mut(handle)?.user_set_mass(mass)?;
        self.process_user_events();
        Ok(())
    }

    /// Hands pending user edits to the engine and updates the deviation flag
    pub fn process_user_events(&mut self) {
        let edits = self
            .engine
            .process_user_events(!self.clock.is_running(), self.rewinding);
        if edits.modified {
            self.deviated_from_defaults.set(true);
        }
    }

    /// Anchors every body's current state as the rewind point; only while paused
    pub fn save_state(&mut self) -> Result<()> {
        if self.clock.is_running() {
            warn!("refusing to save scene {:?} while running", self.config.kind);
            return Err(PhysicsError::InvalidState(
                "state can only be saved while the simulation is paused".to_string(),
            ));
        }
        debug!("saving scene {:?}", self.config.kind);
        self.engine.save_state();
        Ok(())
    }

    /// Returns every body to the last saved state and the clock to time zero.
    ///
    /// Edits still pending on bodies are flushed first so they count as a
    /// deviation, but none of them is saved as the rewind point.
    pub fn rewind(&mut self) {
        debug!("rewinding scene {:?}", self.config.kind);
        self.rewinding = true;
        self.process_user_events();
        self.clock.set_simulation_time(0.0);
        self.engine.rewind();
        self.rewinding = false;
    }

    /// Returns every body to the preset values and clears the deviation flag
    pub fn reset_scene(&mut self) {
        debug!("resetting scene {:?}", self.config.kind);
        self.engine.reset();
        self.clock.reset_simulation_time();
        self.deviated_from_defaults.set(false);
    }

    /// Bodies that have left the visible area
    pub fn bodies_out_of_bounds(&self) -> Vec<BodyHandle> {
        self.engine.bodies_out_of_bounds(&self.model_bounds())
    }

    /// Rewinds if any body escaped the visible area; returns whether it did
    pub fn return_bodies(&mut self) -> bool {
        if self.bodies_out_of_bounds().is_empty() {
            return false;
        }
        self.rewind();
        true
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("kind", &self.config.kind)
            .field("active", &self.active)
            .field("bodies", &self.engine.body_count())
            .field("clock", &self.clock)
            .field("zoom_level", self.zoom_level.value())
            .finish()
    }
}
