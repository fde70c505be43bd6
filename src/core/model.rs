use log::{debug, info};

use crate::core::clock::TimeSpeed;
use crate::core::config::SceneConfig;
use crate::core::presets;
use crate::core::scene::Scene;
use crate::error::PhysicsError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// View toggles shared by every scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct DisplayOptions {
    pub show_gravity_force: bool,
    pub show_velocity: bool,
    pub show_mass: bool,
    pub show_path: bool,
    pub show_grid: bool,
    pub show_measuring_tape: bool,
}

/// Top-level state: the preset scenes plus the global controls.
///
/// Exactly one scene is active at a time and only that scene advances.
/// Play/pause, time speed and the gravity switch are global and pushed into
/// the scenes whenever they change.
pub struct GravityAndOrbitsModel {
    scenes: Vec<Scene>,
    active: usize,
    display: DisplayOptions,
    playing: bool,
    gravity_enabled: bool,
    time_speed: TimeSpeed,
}

impl GravityAndOrbitsModel {
    /// Builds the model with every built-in preset, the first one active
    pub fn new() -> Result<Self> {
        Self::with_scenes(presets::all())
    }

    /// Builds the model from arbitrary scene configurations, the first one active
    pub fn with_scenes(configs: Vec<SceneConfig>) -> Result<Self> {
        if configs.is_empty() {
            return Err(PhysicsError::InvalidParameter(
                "at least one scene is required".to_string(),
            ));
        }
        let scenes = configs
            .into_iter()
            .map(Scene::new)
            .collect::<Result<Vec<_>>>()?;

        let mut model = Self {
            scenes,
            active: 0,
            display: DisplayOptions::default(),
            playing: false,
            gravity_enabled: true,
            time_speed: TimeSpeed::default(),
        };
        model.scenes[0].set_active(true, false);
        info!("created model with {} scenes", model.scenes.len());
        Ok(model)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, index: usize) -> Result<&Scene> {
        self.scenes
            .get(index)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("no scene at index {}", index)))
    }

    pub fn scene_mut(&mut self, index: usize) -> Result<&mut Scene> {
        self.scenes
            .get_mut(index)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("no scene at index {}", index)))
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_scene(&self) -> &Scene {
        &self.scenes[self.active]
    }

    pub fn active_scene_mut(&mut self) -> &mut Scene {
        &mut self.scenes[self.active]
    }

    /// Makes `index` the only active scene; the others keep their state untouched
    pub fn select_scene(&mut self, index: usize) -> Result<()> {
        if index >= self.scenes.len() {
            return Err(PhysicsError::ResourceNotFound(format!("no scene at index {}", index)));
        }
        debug!("selecting scene {}", index);
        for (i, scene) in self.scenes.iter_mut().enumerate() {
            scene.set_active(i == index, self.playing);
        }
        self.active = index;
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        for scene in &mut self.scenes {
            scene.set_playing(playing);
        }
    }

    pub fn is_gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// Switches gravity for every scene
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
        for scene in &mut self.scenes {
            scene.set_gravity_enabled(enabled);
        }
    }

    pub fn time_speed(&self) -> TimeSpeed {
        self.time_speed
    }

    pub fn set_time_speed(&mut self, speed: TimeSpeed) {
        self.time_speed = speed;
        for scene in &mut self.scenes {
            scene.set_time_speed(speed);
        }
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display
    }

    /// Advances the active scene by `wall_dt` seconds of real time
    pub fn step(&mut self, wall_dt: f64) -> u32 {
        self.scenes[self.active].step(wall_dt)
    }

    /// Advances the active scene by exactly one tick; only while paused
    pub fn step_once(&mut self) -> Result<()> {
        self.scenes[self.active].step_once()
    }

    /// Rewinds the active scene to its last saved state
    pub fn rewind(&mut self) {
        self.scenes[self.active].rewind();
    }

    /// Returns everything to the startup state: every scene, zoom and control
    pub fn reset(&mut self) -> Result<()> {
        info!("resetting model");
        self.display = DisplayOptions::default();
        self.set_playing(false);
        self.set_gravity_enabled(true);
        self.set_time_speed(TimeSpeed::default());
        for scene in &mut self.scenes {
            scene.reset_scene();
            scene.reset_zoom()?;
        }
        self.select_scene(0)
    }
}

impl std::fmt::Debug for GravityAndOrbitsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GravityAndOrbitsModel")
            .field("scenes", &self.scenes)
            .field("active", &self.active)
            .field("playing", &self.playing)
            .field("gravity_enabled", &self.gravity_enabled)
            .field("time_speed", &self.time_speed)
            .finish()
    }
}
