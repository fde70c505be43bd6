use std::fmt;

use crate::core::config::ClockConfig;
use crate::error::PhysicsError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Something the clock advances once per tick by a fixed simulated `dt`
pub trait Tickable {
    fn tick(&mut self, dt: f64);
}

/// Playback speed selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum TimeSpeed {
    Fast,
    #[default]
    Normal,
    Slow,
}

impl TimeSpeed {
    /// Factor applied to elapsed wall time
    pub fn multiplier(self) -> f64 {
        match self {
            TimeSpeed::Fast => 4.0,
            TimeSpeed::Normal => 1.0,
            TimeSpeed::Slow => 0.25,
        }
    }
}

/// Turns wall-clock time into whole ticks of a fixed simulated `dt`.
///
/// Speed changes how often ticks happen, never how long a tick is, so the
/// integration does not depend on frame-rate jitter.
pub struct Clock {
    config: ClockConfig,
    running: bool,
    speed: TimeSpeed,
    simulation_time: f64,
    /// Scaled wall time not yet converted into ticks
    accumulator: f64,
    ticks: u64,
}

impl Clock {
    /// Creates a stopped clock at simulation time zero
    pub fn new(config: ClockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            running: false,
            speed: TimeSpeed::default(),
            simulation_time: 0.0,
            accumulator: 0.0,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Simulated seconds per tick
    pub fn base_dt(&self) -> f64 {
        self.config.base_dt
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or pauses the clock; pausing takes effect before the next step
    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            self.running = running;
            self.accumulator = 0.0;
        }
    }

    pub fn speed(&self) -> TimeSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: TimeSpeed) {
        self.speed = speed;
    }

    /// Cumulative simulated time in seconds
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    /// Number of ticks delivered since construction
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Zeroes the simulated time without touching any body
    pub fn reset_simulation_time(&mut self) {
        self.set_simulation_time(0.0);
    }

    /// Moves the clock to an explicit simulated time
    pub fn set_simulation_time(&mut self, time: f64) {
        self.simulation_time = time;
        self.accumulator = 0.0;
    }

    /// Advances by `wall_dt` seconds of real time, ticking `target` as needed.
    ///
    /// No-op while stopped. Returns the number of ticks delivered, at most
    /// `max_ticks_per_step`; time beyond that cap is dropped rather than
    /// carried into the next frame.
    pub fn step<T: Tickable + ?Sized>(&mut self, wall_dt: f64, target: &mut T) -> u32 {
        if !self.running || !(wall_dt.is_finite() && wall_dt > 0.0) {
            return 0;
        }

        self.accumulator += wall_dt * self.speed.multiplier();
        let due = (self.accumulator / self.config.tick_interval).floor();
        let ticks = if due >= self.config.max_ticks_per_step as f64 {
            self.accumulator = 0.0;
            self.config.max_ticks_per_step
        } else {
            self.accumulator -= due * self.config.tick_interval;
            due as u32
        };

        for _ in 0..ticks {
            self.deliver_tick(target);
        }
        ticks
    }

    /// Delivers exactly one tick while paused (the "step" button)
    pub fn step_once<T: Tickable + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        if self.running {
            return Err(PhysicsError::InvalidState(
                "single stepping is only available while paused".to_string(),
            ));
        }
        self.deliver_tick(target);
        Ok(())
    }

    fn deliver_tick<T: Tickable + ?Sized>(&mut self, target: &mut T) {
        self.simulation_time += self.config.base_dt;
        self.ticks += 1;
        target.tick(self.config.base_dt);
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("running", &self.running)
            .field("speed", &self.speed)
            .field("simulation_time", &self.simulation_time)
            .field("ticks", &self.ticks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct Recorder {
        dts: Vec<f64>,
    }

    impl Tickable for Recorder {
        fn tick(&mut self, dt: f64) {
            self.dts.push(dt);
        }
    }

    fn clock() -> Clock {
        Clock::new(ClockConfig {
            base_dt: 10.0,
            tick_interval: 0.125,
            max_ticks_per_step: 5,
        })
        .unwrap()
    }

    #[test]
    fn stopped_clock_does_nothing() {
        let mut clock = clock();
        let mut recorder = Recorder::default();
        assert_eq!(clock.step(1.0, &mut recorder), 0);
        assert!(recorder.dts.is_empty());
        assert_eq!(clock.simulation_time(), 0.0);
    }

    #[test]
    fn ticks_are_whole_multiples_of_base_dt() {
        let mut clock = clock();
        clock.set_running(true);
        let mut recorder = Recorder::default();

        // 2.5 intervals => two ticks, half an interval carried over
        assert_eq!(clock.step(0.3125, &mut recorder), 2);
        assert_eq!(clock.step(0.0625, &mut recorder), 1);

        assert_eq!(recorder.dts, vec![10.0, 10.0, 10.0]);
        assert_relative_eq!(clock.simulation_time(), 30.0);
    }

    #[test]
    fn speed_scales_tick_rate() {
        let mut fast = clock();
        fast.set_speed(TimeSpeed::Fast);
        fast.set_running(true);
        let mut slow = clock();
        slow.set_speed(TimeSpeed::Slow);
        slow.set_running(true);

        let mut a = Recorder::default();
        let mut b = Recorder::default();
        for _ in 0..8 {
            fast.step(0.0625, &mut a);
            slow.step(0.0625, &mut b);
        }

        assert_eq!(a.dts.len(), 16);
        assert_eq!(b.dts.len(), 1);
    }

    #[test]
    fn large_frames_are_capped() {
        let mut clock = clock();
        clock.set_running(true);
        let mut recorder = Recorder::default();
        assert_eq!(clock.step(10.0, &mut recorder), 5);
        assert_eq!(clock.step(0.0625, &mut recorder), 0);
    }

    #[test]
    fn step_once_only_while_paused() {
        let mut clock = clock();
        let mut recorder = Recorder::default();
        clock.step_once(&mut recorder).unwrap();
        assert_eq!(recorder.dts, vec![10.0]);

        clock.set_running(true);
        assert!(clock.step_once(&mut recorder).is_err());
    }

    #[test]
    fn simulation_time_can_be_moved() {
        let mut clock = clock();
        let mut recorder = Recorder::default();
        clock.step_once(&mut recorder).unwrap();
        clock.set_simulation_time(123.0);
        assert_eq!(clock.simulation_time(), 123.0);
        clock.reset_simulation_time();
        assert_eq!(clock.simulation_time(), 0.0);
        assert_eq!(recorder.dts.len(), 1);
    }
}
