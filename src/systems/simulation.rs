//! Animation clock
//!
//! Turns wall-clock frame time into the fractional frame count the solar
//! system advances by. Rotation rates are authored per frame at a reference
//! rate, so a 30 Hz display still turns the planets at the authored speed.

use std::time::Instant;
use orrery_core::SolarSystem;
use crate::config::AnimationConfig;

/// Drives `SolarSystem::advance` from elapsed time
pub struct SimulationSystem {
    last_frame: Instant,
    reference_fps: f32,
    time_scale: f32,
    max_frame_time: f32,
    paused: bool,
}

impl SimulationSystem {
    /// Create a simulation clock from config
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            last_frame: Instant::now(),
            reference_fps: config.reference_fps.max(0.0),
            time_scale: config.time_scale,
            max_frame_time: config.max_frame_time.max(0.0),
            paused: config.paused,
        }
    }

    /// Reference frames covered by `dt` seconds
    ///
    /// `dt` is capped so a stall (first frame, window drag) does not jump
    /// the planets. Paused clocks always return zero.
    pub fn frames_for(&self, dt: f32) -> f32 {
        if self.paused {
            return 0.0;
        }
        dt.clamp(0.0, self.max_frame_time) * self.reference_fps * self.time_scale
    }

    /// Measure elapsed time and advance the system
    ///
    /// Returns the number of reference frames applied.
    pub fn update(&mut self, system: &mut SolarSystem) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let frames = self.frames_for(dt);
        system.advance(frames);
        frames
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip pause state, returning the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("Animation {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::SystemTemplate;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_frames_at_reference_rate() {
        let sim = SimulationSystem::default();
        assert!((sim.frames_for(1.0 / 60.0) - 1.0).abs() < EPSILON);
        assert!((sim.frames_for(1.0 / 30.0) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_frame_time_capped() {
        let sim = SimulationSystem::default();
        // 0.1s cap at 60 fps
        assert!((sim.frames_for(5.0) - 6.0).abs() < EPSILON);
        assert_eq!(sim.frames_for(-1.0), 0.0);
    }

    #[test]
    fn test_time_scale() {
        let config = AnimationConfig { time_scale: 4.0, ..AnimationConfig::default() };
        let sim = SimulationSystem::new(&config);
        assert!((sim.frames_for(1.0 / 60.0) - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_pause_stops_animation() {
        let mut sim = SimulationSystem::default();
        assert!(sim.toggle_pause());
        assert_eq!(sim.frames_for(1.0 / 60.0), 0.0);

        let mut system = SolarSystem::build(&SystemTemplate::default_system());
        let earth = system.planet("Earth").unwrap().pivot;
        let before = system.graph().get(earth).unwrap().transform.rotation_y;
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(sim.update(&mut system), 0.0);
        let after = system.graph().get(earth).unwrap().transform.rotation_y;
        assert_eq!(before, after);

        assert!(!sim.toggle_pause());
    }

    #[test]
    fn test_update_advances_system() {
        let mut sim = SimulationSystem::default();
        let mut system = SolarSystem::build(&SystemTemplate::default_system());
        std::thread::sleep(std::time::Duration::from_millis(20));
        let frames = sim.update(&mut system);
        assert!(frames > 0.0);
        let earth = system.planet("Earth").unwrap().pivot;
        assert!(system.graph().get(earth).unwrap().transform.rotation_y > 0.0);
    }
}
