//! Session state and core simulation types
//!
//! One `SessionState` owns everything the glass needs: level, tilt, the
//! splash particles and the queue of events waiting for the presentation layer.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use crate::consts::FULL_LEVEL;
use crate::consumed_ml;
use crate::tuning::Tuning;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Start screen, sensors not running yet
    Idle,
    /// Sensors (or their degraded stand-in) running, frame loop ticking
    Active,
}

/// Whether orientation samples are reaching the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorStatus {
    /// Not requested yet
    Pending,
    Available,
    /// Unsupported or denied. Tilt stays at 0 and drinking is impossible.
    Unavailable,
}

/// One orientation sample (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Front-back tilt, -180..180. Negative means tipped back toward the user.
    pub beta: f32,
    /// Left-right tilt, -90..90
    pub gamma: f32,
}

impl Orientation {
    pub fn new(beta: f32, gamma: f32) -> Self {
        Self { beta, gamma }
    }

    /// Build a sample from platform readings, where a missing axis reads as 0
    pub fn from_readings(beta: Option<f64>, gamma: Option<f64>) -> Self {
        Self {
            beta: beta.unwrap_or(0.0) as f32,
            gamma: gamma.unwrap_or(0.0) as f32,
        }
    }
}

/// Discrete notifications for audio/visual collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Tilt crossed the threshold with water left
    DrinkingStarted,
    /// Tilt came back up (or the glass was refilled mid-sip)
    DrinkingStopped,
    /// Level hit 0 while drinking
    WaterEmpty,
    /// Glass reset to full
    Refilled,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Constants driving the simulation
    pub tuning: Tuning,
    pub phase: SessionPhase,
    pub sensor: SensorStatus,
    /// Remaining water, 0-100 %
    pub level: f32,
    /// Volume drunk so far (ml), always derived from `level`
    pub consumed_ml: u32,
    pub drinking: bool,
    /// Latest orientation sample
    pub orientation: Orientation,
    pub sound_enabled: bool,
    /// Timestamp (ms) of the last depletion step
    pub last_step_ms: f64,
    /// Timestamp (ms) of the last frame, `None` before the first one
    pub last_frame_ms: Option<f64>,
    /// Live splash particles
    pub particles: Vec<Particle>,
    /// Maximum live particles (0 disables splashes)
    pub particle_cap: usize,
    /// Splash RNG
    pub rng: Pcg32,
    events: Vec<SessionEvent>,
}

impl SessionState {
    /// Create a full glass with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: SessionPhase::Idle,
            sensor: SensorStatus::Pending,
            level: FULL_LEVEL,
            consumed_ml: 0,
            drinking: false,
            orientation: Orientation::default(),
            sound_enabled: true,
            last_step_ms: 0.0,
            last_frame_ms: None,
            particles: Vec::new(),
            particle_cap: crate::QualityPreset::default().max_particles(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Leave the start screen. Returns false (and changes nothing) if the
    /// session was already active.
    pub fn start(&mut self, sensor: SensorStatus) -> bool {
        if self.phase == SessionPhase::Active {
            log::debug!("Session already active");
            return false;
        }
        self.phase = SessionPhase::Active;
        self.sensor = sensor;
        if sensor == SensorStatus::Unavailable {
            self.orientation = Orientation::default();
            log::warn!("Session started without orientation sensors");
        } else {
            log::info!("Session started");
        }
        true
    }

    /// Refill the glass. Phase is unchanged.
    pub fn reset(&mut self) {
        if self.drinking {
            self.drinking = false;
            self.push_event(SessionEvent::DrinkingStopped);
        }
        self.set_level(FULL_LEVEL);
        self.push_event(SessionEvent::Refilled);
        log::info!("Glass refilled");
    }

    /// Flip the sound flag, returning the new value
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        log::info!("Sound {}", if self.sound_enabled { "on" } else { "off" });
        self.sound_enabled
    }

    /// Set the level (clamped) and keep the consumed volume in step
    pub fn set_level(&mut self, level: f32) {
        self.level = level.clamp(0.0, FULL_LEVEL);
        self.consumed_ml = consumed_ml(self.level, self.tuning.capacity_ml);
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn is_empty(&self) -> bool {
        self.level <= 0.0
    }

    /// Drain queued events, oldest first
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: SessionEvent) {
        log::debug!("Event: {:?}", event);
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_full_and_idle() {
        let state = SessionState::new(1);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.level, 100.0);
        assert_eq!(state.consumed_ml, 0);
        assert!(!state.drinking);
        assert!(state.sound_enabled);
    }

    #[test]
    fn test_start_once() {
        let mut state = SessionState::new(1);
        assert!(state.start(SensorStatus::Available));
        assert!(state.is_active());
        assert!(!state.start(SensorStatus::Unavailable));
        assert!(!state.start(SensorStatus::Available));
        assert_eq!(state.sensor, SensorStatus::Available);
    }

    #[test]
    fn test_reset_restores_full_glass() {
        let mut state = SessionState::new(1);
        state.start(SensorStatus::Available);
        state.set_level(37.5);
        state.drinking = true;

        state.reset();
        assert_eq!(state.level, 100.0);
        assert_eq!(state.consumed_ml, 0);
        assert!(!state.drinking);
        assert!(state.is_active());
        assert_eq!(
            state.take_events(),
            vec![SessionEvent::DrinkingStopped, SessionEvent::Refilled]
        );
    }

    #[test]
    fn test_reset_while_not_drinking() {
        let mut state = SessionState::new(1);
        state.set_level(0.0);
        state.reset();
        assert_eq!(state.take_events(), vec![SessionEvent::Refilled]);
        assert_eq!(state.phase, SessionPhase::Idle);
    }

    #[test]
    fn test_set_level_clamps_and_derives_consumed() {
        let mut state = SessionState::new(1);
        state.set_level(-12.0);
        assert_eq!(state.level, 0.0);
        assert_eq!(state.consumed_ml, 500);
        state.set_level(250.0);
        assert_eq!(state.level, 100.0);
        assert_eq!(state.consumed_ml, 0);
    }

    #[test]
    fn test_toggle_sound() {
        let mut state = SessionState::new(1);
        assert!(!state.toggle_sound());
        assert!(state.toggle_sound());
    }

    #[test]
    fn test_missing_readings_are_zero() {
        let sample = Orientation::from_readings(None, Some(12.0));
        assert_eq!(sample, Orientation::new(0.0, 12.0));
    }

    #[test]
    fn test_take_events_drains() {
        let mut state = SessionState::new(1);
        state.reset();
        assert_eq!(state.take_events().len(), 1);
        assert!(state.take_events().is_empty());
    }
}
