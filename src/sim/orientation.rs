//! Tilt-to-drink classifier
//!
//! Drinking means the phone is tipped back past the threshold and there is
//! still water in the glass.

use super::state::{Orientation, SensorStatus, SessionEvent, SessionState};
use crate::tuning::Tuning;

/// True iff `beta` is strictly past the threshold and there is water left
#[inline]
pub fn is_drinking_pose(beta: f32, level: f32, tuning: &Tuning) -> bool {
    beta < tuning.drink_threshold_deg && level > 0.0
}

impl SessionState {
    /// Apply an orientation sample taken at `now_ms`.
    ///
    /// Ignored before `start` and when sensors are unavailable. Emits
    /// `DrinkingStarted` / `DrinkingStopped` on edges; a start edge also
    /// resets the depletion clock so the first step only counts time spent
    /// drinking.
    pub fn handle_orientation(&mut self, sample: Orientation, now_ms: f64) {
        if !self.is_active() || self.sensor == SensorStatus::Unavailable {
            return;
        }

        self.orientation = sample;

        let was_drinking = self.drinking;
        self.drinking = is_drinking_pose(sample.beta, self.level, &self.tuning);

        match (was_drinking, self.drinking) {
            (false, true) => {
                self.last_step_ms = now_ms;
                log::info!("Drinking started (beta {:.1}°)", sample.beta);
                self.push_event(SessionEvent::DrinkingStarted);
            }
            (true, false) => {
                log::info!("Drinking stopped (beta {:.1}°)", sample.beta);
                self.push_event(SessionEvent::DrinkingStopped);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> SessionState {
        let mut state = SessionState::new(7);
        state.start(SensorStatus::Available);
        state
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let tuning = Tuning::default();
        assert!(!is_drinking_pose(-30.0, 100.0, &tuning));
        assert!(is_drinking_pose(-30.001, 100.0, &tuning));
        assert!(!is_drinking_pose(0.0, 100.0, &tuning));
        assert!(!is_drinking_pose(45.0, 100.0, &tuning));
    }

    #[test]
    fn test_empty_glass_never_drinks() {
        assert!(!is_drinking_pose(-90.0, 0.0, &Tuning::default()));
    }

    #[test]
    fn test_edges_emit_events() {
        let mut state = active();

        state.handle_orientation(Orientation::new(-10.0, 0.0), 0.0);
        assert!(state.take_events().is_empty());

        state.handle_orientation(Orientation::new(-45.0, 3.0), 100.0);
        assert!(state.drinking);
        assert_eq!(state.last_step_ms, 100.0);
        assert_eq!(state.take_events(), vec![SessionEvent::DrinkingStarted]);

        // Staying in the pose is not an edge
        state.handle_orientation(Orientation::new(-60.0, 3.0), 116.0);
        assert!(state.take_events().is_empty());
        assert_eq!(state.last_step_ms, 100.0);

        state.handle_orientation(Orientation::new(-20.0, 0.0), 200.0);
        assert!(!state.drinking);
        assert_eq!(state.take_events(), vec![SessionEvent::DrinkingStopped]);
    }

    #[test]
    fn test_sample_is_recorded() {
        let mut state = active();
        state.handle_orientation(Orientation::new(12.5, -4.0), 0.0);
        assert_eq!(state.orientation, Orientation::new(12.5, -4.0));
    }

    #[test]
    fn test_ignored_while_idle() {
        let mut state = SessionState::new(7);
        state.handle_orientation(Orientation::new(-80.0, 0.0), 0.0);
        assert!(!state.drinking);
        assert_eq!(state.orientation, Orientation::default());
    }

    #[test]
    fn test_ignored_without_sensor() {
        let mut state = SessionState::new(7);
        state.start(SensorStatus::Unavailable);
        state.handle_orientation(Orientation::new(-80.0, 20.0), 0.0);
        assert!(!state.drinking);
        assert_eq!(state.orientation.beta, 0.0);
    }

    #[test]
    fn test_custom_threshold() {
        let tuning = Tuning {
            drink_threshold_deg: -50.0,
            ..Default::default()
        };
        let mut state = SessionState::with_tuning(7, tuning);
        state.start(SensorStatus::Available);
        state.handle_orientation(Orientation::new(-40.0, 0.0), 0.0);
        assert!(!state.drinking);
        state.handle_orientation(Orientation::new(-51.0, 0.0), 0.0);
        assert!(state.drinking);
    }
}
