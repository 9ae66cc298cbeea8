//! Depletion integrator
//!
//! Linear drain: the further past the threshold, the faster the glass
//! empties, up to the rate cap.

use super::state::{SessionEvent, SessionState};
use crate::elapsed_secs;
use crate::tuning::Tuning;

/// Drink rate in %/s: `clamp((|beta| - |threshold|) / divisor, 0, max)`
#[inline]
pub fn drink_rate(beta: f32, tuning: &Tuning) -> f32 {
    ((beta.abs() - tuning.threshold_magnitude()) / tuning.drink_rate_divisor)
        .clamp(0.0, tuning.max_drink_rate)
}

/// Advance the level to `now_ms`.
///
/// Returns true if a step ran (drinking with water left). Reaching 0 forces
/// drinking off and emits `WaterEmpty`; since the step never runs at level 0,
/// that event fires once per emptying.
pub fn deplete(state: &mut SessionState, now_ms: f64) -> bool {
    if !state.drinking || state.is_empty() {
        return false;
    }

    let dt = elapsed_secs(state.last_step_ms, now_ms);
    state.last_step_ms = now_ms;

    let rate = drink_rate(state.orientation.beta, &state.tuning);
    state.set_level(state.level - rate * dt);
    log::trace!("Depleted {:.3}% over {:.3}s", rate * dt, dt);

    if state.is_empty() {
        state.drinking = false;
        log::info!("Glass empty ({} ml drunk)", state.consumed_ml);
        state.push_event(SessionEvent::WaterEmpty);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Orientation, SensorStatus};

    /// Active session drinking at `beta` since t = 0
    fn drinking_at(beta: f32) -> SessionState {
        let mut state = SessionState::new(3);
        state.start(SensorStatus::Available);
        state.handle_orientation(Orientation::new(beta, 0.0), 0.0);
        state.take_events();
        state
    }

    #[test]
    fn test_rate_scenarios() {
        let tuning = Tuning::default();
        assert!((drink_rate(-40.0, &tuning) - 1.0).abs() < 1e-6);
        assert!((drink_rate(-80.0, &tuning) - 5.0).abs() < 1e-6);
        assert!((drink_rate(-170.0, &tuning) - 5.0).abs() < 1e-6);
        assert_eq!(drink_rate(-20.0, &tuning), 0.0);
    }

    #[test]
    fn test_one_second_at_minus_40() {
        let mut state = drinking_at(-40.0);
        assert!(deplete(&mut state, 1000.0));
        assert!((state.level - 99.0).abs() < 1e-4);
        assert_eq!(state.consumed_ml, 5);
    }

    #[test]
    fn test_one_second_at_minus_80_is_capped() {
        let mut state = drinking_at(-80.0);
        deplete(&mut state, 1000.0);
        assert!((state.level - 95.0).abs() < 1e-4);
        assert_eq!(state.consumed_ml, 25);
    }

    #[test]
    fn test_large_dt_clamps_to_zero() {
        let mut state = drinking_at(-80.0);
        state.set_level(2.0);
        // Tab was backgrounded for ten minutes
        deplete(&mut state, 600_000.0);
        assert_eq!(state.level, 0.0);
        assert_eq!(state.consumed_ml, 500);
        assert!(!state.drinking);
    }

    #[test]
    fn test_empty_fires_once() {
        let mut state = drinking_at(-80.0);
        state.set_level(1.0);
        deplete(&mut state, 1000.0);
        for i in 2..50 {
            assert!(!deplete(&mut state, i as f64 * 1000.0));
        }
        assert_eq!(state.take_events(), vec![SessionEvent::WaterEmpty]);
    }

    #[test]
    fn test_no_step_when_not_drinking() {
        let mut state = SessionState::new(3);
        state.start(SensorStatus::Available);
        assert!(!deplete(&mut state, 5000.0));
        assert_eq!(state.level, 100.0);
    }

    #[test]
    fn test_steps_accumulate_from_last_step() {
        let mut state = drinking_at(-50.0);
        // 2 %/s, four quarter-second frames
        for i in 1..=4 {
            deplete(&mut state, i as f64 * 250.0);
        }
        assert!((state.level - 98.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_step_once_empty() {
        let mut state = drinking_at(-80.0);
        state.set_level(0.0);
        assert!(state.is_empty());
        assert!(!deplete(&mut state, 1000.0));
        assert_eq!(state.last_step_ms, 0.0);
        assert!(state.take_events().is_empty());
    }
}
