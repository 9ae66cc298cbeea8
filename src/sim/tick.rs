//! Frame step
//!
//! Called once per animation frame. Orientation samples arrive separately via
//! `SessionState::handle_orientation`; both run to completion on the same
//! thread, so the frame always sees the latest sample.

use super::depletion::deplete;
use super::particle::{advance_particles, maybe_splash};
use super::state::SessionState;
use crate::consts::{FIRST_FRAME_DT, MAX_PARTICLE_DT};
use crate::elapsed_secs;

/// Advance the session to `now_ms`.
///
/// Existing particles move first, then the level drains and a splash may be
/// spawned, so fresh droplets start at their launch position. The depletion
/// step uses the real elapsed time; only particle motion is clamped.
pub fn tick(state: &mut SessionState, now_ms: f64) {
    let frame_dt = match state.last_frame_ms {
        Some(last) => elapsed_secs(last, now_ms).min(MAX_PARTICLE_DT),
        None => FIRST_FRAME_DT,
    };
    state.last_frame_ms = Some(now_ms);

    if !state.is_active() {
        return;
    }

    advance_particles(&mut state.particles, frame_dt);

    if deplete(state, now_ms) {
        maybe_splash(state);
    }
}
