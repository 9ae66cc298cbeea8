//! Tilt-to-visual mapping and on-screen readouts
//!
//! Pure functions consumed by the renderer. Nothing here mutates state.

use serde::{Deserialize, Serialize};

use super::state::SessionState;
use crate::tuning::Tuning;

/// Rotations applied by the renderer (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualTilt {
    /// Liquid surface lean toward the rim
    pub surface_deg: f32,
    /// Whole-glass sway from left-right tilt
    pub glass_deg: f32,
}

/// Map a tilt to surface and glass rotations.
///
/// The surface only leans once the phone is past the drink threshold and is
/// capped; the glass sway is proportional and unclamped.
pub fn visual_tilt(beta: f32, gamma: f32, tuning: &Tuning) -> VisualTilt {
    let surface_deg = if beta >= tuning.drink_threshold_deg {
        0.0
    } else {
        ((beta.abs() - tuning.threshold_magnitude()) / tuning.surface_tilt_divisor)
            .min(tuning.max_surface_tilt_deg)
    };

    VisualTilt {
        surface_deg,
        glass_deg: gamma * tuning.glass_sway_factor,
    }
}

/// Colour band for the liquid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelBand {
    /// Below 20 %: red warning
    Low,
    /// Below 50 %: light blue
    Half,
    Full,
}

impl LevelBand {
    pub fn for_level(level: f32) -> Self {
        if level < 20.0 {
            LevelBand::Low
        } else if level < 50.0 {
            LevelBand::Half
        } else {
            LevelBand::Full
        }
    }

    /// CSS background for the liquid
    pub fn css_gradient(&self) -> &'static str {
        match self {
            LevelBand::Low => {
                "linear-gradient(to bottom, rgba(255, 100, 100, 0.85) 0%, rgba(255, 50, 50, 0.9) 100%)"
            }
            LevelBand::Half => {
                "linear-gradient(to bottom, rgba(100, 180, 255, 0.85) 0%, rgba(50, 150, 255, 0.9) 100%)"
            }
            LevelBand::Full => {
                "linear-gradient(to bottom, rgba(64, 156, 255, 0.9) 0%, rgba(0, 119, 255, 0.95) 100%)"
            }
        }
    }
}

/// Numbers shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readout {
    pub level_percent: u32,
    pub tilt_deg: i32,
    pub consumed_ml: u32,
}

/// Round half up, so -30.5 shows as -30
#[inline]
fn round_half_up(x: f32) -> f32 {
    (x + 0.5).floor()
}

impl SessionState {
    pub fn visual_tilt(&self) -> VisualTilt {
        visual_tilt(self.orientation.beta, self.orientation.gamma, &self.tuning)
    }

    pub fn level_band(&self) -> LevelBand {
        LevelBand::for_level(self.level)
    }

    pub fn readout(&self) -> Readout {
        Readout {
            level_percent: round_half_up(self.level) as u32,
            tilt_deg: round_half_up(self.orientation.beta) as i32,
            consumed_ml: self.consumed_ml,
        }
    }
}
