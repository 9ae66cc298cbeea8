//! Water Glass - a virtual glass you drink by tilting your phone
//!
//! Core modules:
//! - `sim`: Session simulation (tilt classifier, depletion, splash particles)
//! - `tuning`: Data-driven drinking constants
//! - `settings`: User preferences
//! - `error`: Error types
//! - `audio`: Web Audio cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{SensorError, TuningError};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Default constants (mirrored by `Tuning::default()`)
pub mod consts {
    /// Full glass, in percent
    pub const FULL_LEVEL: f32 = 100.0;
    /// Volume of a full glass (ml)
    pub const CAPACITY_ML: u32 = 500;

    /// Front-back tilt below which the user is drinking (degrees)
    pub const DRINK_THRESHOLD_DEG: f32 = -30.0;
    /// Degrees past the threshold per 1 %/s of drink rate
    pub const DRINK_RATE_DIVISOR: f32 = 10.0;
    /// Maximum drink rate (percent per second)
    pub const MAX_DRINK_RATE: f32 = 5.0;

    /// Degrees past the threshold per 1° of liquid surface tilt
    pub const SURFACE_TILT_DIVISOR: f32 = 3.0;
    /// Maximum liquid surface tilt (degrees)
    pub const MAX_SURFACE_TILT_DEG: f32 = 15.0;
    /// Glass rotation per degree of left-right tilt
    pub const GLASS_SWAY_FACTOR: f32 = 0.1;

    /// Per-frame chance of a splash burst while drinking
    pub const SPLASH_CHANCE: f32 = 0.3;
    /// Smallest splash burst
    pub const SPLASH_MIN_PARTICLES: u32 = 5;
    /// Number of extra particles a burst may add on top of the minimum
    pub const SPLASH_EXTRA_PARTICLES: u32 = 5;
    /// Upper bound on `min + extra` accepted from tuning files
    pub const MAX_SPLASH_BURST: u32 = 50;

    /// Frame delta used when there is no previous frame (seconds)
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta fed to the particle integrator (seconds)
    pub const MAX_PARTICLE_DT: f32 = 0.1;
}

/// Volume drunk so far for a given level: `round((100 - level) / 100 * capacity)`
#[inline]
pub fn consumed_ml(level: f32, capacity_ml: u32) -> u32 {
    let level = level.clamp(0.0, consts::FULL_LEVEL);
    ((consts::FULL_LEVEL - level) / consts::FULL_LEVEL * capacity_ml as f32).round() as u32
}

/// Milliseconds between two timestamps, as seconds
#[inline]
pub fn elapsed_secs(from_ms: f64, to_ms: f64) -> f32 {
    ((to_ms - from_ms) / 1000.0).max(0.0) as f32
}
