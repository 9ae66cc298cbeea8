//! Data-driven drinking constants
//!
//! Every number the simulation uses to decide how fast the glass empties or
//! how the liquid leans lives here, so it can be tweaked from JSON without a
//! rebuild. Defaults match `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Volume of a full glass (ml)
    pub capacity_ml: u32,
    /// Front-back tilt below which drinking starts (degrees, negative)
    pub drink_threshold_deg: f32,
    /// Degrees past the threshold per 1 %/s of drink rate
    pub drink_rate_divisor: f32,
    /// Drink rate cap (%/s)
    pub max_drink_rate: f32,
    /// Degrees past the threshold per 1° of surface tilt.
    /// Kept separate from `drink_rate_divisor` on purpose.
    pub surface_tilt_divisor: f32,
    /// Surface tilt cap (degrees)
    pub max_surface_tilt_deg: f32,
    /// Glass rotation per degree of left-right tilt
    pub glass_sway_factor: f32,
    /// Per-frame chance of a splash burst while drinking (0-1)
    pub splash_chance: f32,
    /// Smallest splash burst
    pub splash_min_particles: u32,
    /// Extra particles a burst may add
    pub splash_extra_particles: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            capacity_ml: CAPACITY_ML,
            drink_threshold_deg: DRINK_THRESHOLD_DEG,
            drink_rate_divisor: DRINK_RATE_DIVISOR,
            max_drink_rate: MAX_DRINK_RATE,
            surface_tilt_divisor: SURFACE_TILT_DIVISOR,
            max_surface_tilt_deg: MAX_SURFACE_TILT_DEG,
            glass_sway_factor: GLASS_SWAY_FACTOR,
            splash_chance: SPLASH_CHANCE,
            splash_min_particles: SPLASH_MIN_PARTICLES,
            splash_extra_particles: SPLASH_EXTRA_PARTICLES,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.capacity_ml == 0 {
            return Err(TuningError::Invalid("capacity_ml must be positive".into()));
        }
        if !(self.drink_threshold_deg < 0.0 && self.drink_threshold_deg > -180.0) {
            return Err(TuningError::Invalid(format!(
                "drink_threshold_deg must be in (-180, 0), got {}",
                self.drink_threshold_deg
            )));
        }
        if !(self.drink_rate_divisor > 0.0) || !(self.surface_tilt_divisor > 0.0) {
            return Err(TuningError::Invalid("divisors must be positive".into()));
        }
        if !(self.max_drink_rate >= 0.0) || !(self.max_surface_tilt_deg >= 0.0) {
            return Err(TuningError::Invalid("caps must not be negative".into()));
        }
        if !self.glass_sway_factor.is_finite() {
            return Err(TuningError::Invalid(format!(
                "glass_sway_factor must be finite, got {}",
                self.glass_sway_factor
            )));
        }
        let burst = self
            .splash_min_particles
            .saturating_add(self.splash_extra_particles);
        if burst > MAX_SPLASH_BURST {
            return Err(TuningError::Invalid(format!(
                "splash burst of up to {} exceeds {}",
                burst, MAX_SPLASH_BURST
            )));
        }
        if !(0.0..=1.0).contains(&self.splash_chance) {
            return Err(TuningError::Invalid(format!(
                "splash_chance must be in [0, 1], got {}",
                self.splash_chance
            )));
        }
        Ok(())
    }

    /// Tilt magnitude at which drinking starts (degrees, positive)
    #[inline]
    pub fn threshold_magnitude(&self) -> f32 {
        self.drink_threshold_deg.abs()
    }
}
