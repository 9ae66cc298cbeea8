//! Error types
//!
//! Nothing here is fatal: sensor errors degrade the session to a tilt-less
//! glass, tuning errors fall back to defaults at the call site.

use thiserror::Error;

/// Failure to get orientation samples from the device
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("Device orientation sensors are not supported")]
    Unsupported,
    #[error("Permission to use motion sensors was denied")]
    PermissionDenied,
    #[error("Sensor permission request failed: {0}")]
    Request(String),
}

impl SensorError {
    /// Message shown to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            SensorError::Unsupported => "Your device does not support motion sensors",
            SensorError::PermissionDenied => "Motion sensor permission is required to drink!",
            SensorError::Request(_) => {
                "Could not start the sensors. Please try on a real iPhone or Android phone."
            }
        }
    }
}

/// Failure to load or validate a `Tuning`
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid tuning: {0}")]
    Invalid(String),
}
