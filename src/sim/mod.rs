//! Session simulation module
//!
//! All drinking logic lives here. This module is pure:
//! - Time comes in as timestamps, never read from a clock
//! - Seeded RNG only
//! - No DOM, audio or platform dependencies

pub mod bubbles;
pub mod depletion;
pub mod orientation;
pub mod particle;
pub mod state;
pub mod tick;
pub mod visual;

pub use bubbles::{Bubble, generate_bubbles};
pub use depletion::{deplete, drink_rate};
pub use orientation::is_drinking_pose;
pub use particle::{Particle, Tint, advance_particles, burst_size, maybe_splash, spawn_burst};
pub use state::{Orientation, SensorStatus, SessionEvent, SessionPhase, SessionState};
pub use tick::tick;
pub use visual::{LevelBand, Readout, VisualTilt, visual_tilt};
