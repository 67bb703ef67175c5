//! Boat Adventure - a top-down arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `config`: Data-driven world tuning loaded from JSON
//! - `renderer`: Draw list and vertex quads for a rendering backend

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, WorldConfig};

/// Fixed-step defaults
pub mod consts {
    /// Default simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock step fed into the accumulator (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;
}
