//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order, by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FixedTimestep;
pub use collision::{DamageSource, resolve};
pub use entities::{EnemyCraft, EnemyProjectile, Explosion, Facing, Hazard, HazardPhase, PlayerProjectile};
pub use geometry::{Aabb, Mask};
pub use input::{InputSampler, KeyState};
pub use player::PlayerActor;
pub use spawn::SpawnScheduler;
pub use state::{GameEvent, GamePhase, GameState, Hud};
pub use tick::{TickInput, tick};
