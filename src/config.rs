//! World configuration
//!
//! Every gameplay constant lives here so the simulation never hardcodes
//! tuning. Loaded from JSON; missing keys fall back to the defaults, which
//! reproduce the stock arcade balance.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_RATE;
use crate::sim::geometry::Aabb;

/// Configuration loading/validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Silhouette used for a sprite's collision mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskShape {
    /// Opaque rectangle
    Rect,
    /// Triangle with apex at top center
    Mountain,
    /// Tapered boat hull pointing up
    Hull,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSection {
    pub width: u32,
    pub height: u32,
    /// Ticks per second
    pub tick_rate: u32,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
            tick_rate: TICK_RATE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: u32,
    pub height: u32,
    /// Pixels per tick
    pub speed: f32,
    pub shape: MaskShape,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 90,
            height: 90,
            speed: 5.0,
            shape: MaskShape::Hull,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Smallest width/height (each dimension drawn independently)
    pub min_size: u32,
    pub max_size: u32,
    pub hit_count: u32,
    pub lifetime_ticks: u32,
    pub warning_ticks: u32,
    pub spawn_interval: u32,
    /// Rejection-sampling attempts before accepting an overlapping spot
    pub placement_attempts: u32,
    pub shape: MaskShape,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            min_size: 100,
            max_size: 150,
            hit_count: 8,
            lifetime_ticks: 900,
            warning_ticks: 100,
            spawn_interval: 110,
            placement_attempts: 100,
            shape: MaskShape::Mountain,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub size: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            size: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub size: f32,
    pub lifetime_ticks: u32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            size: 64.0,
            lifetime_ticks: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftConfig {
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
    pub lifetime_ticks: u32,
    pub hit_count: u32,
    /// Ticks between shots
    pub fire_interval: u32,
    pub spawn_interval: u32,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 90,
            height: 90,
            lifetime_ticks: 420,
            hit_count: 3,
            fire_interval: 60,
            spawn_interval: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyProjectileConfig {
    pub speed: f32,
    pub size: f32,
}

impl Default for EnemyProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            size: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_lives: u32,
    /// Score that wins the run
    pub win_score: u32,
    /// Whether the player may shoot at all
    pub player_fire: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_lives: 5,
            win_score: 10,
            player_fire: true,
        }
    }
}

/// Durations handed to the presentation layer; never block the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Red damage flash
    pub flash_ticks: u32,
    /// How long a win/lose banner is held
    pub outcome_hold_ticks: u32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            flash_ticks: 24,
            outcome_hold_ticks: 120,
        }
    }
}

/// Complete world tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub world: WorldSection,
    pub player: PlayerConfig,
    pub hazard: HazardConfig,
    pub projectile: ProjectileConfig,
    pub explosion: ExplosionConfig,
    pub craft: CraftConfig,
    pub enemy_projectile: EnemyProjectileConfig,
    pub rules: RulesConfig,
    pub presentation: PresentationConfig,
    /// Run seed; a random one is picked when absent
    pub seed: Option<u64>,
}

impl WorldConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, msg: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(msg.to_string()))
            }
        }

        let (w, h) = (self.world.width, self.world.height);
        check(w > 0 && h > 0, "world size must be non-zero")?;
        check(self.world.tick_rate > 0, "tick_rate must be non-zero")?;

        check(
            self.player.width > 0 && self.player.height > 0,
            "player size must be non-zero",
        )?;
        check(
            self.player.width <= w && self.player.height <= h,
            "player does not fit in the world",
        )?;
        check(self.player.speed > 0.0, "player speed must be positive")?;

        check(self.hazard.min_size > 0, "hazard min_size must be non-zero")?;
        check(
            self.hazard.min_size <= self.hazard.max_size,
            "hazard min_size exceeds max_size",
        )?;
        check(
            self.hazard.max_size <= w && self.hazard.max_size <= h,
            "hazard max_size does not fit in the world",
        )?;
        check(self.hazard.hit_count > 0, "hazard hit_count must be non-zero")?;
        check(
            self.hazard.spawn_interval > 0,
            "hazard spawn_interval must be non-zero",
        )?;
        check(
            self.hazard.placement_attempts > 0,
            "hazard placement_attempts must be non-zero",
        )?;

        check(
            self.projectile.speed > 0.0 && self.projectile.size > 0.0,
            "projectile speed and size must be positive",
        )?;
        check(
            self.enemy_projectile.speed > 0.0 && self.enemy_projectile.size > 0.0,
            "enemy projectile speed and size must be positive",
        )?;
        check(self.explosion.size > 0.0, "explosion size must be positive")?;

        check(
            self.craft.width > 0 && self.craft.height > 0,
            "craft size must be non-zero",
        )?;
        check(
            self.craft.width <= w && self.craft.height <= h,
            "craft does not fit in the world",
        )?;
        check(self.craft.hit_count > 0, "craft hit_count must be non-zero")?;
        check(
            self.craft.fire_interval > 0,
            "craft fire_interval must be non-zero",
        )?;
        check(
            self.craft.spawn_interval > 0,
            "craft spawn_interval must be non-zero",
        )?;

        check(self.rules.starting_lives > 0, "starting_lives must be non-zero")?;
        check(self.rules.win_score > 0, "win_score must be non-zero")?;
        Ok(())
    }

    /// Seconds per tick
    #[inline]
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.world.tick_rate as f32
    }

    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world.width as f32, self.world.height as f32)
    }

    pub fn world_bounds(&self) -> Aabb {
        Aabb::new(Vec2::ZERO, self.world_size())
    }

    #[inline]
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player.width as f32, self.player.height as f32)
    }

    /// Top-left of the player box when centered in the world (whole pixels)
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            (self.world.width / 2).saturating_sub(self.player.width / 2) as f32,
            (self.world.height / 2).saturating_sub(self.player.height / 2) as f32,
        )
    }

    /// Rectangle the player occupies at spawn
    pub fn spawn_rect(&self) -> Aabb {
        Aabb::new(self.player_start(), self.player_size())
    }
}
