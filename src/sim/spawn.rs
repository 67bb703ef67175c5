//! Spawn scheduler
//!
//! Two independent cadence counters decide when a hazard or an enemy craft
//! appears; the factories below place them with the run's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::entities::{EnemyCraft, Hazard};
use super::geometry::{Aabb, Mask};
use crate::config::WorldConfig;

/// Which factories fire this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDue {
    pub hazard: bool,
    pub craft: bool,
}

/// Tick counters for the two spawn cadences
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    pub hazard_timer: u32,
    pub craft_timer: u32,
}

impl SpawnScheduler {
    /// Count one tick; a counter that reaches its interval resets and
    /// reports a spawn
    pub fn advance(&mut self, config: &WorldConfig) -> SpawnDue {
        let mut due = SpawnDue::default();

        self.hazard_timer += 1;
        if self.hazard_timer >= config.hazard.spawn_interval {
            self.hazard_timer = 0;
            due.hazard = true;
        }

        if config.craft.enabled {
            self.craft_timer += 1;
            if self.craft_timer >= config.craft.spawn_interval {
                self.craft_timer = 0;
                due.craft = true;
            }
        }

        due
    }
}

/// Create a hazard whose box overlaps no live hazard
///
/// Rejection-samples size and position. After `placement_attempts` misses the
/// last candidate is accepted even though it overlaps. A hazard larger than
/// the world is pinned to the top-left edge instead of panicking; callers
/// are expected to run `WorldConfig::validate` first.
pub fn spawn_hazard(
    rng: &mut impl Rng,
    config: &WorldConfig,
    existing: &[Hazard],
    id: u32,
) -> Hazard {
    let cfg = &config.hazard;
    // An unvalidated config may invert the range
    let max_size = cfg.max_size.max(cfg.min_size);
    let mut attempts = 0;

    let (bounds, w, h) = loop {
        attempts += 1;
        let w = rng.random_range(cfg.min_size..=max_size);
        let h = rng.random_range(cfg.min_size..=max_size);
        let x = rng.random_range(0..=config.world.width.saturating_sub(w));
        let y = rng.random_range(0..=config.world.height.saturating_sub(h));
        let candidate = Aabb::from_xywh(x as f32, y as f32, w as f32, h as f32);

        let blocked = existing
            .iter()
            .filter(|other| other.alive)
            .any(|other| other.bounds.overlaps(&candidate));
        if !blocked {
            break (candidate, w, h);
        }
        if attempts >= cfg.placement_attempts {
            log::warn!(
                "Hazard {} placed overlapping after {} attempts ({} live hazards)",
                id,
                attempts,
                existing.len()
            );
            break (candidate, w, h);
        }
    };

    log::debug!(
        "Hazard {} spawned at ({}, {}) size {}x{}",
        id,
        bounds.pos.x,
        bounds.pos.y,
        w,
        h
    );

    Hazard::new(
        id,
        bounds,
        cfg.warning_ticks,
        cfg.lifetime_ticks,
        cfg.hit_count,
        &config.spawn_rect(),
        Mask::from_shape(cfg.shape, w, h),
    )
}

/// Create an enemy craft at a random spot inside the world
pub fn spawn_craft(rng: &mut impl Rng, config: &WorldConfig, id: u32) -> EnemyCraft {
    let cfg = &config.craft;
    let x = rng.random_range(0..=config.world.width.saturating_sub(cfg.width));
    let y = rng.random_range(0..=config.world.height.saturating_sub(cfg.height));
    let bounds = Aabb::new(
        Vec2::new(x as f32, y as f32),
        Vec2::new(cfg.width as f32, cfg.height as f32),
    );
    log::debug!("Craft {} spawned at ({}, {})", id, x, y);
    EnemyCraft::new(id, bounds, cfg.lifetime_ticks, cfg.hit_count)
}
