//! Per-frame draw list
//!
//! Layering (back to front): background, hazards, player shots, explosions,
//! enemy craft, player, enemy shots, HUD, damage flash.

use glam::Vec2;

use crate::sim::entities::{Facing, Hazard};
use crate::sim::geometry::Aabb;
use crate::sim::state::GameState;

/// Warning sprites are drawn at this opacity (128 / 255)
const WARNING_ALPHA: f32 = 128.0 / 255.0;
/// Damage flash overlay opacity (20 / 255)
const FLASH_ALPHA: f32 = 20.0 / 255.0;
/// Largest cosmetic shake applied to warning sprites, in pixels
const WARNING_JITTER: i64 = 5;

const HEART_SIZE: f32 = 32.0;
const HEART_SPACING: f32 = 40.0;
const HUD_MARGIN: f32 = 10.0;
const SCORE_LABEL_WIDTH: f32 = 150.0;
const SCORE_LABEL_HEIGHT: f32 = 36.0;

/// Draw order, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Hazards,
    PlayerProjectiles,
    Explosions,
    EnemyCraft,
    Player,
    EnemyProjectiles,
    Hud,
    Overlay,
}

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    Background,
    /// Telegraphed hazard (half size, translucent, shaking)
    HazardWarning,
    Hazard,
    PlayerProjectile,
    Explosion,
    EnemyCraft,
    /// Player boat, rotated to its facing
    Player { facing: Facing },
    EnemyProjectile,
    Heart,
    /// Rendered by the font collaborator
    ScoreLabel { score: u32 },
    Flash,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub layer: Layer,
    pub sprite: Sprite,
    pub bounds: Aabb,
    pub alpha: f32,
}

impl DrawItem {
    fn opaque(layer: Layer, sprite: Sprite, bounds: Aabb) -> Self {
        Self {
            layer,
            sprite,
            bounds,
            alpha: 1.0,
        }
    }
}

/// Cosmetic shake for a warning sprite; derived from id and tick so it never
/// touches the simulation RNG
fn warning_jitter(id: u32, tick: u64) -> f32 {
    let h = (id as u64)
        .wrapping_mul(2_654_435_761)
        .wrapping_add(tick.wrapping_mul(40_503));
    let span = (2 * WARNING_JITTER + 1) as u64;
    ((h % span) as i64 - WARNING_JITTER) as f32
}

fn hazard_item(hazard: &Hazard, tick: u64) -> DrawItem {
    if hazard.warning_active() {
        let shake = warning_jitter(hazard.id, tick);
        let size = (hazard.bounds.size / 2.0).floor();
        let pos = hazard.bounds.pos + (hazard.bounds.size / 4.0).floor() + Vec2::splat(shake);
        DrawItem {
            layer: Layer::Hazards,
            sprite: Sprite::HazardWarning,
            bounds: Aabb::new(pos, size),
            alpha: WARNING_ALPHA,
        }
    } else {
        DrawItem::opaque(Layer::Hazards, Sprite::Hazard, hazard.bounds)
    }
}

/// Build the ordered draw list for the current frame
pub fn build_scene(state: &GameState) -> Vec<DrawItem> {
    let world = state.config.world_bounds();
    let mut items = Vec::with_capacity(state.entity_count() + 16);

    items.push(DrawItem::opaque(Layer::Background, Sprite::Background, world));

    items.extend(state.hazards.iter().map(|h| hazard_item(h, state.time_ticks)));
    items.extend(state.projectiles.iter().map(|p| {
        DrawItem::opaque(Layer::PlayerProjectiles, Sprite::PlayerProjectile, p.bounds)
    }));
    items.extend(
        state
            .explosions
            .iter()
            .map(|e| DrawItem::opaque(Layer::Explosions, Sprite::Explosion, e.bounds)),
    );
    items.extend(
        state
            .crafts
            .iter()
            .map(|c| DrawItem::opaque(Layer::EnemyCraft, Sprite::EnemyCraft, c.bounds)),
    );

    items.push(DrawItem::opaque(
        Layer::Player,
        Sprite::Player {
            facing: state.player.facing,
        },
        state.player.rotated_bounds(),
    ));

    items.extend(state.enemy_projectiles.iter().map(|p| {
        DrawItem::opaque(Layer::EnemyProjectiles, Sprite::EnemyProjectile, p.bounds)
    }));

    // HUD
    for i in 0..state.player.lives {
        let pos = Vec2::new(HUD_MARGIN + i as f32 * HEART_SPACING, HUD_MARGIN);
        items.push(DrawItem::opaque(
            Layer::Hud,
            Sprite::Heart,
            Aabb::new(pos, Vec2::splat(HEART_SIZE)),
        ));
    }
    items.push(DrawItem::opaque(
        Layer::Hud,
        Sprite::ScoreLabel {
            score: state.player.score,
        },
        Aabb::from_xywh(
            world.max().x - SCORE_LABEL_WIDTH,
            HUD_MARGIN,
            SCORE_LABEL_WIDTH - HUD_MARGIN,
            SCORE_LABEL_HEIGHT,
        ),
    ));

    if state.flash_ticks > 0 {
        items.push(DrawItem {
            layer: Layer::Overlay,
            sprite: Sprite::Flash,
            bounds: world,
            alpha: FLASH_ALPHA,
        });
    }

    items
}
