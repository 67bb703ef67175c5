//! Collision resolver
//!
//! Runs once per tick after every entity has moved, in a fixed precedence:
//! 1. player projectiles vs. hazards, then enemy craft
//! 2. enemy projectiles vs. hazards
//! 3. enemy projectiles vs. the player (rotated box)
//! 4. active hazards vs. the player (pixel masks)
//!
//! The player takes at most one damaging hit per tick; the first overlap in
//! that order (creation order within a collection) wins and the rest are left
//! for later ticks.

use glam::Vec2;

use super::entities::Explosion;
use super::geometry::mask_offset;
use super::state::{GameEvent, GameState};

/// What a player projectile struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitTarget {
    Hazard(usize),
    Craft(usize),
}

/// Source of the damage the player took this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    EnemyProjectile { id: u32 },
    Hazard { id: u32 },
}

/// Resolve every interaction for the current tick
pub fn resolve(state: &mut GameState) -> Option<DamageSource> {
    resolve_player_fire(state);
    resolve_enemy_fire_vs_hazards(state);
    resolve_player_damage(state)
}

/// Each live projectile registers at most one hit: hazards first, then craft
fn resolve_player_fire(state: &mut GameState) {
    let mut blasts: Vec<Vec2> = Vec::new();

    for projectile in state.projectiles.iter_mut().filter(|p| p.alive) {
        let hazard = state
            .hazards
            .iter()
            .position(|h| h.is_collidable() && h.bounds.overlaps(&projectile.bounds))
            .map(HitTarget::Hazard);
        let target = hazard.or_else(|| {
            state
                .crafts
                .iter()
                .position(|c| c.alive && c.bounds.overlaps(&projectile.bounds))
                .map(HitTarget::Craft)
        });

        let Some(target) = target else {
            continue;
        };
        projectile.alive = false;

        match target {
            HitTarget::Hazard(i) => {
                let hazard = &mut state.hazards[i];
                let destroyed = hazard.take_hit();
                state.events.push(GameEvent::HazardHit {
                    id: hazard.id,
                    hits_remaining: hazard.hits_remaining,
                });
                if destroyed {
                    log::debug!("Hazard {} destroyed", hazard.id);
                    state.events.push(GameEvent::HazardDestroyed { id: hazard.id });
                    blasts.push(hazard.bounds.center());
                }
            }
            HitTarget::Craft(i) => {
                let craft = &mut state.crafts[i];
                let destroyed = craft.take_hit();
                state.events.push(GameEvent::CraftHit {
                    id: craft.id,
                    hits_remaining: craft.hits_remaining,
                });
                if destroyed {
                    state.player.score += 1;
                    log::debug!("Craft {} destroyed, score {}", craft.id, state.player.score);
                    state.events.push(GameEvent::CraftDestroyed { id: craft.id });
                    blasts.push(craft.bounds.center());
                }
            }
        }
    }

    let size = state.config.explosion.size;
    let lifetime = state.config.explosion.lifetime_ticks;
    for center in blasts {
        let id = state.next_entity_id();
        let explosion = Explosion::centered(id, center, size, lifetime);
        state.events.push(GameEvent::Explosion {
            pos: explosion.bounds.pos,
        });
        state.explosions.push(explosion);
    }
}

/// Active hazards absorb enemy fire without taking damage
fn resolve_enemy_fire_vs_hazards(state: &mut GameState) {
    for projectile in state.enemy_projectiles.iter_mut().filter(|p| p.alive) {
        if state
            .hazards
            .iter()
            .any(|h| h.is_collidable() && h.bounds.overlaps(&projectile.bounds))
        {
            projectile.alive = false;
        }
    }
}

fn resolve_player_damage(state: &mut GameState) -> Option<DamageSource> {
    let player_box = state.player.rotated_bounds();

    let shot = state
        .enemy_projectiles
        .iter()
        .position(|p| p.alive && p.bounds.overlaps(&player_box));
    if let Some(i) = shot {
        let projectile = &mut state.enemy_projectiles[i];
        projectile.alive = false;
        let id = projectile.id;
        state.damage_player();
        return Some(DamageSource::EnemyProjectile { id });
    }

    let mask = state.player_mask();
    let hit = state.hazards.iter().position(|h| {
        h.is_collidable()
            && h.bounds.overlaps(&player_box)
            && mask.overlaps(&h.mask, mask_offset(&player_box, &h.bounds))
    })?;

    let (id, covers_spawn) = (state.hazards[hit].id, state.hazards[hit].covers_spawn);
    state.damage_player();
    if covers_spawn {
        // Would otherwise keep hitting the player at the start point
        state.hazards[hit].alive = false;
        log::debug!("Hazard {} cleared from spawn point", id);
        state.events.push(GameEvent::HazardCleared { id });
    }
    Some(DamageSource::Hazard { id })
}
