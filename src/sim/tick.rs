//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is one
//! rendered frame: input, player, spawning, entity updates, collisions,
//! compaction, then the win/lose check.

use std::cmp::Ordering;

use glam::Vec2;

use super::collision;
use super::entities::{EnemyProjectile, PlayerProjectile};
use super::geometry::Aabb;
use super::spawn::{spawn_craft, spawn_hazard};
use super::state::{GameEvent, GamePhase, GameState};

/// Autopilot fires on every Nth tick while lined up with a target
const AUTOPILOT_FIRE_EVERY: u64 = 8;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire pressed this tick (edge, not held)
    pub fire: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // The run is over; nothing may move or collide any more
    if state.phase.is_terminal() {
        log::warn!("tick after run ended ({:?}), ignoring", state.phase);
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    state.flash_ticks = state.flash_ticks.saturating_sub(1);

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        *input
    };

    // Player movement and fire
    let world = state.config.world_size();
    state.player.apply_input(&input, world);
    if input.fire && state.config.rules.player_fire {
        fire_player_projectile(state);
    }

    // Spawning
    let due = state.scheduler.advance(&state.config);
    if due.hazard {
        let id = state.next_entity_id();
        let hazard = spawn_hazard(&mut state.rng, &state.config, &state.hazards, id);
        state.events.push(GameEvent::HazardSpawned {
            id,
            bounds: hazard.bounds,
        });
        state.hazards.push(hazard);
    }
    if due.craft {
        let id = state.next_entity_id();
        let craft = spawn_craft(&mut state.rng, &state.config, id);
        state.events.push(GameEvent::CraftSpawned {
            id,
            bounds: craft.bounds,
        });
        state.crafts.push(craft);
    }

    update_entities(state);

    if let Some(source) = collision::resolve(state) {
        log::trace!("Tick {}: player hit by {:?}", state.time_ticks, source);
    }

    state.purge();
    check_outcome(state);
}

/// Spawn a shot from the player's center along its facing
fn fire_player_projectile(state: &mut GameState) {
    let id = state.next_entity_id();
    let cfg = &state.config.projectile;
    let size = Vec2::splat(cfg.size);
    let bounds = Aabb::centered_at(state.player.bounds().center(), size);
    let facing = state.player.facing;
    state
        .projectiles
        .push(PlayerProjectile::new(id, bounds, facing, cfg.speed));
    state.events.push(GameEvent::PlayerFired { id, facing });
}

fn update_entities(state: &mut GameState) {
    let world = state.config.world_size();

    for hazard in &mut state.hazards {
        if hazard.advance() {
            log::trace!("Hazard {} expired", hazard.id);
        }
    }

    for projectile in &mut state.projectiles {
        projectile.advance(world);
    }

    for explosion in &mut state.explosions {
        explosion.advance();
    }

    // Crafts aim at wherever the player is right now
    let target = state.player.pos;
    let fire_interval = state.config.craft.fire_interval;
    let mut muzzles: Vec<(u32, Vec2)> = Vec::new();
    for craft in &mut state.crafts {
        let update = craft.advance(fire_interval);
        if let Some(origin) = update.fired_from {
            muzzles.push((craft.id, origin));
        }
        if update.expired {
            log::trace!("Craft {} expired", craft.id);
        }
    }

    let size = state.config.enemy_projectile.size;
    let speed = state.config.enemy_projectile.speed;
    for (craft_id, origin) in muzzles {
        let id = state.next_entity_id();
        state
            .enemy_projectiles
            .push(EnemyProjectile::aimed(id, origin, target, size, speed));
        state.events.push(GameEvent::EnemyFired {
            craft_id,
            projectile_id: id,
        });
    }

    for projectile in &mut state.enemy_projectiles {
        projectile.advance(world);
    }
}

/// Losing is checked before winning
fn check_outcome(state: &mut GameState) {
    let phase = if state.player.is_dead() {
        GamePhase::Lost
    } else if state.player.score >= state.config.rules.win_score {
        GamePhase::Won
    } else {
        return;
    };

    state.phase = phase;
    log::info!(
        "Run finished: {:?} after {} ticks (score {}, lives {})",
        phase,
        state.time_ticks,
        state.player.score,
        state.player.lives
    );
    state.events.push(GameEvent::Finished {
        phase,
        hold_ticks: state.config.presentation.outcome_hold_ticks,
    });
}

/// Synthesize input for idle/demo mode
///
/// Chases the nearest craft: line up on the cheaper axis, then steer at it so
/// the bow points its way and shoot. Heads home when nothing is out there.
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let me = state.player.bounds().center();

    let nearest = state.crafts.iter().filter(|c| c.alive).min_by(|a, b| {
        let da = a.bounds.center().distance_squared(me);
        let db = b.bounds.center().distance_squared(me);
        da.partial_cmp(&db).unwrap_or(Ordering::Equal)
    });

    let Some(craft) = nearest else {
        let home = state.player.start - state.player.pos;
        let step = state.player.speed;
        input.left = home.x < -step;
        input.right = home.x > step;
        input.up = home.y < -step;
        input.down = home.y > step;
        return input;
    };

    let d = craft.bounds.center() - me;
    let half = craft.bounds.size / 2.0;
    let in_column = d.x.abs() <= half.x;
    let in_row = d.y.abs() <= half.y;

    if in_column {
        input.up = d.y < 0.0;
        input.down = d.y >= 0.0;
    } else if in_row {
        input.left = d.x < 0.0;
        input.right = d.x >= 0.0;
    } else if d.x.abs() < d.y.abs() {
        input.left = d.x < 0.0;
        input.right = d.x >= 0.0;
    } else {
        input.up = d.y < 0.0;
        input.down = d.y >= 0.0;
    }

    input.fire = (in_column || in_row) && state.time_ticks % AUTOPILOT_FIRE_EVERY == 0;
    input
}
