//! Game state and core simulation types
//!
//! `GameState` is the whole world: it owns the player and every entity
//! collection, and is only ever mutated through `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{EnemyCraft, EnemyProjectile, Explosion, Facing, Hazard, PlayerProjectile};
use super::geometry::{Aabb, Mask};
use super::player::PlayerActor;
use super::spawn::SpawnScheduler;
use crate::config::WorldConfig;

/// Run phase; `Won` and `Lost` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Won,
    Lost,
}

impl GamePhase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Things that happened during a tick, for presentation and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    HazardSpawned { id: u32, bounds: Aabb },
    CraftSpawned { id: u32, bounds: Aabb },
    PlayerFired { id: u32, facing: Facing },
    EnemyFired { craft_id: u32, projectile_id: u32 },
    HazardHit { id: u32, hits_remaining: u32 },
    CraftHit { id: u32, hits_remaining: u32 },
    HazardDestroyed { id: u32 },
    /// Hazard sitting on the spawn point removed after hitting the player
    HazardCleared { id: u32 },
    CraftDestroyed { id: u32 },
    Explosion { pos: Vec2 },
    PlayerDamaged { lives: u32 },
    /// Full-screen damage flash
    Flash { ticks: u32 },
    /// Run ended; show the outcome banner for `hold_ticks`
    Finished { phase: GamePhase, hold_ticks: u32 },
}

/// Read-only indicators for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub lives: u32,
    pub score: u32,
    pub phase: GamePhase,
    pub ticks: u64,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: WorldConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: PlayerActor,
    /// Player collision masks indexed by `Facing::index`
    pub player_masks: [Mask; 4],
    pub scheduler: SpawnScheduler,
    /// Live collections, in creation order
    pub hazards: Vec<Hazard>,
    pub projectiles: Vec<PlayerProjectile>,
    pub explosions: Vec<Explosion>,
    pub crafts: Vec<EnemyCraft>,
    pub enemy_projectiles: Vec<EnemyProjectile>,
    /// Remaining ticks of the damage flash (visual only)
    pub flash_ticks: u32,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh run: player at the start point, nothing spawned yet
    ///
    /// Callers should run `WorldConfig::validate` first. An invalid config is
    /// logged and still runs, with oversized entities pinned to the world edge.
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Starting run with invalid config: {}", e);
        }
        let player = PlayerActor::new(
            config.player_start(),
            config.player_size(),
            config.player.speed,
            config.rules.starting_lives,
        );
        let base = Mask::from_shape(config.player.shape, config.player.width, config.player.height);
        let player_masks = Facing::ALL.map(|facing| base.rotated(facing));

        log::info!(
            "New run: seed {}, world {}x{}, {} lives, win at {}",
            seed,
            config.world.width,
            config.world.height,
            config.rules.starting_lives,
            config.rules.win_score
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Running,
            player,
            player_masks,
            scheduler: SpawnScheduler::default(),
            hazards: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            crafts: Vec::new(),
            enemy_projectiles: Vec::new(),
            flash_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn hud(&self) -> Hud {
        Hud {
            lives: self.player.lives,
            score: self.player.score,
            phase: self.phase,
            ticks: self.time_ticks,
        }
    }

    #[inline]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[inline]
    pub fn spawn_rect(&self) -> Aabb {
        self.config.spawn_rect()
    }

    /// Collision mask for the player's current facing
    #[inline]
    pub fn player_mask(&self) -> &Mask {
        &self.player_masks[self.player.facing.index()]
    }

    /// Damage-and-reset: flash, return to start, lose a life
    pub fn damage_player(&mut self) {
        self.player.take_damage();
        self.flash_ticks = self.config.presentation.flash_ticks;
        log::debug!("Player damaged, {} lives left", self.player.lives);
        self.events.push(GameEvent::Flash {
            ticks: self.flash_ticks,
        });
        self.events.push(GameEvent::PlayerDamaged {
            lives: self.player.lives,
        });
    }

    /// Drop every dead entity in one compaction pass
    pub fn purge(&mut self) {
        self.hazards.retain(|h| h.alive);
        self.projectiles.retain(|p| p.alive);
        self.explosions.retain(|e| e.alive);
        self.crafts.retain(|c| c.alive);
        self.enemy_projectiles.retain(|p| p.alive);
    }

    /// Live entity count across all collections
    pub fn entity_count(&self) -> usize {
        self.hazards.len()
            + self.projectiles.len()
            + self.explosions.len()
            + self.crafts.len()
            + self.enemy_projectiles.len()
    }
}
