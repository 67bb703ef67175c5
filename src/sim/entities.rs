//! Entity models and their per-tick update rules
//!
//! Every entity carries an `alive` flag. Updates and the collision resolver
//! only ever clear it; dead entities are compacted out of their collections
//! once per tick by `GameState::purge`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Mask, point_in_world};

/// Axial direction the player (and its projectiles) can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Unit step in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::NEG_Y,
            Facing::Down => Vec2::Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }

    /// Counter-clockwise sprite rotation in degrees, relative to an up-facing sprite
    pub fn rotation_degrees(self) -> f32 {
        match self {
            Facing::Up => 0.0,
            Facing::Down => 180.0,
            Facing::Left => 90.0,
            Facing::Right => -90.0,
        }
    }

    /// Whether a quarter turn swaps the sprite's width and height
    #[inline]
    pub fn is_sideways(self) -> bool {
        matches!(self, Facing::Left | Facing::Right)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Hazard lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardPhase {
    /// Telegraphed, not collidable
    Warning { remaining: u32 },
    /// Collidable
    Active,
}

/// A stationary destructible obstacle
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub bounds: Aabb,
    pub phase: HazardPhase,
    /// Ticks until expiry, counted from creation regardless of phase
    pub lifetime: u32,
    pub hits_remaining: u32,
    /// Overlapped the player's spawn rectangle when created
    pub covers_spawn: bool,
    pub mask: Mask,
    pub alive: bool,
}

impl Hazard {
    pub fn new(
        id: u32,
        bounds: Aabb,
        warning_ticks: u32,
        lifetime: u32,
        hit_count: u32,
        spawn_rect: &Aabb,
        mask: Mask,
    ) -> Self {
        let phase = if warning_ticks == 0 {
            HazardPhase::Active
        } else {
            HazardPhase::Warning {
                remaining: warning_ticks,
            }
        };
        Self {
            id,
            bounds,
            phase,
            lifetime,
            hits_remaining: hit_count,
            covers_spawn: bounds.overlaps(spawn_rect),
            mask,
            alive: true,
        }
    }

    #[inline]
    pub fn warning_active(&self) -> bool {
        matches!(self.phase, HazardPhase::Warning { .. })
    }

    /// Alive and past its warning phase
    #[inline]
    pub fn is_collidable(&self) -> bool {
        self.alive && !self.warning_active()
    }

    /// Advance the warning countdown and the lifetime by one tick
    ///
    /// Returns true when the hazard expired this tick.
    pub fn advance(&mut self) -> bool {
        if let HazardPhase::Warning { remaining } = &mut self.phase {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.phase = HazardPhase::Active;
            }
        }

        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }

    /// Register one projectile hit; returns true when this hit destroyed it
    pub fn take_hit(&mut self) -> bool {
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        if self.hits_remaining == 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// A shot fired by the player along one axis
#[derive(Debug, Clone)]
pub struct PlayerProjectile {
    pub id: u32,
    pub bounds: Aabb,
    pub facing: Facing,
    pub speed: f32,
    pub alive: bool,
}

impl PlayerProjectile {
    pub fn new(id: u32, bounds: Aabb, facing: Facing, speed: f32) -> Self {
        Self {
            id,
            bounds,
            facing,
            speed,
            alive: true,
        }
    }

    /// Move one tick; dies as soon as its position leaves the world
    pub fn advance(&mut self, world_size: Vec2) {
        self.bounds.pos += self.facing.unit() * self.speed;
        if !point_in_world(self.bounds.pos, world_size.x, world_size.y) {
            self.alive = false;
        }
    }
}

/// Purely visual blast left behind by a destroyed target
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: u32,
    pub bounds: Aabb,
    pub lifetime: u32,
    pub alive: bool,
}

impl Explosion {
    /// Explosion of `size` centered on `center`
    pub fn centered(id: u32, center: Vec2, size: f32, lifetime: u32) -> Self {
        Self {
            id,
            bounds: Aabb::centered_at(center, Vec2::splat(size)),
            lifetime,
            alive: lifetime > 0,
        }
    }

    pub fn advance(&mut self) {
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            self.alive = false;
        }
    }
}

/// Hostile craft that periodically fires at the player
#[derive(Debug, Clone)]
pub struct EnemyCraft {
    pub id: u32,
    pub bounds: Aabb,
    pub lifetime: u32,
    pub hits_remaining: u32,
    pub fire_timer: u32,
    pub alive: bool,
}

/// What happened to a craft during its update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CraftUpdate {
    /// Muzzle point when the craft fired this tick
    pub fired_from: Option<Vec2>,
    pub expired: bool,
}

impl EnemyCraft {
    pub fn new(id: u32, bounds: Aabb, lifetime: u32, hit_count: u32) -> Self {
        Self {
            id,
            bounds,
            lifetime,
            hits_remaining: hit_count,
            fire_timer: 0,
            alive: true,
        }
    }

    /// Count down the lifetime and the fire timer
    ///
    /// A craft may still fire on the tick it expires.
    pub fn advance(&mut self, fire_interval: u32) -> CraftUpdate {
        let mut update = CraftUpdate::default();

        self.lifetime = self.lifetime.saturating_sub(1);
        self.fire_timer += 1;
        if self.fire_timer >= fire_interval {
            self.fire_timer = 0;
            update.fired_from = Some(self.bounds.center());
        }

        if self.lifetime == 0 && self.alive {
            self.alive = false;
            update.expired = true;
        }
        update
    }

    /// Register one projectile hit; returns true when this hit destroyed it
    pub fn take_hit(&mut self) -> bool {
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        if self.hits_remaining == 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Shot fired by an enemy craft; its heading is fixed at creation
#[derive(Debug, Clone)]
pub struct EnemyProjectile {
    pub id: u32,
    pub bounds: Aabb,
    /// Unit heading
    pub dir: Vec2,
    pub speed: f32,
    pub alive: bool,
}

impl EnemyProjectile {
    /// Projectile at `origin` heading toward `target` as it is right now
    ///
    /// The target is captured by value; a degenerate zero-length aim falls
    /// back to heading straight down.
    pub fn aimed(id: u32, origin: Vec2, target: Vec2, size: f32, speed: f32) -> Self {
        let dir = (target - origin).try_normalize().unwrap_or(Vec2::Y);
        Self {
            id,
            bounds: Aabb::new(origin, Vec2::splat(size)),
            dir,
            speed,
            alive: true,
        }
    }

    pub fn advance(&mut self, world_size: Vec2) {
        self.bounds.pos += self.dir * self.speed;
        if !point_in_world(self.bounds.pos, world_size.x, world_size.y) {
            self.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_spawn() -> Aabb {
        Aabb::from_xywh(1000.0, 1000.0, 10.0, 10.0)
    }

    fn hazard(warning: u32, lifetime: u32, hits: u32) -> Hazard {
        let bounds = Aabb::from_xywh(0.0, 0.0, 100.0, 100.0);
        Hazard::new(1, bounds, warning, lifetime, hits, &far_spawn(), Mask::filled(100, 100))
    }

    #[test]
    fn test_hazard_warning_ends_after_duration() {
        let mut h = hazard(100, 900, 8);
        for _ in 0..99 {
            h.advance();
            assert!(h.warning_active());
        }
        h.advance();
        assert!(!h.warning_active());
        assert!(h.is_collidable());
    }

    #[test]
    fn test_hazard_zero_warning_starts_active() {
        let h = hazard(0, 900, 8);
        assert!(!h.warning_active());
    }

    #[test]
    fn test_hazard_expires_in_any_phase() {
        let mut h = hazard(100, 50, 8);
        for _ in 0..49 {
            assert!(!h.advance());
        }
        assert!(h.advance());
        assert!(!h.alive);
        assert!(h.warning_active());
    }

    #[test]
    fn test_hazard_hits_count_down() {
        let mut h = hazard(0, 900, 3);
        assert!(!h.take_hit());
        assert!(!h.take_hit());
        assert_eq!(h.hits_remaining, 1);
        assert!(h.take_hit());
        assert!(!h.alive);
    }

    #[test]
    fn test_hazard_records_spawn_cover() {
        let spawn = Aabb::from_xywh(50.0, 50.0, 90.0, 90.0);
        let h = Hazard::new(
            1,
            Aabb::from_xywh(0.0, 0.0, 100.0, 100.0),
            10,
            900,
            8,
            &spawn,
            Mask::filled(100, 100),
        );
        assert!(h.covers_spawn);
        assert!(!hazard(10, 900, 8).covers_spawn);
    }

    #[test]
    fn test_player_projectile_leaves_world() {
        let world = Vec2::new(800.0, 600.0);
        let mut p = PlayerProjectile::new(1, Aabb::from_xywh(5.0, 300.0, 10.0, 10.0), Facing::Left, 10.0);
        p.advance(world);
        assert!(!p.alive, "crossed x = 0 this tick");

        let mut q = PlayerProjectile::new(2, Aabb::from_xywh(400.0, 300.0, 10.0, 10.0), Facing::Up, 10.0);
        q.advance(world);
        assert!(q.alive);
        assert_eq!(q.bounds.pos, Vec2::new(400.0, 290.0));
    }

    #[test]
    fn test_explosion_lifetime() {
        let mut e = Explosion::centered(1, Vec2::new(100.0, 100.0), 64.0, 30);
        assert_eq!(e.bounds.pos, Vec2::new(68.0, 68.0));
        for _ in 0..29 {
            e.advance();
            assert!(e.alive);
        }
        e.advance();
        assert!(!e.alive);
    }

    #[test]
    fn test_craft_fires_on_interval() {
        let mut c = EnemyCraft::new(1, Aabb::from_xywh(0.0, 0.0, 90.0, 90.0), 420, 3);
        let fired: Vec<u32> = (1..=180)
            .filter(|_| c.advance(60).fired_from.is_some())
            .collect();
        assert_eq!(fired.len(), 3);
        assert_eq!(c.fire_timer, 0);
    }

    #[test]
    fn test_craft_expires_and_fires_from_center() {
        let mut c = EnemyCraft::new(1, Aabb::from_xywh(10.0, 20.0, 90.0, 90.0), 2, 3);
        let first = c.advance(2);
        assert!(!first.expired);
        let second = c.advance(2);
        assert!(second.expired);
        assert_eq!(second.fired_from, Some(Vec2::new(55.0, 65.0)));
        assert!(!c.alive);
    }

    #[test]
    fn test_enemy_projectile_heading_is_fixed() {
        let mut p = EnemyProjectile::aimed(1, Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 10.0, 5.0);
        assert!((p.dir - Vec2::new(0.6, 0.8)).length() < 1e-5);
        p.advance(Vec2::new(800.0, 600.0));
        assert!((p.bounds.pos - Vec2::new(3.0, 4.0)).length() < 1e-4);
        p.advance(Vec2::new(800.0, 600.0));
        assert!((p.bounds.pos - Vec2::new(6.0, 8.0)).length() < 1e-4);
    }

    #[test]
    fn test_rotation_matches_facing() {
        // Counter-clockwise degrees carry the up-facing sprite onto `unit()`
        for facing in Facing::ALL {
            let r = facing.rotation_degrees().to_radians();
            let turned = Vec2::from_angle(-r).rotate(Vec2::NEG_Y);
            assert!((turned - facing.unit()).length() < 1e-5, "{:?}", facing);
        }
        assert_eq!(Facing::Up.rotation_degrees(), 0.0);
        assert_eq!(Facing::Down.rotation_degrees().abs(), 180.0);
    }

    #[test]
    fn test_enemy_projectile_degenerate_aim() {
        let p = EnemyProjectile::aimed(1, Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 10.0, 5.0);
        assert_eq!(p.dir, Vec2::Y);
    }
}
