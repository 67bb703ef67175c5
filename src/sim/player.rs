//! The player-controlled boat

use glam::Vec2;

use super::entities::Facing;
use super::geometry::Aabb;
use super::tick::TickInput;

/// Player actor: position, facing, lives and score
#[derive(Debug, Clone)]
pub struct PlayerActor {
    /// Top-left of the unrotated box
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Pixels per tick
    pub speed: f32,
    pub lives: u32,
    pub score: u32,
    /// Where the actor returns after taking damage
    pub start: Vec2,
}

impl PlayerActor {
    pub fn new(start: Vec2, size: Vec2, speed: f32, lives: u32) -> Self {
        Self {
            pos: start,
            size,
            facing: Facing::default(),
            speed,
            lives,
            score: 0,
            start,
        }
    }

    /// Unrotated box at the current position
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Box of the sprite rotated to the current facing, sharing its center
    pub fn rotated_bounds(&self) -> Aabb {
        let size = if self.facing.is_sideways() {
            Vec2::new(self.size.y, self.size.x)
        } else {
            self.size
        };
        Aabb::centered_at(self.bounds().center(), size)
    }

    /// Apply one tick of directional input inside a `world` sized area
    ///
    /// Keys are evaluated left, right, up, down; each one that can still move
    /// turns the boat, so the last such key decides the facing.
    pub fn apply_input(&mut self, input: &TickInput, world: Vec2) {
        let max = world - self.size;

        if input.left && self.pos.x > 0.0 {
            self.facing = Facing::Left;
            self.pos.x -= self.speed;
        }
        if input.right && self.pos.x < max.x {
            self.facing = Facing::Right;
            self.pos.x += self.speed;
        }
        if input.up && self.pos.y > 0.0 {
            self.facing = Facing::Up;
            self.pos.y -= self.speed;
        }
        if input.down && self.pos.y < max.y {
            self.facing = Facing::Down;
            self.pos.y += self.speed;
        }

        self.pos = self.pos.clamp(Vec2::ZERO, max.max(Vec2::ZERO));
    }

    /// Damage-and-reset: lose a life and return to the start position
    pub fn take_damage(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.pos = self.start;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(800.0, 600.0);

    fn player() -> PlayerActor {
        PlayerActor::new(Vec2::new(355.0, 255.0), Vec2::new(90.0, 90.0), 5.0, 3)
    }

    #[test]
    fn test_move_sets_facing() {
        let mut p = player();
        p.apply_input(
            &TickInput {
                up: true,
                ..Default::default()
            },
            WORLD,
        );
        assert_eq!(p.pos, Vec2::new(355.0, 250.0));
        assert_eq!(p.facing, Facing::Up);
    }

    #[test]
    fn test_last_moving_key_wins_facing() {
        let mut p = player();
        p.apply_input(
            &TickInput {
                left: true,
                down: true,
                ..Default::default()
            },
            WORLD,
        );
        assert_eq!(p.pos, Vec2::new(350.0, 260.0));
        assert_eq!(p.facing, Facing::Down);
    }

    #[test]
    fn test_clamped_to_world() {
        let mut p = player();
        p.pos = Vec2::new(3.0, 508.0);
        p.apply_input(
            &TickInput {
                left: true,
                down: true,
                ..Default::default()
            },
            WORLD,
        );
        assert_eq!(p.pos, Vec2::new(0.0, 510.0));

        // Pressing into a wall neither moves nor turns
        p.facing = Facing::Up;
        p.apply_input(
            &TickInput {
                left: true,
                ..Default::default()
            },
            WORLD,
        );
        assert_eq!(p.pos.x, 0.0);
        assert_eq!(p.facing, Facing::Up);
    }

    #[test]
    fn test_rotated_bounds_swap_for_sideways() {
        let mut p = PlayerActor::new(Vec2::new(100.0, 100.0), Vec2::new(40.0, 80.0), 5.0, 3);
        p.facing = Facing::Up;
        assert_eq!(p.rotated_bounds(), p.bounds());
        p.facing = Facing::Left;
        let r = p.rotated_bounds();
        assert_eq!(r.size, Vec2::new(80.0, 40.0));
        assert_eq!(r.center(), p.bounds().center());
    }

    #[test]
    fn test_damage_resets_position() {
        let mut p = player();
        p.pos = Vec2::new(10.0, 10.0);
        p.take_damage();
        assert_eq!(p.lives, 2);
        assert_eq!(p.pos, p.start);
    }
}
