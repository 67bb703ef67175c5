//! Polled key state to per-tick input
//!
//! Direction keys are level-triggered (held keys keep moving the boat); the
//! fire key is edge-triggered so holding it fires only once.

use super::tick::TickInput;

/// Raw key state polled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Turns successive `KeyState` polls into `TickInput`
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    fire_was_down: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, keys: &KeyState) -> TickInput {
        let fire = keys.fire && !self.fire_was_down;
        self.fire_was_down = keys.fire;
        TickInput {
            up: keys.up,
            down: keys.down,
            left: keys.left,
            right: keys.right,
            fire,
            idle_mode: false,
        }
    }

    /// Forget the previous fire state (e.g. after focus loss)
    pub fn reset(&mut self) {
        self.fire_was_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut sampler = InputSampler::new();
        let held = KeyState {
            fire: true,
            ..Default::default()
        };
        assert!(sampler.sample(&held).fire);
        assert!(!sampler.sample(&held).fire);
        assert!(!sampler.sample(&held).fire);
        assert!(!sampler.sample(&KeyState::default()).fire);
        assert!(sampler.sample(&held).fire);
    }

    #[test]
    fn test_directions_are_held() {
        let mut sampler = InputSampler::new();
        let keys = KeyState {
            left: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..3 {
            let input = sampler.sample(&keys);
            assert!(input.left && input.up);
            assert!(!input.right && !input.down);
        }
    }

    #[test]
    fn test_reset_rearms_fire() {
        let mut sampler = InputSampler::new();
        let held = KeyState {
            fire: true,
            ..Default::default()
        };
        sampler.sample(&held);
        sampler.reset();
        assert!(sampler.sample(&held).fire);
    }
}
