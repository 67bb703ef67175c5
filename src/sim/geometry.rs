//! Collision primitives: axis-aligned boxes and per-pixel masks
//!
//! Boxes are the cheap test used for nearly every pair. Masks exist for the
//! one precise test (player hull vs. active hazard) where a box would be far
//! too generous for irregular sprites.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Facing;
use crate::config::MaskShape;

/// Axis-aligned bounding box in world pixels (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    /// Box of `size` whose center sits at `center`
    pub fn centered_at(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Whether this box lies entirely inside `outer` (edges inclusive)
    pub fn is_inside(&self, outer: &Aabb) -> bool {
        let (min, max) = (self.min(), self.max());
        min.x >= outer.pos.x
            && min.y >= outer.pos.y
            && max.x <= outer.max().x
            && max.y <= outer.max().y
    }
}

/// Whether a point lies within `[0, width] x [0, height]`
#[inline]
pub fn point_in_world(p: Vec2, width: f32, height: f32) -> bool {
    p.x >= 0.0 && p.x <= width && p.y >= 0.0 && p.y <= height
}

/// Per-pixel opacity mask for a sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Build a mask by sampling `f(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Fully opaque rectangle
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Mountain silhouette: a triangle with its apex at the top center and
    /// its base spanning the bottom row
    pub fn mountain(width: u32, height: u32) -> Self {
        let half_w = width as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let reach = (y as f32 + 1.0) / height as f32 * half_w;
            (x as f32 + 0.5 - half_w).abs() <= reach
        })
    }

    /// Boat hull pointing up: an ellipse tapering to the bow
    pub fn hull(width: u32, height: u32) -> Self {
        let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
        let radii = Vec2::new(width as f32 * 0.35, height as f32 * 0.48);
        Self::from_fn(width, height, |x, y| {
            let p = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center) / radii;
            // Narrow the front half toward the bow
            let taper = if p.y < 0.0 { 1.0 + p.y * 0.5 } else { 1.0 };
            p.x.abs() <= taper && p.length_squared() <= 1.0
        })
    }

    /// Mask for a configured silhouette
    pub fn from_shape(shape: MaskShape, width: u32, height: u32) -> Self {
        match shape {
            MaskShape::Rect => Self::filled(width, height),
            MaskShape::Mountain => Self::mountain(width, height),
            MaskShape::Hull => Self::hull(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Rotate an up-facing mask so it faces `facing`
    ///
    /// Left is a quarter turn counter-clockwise, Right a quarter turn
    /// clockwise, Down a half turn.
    pub fn rotated(&self, facing: Facing) -> Self {
        let (w, h) = (self.width, self.height);
        match facing {
            Facing::Up => self.clone(),
            Facing::Down => Self::from_fn(w, h, |x, y| self.get(w - 1 - x, h - 1 - y)),
            // Source (sx, sy) lands at (sy, w - 1 - sx)
            Facing::Left => Self::from_fn(h, w, |x, y| self.get(w - 1 - y, x)),
            // Source (sx, sy) lands at (h - 1 - sy, sx)
            Facing::Right => Self::from_fn(h, w, |x, y| self.get(y, h - 1 - x)),
        }
    }

    /// Whether any opaque pixel of `other`, placed with its top-left corner at
    /// `offset` relative to this mask's top-left corner, meets one of ours
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (dx + other.width as i32).min(self.width as i32);
        let y_end = (dy + other.height as i32).min(self.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return false;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return true;
                }
            }
        }
        false
    }
}

/// Pixel offset of box `b` relative to box `a`, rounded to whole pixels
#[inline]
pub fn mask_offset(a: &Aabb, b: &Aabb) -> (i32, i32) {
    let d = b.pos - a.pos;
    (d.x.round() as i32, d.y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_xywh(5.0, 5.0, 10.0, 10.0);
        let c = Aabb::from_xywh(20.0, 0.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::from_xywh(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::from_xywh(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::from_xywh(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_aabb_centered_and_inside() {
        let world = Aabb::from_xywh(0.0, 0.0, 100.0, 100.0);
        let b = Aabb::centered_at(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(b.pos, Vec2::new(40.0, 45.0));
        assert_eq!(b.center(), Vec2::new(50.0, 50.0));
        assert!(b.is_inside(&world));
        assert!(!Aabb::from_xywh(90.0, 0.0, 20.0, 5.0).is_inside(&world));
    }

    #[test]
    fn test_point_in_world() {
        assert!(point_in_world(Vec2::new(0.0, 0.0), 800.0, 600.0));
        assert!(point_in_world(Vec2::new(800.0, 600.0), 800.0, 600.0));
        assert!(!point_in_world(Vec2::new(-0.5, 10.0), 800.0, 600.0));
        assert!(!point_in_world(Vec2::new(10.0, 600.5), 800.0, 600.0));
    }

    #[test]
    fn test_mountain_mask_shape() {
        let m = Mask::mountain(20, 20);
        // Apex row is narrow, base row is full
        assert!(m.get(10, 0) || m.get(9, 0));
        assert!(!m.get(0, 0));
        assert!(m.get(0, 19));
        assert!(m.get(19, 19));
        assert!(m.count() < 20 * 20);
    }

    #[test]
    fn test_hull_mask_is_inside_box() {
        let m = Mask::hull(90, 90);
        assert!(m.get(45, 45));
        assert!(!m.get(0, 0));
        assert!(!m.get(89, 89));
    }

    #[test]
    fn test_mask_rotation_moves_bow() {
        // Single pixel marking the bow at top center of a 5x3 mask
        let m = Mask::from_fn(5, 3, |x, y| x == 2 && y == 0);
        let left = m.rotated(Facing::Left);
        assert_eq!((left.width(), left.height()), (3, 5));
        assert!(left.get(0, 2));

        let right = m.rotated(Facing::Right);
        assert_eq!((right.width(), right.height()), (3, 5));
        assert!(right.get(2, 2));

        let down = m.rotated(Facing::Down);
        assert!(down.get(2, 2));
        assert_eq!(down.count(), 1);
    }

    #[test]
    fn test_mask_overlap_offsets() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(4, 4);
        assert!(a.overlaps(&b, (0, 0)));
        assert!(a.overlaps(&b, (9, 9)));
        assert!(a.overlaps(&b, (-3, -3)));
        assert!(!a.overlaps(&b, (10, 0)));
        assert!(!a.overlaps(&b, (-4, 2)));
    }

    #[test]
    fn test_mask_overlap_ignores_transparent_corners() {
        // Boxes overlap but the mountain's top-left corner is empty
        let mountain = Mask::mountain(40, 40);
        let dot = Mask::filled(3, 3);
        assert!(!mountain.overlaps(&dot, (0, 0)));
        assert!(mountain.overlaps(&dot, (18, 30)));
    }

    #[test]
    fn test_mask_offset_rounds() {
        let a = Aabb::from_xywh(10.0, 10.0, 5.0, 5.0);
        let b = Aabb::from_xywh(12.6, 7.4, 5.0, 5.0);
        assert_eq!(mask_offset(&a, &b), (3, -3));
    }

    proptest! {
        #[test]
        fn prop_aabb_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            w in 1.0f32..50.0, h in 1.0f32..50.0,
        ) {
            let a = Aabb::from_xywh(ax, ay, w, h);
            let b = Aabb::from_xywh(bx, by, h, w);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_filled_masks_agree_with_boxes(
            dx in -30i32..30, dy in -30i32..30,
            w in 1u32..20, h in 1u32..20,
        ) {
            let a = Mask::filled(w, h);
            let b = Mask::filled(h, w);
            let box_a = Aabb::from_xywh(0.0, 0.0, w as f32, h as f32);
            let box_b = Aabb::from_xywh(dx as f32, dy as f32, h as f32, w as f32);
            prop_assert_eq!(a.overlaps(&b, (dx, dy)), box_a.overlaps(&box_b));
        }

        #[test]
        fn prop_rotation_preserves_pixel_count(w in 1u32..24, h in 1u32..24) {
            let m = Mask::hull(w, h);
            for facing in Facing::ALL {
                prop_assert_eq!(m.rotated(facing).count(), m.count());
            }
        }
    }
}
