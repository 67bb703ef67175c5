//! Shape generation for 2D primitives

use super::scene::{DrawItem, Sprite};
use super::vertex::{Vertex, colors};
use crate::sim::geometry::Aabb;

/// Two triangles covering `bounds`
pub fn quad(bounds: &Aabb, color: [f32; 4]) -> [Vertex; 6] {
    let (min, max) = (bounds.min(), bounds.max());
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Base color for a sprite; `None` for sprites drawn by other collaborators
fn sprite_color(sprite: Sprite) -> Option<[f32; 4]> {
    match sprite {
        Sprite::Background => Some(colors::SEA),
        Sprite::HazardWarning | Sprite::Hazard => Some(colors::MOUNTAIN),
        Sprite::PlayerProjectile => Some(colors::BULLET),
        Sprite::Explosion => Some(colors::BOOM),
        Sprite::EnemyCraft => Some(colors::PIRATE_BOAT),
        Sprite::Player { .. } => Some(colors::BOAT),
        Sprite::EnemyProjectile => Some(colors::PIRATE_BULLET),
        Sprite::Heart => Some(colors::HEART),
        Sprite::Flash => Some(colors::FLASH),
        Sprite::ScoreLabel { .. } => None,
    }
}

/// Flatten a draw list into colored quads, preserving its order
pub fn scene_vertices(items: &[DrawItem]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(items.len() * 6);
    for item in items {
        let Some(mut color) = sprite_color(item.sprite) else {
            continue;
        };
        color[3] *= item.alpha;
        vertices.extend_from_slice(&quad(&item.bounds, color));
    }
    vertices
}

/// Byte view for uploading into a GPU vertex buffer
pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::renderer::scene::build_scene;
    use crate::sim::state::GameState;

    #[test]
    fn test_quad_corners() {
        let q = quad(&Aabb::from_xywh(1.0, 2.0, 3.0, 4.0), [1.0; 4]);
        assert_eq!(q[0].position, [1.0, 2.0]);
        assert_eq!(q[5].position, [4.0, 6.0]);
    }

    #[test]
    fn test_score_label_has_no_geometry() {
        let state = GameState::new(WorldConfig::default(), 1);
        let scene = build_scene(&state);
        let vertices = scene_vertices(&scene);
        // Everything but the score label becomes a quad
        assert_eq!(vertices.len(), (scene.len() - 1) * 6);
    }

    #[test]
    fn test_alpha_applied() {
        let mut state = GameState::new(WorldConfig::default(), 1);
        state.flash_ticks = 1;
        let scene = build_scene(&state);
        let vertices = scene_vertices(&scene);
        let flash = vertices.last().unwrap();
        assert!(flash.color[3] < 0.1);
    }

    #[test]
    fn test_vertex_bytes_length() {
        let q = quad(&Aabb::from_xywh(0.0, 0.0, 1.0, 1.0), [0.0; 4]);
        assert_eq!(vertex_bytes(&q).len(), 6 * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
