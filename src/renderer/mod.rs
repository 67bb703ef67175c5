//! Rendering collaborator contract
//!
//! The simulation never rasterizes. Each frame it is turned into an ordered
//! draw list (`scene`) that a backend can consume directly, or flatten into
//! colored quads (`shapes`) ready for a vertex buffer.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{DrawItem, Layer, Sprite, build_scene};
pub use shapes::{scene_vertices, vertex_bytes};
pub use vertex::Vertex;
