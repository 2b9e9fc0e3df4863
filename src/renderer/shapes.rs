//! Shape generation for holes
//!
//! Vertices are emitted in canonical pixel space; the pipeline maps them to NDC.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::ACTIVE_INSET_RATIO;
use crate::sim::Hole;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Vertices for every hole, with a centred inset marker on the active one
pub fn hole_vertices(holes: &[Hole]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(holes.len() * 6 + 6);

    for hole in holes {
        let min = hole.pos().as_vec2();
        let size = hole.size() as f32;
        vertices.extend(rect(min, Vec2::splat(size), colors::HOLE));

        if hole.is_active() {
            let inset = size * ACTIVE_INSET_RATIO;
            let offset = (size - inset) / 2.0;
            vertices.extend(rect(
                min + Vec2::splat(offset),
                Vec2::splat(inset),
                colors::ACTIVE,
            ));
        }
    }

    vertices
}
