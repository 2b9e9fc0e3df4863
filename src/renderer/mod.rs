//! WebGPU rendering module
//!
//! Draws each hole as a flat quad, plus an inset quad on the active hole.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, Viewport};
pub use shapes::hole_vertices;
pub use vertex::Vertex;
