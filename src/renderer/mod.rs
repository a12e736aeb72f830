//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat-colored triangle list every frame in
//! play-field coordinates, then mapped to NDC on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, field_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
