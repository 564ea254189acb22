//! WebGPU rendering module
//!
//! The stage is tessellated into flat-colored triangles every frame and
//! drawn with a single pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::tessellate_stage;
pub use vertex::Vertex;
