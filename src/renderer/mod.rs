//! WebGPU rendering module
//!
//! Scenes describe frames as `DrawList`s. Sprites are procedural vector
//! templates; everything is tessellated into vertex-colored triangles and
//! drawn in a single pass.

pub mod glyphs;
pub mod pipeline;
pub mod shapes;
pub mod sprites;
pub mod tessellate;
pub mod vertex;

pub use pipeline::RenderState;
pub use sprites::SpriteAtlas;
pub use tessellate::tessellate;
pub use vertex::Vertex;
