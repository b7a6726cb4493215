//! Geometry and colour value types shared by the scene and renderer layers.

mod color;
mod quad;
mod vec2;

pub use color::Color;
pub use quad::Quad;
pub use vec2::Vec2;
