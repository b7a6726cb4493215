//! Retained scene tree: node model, resources, and the stage arena that
//! owns them.
//!
//! Responsibilities:
//! - store every scene object in one generation-checked slot arena
//! - keep the two ownership domains (script registry, structural links)
//!   independent so destruction timing is deterministic
//! - provide the tree mutation contract (append/insert/remove/clear)

mod geometry;
mod node;
mod stage;
mod texture;
mod transform;

pub use geometry::{Geometry, GeometryError, MAX_VERTICES, Primitive};
pub use node::{Node, NodeKind};
pub use stage::{Handle, Object, Stage};
pub use texture::{Texture, TextureError};
pub use transform::{BlendMode, ROTATION_EPSILON, Transform2D};
