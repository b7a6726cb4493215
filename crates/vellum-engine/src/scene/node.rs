use crate::coords::{Color, Quad};

use super::{Geometry, Handle, Transform2D};

/// Variant-specific payload of a scene node.
#[derive(Debug)]
pub enum NodeKind {
    /// Root container; clears the pass to its background colour.
    Viewport { background: Color },

    /// Pure grouping transform.
    Transform,

    /// Textured (or flat) axis-aligned quad; may have children.
    Frame { texture: Option<Handle>, shape: Quad },

    /// Scissor region; children render only within `shape`.
    Clip { shape: Quad },

    /// Indexed mesh. Never has children.
    Graphic { texture: Option<Handle>, geometry: Geometry },
}

impl NodeKind {
    /// Variant name used in script-facing error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Viewport { .. } => "viewport",
            NodeKind::Transform => "transform",
            NodeKind::Frame { .. } => "frame",
            NodeKind::Clip { .. } => "clip",
            NodeKind::Graphic { .. } => "graphic",
        }
    }

    /// Whether this variant carries a 2D transform (everything but the root).
    pub fn has_transform(&self) -> bool {
        !matches!(self, NodeKind::Viewport { .. })
    }

    /// Whether children may be attached.
    pub fn can_have_children(&self) -> bool {
        !matches!(self, NodeKind::Graphic { .. })
    }

    /// Texture attached to this variant, if any.
    pub fn texture(&self) -> Option<Handle> {
        match self {
            NodeKind::Frame { texture, .. } | NodeKind::Graphic { texture, .. } => *texture,
            _ => None,
        }
    }
}

/// A scene-tree entity: shared structure and transform fields plus the
/// variant tag. Structural links are handles into the owning [`Stage`]
/// (a node never owns its relatives directly).
///
/// [`Stage`]: super::Stage
#[derive(Debug)]
pub struct Node {
    pub(crate) parent: Option<Handle>,
    pub(crate) children: Vec<Handle>,
    pub transform: Transform2D,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind) -> Node {
        Node {
            parent: None,
            children: Vec::new(),
            transform: Transform2D::default(),
            kind,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<Handle> {
        self.parent
    }

    /// Children in render order.
    #[inline]
    pub fn children(&self) -> &[Handle] {
        &self.children
    }
}
