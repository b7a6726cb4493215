use crate::coords::{Color, Vec2};

/// Rotations smaller than this are skipped by backends to avoid state churn.
pub const ROTATION_EPSILON: f32 = 1e-5;

/// How a node's colour combines with what is already in the framebuffer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum BlendMode {
    /// Source-alpha / inverse-source-alpha blending (when blending at all).
    #[default]
    Modulate,
    /// One/one additive blending.
    Add,
}

impl BlendMode {
    /// Parses the blend-mode names used on the script side.
    pub fn parse(name: &str) -> Option<BlendMode> {
        match name {
            "modulate" => Some(BlendMode::Modulate),
            "add" => Some(BlendMode::Add),
            _ => None,
        }
    }
}

/// 2D scale-rotate-translate transform with a modulating colour.
///
/// Applied by backends in translate, rotate, scale order. `angle` is in
/// degrees around the node's origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D {
    pub pos: Vec2,
    pub angle: f32,
    pub scale: Vec2,
    pub color: Color,
    pub blend: BlendMode,
    /// Set when an attached texture carries an alpha channel.
    pub needs_blend: bool,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            angle: 0.0,
            scale: Vec2::ONE,
            color: Color::WHITE,
            blend: BlendMode::Modulate,
            needs_blend: false,
        }
    }
}

impl Transform2D {
    /// Whether a backend must enable blending for this node.
    ///
    /// True if the colour is translucent, the texture needs blending, or the
    /// blend mode is additive (which may use a luminance texture).
    #[inline]
    pub fn wants_blend(&self) -> bool {
        !self.color.is_opaque() || self.needs_blend || self.blend == BlendMode::Add
    }

    /// Whether the rotation exceeds [`ROTATION_EPSILON`].
    #[inline]
    pub fn has_rotation(&self) -> bool {
        self.angle > ROTATION_EPSILON || self.angle < -ROTATION_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity_opaque() {
        let t = Transform2D::default();
        assert_eq!(t.pos, Vec2::ZERO);
        assert_eq!(t.scale, Vec2::ONE);
        assert!(!t.wants_blend());
        assert!(!t.has_rotation());
    }

    #[test]
    fn translucent_color_wants_blend() {
        let t = Transform2D {
            color: Color::new(1.0, 1.0, 1.0, 0.5),
            ..Transform2D::default()
        };
        assert!(t.wants_blend());
    }

    #[test]
    fn additive_mode_wants_blend_even_when_opaque() {
        let t = Transform2D { blend: BlendMode::Add, ..Transform2D::default() };
        assert!(t.wants_blend());
    }

    #[test]
    fn tiny_rotation_is_ignored() {
        let t = Transform2D { angle: 1e-6, ..Transform2D::default() };
        assert!(!t.has_rotation());
        let t = Transform2D { angle: -0.1, ..Transform2D::default() };
        assert!(t.has_rotation());
    }

    #[test]
    fn blend_mode_names() {
        assert_eq!(BlendMode::parse("modulate"), Some(BlendMode::Modulate));
        assert_eq!(BlendMode::parse("add"), Some(BlendMode::Add));
        assert_eq!(BlendMode::parse("screen"), None);
    }
}
