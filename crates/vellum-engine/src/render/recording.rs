use std::num::NonZeroU64;

use anyhow::Result;

use crate::coords::{Color, Quad, Vec2};
use crate::scene::{BlendMode, Geometry, Primitive, Texture, Transform2D};

use super::Renderer;

/// Blend state a backend settles on for a pushed transform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Blend {
    Disabled,
    /// Source-alpha / inverse-source-alpha.
    Alpha,
    /// One / one.
    Additive,
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Initialise,
    Shutdown,
    SetViewportSize { width: u32, height: u32 },
    Clear(Color),
    PushTransform { blend: Blend },
    PopTransform,
    SetTexture { handle: u64 },
    ClearTexture,
    RenderQuad { left: f32, bottom: f32, right: f32, top: f32 },
    RenderGeometry { index_count: usize, primitive: Primitive },
    SetScissor { left: f32, bottom: f32, right: f32, top: f32 },
    ClearScissor,
}

/// Accumulated transform state, tracked explicitly per push.
#[derive(Debug, Copy, Clone)]
struct TransformFrame {
    origin: Vec2,
    /// Accumulated rotation in degrees.
    angle: f32,
    scale: Vec2,
}

impl Default for TransformFrame {
    fn default() -> Self {
        Self { origin: Vec2::ZERO, angle: 0.0, scale: Vec2::ONE }
    }
}

/// Headless reference backend.
///
/// Records the exact call stream a concrete backend would receive, and
/// models the backend-side state a real implementation keeps: lazy texture
/// resolution, the accumulated transform stack, and the window-space
/// scissor computation (local rect offset by the current accumulated
/// translation from the viewport centre, clamped to viewport bounds).
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    ops: Vec<RenderOp>,
    viewport: (u32, u32),
    stack: Vec<TransformFrame>,
    next_texture: u64,
    uploads: u32,
    window_scissors: Vec<Quad>,
}

impl RecordingRenderer {
    pub fn new() -> RecordingRenderer {
        RecordingRenderer::default()
    }

    /// Recorded calls, oldest first.
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
        self.window_scissors.clear();
    }

    /// Number of texture uploads performed (first-use resolutions).
    pub fn upload_count(&self) -> u32 {
        self.uploads
    }

    /// Window-space scissor rectangles, in the order they were set.
    pub fn window_scissors(&self) -> &[Quad] {
        &self.window_scissors
    }

    fn current(&self) -> TransformFrame {
        self.stack.last().copied().unwrap_or_default()
    }
}

impl Renderer for RecordingRenderer {
    fn initialise(&mut self) -> Result<()> {
        self.ops.push(RenderOp::Initialise);
        Ok(())
    }

    fn shutdown(&mut self) {
        self.ops.push(RenderOp::Shutdown);
    }

    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.ops.push(RenderOp::SetViewportSize { width, height });
    }

    fn clear(&mut self, color: Color) {
        // A pass starts from the identity transform.
        self.stack.clear();
        self.ops.push(RenderOp::Clear(color));
    }

    fn push_transform(&mut self, transform: &Transform2D) {
        let blend = if transform.wants_blend() {
            match transform.blend {
                BlendMode::Add => Blend::Additive,
                BlendMode::Modulate => Blend::Alpha,
            }
        } else {
            Blend::Disabled
        };

        let parent = self.current();

        // Translate, rotate, scale: the child's origin is the parent's
        // origin displaced by the child position, scaled then rotated in
        // the parent's frame.
        let scaled = Vec2::new(
            transform.pos.x * parent.scale.x,
            transform.pos.y * parent.scale.y,
        );
        let (sin, cos) = parent.angle.to_radians().sin_cos();
        let rotated = Vec2::new(
            scaled.x * cos - scaled.y * sin,
            scaled.x * sin + scaled.y * cos,
        );

        let angle = if transform.has_rotation() {
            parent.angle + transform.angle
        } else {
            parent.angle
        };

        self.stack.push(TransformFrame {
            origin: parent.origin + rotated,
            angle,
            scale: parent.scale * transform.scale,
        });

        self.ops.push(RenderOp::PushTransform { blend });
    }

    fn pop_transform(&mut self) {
        debug_assert!(!self.stack.is_empty(), "pop_transform without matching push");
        self.stack.pop();
        self.ops.push(RenderOp::PopTransform);
    }

    fn set_texture(&mut self, texture: &Texture) {
        let handle = match texture.backend_handle() {
            Some(handle) => handle.get(),
            None => {
                // First use: upload and remember the backend id.
                self.next_texture += 1;
                self.uploads += 1;
                let handle = NonZeroU64::new(self.next_texture).expect("counter starts at 1");
                texture.set_backend_handle(handle);
                handle.get()
            }
        };
        self.ops.push(RenderOp::SetTexture { handle });
    }

    fn clear_texture(&mut self) {
        self.ops.push(RenderOp::ClearTexture);
    }

    fn render_quad(&mut self, left: f32, bottom: f32, right: f32, top: f32) {
        self.ops.push(RenderOp::RenderQuad { left, bottom, right, top });
    }

    fn render_geometry(&mut self, geometry: &Geometry) {
        if geometry.is_empty() {
            return;
        }
        self.ops.push(RenderOp::RenderGeometry {
            index_count: geometry.indices().len(),
            primitive: geometry.primitive(),
        });
    }

    fn set_scissor(&mut self, left: f32, bottom: f32, right: f32, top: f32) {
        // The scene origin sits at the viewport centre; offset the local
        // rect by the accumulated translation and clamp to the viewport.
        let (width, height) = self.viewport;
        let centre = Vec2::new(width as f32 * 0.5, height as f32 * 0.5);
        let origin = self.current().origin;

        let window = Quad::new(left, bottom, right, top)
            .translated(centre + origin)
            .clamped_to(Quad::new(0.0, 0.0, width as f32, height as f32));
        self.window_scissors.push(window);

        self.ops.push(RenderOp::SetScissor { left, bottom, right, top });
    }

    fn clear_scissor(&mut self) {
        self.ops.push(RenderOp::ClearScissor);
    }
}
