//! Backend-agnostic renderer contract and the scene traversal that drives it.

mod recording;
mod walk;

pub use recording::{Blend, RecordingRenderer, RenderOp};
pub use walk::render_scene;

use anyhow::Result;

use crate::coords::Color;
use crate::scene::{Geometry, Handle, Stage, Texture, Transform2D};

/// Interface to a rendering implementation.
///
/// The first group of methods is called by whoever owns the drawing surface;
/// the second group is called by scene elements while this renderer visits
/// the tree during a pass.
///
/// State discipline:
/// - `initialise` / `shutdown` bracket every other call
/// - `set_viewport_size` is legal after `initialise` but never mid-pass
/// - every `push_transform` is matched by exactly one `pop_transform` before
///   the node that pushed it finishes rendering
pub trait Renderer {
    /// Backend setup. Must succeed before any rendering call.
    fn initialise(&mut self) -> Result<()>;

    fn shutdown(&mut self);

    /// Establishes the backend's coordinate mapping (scene origin at the
    /// viewport centre).
    fn set_viewport_size(&mut self, width: u32, height: u32);

    /// Renders one pass: a depth-first traversal from `root`.
    fn render(&mut self, stage: &Stage, root: Handle) {
        walk::render_scene(stage, root, self);
    }

    /// Clears the viewport. Issued once, at the start of a pass.
    fn clear(&mut self, color: Color);

    /// Applies a 2D scale-rotate-translate-colour transform.
    ///
    /// This call also decides blend state: blending is enabled when the
    /// colour is translucent, the needs-blend flag is set, or the mode is
    /// additive (one/one); otherwise it is disabled. Rotation below
    /// [`ROTATION_EPSILON`](crate::scene::ROTATION_EPSILON) is skipped.
    fn push_transform(&mut self, transform: &Transform2D);

    /// Undoes the matching `push_transform`.
    fn pop_transform(&mut self);

    /// Makes `texture` the active texture, resolving (uploading) it on
    /// first use. Resolution happens at most once per texture.
    fn set_texture(&mut self, texture: &Texture);

    /// Deactivates texturing.
    fn clear_texture(&mut self);

    /// Draws an axis-aligned quad with the canonical 0..1 texcoord mapping.
    fn render_quad(&mut self, left: f32, bottom: f32, right: f32, top: f32);

    /// Draws an indexed mesh. No-op when the index list is empty; the
    /// primitive kind comes from the mesh itself.
    fn render_geometry(&mut self, geometry: &Geometry);

    /// Restricts drawing to a region given in the current transform's local
    /// coordinates; the backend maps it through its accumulated transform
    /// and clamps it to the viewport.
    fn set_scissor(&mut self, left: f32, bottom: f32, right: f32, top: f32);

    fn clear_scissor(&mut self);
}
