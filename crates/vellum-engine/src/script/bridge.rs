use std::path::Path;

use crate::codec;
use crate::coords::{Color, Quad, Vec2};
use crate::scene::{
    BlendMode, Geometry, Handle, NodeKind, Primitive, Stage, Texture,
};

use super::{ScriptError, Value};

/// The capability-scoped API surface the script environment calls into.
///
/// Every method taking a [`Handle`] validates registry membership before
/// touching the object (the liveness gate), then checks the variant is
/// capable of the operation — two distinct typed failures. The bridge owns
/// the [`Stage`] and the pinned viewport root.
#[derive(Debug)]
pub struct Bridge {
    stage: Stage,
    viewport: Handle,
}

impl Default for Bridge {
    fn default() -> Self {
        Bridge::new()
    }
}

impl Bridge {
    pub fn new() -> Bridge {
        let mut stage = Stage::new();
        let viewport = stage.insert_pinned_node(NodeKind::Viewport { background: Color::BLACK });
        Bridge { stage, viewport }
    }

    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The pinned root the render pass starts from. Never script-visible.
    #[inline]
    pub fn viewport(&self) -> Handle {
        self.viewport
    }

    // ── factories ─────────────────────────────────────────────────────────

    pub fn create_transform(&mut self) -> Handle {
        self.stage.insert_node(NodeKind::Transform)
    }

    pub fn create_frame(&mut self) -> Handle {
        self.stage.insert_node(NodeKind::Frame { texture: None, shape: Quad::default() })
    }

    pub fn create_clip(&mut self) -> Handle {
        self.stage.insert_node(NodeKind::Clip { shape: Quad::default() })
    }

    pub fn create_graphic(&mut self) -> Handle {
        self.stage.insert_node(NodeKind::Graphic { texture: None, geometry: Geometry::default() })
    }

    /// Loads an image file and returns a handle to the new texture.
    pub fn load_texture(&mut self, path: &Path) -> Result<Handle, ScriptError> {
        let texture = Texture::load(path)?;
        Ok(self.stage.insert_texture(texture))
    }

    /// Removes the object from the registry and releases the script's hold.
    ///
    /// The object survives while tree or texture links remain; it is
    /// finalized when the last domain releases it. Destroying a stale or
    /// foreign handle is a silent no-op.
    pub fn destroy(&mut self, handle: Handle) {
        self.stage.forget(handle);
    }

    // ── structure ─────────────────────────────────────────────────────────

    /// Re-parents `child` (moving it from any current parent), or detaches
    /// it when `parent` is `None`.
    pub fn set_parent(&mut self, child: Handle, parent: Option<Handle>) -> Result<(), ScriptError> {
        self.check(child)?;
        if self.stage.node(child).is_none() {
            return Err(ScriptError::WrongKind { expected: "node" });
        }

        let Some(parent) = parent else {
            self.stage.detach(child);
            return Ok(());
        };

        self.check(parent)?;
        let parent_node = self
            .stage
            .node(parent)
            .ok_or(ScriptError::WrongKind { expected: "node" })?;
        // Graphics never have children, and a node cannot adopt itself.
        if !parent_node.kind.can_have_children() || parent == child {
            return Err(ScriptError::WrongKind { expected: "container node" });
        }

        self.stage.append_child(parent, child);
        Ok(())
    }

    // ── transform mutators ────────────────────────────────────────────────

    pub fn set_position(&mut self, node: Handle, x: f32, y: f32) -> Result<(), ScriptError> {
        self.transform_mut(node)?.pos = Vec2::new(x, y);
        Ok(())
    }

    pub fn set_angle(&mut self, node: Handle, degrees: f32) -> Result<(), ScriptError> {
        self.transform_mut(node)?.angle = degrees;
        Ok(())
    }

    pub fn set_scale(&mut self, node: Handle, x: f32, y: f32) -> Result<(), ScriptError> {
        self.transform_mut(node)?.scale = Vec2::new(x, y);
        Ok(())
    }

    /// Sets the modulating colour. Hosts default a missing alpha to 1.
    pub fn set_color(&mut self, node: Handle, r: f32, g: f32, b: f32, a: f32) -> Result<(), ScriptError> {
        self.transform_mut(node)?.color = Color::new(r, g, b, a);
        Ok(())
    }

    pub fn set_blend_mode(&mut self, node: Handle, mode: BlendMode) -> Result<(), ScriptError> {
        self.transform_mut(node)?.blend = mode;
        Ok(())
    }

    // ── content mutators ──────────────────────────────────────────────────

    pub fn set_frame_shape(
        &mut self,
        frame: Handle,
        left: f32,
        bottom: f32,
        right: f32,
        top: f32,
    ) -> Result<(), ScriptError> {
        self.check(frame)?;
        match self.stage.node_mut(frame).map(|n| &mut n.kind) {
            Some(NodeKind::Frame { shape, .. }) => {
                *shape = Quad::new(left, bottom, right, top);
                Ok(())
            }
            _ => Err(ScriptError::WrongKind { expected: "frame" }),
        }
    }

    pub fn set_clip_shape(
        &mut self,
        clip: Handle,
        left: f32,
        bottom: f32,
        right: f32,
        top: f32,
    ) -> Result<(), ScriptError> {
        self.check(clip)?;
        match self.stage.node_mut(clip).map(|n| &mut n.kind) {
            Some(NodeKind::Clip { shape }) => {
                *shape = Quad::new(left, bottom, right, top);
                Ok(())
            }
            _ => Err(ScriptError::WrongKind { expected: "clip" }),
        }
    }

    /// Attaches a texture to a frame. Alpha textures (4 channels) force the
    /// needs-blend flag on; others clear it.
    pub fn set_frame_texture(&mut self, frame: Handle, texture: Handle) -> Result<(), ScriptError> {
        self.assign_texture(frame, texture, "frame", |kind| {
            matches!(kind, NodeKind::Frame { .. })
        })
    }

    /// Attaches a texture to a graphic; same blend-flag rule as frames.
    pub fn set_graphic_texture(&mut self, graphic: Handle, texture: Handle) -> Result<(), ScriptError> {
        self.assign_texture(graphic, texture, "graphic", |kind| {
            matches!(kind, NodeKind::Graphic { .. })
        })
    }

    /// Replaces a graphic's mesh, validating the lists first (see
    /// [`Geometry::from_parts`]).
    pub fn set_geometry(
        &mut self,
        graphic: Handle,
        indices: &[i64],
        verts: &[f32],
        coords: &[f32],
        primitive: Primitive,
    ) -> Result<(), ScriptError> {
        self.check(graphic)?;
        let mesh = Geometry::from_parts(indices, verts, coords, primitive)?;
        match self.stage.node_mut(graphic).map(|n| &mut n.kind) {
            Some(NodeKind::Graphic { geometry, .. }) => {
                *geometry = mesh;
                Ok(())
            }
            _ => Err(ScriptError::WrongKind { expected: "graphic" }),
        }
    }

    /// Width, height and channel count of a texture.
    pub fn texture_size(&self, texture: Handle) -> Result<(u32, u32, u8), ScriptError> {
        self.check(texture)?;
        let texture = self
            .stage
            .texture(texture)
            .ok_or(ScriptError::WrongKind { expected: "texture" })?;
        Ok((texture.width(), texture.height(), texture.components()))
    }

    // ── viewport controls ─────────────────────────────────────────────────

    pub fn set_background(&mut self, r: f32, g: f32, b: f32) {
        if let Some(node) = self.stage.node_mut(self.viewport) {
            if let NodeKind::Viewport { background } = &mut node.kind {
                *background = Color::rgb(r, g, b);
            }
        }
    }

    /// Replaces the viewport's content with `root` as the sole scene.
    ///
    /// The previous scene is unlinked; nodes in it that the script no
    /// longer holds are reclaimed here.
    pub fn set_scene(&mut self, root: Handle) -> Result<(), ScriptError> {
        self.check(root)?;
        if self.stage.node(root).is_none() {
            return Err(ScriptError::WrongKind { expected: "node" });
        }
        self.stage.remove_all_children(self.viewport);
        self.stage.append_child(self.viewport, root);
        Ok(())
    }

    // ── codec & console ───────────────────────────────────────────────────

    pub fn encode(&self, fmt: &str, values: &[Value]) -> Result<Vec<u8>, ScriptError> {
        let mut out = Vec::new();
        codec::encode(fmt, values, &mut out)?;
        Ok(out)
    }

    pub fn decode(&self, fmt: &str, data: &[u8]) -> Result<Vec<Value>, ScriptError> {
        Ok(codec::decode(fmt, data)?)
    }

    /// Console-print passthrough to the logging collaborator.
    pub fn print(&self, message: &str) {
        log::info!(target: "script", "{message}");
    }

    // ── validation helpers ────────────────────────────────────────────────

    /// The liveness gate: every script-supplied handle passes through here
    /// before the object is dereferenced.
    fn check(&self, handle: Handle) -> Result<(), ScriptError> {
        if self.stage.is_script_visible(handle) {
            Ok(())
        } else {
            Err(ScriptError::BadHandle)
        }
    }

    fn transform_mut(&mut self, handle: Handle) -> Result<&mut crate::scene::Transform2D, ScriptError> {
        self.check(handle)?;
        match self.stage.node_mut(handle) {
            Some(node) if node.kind.has_transform() => Ok(&mut node.transform),
            _ => Err(ScriptError::WrongKind { expected: "transform node" }),
        }
    }

    fn assign_texture(
        &mut self,
        node: Handle,
        texture: Handle,
        expected: &'static str,
        is_kind: fn(&NodeKind) -> bool,
    ) -> Result<(), ScriptError> {
        self.check(node)?;
        self.check(texture)?;

        let components = self
            .stage
            .texture(texture)
            .ok_or(ScriptError::WrongKind { expected: "texture" })?
            .components();

        // Validate the node variant before touching link counts, so a
        // failed call leaves ownership untouched.
        match self.stage.node(node) {
            Some(n) if is_kind(&n.kind) => {}
            _ => return Err(ScriptError::WrongKind { expected }),
        }

        self.stage.retain_link(texture);
        let node_ref = self.stage.node_mut(node).expect("validated above");
        let previous = match &mut node_ref.kind {
            NodeKind::Frame { texture: slot, .. } | NodeKind::Graphic { texture: slot, .. } => {
                slot.replace(texture)
            }
            _ => unreachable!("validated above"),
        };
        node_ref.transform.needs_blend = components == 4;

        if let Some(previous) = previous {
            self.stage.release_link(previous);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_texture(bridge: &mut Bridge) -> Handle {
        bridge.stage.insert_texture(Texture::from_raw(vec![0; 4], 1, 1, 4))
    }

    fn opaque_texture(bridge: &mut Bridge) -> Handle {
        bridge.stage.insert_texture(Texture::from_raw(vec![0; 3], 1, 1, 3))
    }

    // ── handle validation ─────────────────────────────────────────────────

    #[test]
    fn destroyed_handle_fails_every_operation() {
        let mut bridge = Bridge::new();
        let node = bridge.create_transform();
        bridge.destroy(node);

        assert!(matches!(bridge.set_position(node, 1.0, 2.0), Err(ScriptError::BadHandle)));
        assert!(matches!(bridge.set_parent(node, None), Err(ScriptError::BadHandle)));
        assert!(matches!(bridge.set_scene(node), Err(ScriptError::BadHandle)));
    }

    #[test]
    fn destroy_is_idempotent_and_silent() {
        let mut bridge = Bridge::new();
        let node = bridge.create_transform();
        bridge.destroy(node);
        bridge.destroy(node);
    }

    #[test]
    fn destroyed_but_linked_node_keeps_rendering_state() {
        let mut bridge = Bridge::new();
        let scene = bridge.create_transform();
        let child = bridge.create_frame();
        bridge.set_parent(child, Some(scene)).unwrap();
        bridge.set_scene(scene).unwrap();

        bridge.destroy(child);

        // The handle is dead to the script...
        assert!(matches!(
            bridge.set_frame_shape(child, 0.0, 0.0, 1.0, 1.0),
            Err(ScriptError::BadHandle)
        ));
        // ...but the object is still in the tree.
        assert!(bridge.stage().contains(child));
        assert_eq!(bridge.stage().children(scene), &[child]);
    }

    // ── capability checks ─────────────────────────────────────────────────

    #[test]
    fn wrong_variant_is_a_distinct_error() {
        let mut bridge = Bridge::new();
        let transform = bridge.create_transform();
        let frame = bridge.create_frame();

        assert!(matches!(
            bridge.set_frame_shape(transform, 0.0, 0.0, 1.0, 1.0),
            Err(ScriptError::WrongKind { expected: "frame" })
        ));
        assert!(matches!(
            bridge.set_clip_shape(frame, 0.0, 0.0, 1.0, 1.0),
            Err(ScriptError::WrongKind { expected: "clip" })
        ));
        // A texture handle is not a transform-capable node.
        let tex = alpha_texture(&mut bridge);
        assert!(matches!(
            bridge.set_angle(tex, 45.0),
            Err(ScriptError::WrongKind { .. })
        ));
    }

    #[test]
    fn graphic_cannot_adopt_children() {
        let mut bridge = Bridge::new();
        let graphic = bridge.create_graphic();
        let child = bridge.create_transform();
        assert!(matches!(
            bridge.set_parent(child, Some(graphic)),
            Err(ScriptError::WrongKind { .. })
        ));
    }

    #[test]
    fn node_cannot_adopt_itself() {
        let mut bridge = Bridge::new();
        let node = bridge.create_transform();
        assert!(matches!(
            bridge.set_parent(node, Some(node)),
            Err(ScriptError::WrongKind { .. })
        ));
    }

    // ── texture assignment ────────────────────────────────────────────────

    #[test]
    fn alpha_texture_sets_needs_blend_and_opaque_clears_it() {
        let mut bridge = Bridge::new();
        let frame = bridge.create_frame();
        let rgba = alpha_texture(&mut bridge);
        let rgb = opaque_texture(&mut bridge);

        bridge.set_frame_texture(frame, rgba).unwrap();
        assert!(bridge.stage().node(frame).unwrap().transform.needs_blend);

        bridge.set_frame_texture(frame, rgb).unwrap();
        assert!(!bridge.stage().node(frame).unwrap().transform.needs_blend);
    }

    #[test]
    fn texture_survives_script_destroy_while_attached() {
        let mut bridge = Bridge::new();
        let frame = bridge.create_frame();
        let tex = alpha_texture(&mut bridge);
        bridge.set_frame_texture(frame, tex).unwrap();

        bridge.destroy(tex);
        assert!(bridge.stage().contains(tex), "attachment keeps the texture alive");
        assert!(matches!(bridge.texture_size(tex), Err(ScriptError::BadHandle)));

        // Replacing the attachment drops the last reference.
        let other = opaque_texture(&mut bridge);
        bridge.set_frame_texture(frame, other).unwrap();
        assert!(!bridge.stage().contains(tex));
    }

    #[test]
    fn reassigning_same_texture_keeps_it_alive() {
        let mut bridge = Bridge::new();
        let frame = bridge.create_frame();
        let tex = alpha_texture(&mut bridge);
        bridge.set_frame_texture(frame, tex).unwrap();
        bridge.set_frame_texture(frame, tex).unwrap();
        bridge.destroy(tex);
        assert!(bridge.stage().contains(tex));
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn set_geometry_validates_and_assigns() {
        let mut bridge = Bridge::new();
        let graphic = bridge.create_graphic();

        let verts = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        bridge
            .set_geometry(graphic, &[0, 1, 2, 3], &verts, &[], Primitive::Quads)
            .unwrap();

        let err = bridge
            .set_geometry(graphic, &[4], &verts, &[], Primitive::Quads)
            .unwrap_err();
        assert!(matches!(err, ScriptError::Geometry(_)));
    }

    // ── scene root ────────────────────────────────────────────────────────

    #[test]
    fn set_scene_replaces_and_reclaims_old_root() {
        let mut bridge = Bridge::new();
        let old_scene = bridge.create_transform();
        bridge.set_scene(old_scene).unwrap();
        bridge.destroy(old_scene); // script lets go; viewport link keeps it

        assert!(bridge.stage().contains(old_scene));

        let new_scene = bridge.create_transform();
        bridge.set_scene(new_scene).unwrap();

        assert!(!bridge.stage().contains(old_scene), "old scene was reclaimed");
        let viewport = bridge.viewport();
        assert_eq!(bridge.stage().children(viewport), &[new_scene]);
    }

    #[test]
    fn texture_size_reports_dimensions() {
        let mut bridge = Bridge::new();
        let tex = bridge.stage.insert_texture(Texture::from_raw(vec![0; 24], 3, 2, 4));
        assert_eq!(bridge.texture_size(tex).unwrap(), (3, 2, 4));
    }

    #[test]
    fn load_texture_missing_file_is_a_resource_error() {
        let mut bridge = Bridge::new();
        let err = bridge
            .load_texture(Path::new("/nonexistent/vellum.png"))
            .unwrap_err();
        assert!(matches!(err, ScriptError::Texture(_)));
    }
}
