use super::{Node, NodeKind, Texture};

/// Opaque, generation-checked reference to a stage entry.
///
/// Handles are what crosses the script boundary in place of native
/// references; a handle outlives its entry harmlessly (it simply stops
/// resolving once the slot is reclaimed and its generation bumped).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

/// A stage entry: scene node or texture resource.
#[derive(Debug)]
pub enum Object {
    Node(Node),
    Texture(Texture),
}

#[derive(Debug)]
struct Entry {
    object: Object,
    /// Registry domain: the script environment holds this entry.
    script_ref: bool,
    /// Structural domain: parent links, node→texture attachments, and the
    /// controller's pin on the viewport each count one.
    link_count: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Slot arena owning every scene object, plus the registry of which entries
/// are currently visible to the script environment.
///
/// Ownership is split across two independent domains — the script registry
/// (`script_ref`) and structural links (`link_count`). An entry is reclaimed
/// only once both have released it, so an object the script has destroyed
/// keeps rendering while it is still linked into the tree, and an object
/// removed from the tree survives while the script still holds it.
#[derive(Debug, Default)]
pub struct Stage {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Stage {
    pub fn new() -> Stage {
        Stage::default()
    }

    // ── creation ──────────────────────────────────────────────────────────

    /// Inserts a node and makes it script-visible.
    pub fn insert_node(&mut self, kind: NodeKind) -> Handle {
        self.alloc(Object::Node(Node::new(kind)), true, false)
    }

    /// Inserts a texture and makes it script-visible.
    pub fn insert_texture(&mut self, texture: Texture) -> Handle {
        self.alloc(Object::Texture(texture), true, false)
    }

    /// Inserts a node held by the native side (not script-visible, pinned by
    /// one structural reference). Used for the viewport root.
    pub fn insert_pinned_node(&mut self, kind: NodeKind) -> Handle {
        self.alloc(Object::Node(Node::new(kind)), false, true)
    }

    fn alloc(&mut self, object: Object, script_ref: bool, pinned: bool) -> Handle {
        let entry = Entry {
            object,
            script_ref,
            link_count: pinned as u32,
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                debug_assert!(slot.entry.is_none());
                slot.entry = Some(entry);
                Handle { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, entry: Some(entry) });
                Handle { index, generation: 0 }
            }
        }
    }

    // ── resolution ────────────────────────────────────────────────────────

    fn entry(&self, handle: Handle) -> Option<&Entry> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, handle: Handle) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    /// Whether the handle resolves to a live entry, script-visible or not.
    pub fn contains(&self, handle: Handle) -> bool {
        self.entry(handle).is_some()
    }

    /// Registry membership check: the single gate for script-supplied handles.
    pub fn is_script_visible(&self, handle: Handle) -> bool {
        self.entry(handle).is_some_and(|e| e.script_ref)
    }

    pub fn node(&self, handle: Handle) -> Option<&Node> {
        match &self.entry(handle)?.object {
            Object::Node(node) => Some(node),
            Object::Texture(_) => None,
        }
    }

    pub fn node_mut(&mut self, handle: Handle) -> Option<&mut Node> {
        match &mut self.entry_mut(handle)?.object {
            Object::Node(node) => Some(node),
            Object::Texture(_) => None,
        }
    }

    pub fn texture(&self, handle: Handle) -> Option<&Texture> {
        match &self.entry(handle)?.object {
            Object::Texture(texture) => Some(texture),
            Object::Node(_) => None,
        }
    }

    /// Number of live entries, in either ownership domain.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    // ── ownership ─────────────────────────────────────────────────────────

    /// Removes the entry from the script registry.
    ///
    /// Returns false (and does nothing) if the handle is stale or already
    /// destroyed. The entry itself survives while structural links remain.
    pub fn forget(&mut self, handle: Handle) -> bool {
        match self.entry_mut(handle) {
            Some(entry) if entry.script_ref => {
                entry.script_ref = false;
                self.reap(handle.index);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn retain_link(&mut self, handle: Handle) {
        if let Some(entry) = self.entry_mut(handle) {
            entry.link_count += 1;
        }
    }

    pub(crate) fn release_link(&mut self, handle: Handle) {
        if let Some(entry) = self.entry_mut(handle) {
            debug_assert!(entry.link_count > 0, "structural link underflow");
            entry.link_count = entry.link_count.saturating_sub(1);
            self.reap(handle.index);
        }
    }

    /// Reclaims the slot if both ownership domains have released it, then
    /// cascades through the structural links the reclaimed object held.
    fn reap(&mut self, index: u32) {
        let mut pending = vec![index];

        while let Some(index) = pending.pop() {
            let slot = &mut self.slots[index as usize];
            let done = match &slot.entry {
                Some(entry) => entry.script_ref || entry.link_count > 0,
                None => true,
            };
            if done {
                continue;
            }

            let entry = slot.entry.take().expect("checked above");
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);

            let Object::Node(node) = entry.object else {
                continue;
            };

            for child in node.children {
                if let Some(child_entry) = self.entry_mut(child) {
                    if let Object::Node(child_node) = &mut child_entry.object {
                        child_node.parent = None;
                    }
                    child_entry.link_count = child_entry.link_count.saturating_sub(1);
                    pending.push(child.index);
                }
            }

            if let Some(texture) = node.kind.texture() {
                if let Some(tex_entry) = self.entry_mut(texture) {
                    tex_entry.link_count = tex_entry.link_count.saturating_sub(1);
                    pending.push(texture.index);
                }
            }
        }
    }

    // ── tree structure ────────────────────────────────────────────────────

    pub fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle)?.parent
    }

    /// Children of `handle` in render order; empty for stale handles.
    pub fn children(&self, handle: Handle) -> &[Handle] {
        self.node(handle).map_or(&[], |n| n.children.as_slice())
    }

    /// Links `child` as the last child of `parent`, detaching it from any
    /// previous parent first (move, not copy).
    pub fn append_child(&mut self, parent: Handle, child: Handle) {
        self.splice_child(parent, usize::MAX, child);
    }

    /// Like [`append_child`](Stage::append_child) but at `index`, clamped to
    /// append when past the end.
    pub fn insert_child(&mut self, parent: Handle, index: usize, child: Handle) {
        self.splice_child(parent, index, child);
    }

    fn splice_child(&mut self, parent: Handle, index: usize, child: Handle) {
        if parent == child {
            debug_assert!(false, "node cannot be its own child");
            return;
        }
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }

        // Detach from the old parent but keep the structural reference: the
        // child must not be reclaimed in the middle of a move.
        let had_parent = self.unlink_from_parent(child);

        if let Some(parent_node) = self.node_mut(parent) {
            let at = index.min(parent_node.children.len());
            parent_node.children.insert(at, child);
        }
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
        }
        if !had_parent {
            self.retain_link(child);
        }
    }

    /// Unlinks one direct child, clearing its parent reference and releasing
    /// the structural hold. No-op when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: Handle, child: Handle) {
        let is_child = self.node(child).is_some_and(|n| n.parent == Some(parent));
        if !is_child {
            return;
        }
        self.unlink_from_parent(child);
        self.release_link(child);
    }

    /// Unlinks every child of `parent` and clears each child's parent link.
    pub fn remove_all_children(&mut self, parent: Handle) {
        let Some(parent_node) = self.node_mut(parent) else {
            return;
        };
        let children = std::mem::take(&mut parent_node.children);
        for child in children {
            if let Some(child_node) = self.node_mut(child) {
                child_node.parent = None;
            }
            self.release_link(child);
        }
    }

    /// Removes `child` from its current parent, if it has one.
    pub fn detach(&mut self, child: Handle) {
        if let Some(parent) = self.parent(child) {
            self.remove_child(parent, child);
        }
    }

    /// Removes `child` from its parent's list without releasing the
    /// structural reference. Returns whether there was a parent.
    fn unlink_from_parent(&mut self, child: Handle) -> bool {
        let Some(parent) = self.node(child).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|&c| c != child);
        }
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = None;
        }
        true
    }
}
