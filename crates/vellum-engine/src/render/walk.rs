use crate::scene::{Handle, Node, NodeKind, Stage};

use super::Renderer;

/// Drives one render pass: a depth-first walk from `root`, in child
/// insertion order, bracketing each transform-family node with a
/// push/pop pair.
///
/// Stale handles (root or children) are skipped silently; the tree observed
/// is exactly the tree left by the preceding update tick.
pub fn render_scene<R: Renderer + ?Sized>(stage: &Stage, root: Handle, renderer: &mut R) {
    let Some(node) = stage.node(root) else {
        return;
    };
    render_node(stage, node, renderer);
}

fn render_node<R: Renderer + ?Sized>(stage: &Stage, node: &Node, renderer: &mut R) {
    match &node.kind {
        NodeKind::Viewport { background } => {
            renderer.clear(*background);
            render_children(stage, node, renderer);
        }
        _ => {
            renderer.push_transform(&node.transform);
            render_content(stage, node, renderer);
            renderer.pop_transform();
        }
    }
}

fn render_content<R: Renderer + ?Sized>(stage: &Stage, node: &Node, renderer: &mut R) {
    match &node.kind {
        NodeKind::Viewport { .. } => unreachable!("viewport handled by render_node"),

        NodeKind::Transform => render_children(stage, node, renderer),

        NodeKind::Frame { texture, shape } => {
            bind_texture(stage, *texture, renderer);
            renderer.render_quad(shape.left, shape.bottom, shape.right, shape.top);
            render_children(stage, node, renderer);
        }

        NodeKind::Clip { shape } => {
            renderer.set_scissor(shape.left, shape.bottom, shape.right, shape.top);
            render_children(stage, node, renderer);
            renderer.clear_scissor();
        }

        NodeKind::Graphic { texture, geometry } => {
            bind_texture(stage, *texture, renderer);
            renderer.render_geometry(geometry);
            // Graphics never have children.
        }
    }
}

fn bind_texture<R: Renderer + ?Sized>(stage: &Stage, texture: Option<Handle>, renderer: &mut R) {
    match texture.and_then(|h| stage.texture(h)) {
        Some(texture) => renderer.set_texture(texture),
        None => renderer.clear_texture(),
    }
}

fn render_children<R: Renderer + ?Sized>(stage: &Stage, node: &Node, renderer: &mut R) {
    for &child in node.children() {
        if let Some(child_node) = stage.node(child) {
            render_node(stage, child_node, renderer);
        }
    }
}
