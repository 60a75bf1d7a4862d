//! Leaf/branch classification over an outline.
//!
//! Leaves are the summarization units; branches only contribute intro text.
//! The pre-order sequence produced here is the canonical document order.

use crate::outline::{Outline, OutlineNode, Position, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Branch,
}

pub fn classify<P: Position>(node: &OutlineNode<P>) -> NodeKind {
    if node.is_leaf() {
        NodeKind::Leaf
    } else {
        NodeKind::Branch
    }
}

/// A leaf's body is its whole extent, trailing material included.
pub fn body_span<P: Position>(leaf: &OutlineNode<P>) -> Span<P> {
    leaf.span.clone()
}

/// Every leaf of the outline in document order (pre-order, children before
/// later siblings).
pub fn leaves<P: Position>(outline: &Outline<P>) -> Vec<&OutlineNode<P>> {
    fn walk<'a, P: Position>(node: &'a OutlineNode<P>, out: &mut Vec<&'a OutlineNode<P>>) {
        match classify(node) {
            NodeKind::Leaf => out.push(node),
            NodeKind::Branch => node.children.iter().for_each(|child| walk(child, out)),
        }
    }

    let mut out = Vec::new();
    for root in &outline.roots {
        walk(root, &mut out);
    }
    out
}
