//! # Redundant-Wrapper Elimination
//!
//! Rendering wraps prose in `<para>`, and prose that already was a `<para>`
//! ends up wrapped twice. This pass removes the extra layers over the whole
//! tree in two phases:
//!
//! 1. [`mark`] walks the tree bottom-up and records which elements are
//!    redundant: an attribute-free `para` holding exactly one other `para`
//!    (and blank text), and the single attribute-free `para` of a `summary`
//! 2. [`splice`] rebuilds the tree, replacing every marked element with its
//!    content
//!
//! Because every level is marked before anything is spliced, any depth of
//! nesting collapses in one call. Elements with attributes are never removed.

use xmldoc_syntax::{CommentNode, DocComment};

use crate::boundary;

/// A node annotated by [`mark`].
#[derive(Debug)]
pub struct Marked {
    pub node: CommentNode,
    pub redundant: bool,
    pub children: Vec<Marked>,
}

/// Phase 1: annotate `node` and its descendants.
pub fn mark(node: &CommentNode) -> Marked {
    let mut children: Vec<Marked> = node.children().iter().map(mark).collect();

    if node.is_named("summary")
        && let Some(para) = boundary::single_summary_para(node.children())
        && let Some(child) = children.iter_mut().find(|m| m.node.ptr_eq(&para))
    {
        child.redundant = true;
    }

    Marked {
        node: node.clone(),
        redundant: is_redundant_para(node),
        children,
    }
}

fn is_redundant_para(node: &CommentNode) -> bool {
    if !node.is_named("para") || node.has_attributes() || node.as_element().is_none() {
        return false;
    }

    let mut significant = node.children().iter().filter(|child| !child.is_blank());
    match (significant.next(), significant.next()) {
        (Some(only), None) => only.as_element().is_some() && only.is_named("para"),
        _ => false,
    }
}

/// Phase 2: the nodes that replace `marked` in its parent.
///
/// Subtrees with nothing marked are shared with the input.
pub fn splice(marked: &Marked) -> Vec<CommentNode> {
    let (children, changed) = splice_children(&marked.children);

    if marked.redundant {
        log::debug!("removing redundant <{}>", marked.node.name().unwrap_or_default());
        return children;
    }
    if changed {
        vec![marked.node.with_children(children)]
    } else {
        vec![marked.node.clone()]
    }
}

fn splice_children(children: &[Marked]) -> (Vec<CommentNode>, bool) {
    let mut out = Vec::with_capacity(children.len());
    let mut changed = false;
    for child in children {
        let replacement = splice(child);
        changed |= replacement.len() != 1 || !replacement[0].ptr_eq(&child.node);
        out.extend(replacement);
    }
    (out, changed)
}

/// Remove redundant wrappers from a content sequence.
pub fn eliminate_redundant_wrappers(content: &[CommentNode]) -> Vec<CommentNode> {
    let marked: Vec<Marked> = content.iter().map(mark).collect();
    splice_children(&marked).0
}

/// [`eliminate_redundant_wrappers`] over a whole comment.
pub fn eliminate_in_comment(comment: &DocComment) -> DocComment {
    comment.with_content(eliminate_redundant_wrappers(&comment.content))
}
