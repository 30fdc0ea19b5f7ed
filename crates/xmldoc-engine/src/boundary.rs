//! # Boundary Normalization
//!
//! Conservative cleanups applied before rendering:
//!
//! - [`trim_boundaries`] removes one blank-line pattern from each end of a
//!   content sequence
//! - [`collapse_redundant_wrapper`] removes one level of `<x><x>..</x></x>`
//! - [`unwrap_summary_para`] removes a `para` that is the only thing in a
//!   `summary`
//!
//! Shapes that do not match exactly are left alone. Deep nesting needs
//! repeated passes here; [`wrapper`](crate::wrapper) collapses it in one go.

use xmldoc_syntax::{CommentNode, TextToken};

/// Position of a token: index of its `Text` node, index inside that node.
type TokenAt = (usize, usize);

/// Remove one leading and one trailing blank-line pattern.
///
/// Leading: a `NewLine`, or a whitespace literal followed by a `NewLine`.
/// Trailing: a `NewLine`, or a `NewLine` followed by a whitespace literal.
/// `Text` nodes left empty are dropped; everything else is shared.
pub fn trim_boundaries(content: &[CommentNode]) -> Vec<CommentNode> {
    let leading = edge_tokens(content, false);
    let content = remove_tokens(content, &blank_line_pattern(&leading));

    let trailing = edge_tokens(&content, true);
    remove_tokens(&content, &blank_line_pattern(&trailing))
}

/// The first two text tokens met walking in from one end of `content`,
/// stopping at the first node that is not `Text`.
fn edge_tokens(content: &[CommentNode], from_end: bool) -> Vec<(TokenAt, &TextToken)> {
    let mut found = Vec::with_capacity(2);
    for i in walk(content.len(), from_end) {
        let Some(text) = content[i].as_text() else {
            break;
        };
        for j in walk(text.tokens.len(), from_end) {
            found.push(((i, j), &text.tokens[j]));
            if found.len() == 2 {
                return found;
            }
        }
    }
    found
}

fn walk(len: usize, from_end: bool) -> Vec<usize> {
    if from_end {
        (0..len).rev().collect()
    } else {
        (0..len).collect()
    }
}

/// Tokens to remove when the edge starts with a blank-line pattern, read from
/// the edge inwards.
fn blank_line_pattern(edge: &[(TokenAt, &TextToken)]) -> Vec<TokenAt> {
    match edge {
        [(at, first), ..] if first.is_new_line() => vec![*at],
        [(a, first), (b, second), ..] if first.is_whitespace_literal() && second.is_new_line() => {
            vec![*a, *b]
        }
        _ => Vec::new(),
    }
}

fn remove_tokens(content: &[CommentNode], remove: &[TokenAt]) -> Vec<CommentNode> {
    if remove.is_empty() {
        return content.to_vec();
    }

    let mut out = Vec::with_capacity(content.len());
    for (i, node) in content.iter().enumerate() {
        let text = match node.as_text() {
            Some(text) if remove.iter().any(|(n, _)| *n == i) => text,
            _ => {
                out.push(node.clone());
                continue;
            }
        };

        let tokens: Vec<TextToken> = text
            .tokens
            .iter()
            .enumerate()
            .filter(|(j, _)| !remove.contains(&(i, *j)))
            .map(|(_, token)| token.clone())
            .collect();
        if !tokens.is_empty() {
            out.push(CommentNode::text(tokens));
        }
    }
    out
}

/// `<x><x>..</x></x>` becomes `<x>..</x>` when the inner `x` has no
/// attributes and nothing but blank text sits beside it. One level only.
pub fn collapse_redundant_wrapper(node: &CommentNode) -> CommentNode {
    let Some(element) = node.as_element() else {
        return node.clone();
    };

    let mut significant = element.children.iter().filter(|child| !child.is_blank());
    let (Some(inner), None) = (significant.next(), significant.next()) else {
        return node.clone();
    };

    match inner.as_element() {
        Some(inner_element) if inner_element.name == element.name && !inner.has_attributes() => {
            log::debug!("collapsing nested <{}> wrapper", element.name);
            node.with_children(inner_element.children.clone())
        }
        _ => node.clone(),
    }
}

/// A `summary` whose trimmed content is a single attribute-free `para` gets
/// the `para` replaced by the `para`'s own content, in place.
pub fn unwrap_summary_para(node: &CommentNode) -> CommentNode {
    if !node.is_named("summary") {
        return node.clone();
    }
    let Some(para) = single_summary_para(node.children()) else {
        return node.clone();
    };

    log::debug!("unwrapping the only <para> of a <summary>");
    let mut children = Vec::with_capacity(node.children().len() + para.children().len());
    for child in node.children() {
        if child.ptr_eq(&para) {
            children.extend(para.children().iter().cloned());
        } else {
            children.push(child.clone());
        }
    }
    node.with_children(children)
}

/// The attribute-free `para` that is all a summary holds once trimmed.
pub(crate) fn single_summary_para(children: &[CommentNode]) -> Option<CommentNode> {
    match trim_boundaries(children).as_slice() {
        [para] if para.as_element().is_some() && para.is_named("para") && !para.has_attributes() => {
            Some(para.clone())
        }
        _ => None,
    }
}

/// One normalization pass over the top-level elements of `content`.
pub fn normalize(content: &[CommentNode]) -> Vec<CommentNode> {
    content
        .iter()
        .map(|node| unwrap_summary_para(&collapse_redundant_wrapper(node)))
        .collect()
}
