//! # Exterior Trivia Alignment
//!
//! Every line of a comment after the first starts with a marker stored on the
//! preceding `NewLine` token (`"    /// "`). Regenerated lines carry the bare
//! comment marker, so they have to be re-indented to match the line the
//! comment sits on.
//!
//! The indentation comes from the trivia in front of the comment: only the
//! whitespace of its final line counts. Trailing-space handling is decided per
//! marker occurrence, so a blank line's `"///"` stays `"///"`.

use xmldoc_syntax::{CommentNode, DocComment, TextToken};

/// Whitespace run on the last line of `preceding_trivia`.
pub fn leading_indentation(preceding_trivia: &str) -> String {
    let mut indentation = String::new();
    for c in preceding_trivia.chars() {
        match c {
            '\n' | '\r' => indentation.clear(),
            ' ' | '\t' => indentation.push(c),
            _ => {}
        }
    }
    indentation
}

/// Re-indent every line marker of `comment` to the indentation found in
/// `preceding_trivia`.
///
/// A comment without a first-line marker is returned unchanged.
pub fn align_exterior(comment: &DocComment, preceding_trivia: &str) -> DocComment {
    let Some(first) = comment.exterior.as_deref() else {
        return comment.clone();
    };

    let prefix = format!("{}{}", leading_indentation(preceding_trivia), first.trim_end());
    log::trace!("aligning line markers to {prefix:?}");

    let content = map_content(&comment.content, &mut |exterior| {
        Some(with_spacing_of(&prefix, exterior))
    });
    comment.with_content(content)
}

/// Set every marker in `node` to `exterior`, keeping whether each occurrence
/// ended in a space.
pub fn replace_exterior(node: &CommentNode, exterior: &str) -> CommentNode {
    let prefix = exterior.trim_end();
    map_exteriors(node, &mut |old| Some(with_spacing_of(prefix, old)))
}

/// The marker of the last line break in `content`.
pub fn last_exterior(content: &[CommentNode]) -> Option<String> {
    content.iter().rev().find_map(last_exterior_in)
}

fn last_exterior_in(node: &CommentNode) -> Option<String> {
    match node {
        CommentNode::Element(element) => last_exterior(&element.children),
        CommentNode::Text(text) => text
            .tokens
            .iter()
            .rev()
            .find_map(|token| token.exterior.clone()),
        CommentNode::EmptyElement(_) | CommentNode::RawSection(_) => None,
    }
}

/// Drop every line marker, leaving bare line breaks.
pub fn strip_exteriors(content: &[CommentNode]) -> Vec<CommentNode> {
    map_content(content, &mut |_| None)
}

fn with_spacing_of(prefix: &str, old: &str) -> String {
    if old.ends_with(' ') {
        format!("{prefix} ")
    } else {
        prefix.to_string()
    }
}

/// Rebuild `node` with every `NewLine` exterior passed through `f`.
///
/// Subtrees without a line marker are shared, not rebuilt.
pub fn map_exteriors(
    node: &CommentNode,
    f: &mut dyn FnMut(&str) -> Option<String>,
) -> CommentNode {
    match node {
        CommentNode::Element(element) => {
            let children = map_content(&element.children, f);
            let unchanged = children
                .iter()
                .zip(&element.children)
                .all(|(new, old)| new.ptr_eq(old));
            if unchanged {
                node.clone()
            } else {
                node.with_children(children)
            }
        }
        CommentNode::Text(text) => {
            if text.tokens.iter().all(|t| t.exterior.is_none()) {
                return node.clone();
            }
            let tokens: Vec<TextToken> = text
                .tokens
                .iter()
                .map(|token| match &token.exterior {
                    Some(exterior) => token.with_exterior(f(exterior)),
                    None => token.clone(),
                })
                .collect();
            CommentNode::text(tokens)
        }
        CommentNode::EmptyElement(_) | CommentNode::RawSection(_) => node.clone(),
    }
}

fn map_content(
    content: &[CommentNode],
    f: &mut dyn FnMut(&str) -> Option<String>,
) -> Vec<CommentNode> {
    content.iter().map(|node| map_exteriors(node, f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use xmldoc_syntax::parse;

    #[rstest]
    #[case("", "")]
    #[case("    ", "    ")]
    #[case("\n\t\t", "\t\t")]
    #[case("  x  \n    ", "    ")]
    #[case("  \r\n", "")]
    #[case("  #[inline]  ", "    ")]
    fn indentation_of_last_line(#[case] trivia: &str, #[case] expected: &str) {
        assert_eq!(leading_indentation(trivia), expected);
    }

    #[test]
    fn align_keeps_spacing_per_occurrence() {
        let comment = parse("/// <summary>\n/// Hello\n///\n/// </summary>\n").unwrap();
        let aligned = align_exterior(&comment, "\n    ");
        assert_eq!(
            aligned.to_string(),
            "/// <summary>\n    /// Hello\n    ///\n    /// </summary>\n"
        );
    }

    #[test]
    fn align_follows_marker_without_space() {
        let comment = parse("///<summary>\n///Hello\n///</summary>\n").unwrap();
        let aligned = align_exterior(&comment, "  ");
        assert_eq!(aligned.to_string(), "///<summary>\n  ///Hello\n  ///</summary>\n");
    }

    #[test]
    fn align_without_first_marker_is_a_no_op() {
        let options = xmldoc_syntax::FormatOptions::default();
        let comment = xmldoc_syntax::factory::doc_comment(vec![
            xmldoc_syntax::factory::summary_element(vec![], &options),
        ]);
        assert_eq!(align_exterior(&comment, "        "), comment);
    }

    #[test]
    fn last_exterior_searches_from_the_end() {
        let comment =
            parse("/// <summary>\n  /// a\n  /// </summary>\n    /// <remarks>x</remarks>\n")
                .unwrap();
        assert_eq!(last_exterior(&comment.content).as_deref(), Some("    /// "));
        assert_eq!(last_exterior(&comment.content[..1]).as_deref(), Some("  /// "));
    }

    #[test]
    fn untouched_subtrees_are_shared() {
        let comment = parse("/// <see cref=\"T:A\"/><para>x</para>\n/// y\n").unwrap();
        let aligned = align_exterior(&comment, "  ");
        assert!(aligned.content[0].ptr_eq(&comment.content[0]));
        assert!(aligned.content[1].ptr_eq(&comment.content[1]));
        assert!(!aligned.content[2].ptr_eq(&comment.content[2]));
    }

    #[test]
    fn strip_exteriors_leaves_line_breaks() {
        let comment = parse("/// a\n/// b\n").unwrap();
        let stripped = strip_exteriors(&comment.content);
        let tokens = &stripped[0].as_text().unwrap().tokens;
        assert!(tokens.iter().all(|t| t.exterior.is_none()));
        assert_eq!(tokens.len(), 3);
    }
}
