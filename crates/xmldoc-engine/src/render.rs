//! # Markdown Render Pass
//!
//! Treats the prose of the block elements (`summary`, `remarks`, `returns`,
//! `value`) as Markdown and replaces it with the rendered markup:
//!
//! 1. [`raw_text`] flattens an element's content back into plain text,
//!    dropping line markers. Entities stay encoded; the Markdown parser
//!    decodes them and the printer encodes them again
//! 2. a [`MarkdownRenderer`] turns the text into markup
//! 3. [`render_block_elements`] stores the trimmed result between two line
//!    breaks
//! 4. [`split_lines`] re-splits the whole comment so every physical line is
//!    its own `Text` node, each following a marked line break
//!
//! The rendered markup is kept as literal text at this point; reading the
//! regenerated comment back turns it into elements again.

use std::fmt;

use xmldoc_syntax::serialize::{self, write_end_tag, write_start_tag};
use xmldoc_syntax::{CommentNode, CommentWriter, NewLineStyle, TextToken};

use crate::align;
use crate::markdown::{MarkdownRenderer, RenderError};

/// Elements whose content is rendered as Markdown.
pub const BLOCK_ELEMENTS: [&str; 4] = ["summary", "remarks", "returns", "value"];

/// Content as plain text: literals as written in the source, bare `"\n"`
/// line breaks, elements as markup.
pub fn raw_text(content: &[CommentNode]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let mut writer = CommentWriter::new(&mut out, NewLineStyle::Lf);
    write_raw_nodes(&mut writer, content)?;
    Ok(out)
}

fn write_raw_nodes<W: fmt::Write>(
    writer: &mut CommentWriter<W>,
    content: &[CommentNode],
) -> fmt::Result {
    for node in content {
        match node {
            CommentNode::Element(element) => {
                write_start_tag(writer, &element.name, &element.attributes)?;
                write_raw_nodes(writer, &element.children)?;
                write_end_tag(writer, &element.name)?;
            }
            CommentNode::Text(text) => {
                for token in &text.tokens {
                    if token.is_new_line() {
                        writer.write_char('\n')?;
                    } else {
                        writer.write_span(&token.text)?;
                    }
                }
            }
            CommentNode::EmptyElement(_) | CommentNode::RawSection(_) => {
                serialize::write_node(writer, node)?;
            }
        }
    }
    Ok(())
}

/// Render every block element in `content` through `renderer`.
///
/// Block elements nested in other elements are found too; a block element
/// inside another one is rendered as part of the outer one. The first
/// renderer error aborts the whole pass.
pub fn render_block_elements(
    content: &[CommentNode],
    renderer: &dyn MarkdownRenderer,
) -> Result<Vec<CommentNode>, RenderError> {
    content
        .iter()
        .map(|node| render_node(node, renderer))
        .collect()
}

fn render_node(
    node: &CommentNode,
    renderer: &dyn MarkdownRenderer,
) -> Result<CommentNode, RenderError> {
    let Some(element) = node.as_element() else {
        return Ok(node.clone());
    };

    if BLOCK_ELEMENTS.contains(&element.name.as_str()) {
        let markdown = raw_text(&element.children)?;
        let rendered = renderer.render(&markdown)?;
        let rendered = rendered.trim();
        log::debug!("rendered <{}> as markdown", element.name);

        let line_break = || CommentNode::text(vec![TextToken::new_line("\n", None)]);
        return Ok(node.with_children(vec![
            line_break(),
            CommentNode::text(vec![TextToken::literal(rendered, rendered)]),
            line_break(),
        ]));
    }

    let children = render_block_elements(&element.children, renderer)?;
    if children.iter().zip(&element.children).all(|(a, b)| a.ptr_eq(b)) {
        Ok(node.clone())
    } else {
        Ok(node.with_children(children))
    }
}

/// Re-split `content` so that each physical line is one `Text` node.
///
/// Lines are separated by `NewLine` nodes marked with `marker`, or with
/// `marker` minus its trailing space when the next line is blank. Line ends
/// are trimmed and a blank final line is dropped.
pub fn split_lines(
    content: &[CommentNode],
    marker: &str,
    newline: NewLineStyle,
) -> Vec<CommentNode> {
    let text = serialize::nodes_to_text(&align::strip_exteriors(content), NewLineStyle::Lf);

    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.trim_end())
        .collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    log::trace!("split regenerated comment into {} lines", lines.len());

    let blank_marker = marker.trim_end();
    let mut nodes = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            let exterior = if line.is_empty() { blank_marker } else { marker };
            nodes.push(CommentNode::text(vec![TextToken::new_line(
                newline.as_str(),
                Some(exterior.to_string()),
            )]));
        }
        nodes.push(CommentNode::text(vec![TextToken::literal(line, line)]));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::CommonMarkRenderer;
    use pretty_assertions::assert_eq;
    use xmldoc_syntax::parse;

    struct FailingRenderer;

    impl MarkdownRenderer for FailingRenderer {
        fn render(&self, _markdown: &str) -> Result<String, RenderError> {
            Err(RenderError::Rejected("boom".into()))
        }
    }

    struct Upper;

    impl MarkdownRenderer for Upper {
        fn render(&self, markdown: &str) -> Result<String, RenderError> {
            Ok(markdown.to_uppercase())
        }
    }

    fn lines_of(content: &[CommentNode]) -> Vec<String> {
        content.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn raw_text_keeps_entities_and_drops_markers() {
        let comment =
            parse("/// <summary>\n///   Tom &amp; <c>a &lt; b</c> <see cref=\"T:X\"/>\n/// </summary>\n")
                .unwrap();
        assert_eq!(
            raw_text(comment.content[0].children()).unwrap(),
            "\n  Tom &amp; <c>a &lt; b</c> <see cref=\"T:X\"/>\n"
        );
    }

    #[test]
    fn escaped_tags_stay_text_after_rendering() {
        let comment =
            parse("/// <summary>Write &lt;c&gt;x&lt;/c&gt; *literally*</summary>\n").unwrap();
        let rendered = render_block_elements(&comment.content, &CommonMarkRenderer::new()).unwrap();
        assert_eq!(
            rendered[0].children()[1].to_string(),
            "<para>Write &lt;c&gt;x&lt;/c&gt; <em>literally</em></para>"
        );
    }

    #[test]
    fn emphasis_renders_between_line_breaks() {
        let comment = parse("/// <summary>*hello*</summary>\n").unwrap();
        let rendered = render_block_elements(&comment.content, &CommonMarkRenderer::new()).unwrap();
        let children = rendered[0].children();
        assert_eq!(children.len(), 3);
        assert!(children[0].as_text().unwrap().tokens[0].is_new_line());
        assert_eq!(children[1].to_string(), "<para><em>hello</em></para>");
        assert!(children[2].as_text().unwrap().tokens[0].is_new_line());
    }

    #[test]
    fn only_block_elements_are_rendered() {
        let comment =
            parse("/// <summary>a</summary><param name=\"x\">b</param>\n").unwrap();
        let rendered = render_block_elements(&comment.content, &Upper).unwrap();
        assert_eq!(rendered[0].children()[1].to_string(), "A");
        assert!(rendered[1].ptr_eq(&comment.content[1]));
    }

    #[test]
    fn nested_block_elements_are_found() {
        let comment = parse("/// <inheritdoc><remarks>x</remarks></inheritdoc>\n").unwrap();
        let rendered = render_block_elements(&comment.content, &Upper).unwrap();
        assert_eq!(rendered[0].to_string(), "<inheritdoc><remarks>\nX\n</remarks></inheritdoc>");
    }

    #[test]
    fn outer_block_element_wins() {
        let comment = parse("/// <remarks>a<value>b</value></remarks>\n").unwrap();
        let rendered = render_block_elements(&comment.content, &Upper).unwrap();
        assert_eq!(rendered[0].to_string(), "<remarks>\nA<VALUE>B</VALUE>\n</remarks>");
    }

    #[test]
    fn renderer_error_aborts_the_pass() {
        let comment = parse("/// <summary>a</summary>\n").unwrap();
        let result = render_block_elements(&comment.content, &FailingRenderer);
        assert!(matches!(result, Err(RenderError::Rejected(_))));
    }

    #[test]
    fn split_lines_one_text_node_per_line() {
        let comment = parse("/// <summary>x</summary>\n").unwrap();
        let rendered = render_block_elements(&comment.content, &CommonMarkRenderer::new()).unwrap();
        let lines = split_lines(&rendered, "/// ", NewLineStyle::Lf);

        assert_eq!(
            lines_of(&lines),
            vec!["<summary>", "\n/// ", "<para>x</para>", "\n/// ", "</summary>"]
        );
        for node in &lines {
            let text = node.as_text().unwrap();
            assert_eq!(text.tokens.len(), 1);
            assert!(!text.tokens[0].is_new_line() || text.tokens[0].value == "\n");
            assert!(text.tokens[0].is_new_line() || !text.tokens[0].value.contains('\n'));
        }
    }

    #[test]
    fn split_lines_handles_crlf_and_blank_lines() {
        let content = vec![CommentNode::text(vec![TextToken::literal(
            "a  \r\n   \r\nb\r\n",
            "a  \r\n   \r\nb\r\n",
        )])];
        let lines = split_lines(&content, "/// ", NewLineStyle::CrLf);
        assert_eq!(lines_of(&lines), vec!["a", "\r\n///", "", "\r\n/// ", "b"]);
    }

    #[test]
    fn split_lines_respects_marker_without_space() {
        let content = vec![CommentNode::text(vec![TextToken::literal("a\nb", "a\nb")])];
        let lines = split_lines(&content, "///", NewLineStyle::Lf);
        assert_eq!(lines_of(&lines), vec!["a", "\n///", "b"]);
    }

    #[test]
    fn split_lines_of_nothing_is_nothing() {
        assert!(split_lines(&[], "/// ", NewLineStyle::Lf).is_empty());
    }
}
