//! Builders for documentation comment nodes.
//!
//! Every builder returns the canonical shape of its element and never fails.
//! Block elements (`summary`, `remarks`, `returns`, `value`) put their content
//! on its own lines between two line breaks; inline elements do not.
//!
//! ```
//! use xmldoc_syntax::factory::{summary_element, text};
//! use xmldoc_syntax::options::FormatOptions;
//!
//! let options = FormatOptions::default();
//! let summary = summary_element(vec![text("Tom & Jerry")], &options);
//! assert_eq!(summary.to_string(), "<summary>\n/// Tom &amp; Jerry\n/// </summary>");
//! ```

use crate::node::{Attribute, AttributeValue, CommentNode, DocComment, TextToken};
use crate::options::FormatOptions;

/// A literal token holding `value`, entity-encoded in its raw form.
pub fn text_literal(value: &str) -> TextToken {
    TextToken::literal(html_escape::encode_text(value), value)
}

pub fn text(value: &str) -> CommentNode {
    CommentNode::text(vec![text_literal(value)])
}

/// A line break followed by the configured marker.
pub fn new_line_token(options: &FormatOptions) -> TextToken {
    TextToken::new_line(options.newline.as_str(), Some(options.marker.clone()))
}

pub fn new_line(options: &FormatOptions) -> CommentNode {
    CommentNode::text(vec![new_line_token(options)])
}

pub fn list(nodes: impl IntoIterator<Item = CommentNode>) -> Vec<CommentNode> {
    nodes.into_iter().collect()
}

pub fn element(name: &str, content: Vec<CommentNode>) -> CommentNode {
    CommentNode::element(name, Vec::new(), content)
}

/// An element whose content sits between a leading and a trailing line break.
pub fn multi_line_element(
    name: &str,
    content: Vec<CommentNode>,
    options: &FormatOptions,
) -> CommentNode {
    let mut children = Vec::with_capacity(content.len() + 2);
    children.push(new_line(options));
    children.extend(content);
    children.push(new_line(options));
    CommentNode::element(name, Vec::new(), children)
}

pub fn empty_element(name: &str) -> CommentNode {
    CommentNode::empty_element(name, Vec::new())
}

pub fn text_attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: name.to_string(),
        value: AttributeValue::Text(value.to_string()),
    }
}

pub fn cref_attribute(cref: &str) -> Attribute {
    Attribute {
        name: "cref".to_string(),
        value: AttributeValue::Cref(cref.to_string()),
    }
}

pub fn summary_element(content: Vec<CommentNode>, options: &FormatOptions) -> CommentNode {
    multi_line_element("summary", content, options)
}

pub fn remarks_element(content: Vec<CommentNode>, options: &FormatOptions) -> CommentNode {
    multi_line_element("remarks", content, options)
}

pub fn returns_element(content: Vec<CommentNode>, options: &FormatOptions) -> CommentNode {
    multi_line_element("returns", content, options)
}

pub fn value_element(content: Vec<CommentNode>, options: &FormatOptions) -> CommentNode {
    multi_line_element("value", content, options)
}

pub fn para_element(content: Vec<CommentNode>) -> CommentNode {
    element("para", content)
}

pub fn see_element(cref: &str) -> CommentNode {
    CommentNode::empty_element("see", vec![cref_attribute(cref)])
}

pub fn see_also_element(cref: &str) -> CommentNode {
    CommentNode::empty_element("seealso", vec![cref_attribute(cref)])
}

/// `<see langword="null"/>`
pub fn null_keyword_element() -> CommentNode {
    CommentNode::empty_element("see", vec![text_attribute("langword", "null")])
}

pub fn param_element(name: &str, content: Vec<CommentNode>) -> CommentNode {
    CommentNode::element("param", vec![text_attribute("name", name)], content)
}

pub fn param_ref_element(name: &str) -> CommentNode {
    CommentNode::empty_element("paramref", vec![text_attribute("name", name)])
}

pub fn exception_element(cref: &str, content: Vec<CommentNode>) -> CommentNode {
    CommentNode::element("exception", vec![cref_attribute(cref)], content)
}

/// `<threadsafety static=".." instance=".."/>`, always in that order.
pub fn thread_safety_element(is_static: bool, instance: bool) -> CommentNode {
    CommentNode::empty_element(
        "threadsafety",
        vec![
            text_attribute("static", if is_static { "true" } else { "false" }),
            text_attribute("instance", if instance { "true" } else { "false" }),
        ],
    )
}

pub fn preliminary_element() -> CommentNode {
    empty_element("preliminary")
}

pub fn token_element(value: &str) -> CommentNode {
    element("token", vec![text(value)])
}

pub fn placeholder_element(content: Vec<CommentNode>) -> CommentNode {
    element("placeholder", content)
}

/// A comment that was never read from source, so it has no first-line marker.
pub fn doc_comment(content: Vec<CommentNode>) -> DocComment {
    DocComment::new(None, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::NewLineStyle;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_keeps_decoded_value() {
        let node = text("a < b & c");
        let token = &node.as_text().unwrap().tokens[0];
        assert_eq!(token.text, "a &lt; b &amp; c");
        assert_eq!(token.value, "a < b & c");
    }

    #[test]
    fn empty_text_is_a_single_empty_literal() {
        let node = text("");
        assert!(node.is_blank());
        assert_eq!(node.to_string(), "");
    }

    #[test]
    fn multi_line_element_wraps_content_in_line_breaks() {
        let options = FormatOptions {
            newline: NewLineStyle::CrLf,
            marker: "/// ".into(),
        };
        let remarks = remarks_element(vec![], &options);
        assert_eq!(remarks.children().len(), 2);
        let first = &remarks.children()[0].as_text().unwrap().tokens[0];
        assert_eq!(first.text, "\r\n");
        assert_eq!(first.exterior.as_deref(), Some("/// "));
    }

    #[test]
    fn thread_safety_attribute_order() {
        assert_eq!(
            thread_safety_element(true, false).to_string(),
            r#"<threadsafety static="true" instance="false"/>"#
        );
        assert_eq!(
            thread_safety_element(false, true).to_string(),
            r#"<threadsafety static="false" instance="true"/>"#
        );
    }

    #[test]
    fn reference_elements() {
        assert_eq!(see_element("T:Foo").to_string(), r#"<see cref="T:Foo"/>"#);
        assert_eq!(see_also_element("T:Foo").to_string(), r#"<seealso cref="T:Foo"/>"#);
        assert_eq!(null_keyword_element().to_string(), r#"<see langword="null"/>"#);
        assert_eq!(param_ref_element("x").to_string(), r#"<paramref name="x"/>"#);
        assert_eq!(
            exception_element("T:E", vec![text("when")]).to_string(),
            r#"<exception cref="T:E">when</exception>"#
        );
        assert_eq!(
            param_element("x", vec![text("the x")]).to_string(),
            r#"<param name="x">the x</param>"#
        );
    }

    #[test]
    fn value_with_placeholder_and_token() {
        let options = FormatOptions::default();
        let value = value_element(
            vec![
                para_element(vec![placeholder_element(vec![text("The value")])]),
                token_element("NullIfNotIncluded"),
            ],
            &options,
        );
        assert_eq!(
            value.to_string(),
            "<value>\n/// <para><placeholder>The value</placeholder></para><token>NullIfNotIncluded</token>\n/// </value>"
        );
    }

    #[test]
    fn doc_comment_has_no_marker() {
        let comment = doc_comment(list([preliminary_element()]));
        assert_eq!(comment.exterior, None);
        assert_eq!(comment.to_string(), "<preliminary/>\n");
    }
}
