//! The documentation comment tree.
//!
//! Nodes are immutable. Every payload lives behind an [`Arc`], so cloning a
//! node (or a whole content sequence) shares the subtree instead of copying
//! it. Passes build new trees and reuse every node they leave alone.

use std::sync::Arc;

/// One node of a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentNode {
    /// `<name attr="v">children</name>`
    Element(Arc<Element>),
    /// `<name attr="v"/>`
    EmptyElement(Arc<EmptyElement>),
    /// Literal text and line breaks.
    Text(Arc<Text>),
    /// `<![CDATA[text]]>`
    RawSection(Arc<RawSection>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<CommentNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyElement {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub tokens: Vec<TextToken>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTokenKind {
    Literal,
    NewLine,
}

/// A token inside a [`Text`] node.
///
/// `text` is the raw source form (entities still encoded), `value` the
/// decoded form. A `NewLine` token carries the marker that starts the next
/// physical line in `exterior`; literals never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToken {
    pub kind: TextTokenKind,
    pub text: String,
    pub value: String,
    pub exterior: Option<String>,
}

impl TextToken {
    pub fn literal(text: impl Into<String>, value: impl Into<String>) -> Self {
        TextToken {
            kind: TextTokenKind::Literal,
            text: text.into(),
            value: value.into(),
            exterior: None,
        }
    }

    pub fn new_line(text: impl Into<String>, exterior: Option<String>) -> Self {
        let text = text.into();
        TextToken {
            kind: TextTokenKind::NewLine,
            value: text.clone(),
            text,
            exterior,
        }
    }

    pub fn is_new_line(&self) -> bool {
        self.kind == TextTokenKind::NewLine
    }

    /// A literal whose decoded value is empty or only whitespace.
    pub fn is_whitespace_literal(&self) -> bool {
        self.kind == TextTokenKind::Literal && self.value.trim().is_empty()
    }

    pub fn with_exterior(&self, exterior: Option<String>) -> Self {
        TextToken {
            exterior,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A plain string value.
    Text(String),
    /// A cross-reference, e.g. `T:System.String`.
    Cref(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeValue::Text(value) | AttributeValue::Cref(value) => value,
        }
    }
}

/// A documentation comment attached to one declaration.
///
/// `exterior` is the marker of the first line, which is absent for a comment
/// assembled from builders that was never read from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    pub exterior: Option<String>,
    pub content: Vec<CommentNode>,
}

impl DocComment {
    pub fn new(exterior: Option<String>, content: Vec<CommentNode>) -> Self {
        DocComment { exterior, content }
    }

    pub fn with_content(&self, content: Vec<CommentNode>) -> Self {
        DocComment {
            exterior: self.exterior.clone(),
            content,
        }
    }
}

impl CommentNode {
    pub fn element(
        name: impl Into<String>,
        attributes: Vec<Attribute>,
        children: Vec<CommentNode>,
    ) -> Self {
        CommentNode::Element(Arc::new(Element {
            name: name.into(),
            attributes,
            children,
        }))
    }

    pub fn empty_element(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        CommentNode::EmptyElement(Arc::new(EmptyElement {
            name: name.into(),
            attributes,
        }))
    }

    pub fn text(tokens: Vec<TextToken>) -> Self {
        CommentNode::Text(Arc::new(Text { tokens }))
    }

    pub fn raw_section(text: impl Into<String>) -> Self {
        CommentNode::RawSection(Arc::new(RawSection { text: text.into() }))
    }

    /// Element name for `Element` and `EmptyElement`.
    pub fn name(&self) -> Option<&str> {
        match self {
            CommentNode::Element(element) => Some(&element.name),
            CommentNode::EmptyElement(element) => Some(&element.name),
            CommentNode::Text(_) | CommentNode::RawSection(_) => None,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            CommentNode::Element(element) => &element.attributes,
            CommentNode::EmptyElement(element) => &element.attributes,
            CommentNode::Text(_) | CommentNode::RawSection(_) => &[],
        }
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes().is_empty()
    }

    /// Children of an `Element`; empty for every other variant.
    pub fn children(&self) -> &[CommentNode] {
        match self {
            CommentNode::Element(element) => &element.children,
            _ => &[],
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            CommentNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            CommentNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Text made of nothing but whitespace literals and line breaks.
    pub fn is_blank(&self) -> bool {
        match self {
            CommentNode::Text(text) => text
                .tokens
                .iter()
                .all(|t| t.is_new_line() || t.is_whitespace_literal()),
            _ => false,
        }
    }

    /// The same element with different children. Other variants are
    /// returned unchanged.
    pub fn with_children(&self, children: Vec<CommentNode>) -> CommentNode {
        match self {
            CommentNode::Element(element) => CommentNode::element(
                element.name.clone(),
                element.attributes.clone(),
                children,
            ),
            other => other.clone(),
        }
    }

    /// Whether both handles point at the same shared subtree.
    pub fn ptr_eq(&self, other: &CommentNode) -> bool {
        match (self, other) {
            (CommentNode::Element(a), CommentNode::Element(b)) => Arc::ptr_eq(a, b),
            (CommentNode::EmptyElement(a), CommentNode::EmptyElement(b)) => Arc::ptr_eq(a, b),
            (CommentNode::Text(a), CommentNode::Text(b)) => Arc::ptr_eq(a, b),
            (CommentNode::RawSection(a), CommentNode::RawSection(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> CommentNode {
        CommentNode::text(vec![TextToken::literal("Hello", "Hello")])
    }

    #[test]
    fn clone_shares_the_subtree() {
        let para = CommentNode::element("para", vec![], vec![hello()]);
        let copy = para.clone();
        assert!(para.ptr_eq(&copy));
        assert!(para.children()[0].ptr_eq(&copy.children()[0]));
    }

    #[test]
    fn with_children_keeps_name_and_attributes() {
        let attr = Attribute {
            name: "type".into(),
            value: AttributeValue::Text("bullet".into()),
        };
        let list = CommentNode::element("list", vec![attr.clone()], vec![]);
        let rebuilt = list.with_children(vec![hello()]);
        assert_eq!(rebuilt.name(), Some("list"));
        assert_eq!(rebuilt.attributes(), &[attr]);
        assert_eq!(rebuilt.children().len(), 1);
        assert!(!rebuilt.ptr_eq(&list));
    }

    #[test]
    fn blank_text_is_whitespace_and_newlines_only() {
        let blank = CommentNode::text(vec![
            TextToken::new_line("\n", Some("/// ".into())),
            TextToken::literal("  ", "  "),
        ]);
        assert!(blank.is_blank());
        assert!(!hello().is_blank());
        assert!(!CommentNode::empty_element("preliminary", vec![]).is_blank());
    }

    #[test]
    fn only_elements_have_names() {
        assert_eq!(hello().name(), None);
        assert!(CommentNode::empty_element("see", vec![]).is_named("see"));
        assert!(!CommentNode::raw_section("x").is_named("x"));
    }
}
