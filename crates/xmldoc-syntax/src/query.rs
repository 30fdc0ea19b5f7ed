//! Lookups over a content sequence.
//!
//! Both queries look at the top level of the given content only and match
//! element names exactly (case-sensitive).

use crate::node::CommentNode;

/// The first element (or empty element) named `name`.
pub fn first_element(content: &[CommentNode], name: &str) -> Option<CommentNode> {
    all_elements(content, name).next()
}

/// Every element named `name`, in declaration order.
///
/// The iterator is lazy and borrows `content`; it walks the sequence once.
pub fn all_elements<'a>(
    content: &'a [CommentNode],
    name: &'a str,
) -> impl Iterator<Item = CommentNode> + 'a {
    content
        .iter()
        .filter(move |node| node.is_named(name))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_element_in_declaration_order() {
        let comment = parse("/// <param name=\"a\"/><param name=\"b\"/>\n").unwrap();
        let first = first_element(&comment.content, "param").unwrap();
        assert!(first.ptr_eq(&comment.content[0]));
    }

    #[test]
    fn names_match_exactly() {
        let comment = parse("/// <Summary>x</Summary><summary>y</summary>\n").unwrap();
        let found: Vec<_> = all_elements(&comment.content, "summary").collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].ptr_eq(&comment.content[1]));
        assert_eq!(first_element(&comment.content, "summar"), None);
    }

    #[test]
    fn nested_elements_are_not_searched() {
        let comment = parse("/// <remarks><para>x</para></remarks>\n").unwrap();
        assert_eq!(all_elements(&comment.content, "para").count(), 0);
    }
}
