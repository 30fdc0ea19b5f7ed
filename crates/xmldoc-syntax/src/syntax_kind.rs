//! SyntaxKind enum for the tokens and nodes of a documentation comment.
//!
//! Tokens and nodes share a single enum, the same way the lexer output and
//! the parser events talk about the same kinds.

/// All syntax kinds seen while reading a documentation comment.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending (LF or CRLF)
    NEWLINE,
    /// Line marker: indentation, `///` and at most one following space
    EXTERIOR,
    /// `<` opening a start tag
    LT,
    /// `</` opening an end tag
    LT_SLASH,
    /// `/>` closing an empty element
    SLASH_GT,
    /// `>` closing a tag
    GT,
    /// `=` between attribute name and value
    EQ,
    /// Quoted attribute value, quotes included
    STRING,
    /// Element or attribute name
    NAME,
    /// `<![CDATA[`
    CDATA_START,
    /// `]]>`
    CDATA_END,
    /// Any other run of characters
    TEXT,
    /// End of input marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// The whole comment
    COMMENT,
    /// Element with start tag, content and end tag
    ELEMENT,
    /// Self-closing element
    EMPTY_ELEMENT,
    /// `<name attr="value">`
    START_TAG,
    /// `</name>`
    END_TAG,
    /// `name="value"` inside a tag
    ATTRIBUTE,
    /// Literal text and line breaks
    TEXT_RUN,
    /// `<![CDATA[ ... ]]>`
    CDATA,
    /// The line terminator ending the comment
    TERMINATOR,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Whether this kind is a token (as opposed to a composite node).
    pub fn is_token(self) -> bool {
        (self as u16) <= (SyntaxKind::EOF as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_and_nodes_are_partitioned() {
        assert!(SyntaxKind::EXTERIOR.is_token());
        assert!(SyntaxKind::EOF.is_token());
        assert!(!SyntaxKind::ELEMENT.is_token());
        assert!(!SyntaxKind::ERROR.is_token());
    }
}
