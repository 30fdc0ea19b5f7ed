//! # Parser Events
//!
//! Events are the intermediate representation between parsing and tree
//! building. The grammar emits a **flat sequence** of events describing the
//! comment's structure, and the [`Sink`](super::sink::Sink) turns them into
//! [`CommentNode`](crate::node::CommentNode)s:
//!
//! ```text
//! Start(ELEMENT)
//!   Start(START_TAG)
//!     Token(LT) Token(NAME) Token(GT)
//!   Finish
//!   Start(TEXT_RUN)
//!     Token(TEXT)
//!   Finish
//!   Start(END_TAG)
//!     Token(LT_SLASH) Token(NAME) Token(GT)
//!   Finish
//! Finish
//! ```

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Add a token to the current node.
    ///
    /// `n_raw_tokens` says how many lexer tokens this event consumes.
    Token { kind: SyntaxKind, n_raw_tokens: u8 },

    /// Finish the current node.
    Finish,

    /// A placeholder left by `parser.start()`.
    ///
    /// `marker.complete()` replaces it with a real `Start`; an abandoned
    /// marker leaves it behind and the Sink ignores it.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_token_creation() {
        assert_eq!(
            Event::token(SyntaxKind::TEXT),
            Event::Token {
                kind: SyntaxKind::TEXT,
                n_raw_tokens: 1
            }
        );
    }
}
