//! # Parser - Event-Based Tree Construction
//!
//! Reads the token stream of one `///` block into a [`DocComment`], using the
//! event-based architecture from rust-analyzer: grammar rules emit a flat list
//! of [`Event`]s and the [`Sink`] builds the tree from them.
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`] that **must** be either completed
//! (`marker.complete(parser, KIND)`) or abandoned (`marker.abandon(parser)`).
//! Dropping it otherwise panics, which catches grammar bugs early.
//!
//! ## Errors
//!
//! The grammar is lenient and always produces events for every token, but it
//! records the first structural problem it meets (a tag that never closes, a
//! line without a marker, ...). [`parse`] reports that problem instead of
//! returning a tree that would not round-trip.
//!
//! ```
//! use xmldoc_syntax::parse;
//!
//! let comment = parse("/// <summary>Hello</summary>\n").unwrap();
//! assert_eq!(comment.content[0].name(), Some("summary"));
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::node::DocComment;
use crate::syntax_kind::SyntaxKind;
use event::Event;
use sink::Sink;

/// Structural problems found while reading a comment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected a `///` marker at offset {offset}")]
    MissingMarker { offset: usize },

    #[error("tag `{name}` at offset {offset} is not terminated")]
    UnterminatedTag { name: String, offset: usize },

    #[error("malformed attribute at offset {offset}")]
    MalformedAttribute { offset: usize },

    #[error("expected `</{expected}>` but found `</{found}>` at offset {offset}")]
    MismatchedEndTag {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("element `{name}` opened at offset {offset} is never closed")]
    UnclosedElement { name: String, offset: usize },

    #[error("unexpected end tag at offset {offset}")]
    UnexpectedEndTag { offset: usize },

    #[error("CDATA section at offset {offset} is not terminated")]
    UnterminatedCData { offset: usize },
}

/// The parser state machine.
///
/// Holds the token stream, current position, accumulated events and the
/// first error seen.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    error: Option<ParseError>,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            error: None,
        }
    }

    /// Parse the tokens into a comment.
    pub fn parse(mut self) -> Result<DocComment, ParseError> {
        grammar::comment(&mut self);
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(Sink::new(self.tokens, self.events).finish())
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.nth_text(0)
    }

    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Byte offset of the current token, or the input length at the end.
    pub fn offset(&self) -> usize {
        match self.tokens.get(self.pos) {
            Some(token) => token.offset,
            None => self
                .tokens
                .last()
                .map(|t| t.offset + t.text.len())
                .unwrap_or(0),
        }
    }

    /// Record an error. Only the first one is kept.
    pub fn error(&mut self, error: ParseError) {
        if self.error.is_none() {
            log::trace!("doc comment parse error: {error}");
            self.error = Some(error);
        }
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you get
/// a `Marker` pointing to it. Completing it turns the placeholder into a
/// `Start` and pushes a `Finish`; abandoning it leaves an inert placeholder.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start { kind };
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// Only removes the placeholder if it's the last event. If other events
    /// were pushed after `start()`, the placeholder becomes inert and the
    /// tokens belong to the enclosing node.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Read the source text of one `///` block into a comment.
///
/// The text must start at the first marker; indentation before the first
/// marker belongs to the surrounding source.
pub fn parse(source: &str) -> Result<DocComment, ParseError> {
    let tokens = lex(source);
    Parser::new(&tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input_is_missing_marker() {
        assert_eq!(parse(""), Err(ParseError::MissingMarker { offset: 0 }));
    }

    #[test]
    fn parse_reports_unclosed_element() {
        assert_eq!(
            parse("/// <summary>Hello\n"),
            Err(ParseError::UnclosedElement {
                name: "summary".into(),
                offset: 4
            })
        );
    }

    #[test]
    fn parse_reports_mismatched_end_tag() {
        assert_eq!(
            parse("/// <para>x</summary>"),
            Err(ParseError::MismatchedEndTag {
                expected: "para".into(),
                found: "summary".into(),
                offset: 11
            })
        );
    }

    #[test]
    fn parse_reports_line_without_marker() {
        assert_eq!(
            parse("/// <para>\nx</para>"),
            Err(ParseError::MissingMarker { offset: 11 })
        );
    }

    #[test]
    fn parse_reports_stray_end_tag() {
        assert_eq!(
            parse("/// </para>"),
            Err(ParseError::UnexpectedEndTag { offset: 4 })
        );
    }

    #[test]
    fn marker_must_be_completed() {
        let result = std::panic::catch_unwind(|| {
            let tokens = lex("/// test");
            let mut parser = Parser::new(&tokens);
            let _marker = parser.start();
        });
        assert!(result.is_err());
    }

    #[test]
    fn marker_can_be_abandoned() {
        let tokens = lex("/// test");
        let mut parser = Parser::new(&tokens);
        let marker = parser.start();
        marker.abandon(&mut parser);
    }
}
