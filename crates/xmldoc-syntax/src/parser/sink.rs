//! Sink for converting parser events into a comment tree.

use crate::lexer::Token;
use crate::node::{Attribute, AttributeValue, CommentNode, DocComment, TextToken};
use crate::parser::event::Event;
use crate::syntax_kind::SyntaxKind;

/// Converts parser events and tokens into a [`DocComment`].
pub struct Sink<'t, 'input> {
    tokens: &'t [Token<'input>],
    cursor: usize,
    events: Vec<Event>,
}

/// A node under construction.
struct Frame<'input> {
    kind: SyntaxKind,
    tokens: Vec<(SyntaxKind, &'input str)>,
    name: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<CommentNode>,
}

impl<'t, 'input> Sink<'t, 'input> {
    /// Create a new sink.
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            tokens,
            cursor: 0,
            events,
        }
    }

    /// Consume the sink and build the comment.
    pub fn finish(mut self) -> DocComment {
        let mut stack: Vec<Frame<'input>> = Vec::new();
        let mut comment = DocComment::new(None, Vec::new());

        for event in std::mem::take(&mut self.events) {
            match event {
                Event::Start { kind } => stack.push(Frame::new(kind)),
                Event::Token { kind, n_raw_tokens } => {
                    let start = self.cursor;
                    self.cursor += n_raw_tokens as usize;
                    if let Some(frame) = stack.last_mut() {
                        for token in &self.tokens[start..self.cursor] {
                            frame.tokens.push((kind, token.text));
                        }
                    }
                }
                Event::Finish => {
                    let Some(frame) = stack.pop() else {
                        continue;
                    };
                    match stack.last_mut() {
                        Some(parent) => frame.close_into(parent),
                        None => comment = frame.into_comment(),
                    }
                }
                Event::Placeholder => {}
            }
        }

        comment
    }
}

impl<'input> Frame<'input> {
    fn new(kind: SyntaxKind) -> Self {
        Frame {
            kind,
            tokens: Vec::new(),
            name: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn first(&self, kind: SyntaxKind) -> Option<&'input str> {
        self.tokens.iter().find(|(k, _)| *k == kind).map(|(_, t)| *t)
    }

    fn close_into(self, parent: &mut Frame<'input>) {
        match self.kind {
            SyntaxKind::ATTRIBUTE => {
                let name = self.first(SyntaxKind::NAME).unwrap_or_default();
                let raw = self.first(SyntaxKind::STRING).unwrap_or_default();
                let value = decode(unquote(raw));
                let value = if name == "cref" {
                    AttributeValue::Cref(value)
                } else {
                    AttributeValue::Text(value)
                };
                parent.attributes.push(Attribute {
                    name: name.to_string(),
                    value,
                });
            }
            SyntaxKind::START_TAG => {
                parent.name = self.first(SyntaxKind::NAME).map(str::to_string);
                parent.attributes.extend(self.attributes);
            }
            SyntaxKind::EMPTY_ELEMENT => {
                let name = self.first(SyntaxKind::NAME).unwrap_or_default();
                parent
                    .children
                    .push(CommentNode::empty_element(name, self.attributes));
            }
            SyntaxKind::ELEMENT => {
                parent.children.push(CommentNode::element(
                    self.name.unwrap_or_default(),
                    self.attributes,
                    self.children,
                ));
            }
            SyntaxKind::TEXT_RUN => {
                let tokens = text_tokens(&self.tokens);
                if !tokens.is_empty() {
                    parent.children.push(CommentNode::text(tokens));
                }
            }
            SyntaxKind::CDATA => {
                let text: String = self
                    .tokens
                    .iter()
                    .filter(|(k, _)| !matches!(k, SyntaxKind::CDATA_START | SyntaxKind::CDATA_END))
                    .map(|(_, t)| *t)
                    .collect();
                parent.children.push(CommentNode::raw_section(text));
            }
            // END_TAG, TERMINATOR and ERROR carry nothing into the tree
            _ => {}
        }
    }

    fn into_comment(self) -> DocComment {
        let exterior = match self.tokens.first() {
            Some((SyntaxKind::EXTERIOR, text)) => Some(text.to_string()),
            _ => None,
        };
        DocComment::new(exterior, self.children)
    }
}

fn text_tokens(tokens: &[(SyntaxKind, &str)]) -> Vec<TextToken> {
    let mut out: Vec<TextToken> = Vec::new();
    let mut literal = String::new();

    for &(kind, text) in tokens {
        match kind {
            SyntaxKind::NEWLINE => {
                flush_literal(&mut literal, &mut out);
                out.push(TextToken::new_line(text, None));
            }
            SyntaxKind::EXTERIOR if literal.is_empty() => match out.last_mut() {
                Some(last) if last.is_new_line() && last.exterior.is_none() => {
                    last.exterior = Some(text.to_string());
                }
                _ => literal.push_str(text),
            },
            _ => literal.push_str(text),
        }
    }
    flush_literal(&mut literal, &mut out);

    out
}

fn flush_literal(literal: &mut String, out: &mut Vec<TextToken>) {
    if !literal.is_empty() {
        let raw = std::mem::take(literal);
        let value = decode(&raw);
        out.push(TextToken::literal(raw, value));
    }
}

fn unquote(raw: &str) -> &str {
    if raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

fn decode(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}
