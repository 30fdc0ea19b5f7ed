//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to inspect the
//! current token, consume tokens, and build structure with markers.
//!
//! ```text
//! comment   = EXTERIOR content* TERMINATOR?
//! content   = element | cdata | text_run
//! element   = LT NAME attribute* (SLASH_GT | GT content* END_TAG)
//! attribute = WHITESPACE NAME WHITESPACE? EQ WHITESPACE? STRING
//! text_run  = (anything else | NEWLINE EXTERIOR)+
//! ```
//!
//! Rules are lenient: they keep consuming after a problem so that every
//! token ends up in some node, and report the first problem through
//! `Parser::error`.

use crate::parser::{ParseError, Parser};
use crate::syntax_kind::SyntaxKind;

/// Parse the whole comment.
pub fn comment(p: &mut Parser<'_, '_>) {
    let m = p.start();

    if !p.eat(SyntaxKind::EXTERIOR) {
        let offset = p.offset();
        p.error(ParseError::MissingMarker { offset });
    }

    loop {
        content(p);

        if p.at(SyntaxKind::LT_SLASH) {
            let offset = p.offset();
            p.error(ParseError::UnexpectedEndTag { offset });
            stray_end_tag(p);
            continue;
        }

        break;
    }

    if p.at(SyntaxKind::NEWLINE) {
        let t = p.start();
        p.bump();
        t.complete(p, SyntaxKind::TERMINATOR);
    }

    m.complete(p, SyntaxKind::COMMENT);
}

/// Parse content until an end tag, the final line terminator, or the end.
fn content(p: &mut Parser<'_, '_>) {
    loop {
        match p.current() {
            SyntaxKind::EOF | SyntaxKind::LT_SLASH => break,
            SyntaxKind::NEWLINE if p.nth(1) == SyntaxKind::EOF => break,
            SyntaxKind::LT if p.nth(1) == SyntaxKind::NAME => element(p),
            SyntaxKind::CDATA_START => cdata(p),
            _ => text_run(p),
        }
    }
}

fn text_run(p: &mut Parser<'_, '_>) {
    let m = p.start();

    loop {
        match p.current() {
            SyntaxKind::EOF | SyntaxKind::LT_SLASH | SyntaxKind::CDATA_START => break,
            SyntaxKind::LT if p.nth(1) == SyntaxKind::NAME => break,
            SyntaxKind::NEWLINE => {
                // The comment's own terminator is not content
                if p.nth(1) == SyntaxKind::EOF {
                    break;
                }
                p.bump();
                if !p.eat(SyntaxKind::EXTERIOR) {
                    let offset = p.offset();
                    p.error(ParseError::MissingMarker { offset });
                }
            }
            _ => p.bump(),
        }
    }

    m.complete(p, SyntaxKind::TEXT_RUN);
}

fn element(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let open_offset = p.offset();

    let tag = p.start();
    p.bump(); // LT
    let name = p.current_text().to_string();
    p.bump(); // NAME
    attributes(p);
    p.eat(SyntaxKind::WHITESPACE);

    if p.eat(SyntaxKind::SLASH_GT) {
        // The tag tokens belong directly to the empty element
        tag.abandon(p);
        m.complete(p, SyntaxKind::EMPTY_ELEMENT);
        return;
    }

    if !p.eat(SyntaxKind::GT) {
        p.error(ParseError::UnterminatedTag {
            name,
            offset: open_offset,
        });
        tag.complete(p, SyntaxKind::START_TAG);
        m.complete(p, SyntaxKind::ERROR);
        return;
    }
    tag.complete(p, SyntaxKind::START_TAG);

    content(p);

    if p.at(SyntaxKind::LT_SLASH) {
        end_tag(p, &name);
    } else {
        p.error(ParseError::UnclosedElement {
            name,
            offset: open_offset,
        });
    }

    m.complete(p, SyntaxKind::ELEMENT);
}

fn end_tag(p: &mut Parser<'_, '_>, expected: &str) {
    let m = p.start();
    let offset = p.offset();
    p.bump(); // LT_SLASH

    let found = if p.at(SyntaxKind::NAME) {
        let text = p.current_text();
        p.bump();
        text
    } else {
        ""
    };

    if found != expected {
        p.error(ParseError::MismatchedEndTag {
            expected: expected.to_string(),
            found: found.to_string(),
            offset,
        });
    }

    p.eat(SyntaxKind::WHITESPACE);
    if !p.eat(SyntaxKind::GT) {
        p.error(ParseError::UnterminatedTag {
            name: found.to_string(),
            offset,
        });
    }

    m.complete(p, SyntaxKind::END_TAG);
}

fn attributes(p: &mut Parser<'_, '_>) {
    while p.at(SyntaxKind::WHITESPACE) && p.nth(1) == SyntaxKind::NAME {
        let m = p.start();
        let offset = p.offset();
        p.bump(); // WHITESPACE
        p.bump(); // NAME
        p.eat(SyntaxKind::WHITESPACE);

        let mut well_formed = p.eat(SyntaxKind::EQ);
        if well_formed {
            p.eat(SyntaxKind::WHITESPACE);
            well_formed = p.eat(SyntaxKind::STRING);
        }
        if !well_formed {
            p.error(ParseError::MalformedAttribute { offset });
        }

        m.complete(p, SyntaxKind::ATTRIBUTE);
    }
}

fn cdata(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let offset = p.offset();
    p.bump(); // CDATA_START

    while !p.at_end() && !p.at(SyntaxKind::CDATA_END) {
        p.bump();
    }
    if !p.eat(SyntaxKind::CDATA_END) {
        p.error(ParseError::UnterminatedCData { offset });
    }

    m.complete(p, SyntaxKind::CDATA);
}

fn stray_end_tag(p: &mut Parser<'_, '_>) {
    let m = p.start();
    while !p.at_end() && !p.at(SyntaxKind::GT) {
        p.bump();
    }
    p.eat(SyntaxKind::GT);
    m.complete(p, SyntaxKind::ERROR);
}
