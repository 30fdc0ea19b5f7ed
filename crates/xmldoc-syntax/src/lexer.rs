//! # Lexer - Tokenizing Documentation Comment Text
//!
//! The first stage of reading a comment: breaking the source text of a `///`
//! block into tokens with the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input appears in exactly one token:
//!
//! ```
//! use xmldoc_syntax::lexer::lex;
//!
//! let input = "/// <summary>Hello</summary>\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Line Markers
//!
//! Logos only sees `///`. A second pass folds the indentation before a
//! line-initial `///` and one space after it into a single `EXTERIOR` token,
//! so the parser sees exactly one marker per physical line. A `///` anywhere
//! else on a line is plain `TEXT`.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// Exists separately from [`SyntaxKind`] because Logos needs to derive on it.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// `///` comment marker
    #[token("///")]
    Exterior,

    #[token("<![CDATA[")]
    CDataStart,

    #[token("]]>")]
    CDataEnd,

    #[token("</")]
    LtSlash,

    #[token("/>")]
    SlashGt,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("=")]
    Eq,

    /// Quoted string on a single line
    #[regex(r#""[^"\r\n]*""#)]
    #[regex(r"'[^'\r\n]*'")]
    String,

    /// Element or attribute name
    #[regex(r"[A-Za-z_][A-Za-z0-9_.:\-]*")]
    Name,

    /// Plain text - anything not matched by other rules
    #[regex(r#"[^\s<>="'/\]A-Za-z_]+"#)]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Exterior => SyntaxKind::EXTERIOR,
            TokenKind::CDataStart => SyntaxKind::CDATA_START,
            TokenKind::CDataEnd => SyntaxKind::CDATA_END,
            TokenKind::LtSlash => SyntaxKind::LT_SLASH,
            TokenKind::SlashGt => SyntaxKind::SLASH_GT,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::String => SyntaxKind::STRING,
            TokenKind::Name => SyntaxKind::NAME,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind, text slice and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: usize,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    fold_exteriors(input, lex_raw(input))
}

fn lex_raw(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Logos error means unrecognized character - treat as TEXT
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push(Token {
            kind,
            text: lexer.slice(),
            offset: lexer.span().start,
        });
    }

    tokens
}

/// Folds `[WHITESPACE] EXTERIOR [one space]` at each line start into one
/// `EXTERIOR` token and demotes every other `///` to `TEXT`.
fn fold_exteriors<'a>(input: &'a str, raw: Vec<Token<'a>>) -> Vec<Token<'a>> {
    let mut out: Vec<Token<'a>> = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let at_line_start = out.last().is_none_or(|t| t.kind == SyntaxKind::NEWLINE);
        if at_line_start {
            let marker_at = if raw[i].kind == SyntaxKind::WHITESPACE {
                i + 1
            } else {
                i
            };

            if raw
                .get(marker_at)
                .is_some_and(|t| t.kind == SyntaxKind::EXTERIOR)
            {
                let start = raw[i].offset;
                let mut end = raw[marker_at].offset + raw[marker_at].text.len();
                i = marker_at + 1;

                let mut remainder = None;
                if let Some(ws) = raw.get(i)
                    && ws.kind == SyntaxKind::WHITESPACE
                    && ws.text.starts_with(' ')
                {
                    end += 1;
                    if ws.text.len() > 1 {
                        remainder = Some(Token {
                            kind: SyntaxKind::WHITESPACE,
                            text: &ws.text[1..],
                            offset: ws.offset + 1,
                        });
                    }
                    i += 1;
                }

                out.push(Token {
                    kind: SyntaxKind::EXTERIOR,
                    text: &input[start..end],
                    offset: start,
                });
                out.extend(remainder);
                continue;
            }
        }

        let mut token = raw[i].clone();
        if token.kind == SyntaxKind::EXTERIOR {
            token.kind = SyntaxKind::TEXT;
        }
        out.push(token);
        i += 1;
    }

    out
}
