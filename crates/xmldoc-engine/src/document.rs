//! # Text Document Host
//!
//! A source file held in one `xi_rope::Rope`. The host finds the `///`
//! comment blocks in it, reads each one into a [`DocComment`], and writes
//! replacements back through a rope delta. Nothing outside a replaced span
//! changes, byte for byte.
//!
//! ```
//! use xmldoc_engine::document::TextDocument;
//!
//! let doc = TextDocument::new("    /// <summary>Hi</summary>\n    fn f() {}\n");
//! let sites = doc.doc_comments();
//! assert_eq!(sites.len(), 1);
//! assert_eq!(sites[0].indentation, "    ");
//! ```

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use xi_rope::Rope;
use xi_rope::delta::Builder;
use xmldoc_syntax::serialize::to_text;
use xmldoc_syntax::{DocComment, FormatOptions, ParseError, parse};

use crate::align::align_exterior;
use crate::markdown::MarkdownRenderer;
use crate::pipeline::{Fix, render_as_markdown};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("span {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("byte {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    #[error("comment at byte {offset} could not be parsed")]
    Parse {
        offset: usize,
        #[source]
        source: ParseError,
    },
}

/// Where a comment block sits in its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSite {
    /// From the first `///` to the end of the block's last line, line break
    /// included.
    pub span: Range<usize>,
    /// Whitespace in front of the first marker.
    pub indentation: String,
    /// Source text in front of the first marker, starting with the previous
    /// line break when there is one.
    pub preceding_trivia: String,
}

#[derive(Debug, Clone)]
pub struct TextDocument {
    buffer: Rope,
}

/// A `///` line that is not a `////` line.
fn comment_line() -> &'static Regex {
    static COMMENT_LINE: OnceLock<Regex> = OnceLock::new();
    COMMENT_LINE.get_or_init(|| {
        Regex::new(r"^([ \t]*)///(?:[^/]|$)").expect("Invalid comment line regex")
    })
}

impl TextDocument {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Every block of consecutive `///` lines, in document order.
    pub fn doc_comments(&self) -> Vec<CommentSite> {
        let mut sites = Vec::new();
        let mut current: Option<CommentSite> = None;
        let mut offset = 0;

        for line in self.buffer.lines_raw(..) {
            let line_start = offset;
            offset += line.len();

            let Some(captures) = comment_line().captures(&line) else {
                sites.extend(current.take());
                continue;
            };

            match current.as_mut() {
                Some(site) => site.span.end = offset,
                None => {
                    let indentation = captures.get(1).map_or("", |m| m.as_str()).to_string();
                    let marker = line_start + indentation.len();
                    let trivia_start = line_start.saturating_sub(1);
                    current = Some(CommentSite {
                        span: marker..offset,
                        preceding_trivia: self
                            .buffer
                            .slice_to_cow(trivia_start..marker)
                            .into_owned(),
                        indentation,
                    });
                }
            }
        }
        sites.extend(current);
        log::trace!("found {} comment blocks", sites.len());
        sites
    }

    fn check_span(&self, span: &Range<usize>) -> Result<(), DocumentError> {
        let len = self.buffer.len();
        if span.start > span.end || span.end > len {
            return Err(DocumentError::OutOfBounds {
                start: span.start,
                end: span.end,
                len,
            });
        }
        for offset in [span.start, span.end] {
            if !self.buffer.is_codepoint_boundary(offset) {
                return Err(DocumentError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }

    fn source_of(&self, span: &Range<usize>) -> Result<String, DocumentError> {
        self.check_span(span)?;
        Ok(self.buffer.slice_to_cow(span.clone()).into_owned())
    }

    /// Parse the comment at `site`.
    pub fn read(&self, site: &CommentSite) -> Result<DocComment, DocumentError> {
        let source = self.source_of(&site.span)?;
        parse(&source).map_err(|source| DocumentError::Parse {
            offset: site.span.start,
            source,
        })
    }

    /// A new document with the span of `site` holding `comment`.
    ///
    /// A comment without a first-line marker gets `options.marker`. Line
    /// markers are re-indented to the site's indentation.
    pub fn replace(
        &self,
        site: &CommentSite,
        comment: &DocComment,
        options: &FormatOptions,
    ) -> Result<TextDocument, DocumentError> {
        self.check_span(&site.span)?;

        let comment = match comment.exterior {
            Some(_) => comment.clone(),
            None => DocComment::new(Some(options.marker.clone()), comment.content.clone()),
        };
        let aligned = align_exterior(&comment, &site.preceding_trivia);
        let text = to_text(&aligned, options.newline);

        let mut builder = Builder::new(self.buffer.len());
        builder.replace(site.span.clone(), Rope::from(text));
        let delta = builder.build();
        Ok(TextDocument {
            buffer: delta.apply(&self.buffer),
        })
    }

    /// Run the Markdown pipeline over every comment block.
    ///
    /// Blocks that do not parse, or whose rewrite fails, are left as they
    /// are.
    pub fn render_all(
        &self,
        renderer: &dyn MarkdownRenderer,
        options: &FormatOptions,
    ) -> Result<TextDocument, DocumentError> {
        let mut doc = self.clone();
        // Back to front, so earlier spans stay valid
        for site in self.doc_comments().iter().rev() {
            let comment = match self.read(site) {
                Ok(comment) => comment,
                Err(error) => {
                    log::warn!("skipping comment: {error}");
                    continue;
                }
            };
            match render_as_markdown(&comment, &site.preceding_trivia, renderer, options) {
                Ok(Fix::Replaced(fixed)) => doc = doc.replace(site, &fixed, options)?,
                Ok(Fix::Unchanged) => {}
                Err(error) => log::warn!("skipping comment at byte {}: {error}", site.span.start),
            }
        }
        Ok(doc)
    }
}
