//! # xmldoc-engine
//!
//! Rewrite passes over XML documentation comments. The main entry point,
//! [`render_as_markdown`], treats the prose of block elements as Markdown and
//! regenerates the comment with proper markup:
//!
//! ```
//! use xmldoc_engine::{CommonMarkRenderer, Fix, render_as_markdown};
//! use xmldoc_syntax::{FormatOptions, parse};
//!
//! let comment = parse("/// <summary>*hello*</summary>\n").unwrap();
//! let fix = render_as_markdown(&comment, "", &CommonMarkRenderer::new(), &FormatOptions::default())
//!     .unwrap();
//!
//! let Fix::Replaced(fixed) = fix else { panic!() };
//! assert_eq!(fixed.to_string(), "/// <summary>\n/// <em>hello</em>\n/// </summary>\n");
//! ```
//!
//! Every pass is a pure function from tree to tree; untouched subtrees are
//! shared with the input.

pub mod align;
pub mod boundary;
pub mod document;
pub mod fixes;
pub mod markdown;
pub mod pipeline;
pub mod render;
pub mod wrapper;

pub use document::{CommentSite, DocumentError, TextDocument};
pub use fixes::{DefaultValue, document_value_from_summary, finalize_placeholder};
pub use markdown::{CommonMarkRenderer, MarkdownRenderer, RenderError};
pub use pipeline::{Fix, PipelineError, render_as_markdown};
