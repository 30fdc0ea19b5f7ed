//! # xmldoc-syntax
//!
//! The tree model for XML documentation comments (`/// <summary>..`) and
//! everything needed to get text in and out of it:
//!
//! - [`lexer`] and [`parser`] read the source text of one `///` block into a
//!   [`DocComment`]
//! - [`node`] holds the immutable, `Arc`-shared tree
//! - [`factory`] and [`query`] build and search content
//! - [`writer`] and [`serialize`] turn trees back into text, normalizing line
//!   terminators on the way
//!
//! ```
//! use xmldoc_syntax::{parse, query::first_element};
//!
//! let source = "/// <summary>\n/// Hello\n/// </summary>\n";
//! let comment = parse(source).unwrap();
//! assert!(first_element(&comment.content, "summary").is_some());
//! assert_eq!(comment.to_string(), source);
//! ```

pub mod factory;
pub mod lexer;
pub mod node;
pub mod options;
pub mod parser;
pub mod query;
pub mod serialize;
pub mod syntax_kind;
pub mod writer;

pub use node::{
    Attribute, AttributeValue, CommentNode, DocComment, Element, EmptyElement, RawSection, Text,
    TextToken, TextTokenKind,
};
pub use options::{FormatOptions, NewLineStyle};
pub use parser::{ParseError, parse};
pub use syntax_kind::SyntaxKind;
pub use writer::CommentWriter;
