//! # Render-as-Markdown Pipeline
//!
//! Runs the passes in order over one comment:
//!
//! ```text
//! normalize -> render -> split lines -> align markers -> serialize
//!           -> read back -> eliminate redundant wrappers
//! ```
//!
//! The result is either a replacement comment or [`Fix::Unchanged`]; a
//! half-rewritten comment is never returned. Running the pipeline on its own
//! output yields `Unchanged`.

use xmldoc_syntax::serialize::to_text;
use xmldoc_syntax::{DocComment, FormatOptions, ParseError, parse};

use crate::markdown::MarkdownRenderer;
use crate::{align, boundary, render, wrapper};

/// Outcome of a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fix {
    /// Nothing to do, keep the comment as it is.
    Unchanged,
    /// Replace the comment with this one.
    Replaced(DocComment),
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("regenerated comment could not be read back")]
    Parse(#[from] ParseError),
}

/// Render the block elements of `comment` as Markdown.
///
/// `preceding_trivia` is the source text in front of the comment's first
/// marker; its last line decides the indentation of regenerated lines. A
/// renderer failure leaves the comment unchanged.
pub fn render_as_markdown(
    comment: &DocComment,
    preceding_trivia: &str,
    renderer: &dyn MarkdownRenderer,
    options: &FormatOptions,
) -> Result<Fix, PipelineError> {
    let normalized = boundary::normalize(&comment.content);

    let rendered = match render::render_block_elements(&normalized, renderer) {
        Ok(rendered) => rendered,
        Err(error) => {
            log::warn!("markdown rendering failed, leaving comment unchanged: {error}");
            return Ok(Fix::Unchanged);
        }
    };

    let marker = comment.exterior.as_deref().unwrap_or(&options.marker);
    let lines = render::split_lines(&rendered, marker, options.newline);
    let regenerated = DocComment::new(Some(marker.to_string()), lines);
    let aligned = align::align_exterior(&regenerated, preceding_trivia);

    let text = to_text(&aligned, options.newline);
    let reread = parse(&text)?;
    let result = wrapper::eliminate_in_comment(&reread);

    if to_text(&result, options.newline) == to_text(comment, options.newline) {
        log::debug!("markdown rendering produced no change");
        return Ok(Fix::Unchanged);
    }
    Ok(Fix::Replaced(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{CommonMarkRenderer, RenderError};
    use pretty_assertions::assert_eq;
    use xmldoc_syntax::NewLineStyle;

    struct FailingRenderer;

    impl MarkdownRenderer for FailingRenderer {
        fn render(&self, _markdown: &str) -> Result<String, RenderError> {
            Err(RenderError::Rejected("unsupported".into()))
        }
    }

    fn run(source: &str, trivia: &str) -> Fix {
        let comment = parse(source).unwrap();
        render_as_markdown(
            &comment,
            trivia,
            &CommonMarkRenderer::new(),
            &FormatOptions::default(),
        )
        .unwrap()
    }

    fn replaced(source: &str, trivia: &str) -> String {
        match run(source, trivia) {
            Fix::Replaced(comment) => comment.to_string(),
            Fix::Unchanged => panic!("expected a rewrite of {source:?}"),
        }
    }

    #[test]
    fn renders_emphasis() {
        assert_eq!(
            replaced("/// <summary>*hello*</summary>\n", ""),
            "/// <summary>\n/// <em>hello</em>\n/// </summary>\n"
        );
    }

    #[test]
    fn output_is_a_fixed_point() {
        let once = replaced("/// <summary>*hello*</summary>\n", "    ");
        assert_eq!(run(&once, "    "), Fix::Unchanged);
    }

    #[test]
    fn normalized_comment_is_unchanged() {
        let source = "/// <summary>\n    /// Hello\n    /// </summary>\n";
        assert_eq!(run(source, "\n    "), Fix::Unchanged);
    }

    #[test]
    fn renderer_failure_is_unchanged() {
        let comment = parse("/// <summary>*hello*</summary>\n").unwrap();
        let fix = render_as_markdown(
            &comment,
            "",
            &FailingRenderer,
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(fix, Fix::Unchanged);
    }

    #[test]
    fn marker_without_space_stays_without_space() {
        assert_eq!(
            replaced("///<summary>*a*</summary>\n", ""),
            "///<summary>\n///<em>a</em>\n///</summary>\n"
        );
    }

    #[test]
    fn crlf_output() {
        let comment = parse("/// <summary>*a*</summary>\r\n").unwrap();
        let options = FormatOptions {
            newline: NewLineStyle::CrLf,
            ..FormatOptions::default()
        };
        let fix =
            render_as_markdown(&comment, "", &CommonMarkRenderer::new(), &options).unwrap();
        let Fix::Replaced(result) = fix else {
            panic!("expected a rewrite");
        };
        assert_eq!(
            to_text(&result, NewLineStyle::CrLf),
            "/// <summary>\r\n/// <em>a</em>\r\n/// </summary>\r\n"
        );
    }
}
