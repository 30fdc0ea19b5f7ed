//! Markdown to documentation markup.
//!
//! Rendering runs in two stages: `pulldown-cmark` parses the prose with its
//! default options, then [`DocMarkupPrinter`] writes the events out as the
//! tags documentation comments understand.
//!
//! | Markdown | Markup |
//! |---|---|
//! | paragraph | `<para>..</para>` |
//! | `*em*`, `**strong**` | `<em>`, `<strong>` |
//! | `` `code` `` | `<c>..</c>` |
//! | code block | `<code>..</code>` |
//! | list | `<list type="bullet">` or `"number"`, `<item><description>` |
//! | link | `<see href="..">..</see>` |
//! | heading | `<para><strong>..</strong></para>` |
//! | `---` | `<para/>` |
//!
//! HTML passes through untouched, so markup already present in a comment
//! survives rendering. Prose text is entity-encoded on the way out. Code is
//! not entity-decoded by the parser, so only its angle brackets are escaped
//! and entities written in the source stay as they are.

use std::fmt;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use xmldoc_syntax::{CommentWriter, NewLineStyle};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write rendered markup")]
    Format(#[from] fmt::Error),

    #[error("unbalanced markup: no open element for `{tag}`")]
    Unbalanced { tag: String },

    #[error("renderer rejected the text: {0}")]
    Rejected(String),
}

/// Turns Markdown prose into documentation markup.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// The CommonMark renderer backed by `pulldown-cmark`.
#[derive(Debug, Default)]
pub struct CommonMarkRenderer;

impl CommonMarkRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let mut out = String::new();
        let mut printer = DocMarkupPrinter::new(CommentWriter::new(&mut out, NewLineStyle::Lf));
        for event in Parser::new(markdown) {
            printer.event(event)?;
        }
        printer.finish()?;
        Ok(out)
    }
}

/// Writes `pulldown-cmark` events as documentation markup.
pub struct DocMarkupPrinter<W> {
    writer: CommentWriter<W>,
    /// Closing tags of the elements currently open, innermost last.
    open: Vec<&'static str>,
    /// Blocks written so far at the current nesting level.
    blocks: usize,
    /// Block counts of the enclosing list items.
    outer_blocks: Vec<usize>,
}

impl<W: fmt::Write> DocMarkupPrinter<W> {
    pub fn new(writer: CommentWriter<W>) -> Self {
        Self {
            writer,
            open: Vec::new(),
            blocks: 0,
            outer_blocks: Vec::new(),
        }
    }

    pub fn event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start(tag)?,
            Event::End(tag) => self.end(tag)?,
            Event::Text(text) if self.in_code_block() => self.code_text(&text)?,
            Event::Text(text) => self.text(&text)?,
            Event::Code(code) => {
                self.writer.write_constant("<c>")?;
                self.code_text(&code)?;
                self.writer.write_constant("</c>")?;
            }
            Event::Html(html) | Event::InlineHtml(html) => self.writer.write_span(&html)?,
            Event::SoftBreak | Event::HardBreak => self.writer.write_line()?,
            Event::Rule => {
                self.block_separator()?;
                self.writer.write_constant("<para/>")?;
            }
            // Extensions are off, these never arrive with default options
            Event::InlineMath(text) | Event::DisplayMath(text) => self.text(&text)?,
            Event::FootnoteReference(label) => self.text(&label)?,
            Event::TaskListMarker(_) => {}
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) -> Result<(), RenderError> {
        match tag {
            Tag::Paragraph => {
                self.block_separator()?;
                self.open_tag("<para>", "</para>")?;
            }
            Tag::Heading { .. } => {
                self.block_separator()?;
                self.open_tag("<para><strong>", "</strong></para>")?;
            }
            Tag::CodeBlock(_) => {
                self.block_separator()?;
                self.writer.write_line_constant("<code>")?;
                self.open.push("</code>");
            }
            Tag::HtmlBlock => self.block_separator()?,
            Tag::List(first) => {
                self.block_separator()?;
                self.writer.ensure_terminated_by_newline()?;
                let kind = if first.is_some() { "number" } else { "bullet" };
                self.writer.write_constant("<list type=\"")?;
                self.writer.write_constant(kind)?;
                self.writer.write_line_constant("\">")?;
                self.open.push("</list>");
            }
            Tag::Item => {
                self.writer.ensure_terminated_by_newline()?;
                self.open_tag("<item><description>", "</description></item>")?;
                self.outer_blocks.push(self.blocks);
                self.blocks = 0;
            }
            Tag::Emphasis => self.open_tag("<em>", "</em>")?,
            Tag::Strong => self.open_tag("<strong>", "</strong>")?,
            Tag::Strikethrough => self.open_tag("<s>", "</s>")?,
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.writer.write_constant("<see href=\"")?;
                self.writer
                    .write_span(&html_escape::encode_double_quoted_attribute(&*dest_url))?;
                self.open_tag("\">", "</see>")?;
            }
            // Block quotes render their content only. Extensions are off, the
            // rest never arrive with default options
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, tag: TagEnd) -> Result<(), RenderError> {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => self.close_tag(),
            TagEnd::CodeBlock => {
                self.writer.ensure_terminated_by_newline()?;
                self.close_tag()
            }
            TagEnd::List(_) => {
                self.writer.ensure_terminated_by_newline()?;
                self.close_tag()
            }
            TagEnd::Item => {
                self.close_tag()?;
                self.blocks = self.outer_blocks.pop().unwrap_or_default();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn text(&mut self, text: &str) -> Result<(), RenderError> {
        self.writer.write_span(&html_escape::encode_text(text))?;
        Ok(())
    }

    fn code_text(&mut self, code: &str) -> Result<(), RenderError> {
        let escaped = code.replace('<', "&lt;").replace('>', "&gt;");
        self.writer.write_span(&escaped)?;
        Ok(())
    }

    fn in_code_block(&self) -> bool {
        self.open.last() == Some(&"</code>")
    }

    fn open_tag(&mut self, open: &str, close: &'static str) -> Result<(), RenderError> {
        self.writer.write_constant(open)?;
        self.open.push(close);
        Ok(())
    }

    fn close_tag(&mut self) -> Result<(), RenderError> {
        let close = self.open.pop().ok_or_else(|| RenderError::Unbalanced {
            tag: "end of block".to_string(),
        })?;
        self.writer.write_constant(close)?;
        Ok(())
    }

    /// Separate top-level blocks by a blank line, nested blocks by a line
    /// break.
    fn block_separator(&mut self) -> fmt::Result {
        if self.blocks > 0 {
            self.writer.ensure_terminated_by_newline()?;
            if self.open.is_empty() {
                self.writer.write_line()?;
            }
        }
        self.blocks += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<CommentWriter<W>, RenderError> {
        if let Some(close) = self.open.pop() {
            return Err(RenderError::Unbalanced {
                tag: close.to_string(),
            });
        }
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn render(markdown: &str) -> String {
        CommonMarkRenderer::new().render(markdown).unwrap()
    }

    #[rstest]
    #[case("*hello*", "<para><em>hello</em></para>")]
    #[case("**bold**", "<para><strong>bold</strong></para>")]
    #[case("use `x < y`", "<para>use <c>x &lt; y</c></para>")]
    #[case("Tom & Jerry", "<para>Tom &amp; Jerry</para>")]
    #[case("# Title", "<para><strong>Title</strong></para>")]
    #[case("[docs](https://example.com)", "<para><see href=\"https://example.com\">docs</see></para>")]
    fn renders_inline_markup(#[case] markdown: &str, #[case] expected: &str) {
        assert_eq!(render(markdown), expected);
    }

    #[test]
    fn paragraphs_are_separated_by_a_blank_line() {
        assert_eq!(render("one\n\ntwo"), "<para>one</para>\n\n<para>two</para>");
    }

    #[test]
    fn soft_breaks_keep_lines() {
        assert_eq!(render("one\ntwo"), "<para>one\ntwo</para>");
    }

    #[test]
    fn tight_bullet_list() {
        assert_eq!(
            render("- a\n- b"),
            "<list type=\"bullet\">\n<item><description>a</description></item>\n<item><description>b</description></item>\n</list>"
        );
    }

    #[test]
    fn numbered_list() {
        assert!(render("1. a\n2. b").starts_with("<list type=\"number\">\n"));
    }

    #[test]
    fn code_block_keeps_lines() {
        assert_eq!(
            render("```\nlet x = 1;\nx < 2\n```"),
            "<code>\nlet x = 1;\nx &lt; 2\n</code>"
        );
    }

    #[test]
    fn code_keeps_entities_from_the_source() {
        assert_eq!(
            render("`List&lt;T&gt;` and `a && b`"),
            "<para><c>List&lt;T&gt;</c> and <c>a && b</c></para>"
        );
        assert_eq!(
            render("```
if (x &lt; 2 && y > 1) { }
```"),
            "<code>
if (x &lt; 2 && y &gt; 1) { }
</code>"
        );
    }

    #[test]
    fn prose_entities_are_encoded_again() {
        assert_eq!(
            render("Returns a List&lt;T&gt; of Tom &amp; Jerry"),
            "<para>Returns a List&lt;T&gt; of Tom &amp; Jerry</para>"
        );
    }

    #[test]
    fn thematic_break_is_an_empty_para() {
        assert_eq!(
            render("a\n\n---\n\nb"),
            "<para>a</para>\n\n<para/>\n\n<para>b</para>"
        );
    }

    #[test]
    fn existing_markup_passes_through() {
        assert_eq!(
            render("See <see cref=\"T:Foo\"/> now"),
            "<para>See <see cref=\"T:Foo\"/> now</para>"
        );
    }

    #[test]
    fn unbalanced_close_is_an_error() {
        let mut out = String::new();
        let mut printer = DocMarkupPrinter::new(CommentWriter::new(&mut out, NewLineStyle::Lf));
        let result = printer.event(Event::End(TagEnd::Emphasis));
        assert!(matches!(result, Err(RenderError::Unbalanced { .. })));
    }

    #[test]
    fn unclosed_element_is_an_error() {
        let mut out = String::new();
        let mut printer = DocMarkupPrinter::new(CommentWriter::new(&mut out, NewLineStyle::Lf));
        printer.event(Event::Start(Tag::Emphasis)).unwrap();
        assert!(matches!(
            printer.finish(),
            Err(RenderError::Unbalanced { tag }) if tag == "</em>"
        ));
    }
}
