//! # Newline-Aware Writer
//!
//! [`CommentWriter`] wraps any [`fmt::Write`] sink and makes sure every line
//! break that reaches it uses the configured terminator. With a CRLF target a
//! bare `'\n'` gets a `'\r'` in front of it, while an existing `"\r\n"` is left
//! alone, even when its two halves arrive in separate calls:
//!
//! ```
//! use xmldoc_syntax::options::NewLineStyle;
//! use xmldoc_syntax::writer::CommentWriter;
//!
//! let mut out = String::new();
//! let mut writer = CommentWriter::new(&mut out, NewLineStyle::CrLf);
//! writer.write_span("a\r").unwrap();
//! writer.write_span("\nb\n").unwrap();
//! assert_eq!(out, "a\r\nb\r\n");
//! ```

use std::fmt;

use crate::options::NewLineStyle;

/// Stand-in for the last character after a constant write.
const NOT_TERMINATED: char = '\0';

pub struct CommentWriter<W> {
    inner: W,
    newline: NewLineStyle,
    last: char,
    scratch: String,
}

impl<W: fmt::Write> CommentWriter<W> {
    pub fn new(inner: W, newline: NewLineStyle) -> Self {
        CommentWriter {
            inner,
            newline,
            last: '\n',
            scratch: String::new(),
        }
    }

    pub fn newline(&self) -> NewLineStyle {
        self.newline
    }

    /// Whether the output so far ends with a line terminator. True before
    /// anything is written.
    pub fn is_newline_terminated(&self) -> bool {
        self.last == '\n'
    }

    /// Write text that may contain line breaks.
    pub fn write_span(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }

        if self.newline == NewLineStyle::Lf || !text.contains('\n') {
            self.inner.write_str(text)?;
        } else {
            // Capacity survives `clear`, so the buffer only ever grows
            self.scratch.clear();
            let mut previous = self.last;
            for c in text.chars() {
                if c == '\n' && previous != '\r' {
                    self.scratch.push('\r');
                }
                self.scratch.push(c);
                previous = c;
            }
            self.inner.write_str(&self.scratch)?;
        }

        if let Some(last) = text.chars().next_back() {
            self.last = last;
        }
        Ok(())
    }

    /// Single character variant of [`write_span`](Self::write_span).
    pub fn write_char(&mut self, c: char) -> fmt::Result {
        if c == '\n' && self.newline == NewLineStyle::CrLf && self.last != '\r' {
            self.inner.write_char('\r')?;
        }
        self.inner.write_char(c)?;
        self.last = c;
        Ok(())
    }

    /// Write text known to hold no line break, without scanning it.
    pub fn write_constant(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }
        self.inner.write_str(text)?;
        self.last = NOT_TERMINATED;
        Ok(())
    }

    /// A constant followed by a line terminator.
    pub fn write_line_constant(&mut self, text: &str) -> fmt::Result {
        self.inner.write_str(text)?;
        self.write_line()
    }

    pub fn write_line(&mut self) -> fmt::Result {
        self.inner.write_str(self.newline.as_str())?;
        self.last = '\n';
        Ok(())
    }

    pub fn ensure_terminated_by_newline(&mut self) -> fmt::Result {
        if self.is_newline_terminated() {
            return Ok(());
        }
        self.write_line()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: fmt::Write> fmt::Write for CommentWriter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_span(s)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        CommentWriter::write_char(self, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn crlf(spans: &[&str]) -> String {
        let mut out = String::new();
        let mut writer = CommentWriter::new(&mut out, NewLineStyle::CrLf);
        for span in spans {
            writer.write_span(span).unwrap();
        }
        out
    }

    #[rstest]
    #[case(&["a\nb"], "a\r\nb")]
    #[case(&["a\r\nb"], "a\r\nb")]
    #[case(&["a\r", "\nb"], "a\r\nb")]
    #[case(&["a", "\nb"], "a\r\nb")]
    #[case(&["\n"], "\r\n")]
    #[case(&["a\n\n", "\r\n"], "a\r\n\r\n\r\n")]
    #[case(&["", "x"], "x")]
    fn crlf_normalization(#[case] spans: &[&str], #[case] expected: &str) {
        assert_eq!(crlf(spans), expected);
    }

    #[test]
    fn lf_target_passes_text_through() {
        let mut out = String::new();
        let mut writer = CommentWriter::new(&mut out, NewLineStyle::Lf);
        writer.write_span("a\nb\r\nc").unwrap();
        assert_eq!(out, "a\nb\r\nc");
    }

    #[test]
    fn write_char_checks_previous_character() {
        let mut out = String::new();
        let mut writer = CommentWriter::new(&mut out, NewLineStyle::CrLf);
        writer.write_char('\r').unwrap();
        writer.write_char('\n').unwrap();
        writer.write_char('\n').unwrap();
        assert_eq!(out, "\r\n\r\n");
    }

    #[test]
    fn constant_marks_unterminated() {
        let mut out = String::new();
        let mut writer = CommentWriter::new(&mut out, NewLineStyle::Lf);
        assert!(writer.is_newline_terminated());
        writer.write_constant("/// ").unwrap();
        assert!(!writer.is_newline_terminated());
        writer.write_line_constant("x").unwrap();
        assert!(writer.is_newline_terminated());
        assert_eq!(out, "/// x\n");
    }

    #[test]
    fn ensure_terminated_is_idempotent() {
        let mut out = String::new();
        let mut writer = CommentWriter::new(&mut out, NewLineStyle::CrLf);
        writer.write_span("x").unwrap();
        writer.ensure_terminated_by_newline().unwrap();
        writer.ensure_terminated_by_newline().unwrap();
        assert_eq!(out, "x\r\n");
    }

    #[test]
    fn ensure_terminated_accepts_span_ending_in_newline() {
        let mut out = String::new();
        let mut writer = CommentWriter::new(&mut out, NewLineStyle::Lf);
        writer.write_span("x\n").unwrap();
        writer.ensure_terminated_by_newline().unwrap();
        assert_eq!(out, "x\n");
    }

    #[test]
    fn scratch_buffer_is_reused() {
        let mut out = String::new();
        let mut writer = CommentWriter::new(&mut out, NewLineStyle::CrLf);
        writer.write_span("a long line\nwith a break").unwrap();
        let capacity = writer.scratch.capacity();
        writer.write_span("x\n").unwrap();
        assert_eq!(writer.scratch.capacity(), capacity);
    }
}
