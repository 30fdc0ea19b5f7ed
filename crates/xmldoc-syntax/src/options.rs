//! Formatting defaults shared by the builders, the writer and the passes.

use serde::{Deserialize, Serialize};

/// Line terminator written between comment lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLineStyle {
    #[default]
    Lf,
    CrLf,
}

impl NewLineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            NewLineStyle::Lf => "\n",
            NewLineStyle::CrLf => "\r\n",
        }
    }

    /// `CrLf` when the text contains at least one `"\r\n"`, `Lf` otherwise.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            NewLineStyle::CrLf
        } else {
            NewLineStyle::Lf
        }
    }
}

/// Canonical shapes for comments built from scratch.
///
/// Constructed once and passed by reference to everything that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub newline: NewLineStyle,
    /// Marker written at the start of every comment line, e.g. `"/// "`.
    pub marker: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            newline: NewLineStyle::Lf,
            marker: "/// ".to_string(),
        }
    }
}

impl FormatOptions {
    /// The marker used on a line with no content.
    pub fn blank_marker(&self) -> &str {
        self.marker.trim_end()
    }
}
