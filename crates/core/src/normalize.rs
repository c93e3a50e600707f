//! Cleanup of generated lesson text before segmentation.
//!
//! Unifies line endings, applies Unicode NFC, collapses runs of spaces and
//! tabs, and trims every line. Optionally strips the markdown markers text
//! generators like to emit, so `**Light Reaction**` reaches the classifier
//! as `Light Reaction`.

use crate::types::RawText;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse multiple whitespace characters into one.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Leading markdown heading marker (`#` to `######`).
static HEADING_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s*").unwrap());

/// Leading list bullet followed by whitespace.
static BULLET_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*+\-]\s+").unwrap());

/// Bold/strong emphasis markers anywhere in the line.
static EMPHASIS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*|__").unwrap());

/// Text normalizer for generated lesson text.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Whether to collapse runs of spaces and tabs inside a line.
    collapse_whitespace: bool,

    /// Whether to remove markdown heading, bullet and emphasis markers.
    strip_markup: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            collapse_whitespace: true,
            strip_markup: false,
        }
    }
}

impl TextNormalizer {
    /// Create a normalizer that cleans whitespace but keeps markup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to collapse runs of spaces and tabs.
    pub fn with_collapse_whitespace(mut self, collapse: bool) -> Self {
        self.collapse_whitespace = collapse;
        self
    }

    /// Set whether to strip markdown markers.
    pub fn with_strip_markup(mut self, strip: bool) -> Self {
        self.strip_markup = strip;
        self
    }

    /// Normalize a single line (no line breaks expected).
    pub fn normalize_line(&self, line: &str) -> String {
        let mut result: String = line.nfc().collect();

        if self.collapse_whitespace {
            result = WHITESPACE_COLLAPSE_REGEX.replace_all(&result, " ").to_string();
        }
        result = result.trim().to_string();

        if self.strip_markup {
            result = HEADING_MARKER_REGEX.replace(&result, "").to_string();
            result = BULLET_MARKER_REGEX.replace(&result, "").to_string();
            result = EMPHASIS_REGEX.replace_all(&result, "").to_string();
            result = result.trim().to_string();
        }

        result
    }

    /// Normalize a block of generated text into raw lesson lines.
    ///
    /// Blank lines are kept; they separate paragraphs within a block.
    pub fn normalize(&self, text: &str) -> RawText {
        let raw = RawText::from_text(text);
        RawText::from_lines(raw.lines.iter().map(|l| self.normalize_line(l)))
    }
}
