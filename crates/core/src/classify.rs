//! Line classification: decides which lines open a new subtopic.
//!
//! The segmenter only depends on [`LineClassifier`], so stricter detectors
//! can be swapped in without touching segmentation or pagination. Any
//! `Fn(&str) -> LineKind` closure is a classifier too.

use crate::types::{ClassifiedLine, LineKind};

/// Decides whether a line is a heading or body content.
pub trait LineClassifier {
    /// Classify one (already trimmed) line.
    fn classify(&self, line: &str) -> LineKind;

    /// Classify a line and keep its text alongside the result.
    fn classify_line(&self, line: &str) -> ClassifiedLine {
        ClassifiedLine::new(line, self.classify(line))
    }
}

impl<F> LineClassifier for F
where
    F: Fn(&str) -> LineKind,
{
    fn classify(&self, line: &str) -> LineKind {
        self(line)
    }
}

/// Treats a line as a heading when its first non-whitespace character is
/// an uppercase letter.
///
/// Lines starting with a digit or punctuation are body lines, so numbered
/// headings ("1. Overview") are not detected.
#[derive(Debug, Clone, Copy, Default)]
pub struct UppercaseClassifier;

impl LineClassifier for UppercaseClassifier {
    fn classify(&self, line: &str) -> LineKind {
        match line.trim_start().chars().next() {
            Some(c) if c.is_uppercase() => LineKind::Heading,
            _ => LineKind::Body,
        }
    }
}

/// The default heading detector: an uppercase first character, unless the
/// line reads as a finished sentence (ends in `.`, `!` or `?`).
///
/// Generated lessons usually start body sentences with a capital letter, so
/// the bare uppercase rule would turn every sentence into a subtopic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceAwareClassifier;

impl LineClassifier for SentenceAwareClassifier {
    fn classify(&self, line: &str) -> LineKind {
        let line = line.trim();
        if line.ends_with(['.', '!', '?']) {
            return LineKind::Body;
        }
        UppercaseClassifier.classify(line)
    }
}

/// Only explicit markdown markup opens a subtopic: a `#` prefix or a line
/// wrapped entirely in `**`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownHeadingClassifier;

impl LineClassifier for MarkdownHeadingClassifier {
    fn classify(&self, line: &str) -> LineKind {
        let line = line.trim();
        let bold = line.len() > 4 && line.starts_with("**") && line.ends_with("**");
        if line.starts_with('#') || bold {
            LineKind::Heading
        } else {
            LineKind::Body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_start_is_heading() {
        let classifier = UppercaseClassifier;
        assert_eq!(classifier.classify("Light Reaction"), LineKind::Heading);
        assert_eq!(classifier.classify("   Dark Reaction"), LineKind::Heading);
        assert_eq!(classifier.classify("Émile Durkheim"), LineKind::Heading);
    }

    #[test]
    fn test_lowercase_start_is_body() {
        let classifier = UppercaseClassifier;
        assert_eq!(classifier.classify("occurs in stroma."), LineKind::Body);
    }

    #[test]
    fn test_empty_digit_and_punctuation_are_body() {
        let classifier = UppercaseClassifier;
        assert_eq!(classifier.classify(""), LineKind::Body);
        assert_eq!(classifier.classify("   "), LineKind::Body);
        assert_eq!(classifier.classify("1. Overview"), LineKind::Body);
        assert_eq!(classifier.classify("**Overview**"), LineKind::Body);
        assert_eq!(classifier.classify("- Bullet"), LineKind::Body);
    }

    #[test]
    fn test_uppercase_sentence_is_heading_under_strict_rule() {
        assert_eq!(
            UppercaseClassifier.classify("It is a process."),
            LineKind::Heading
        );
    }

    #[test]
    fn test_sentence_aware_classifier() {
        let classifier = SentenceAwareClassifier;
        assert_eq!(classifier.classify("Light Reaction"), LineKind::Heading);
        assert_eq!(classifier.classify("Key Terms:"), LineKind::Heading);
        assert_eq!(classifier.classify("It is a process."), LineKind::Body);
        assert_eq!(classifier.classify("Why is the sky blue?"), LineKind::Body);
        assert_eq!(classifier.classify("Wow!  "), LineKind::Body);
        assert_eq!(classifier.classify("lowercase heading"), LineKind::Body);
        assert_eq!(classifier.classify(""), LineKind::Body);
        assert_eq!(classifier.classify("2 Reactions"), LineKind::Body);
    }

    #[test]
    fn test_markdown_classifier() {
        let classifier = MarkdownHeadingClassifier;
        assert_eq!(classifier.classify("## Light Reaction"), LineKind::Heading);
        assert_eq!(classifier.classify("**Dark Reaction**"), LineKind::Heading);
        assert_eq!(classifier.classify("Uses sunlight."), LineKind::Body);
        assert_eq!(classifier.classify("****"), LineKind::Body);
        assert_eq!(classifier.classify("**Bold** start only"), LineKind::Body);
    }

    #[test]
    fn test_closure_is_a_classifier() {
        let classifier = |line: &str| {
            if line.ends_with(':') {
                LineKind::Heading
            } else {
                LineKind::Body
            }
        };
        assert_eq!(classifier.classify("Materials:"), LineKind::Heading);
        assert_eq!(
            classifier.classify_line("Chalk"),
            ClassifiedLine::new("Chalk", LineKind::Body)
        );
    }
}
