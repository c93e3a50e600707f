//! Segmentation of raw lesson text into a title block and subtopics.

use crate::classify::{LineClassifier, SentenceAwareClassifier};
use crate::types::{LineKind, RawText, Subtopic, TitleBlock};

/// Groups raw lines into a [`TitleBlock`] followed by ordered [`Subtopic`]s.
#[derive(Debug, Clone, Default)]
pub struct Segmenter<C = SentenceAwareClassifier> {
    classifier: C,
}

impl Segmenter<SentenceAwareClassifier> {
    /// Create a segmenter using the default heading heuristic.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: LineClassifier> Segmenter<C> {
    /// Create a segmenter with a custom heading detector.
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    /// The heading detector in use.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Split raw text into its title block and subtopics.
    ///
    /// - The first line is the title, kept verbatim and never classified.
    /// - Lines up to the first heading form the definition.
    /// - Each heading opens a subtopic; body lines join the open one.
    ///
    /// Never fails: empty input yields an empty title block and no subtopics.
    pub fn segment(&self, raw: &RawText) -> (TitleBlock, Vec<Subtopic>) {
        let (title, rest) = match raw.lines.split_first() {
            Some((first, rest)) => (first.clone(), rest),
            None => return (TitleBlock::default(), Vec::new()),
        };
        let lines = rest.iter().map(|l| l.trim());

        let mut definition: Vec<String> = Vec::new();
        let mut subtopics: Vec<Subtopic> = Vec::new();
        let mut current: Option<Subtopic> = None;

        for line in lines {
            match self.classifier.classify(line) {
                LineKind::Heading => {
                    if let Some(done) = current.take() {
                        subtopics.push(finish_subtopic(done));
                    }
                    current = Some(Subtopic::new(line));
                }
                LineKind::Body => match current.as_mut() {
                    Some(subtopic) => subtopic.body_lines.push(line.to_string()),
                    None => definition.push(line.to_string()),
                },
            }
        }

        if let Some(done) = current.take() {
            subtopics.push(finish_subtopic(done));
        }

        log::debug!(
            "Segmented '{}' into {} subtopics ({} definition lines)",
            title,
            subtopics.len(),
            definition.len()
        );

        let title_block = TitleBlock {
            title,
            definition: trim_blank_edges(definition).join("\n"),
        };

        (title_block, subtopics)
    }
}

/// Drop blank lines at both ends of a subtopic body.
fn finish_subtopic(mut subtopic: Subtopic) -> Subtopic {
    subtopic.body_lines = trim_blank_edges(subtopic.body_lines);
    subtopic
}

/// Remove leading and trailing blank lines, keeping interior ones.
fn trim_blank_edges(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let leading = lines
        .iter()
        .take_while(|l| l.trim().is_empty())
        .count();
    lines.drain(..leading);
    lines
}
