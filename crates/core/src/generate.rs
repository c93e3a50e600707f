//! Seams to the collaborators around the composer: the text generator that
//! supplies lesson text and the optional image lookup for the title page.

use crate::classify::LineClassifier;
use crate::compose::DocumentComposer;
use crate::normalize::TextNormalizer;
use crate::types::{Document, ImageRef, LessonRequest};
use crate::{Error, Result};

/// Produces lesson text for a prompt.
///
/// Implementations own their credentials and transport; nothing here keeps
/// a client or key between calls.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String>,
{
    fn generate(&self, prompt: &str) -> Result<String> {
        self(prompt)
    }
}

/// Finds an image to illustrate a topic.
///
/// A miss is `None`, never an error.
pub trait ImageLookup {
    fn lookup(&self, topic: &str) -> Option<ImageRef>;
}

/// Lookup that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImageLookup;

impl ImageLookup for NoImageLookup {
    fn lookup(&self, _topic: &str) -> Option<ImageRef> {
        None
    }
}

/// Generate lesson text for `request` and compose it into a document, with
/// the topic image (if any) on the title page.
///
/// Any generator failure is reported as [`Error::Generation`]; the composer
/// only ever sees a complete response. Calling this again is how a lesson is
/// regenerated.
pub fn generate_document<C: LineClassifier>(
    generator: &dyn TextGenerator,
    normalizer: &TextNormalizer,
    composer: &DocumentComposer<C>,
    request: &LessonRequest,
    images: &dyn ImageLookup,
) -> Result<Document> {
    let prompt = request.prompt();
    log::debug!("Requesting lesson text: {}", prompt);

    let text = generator.generate(&prompt).map_err(|e| match e {
        Error::Generation(msg) => Error::Generation(msg),
        other => Error::Generation(other.to_string()),
    })?;

    let raw = normalizer.normalize(&text);
    log::debug!("Generator returned {} lines", raw.len());

    Ok(composer.compose_with_image(&raw, request, images))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageGeometry;

    #[test]
    fn test_generate_document_uses_prompt() {
        let generator = |prompt: &str| -> Result<String> {
            assert!(prompt.contains("grade 5th"));
            assert!(prompt.contains("Magnets"));
            Ok("Magnets\nthey attract iron.\nPoles\nnorth and south.\n".to_string())
        };
        let composer = DocumentComposer::new(PageGeometry::default()).unwrap();
        let request = LessonRequest::new("Magnets", "5", "30");

        let doc = generate_document(
            &generator,
            &TextNormalizer::new(),
            &composer,
            &request,
            &NoImageLookup,
        )
        .unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.pages[0].title, "Magnets");
        assert_eq!(doc.pages[1].title, "Poles");
        assert_eq!(doc.pages[1].lines, vec!["north and south."]);
    }

    #[test]
    fn test_generator_failure_is_reported_as_generation_error() {
        let generator = |_: &str| -> Result<String> {
            Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "provider timed out",
            )))
        };
        let composer = DocumentComposer::new(PageGeometry::default()).unwrap();

        let result = generate_document(
            &generator,
            &TextNormalizer::new(),
            &composer,
            &LessonRequest::default(),
            &NoImageLookup,
        );
        match result {
            Err(Error::Generation(msg)) => assert!(msg.contains("provider timed out")),
            other => panic!("expected generation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_response_gives_title_only_document() {
        let generator = |_: &str| -> Result<String> { Ok(String::new()) };
        let composer = DocumentComposer::new(PageGeometry::default()).unwrap();

        let doc = generate_document(
            &generator,
            &TextNormalizer::new(),
            &composer,
            &LessonRequest::new("Rocks", "3", "20"),
            &NoImageLookup,
        )
        .unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.pages[0].title, "");
        assert_eq!(doc.pages[0].lines[0], "Topic: Rocks");
    }

    #[test]
    fn test_no_image_lookup() {
        assert_eq!(NoImageLookup.lookup("anything"), None);
    }
}
