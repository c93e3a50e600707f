//! Document composition: segmentation plus pagination over a whole lesson.

use crate::classify::{LineClassifier, SentenceAwareClassifier};
use crate::generate::ImageLookup;
use crate::paginate::Paginator;
use crate::segment::Segmenter;
use crate::types::{Document, LessonRequest, Page, PageGeometry, RawText, TitleBlock};
use crate::Result;

/// Builds a [`Document`] from raw lesson text.
///
/// Holds only configuration, so it can be reused for every regeneration of
/// the same lesson; identical input always yields an identical document.
#[derive(Debug, Clone)]
pub struct DocumentComposer<C = SentenceAwareClassifier> {
    segmenter: Segmenter<C>,
    paginator: Paginator,
}

impl DocumentComposer<SentenceAwareClassifier> {
    /// Create a composer with the default heading detector.
    ///
    /// Fails if the geometry is malformed.
    pub fn new(geometry: PageGeometry) -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::new(),
            paginator: Paginator::new(geometry)?,
        })
    }
}

impl<C: LineClassifier> DocumentComposer<C> {
    /// Swap in a different heading detector.
    pub fn with_classifier<D: LineClassifier>(self, classifier: D) -> DocumentComposer<D> {
        DocumentComposer {
            segmenter: Segmenter::with_classifier(classifier),
            paginator: self.paginator,
        }
    }

    /// The page geometry in use.
    pub fn geometry(&self) -> &PageGeometry {
        self.paginator.geometry()
    }

    /// Compose the full document: a title page, then every subtopic's pages
    /// in the order the subtopics appear in the text.
    pub fn compose(&self, raw: &RawText, request: &LessonRequest) -> Document {
        self.compose_with_count(raw, request).0
    }

    /// Like [`compose`](Self::compose), also returning how many subtopics the
    /// text was segmented into.
    pub fn compose_with_count(&self, raw: &RawText, request: &LessonRequest) -> (Document, usize) {
        let (title_block, subtopics) = self.segmenter.segment(raw);

        let mut document = Document::new(title_page(&title_block, request));
        for subtopic in &subtopics {
            document.extend_pages(self.paginator.paginate(subtopic));
        }

        log::debug!(
            "Composed '{}': {} subtopics, {} pages",
            title_block.title,
            subtopics.len(),
            document.len()
        );

        (document, subtopics.len())
    }

    /// Compose the document and attach an image for the topic to the title
    /// page when the lookup finds one.
    pub fn compose_with_image(
        &self,
        raw: &RawText,
        request: &LessonRequest,
        images: &dyn ImageLookup,
    ) -> Document {
        let mut document = self.compose(raw, request);
        let image = images.lookup(&request.topic);
        if image.is_none() {
            log::debug!("No image found for topic '{}'", request.topic);
        }
        if let Some(page) = document.pages.first_mut() {
            page.image = image;
        }
        document
    }
}

/// The overview page: metadata lines, then the definition. Never split.
fn title_page(title_block: &TitleBlock, request: &LessonRequest) -> Page {
    let mut lines = request.metadata_lines();
    if !title_block.definition.is_empty() {
        lines.extend(title_block.definition.lines().map(String::from));
    }
    Page::title_page(title_block.title.as_str(), lines)
}
