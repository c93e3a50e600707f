//! Core domain types, segmentation and slide layout for turning generated
//! lesson text into a paginated presentation document.

pub mod classify;
pub mod compose;
pub mod error;
pub mod generate;
pub mod normalize;
pub mod paginate;
pub mod render;
pub mod segment;
pub mod types;

pub use classify::{
    LineClassifier, MarkdownHeadingClassifier, SentenceAwareClassifier, UppercaseClassifier,
};
pub use compose::DocumentComposer;
pub use error::{Error, Result};
pub use generate::{generate_document, ImageLookup, NoImageLookup, TextGenerator};
pub use normalize::TextNormalizer;
pub use paginate::Paginator;
pub use render::TextRenderer;
pub use segment::Segmenter;
pub use types::{
    ClassifiedLine, Document, ImageRef, LessonRequest, LineKind, Page, PageGeometry, PageKind,
    RawText, Subtopic, TitleBlock,
};
