//! Domain types for lesson text and the slide document built from it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Lesson text as produced by the text generator, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawText {
    /// Lines in generation order.
    pub lines: Vec<String>,
}

impl RawText {
    /// Create raw text from already split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a block of text on `\n`, `\r\n` or `\r`.
    ///
    /// An empty string yields no lines at all.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");
        Self::from_lines(unified.split('\n'))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True when every line is blank (or there are none).
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Structural role of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Starts a new subtopic.
    Heading,
    /// Belongs to the current block.
    Body,
}

/// A line paired with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub text: String,
    pub kind: LineKind,
}

impl ClassifiedLine {
    pub fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Topic title and the definition that precedes the first subtopic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleBlock {
    /// First line of the lesson text.
    pub title: String,

    /// Body lines before the first heading, joined with `\n`. May be empty.
    pub definition: String,
}

/// One heading and the body lines that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    pub heading: String,
    pub body_lines: Vec<String>,
}

impl Subtopic {
    /// Create a subtopic with an empty body.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body_lines: Vec::new(),
        }
    }

    /// Create a subtopic with the given body lines.
    pub fn with_body<I, S>(heading: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            heading: heading.into(),
            body_lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Vertical space budget for one slide, in arbitrary layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Total usable height of a slide.
    pub max_content_height: f64,

    /// Height consumed by the slide title before any body line.
    pub title_reserve: f64,

    /// Height consumed by each body line, blank lines included.
    pub line_height: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            max_content_height: 180.0,
            title_reserve: 30.0,
            line_height: 10.0,
        }
    }
}

impl PageGeometry {
    /// Create a geometry with the default budget (15 lines per page).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_content_height(mut self, height: f64) -> Self {
        self.max_content_height = height;
        self
    }

    pub fn with_title_reserve(mut self, reserve: f64) -> Self {
        self.title_reserve = reserve;
        self
    }

    pub fn with_line_height(mut self, height: f64) -> Self {
        self.line_height = height;
        self
    }

    /// Check that every dimension is finite and in range.
    ///
    /// A title reserve that leaves no room for a full line is accepted; such
    /// pages carry one oversized line each.
    pub fn validate(&self) -> Result<()> {
        if !self.max_content_height.is_finite() || self.max_content_height <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "max content height must be positive, got {}",
                self.max_content_height
            )));
        }
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        if !self.title_reserve.is_finite() || self.title_reserve < 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "title reserve must not be negative, got {}",
                self.title_reserve
            )));
        }
        Ok(())
    }

    /// Whether `lines` body lines fit under the title without exceeding the
    /// max content height. Exact fills fit.
    pub fn fits(&self, lines: usize) -> bool {
        self.title_reserve + lines as f64 * self.line_height <= self.max_content_height
    }

    /// Number of body lines the paginator puts on every page but the last.
    ///
    /// This is the largest count that [`fits`](Self::fits), but never less
    /// than one: a line too tall for an empty page still gets a page.
    pub fn lines_per_page(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let available = (self.max_content_height - self.title_reserve).max(0.0);
        // The float division only seeds the count; `fits` has the final say.
        let mut count = (available / self.line_height).floor() as usize;
        while count > 0 && !self.fits(count) {
            count -= 1;
        }
        while count < usize::MAX && self.fits(count + 1) {
            count += 1;
        }
        count.max(1)
    }
}

/// Role of a page within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageKind {
    /// The overview page: title, metadata and definition.
    Title,
    /// One slice of a subtopic's body.
    Subtopic,
}

/// An image reference attached to the title page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Path or URL of the image.
    pub uri: String,

    /// Optional alternative text.
    pub alt: Option<String>,
}

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            alt: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// A single slide of the composed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub kind: PageKind,

    /// Slide title: the lesson title or the subtopic heading.
    pub title: String,

    /// Body lines in display order.
    pub lines: Vec<String>,

    /// Image shown on the title page, if any.
    pub image: Option<ImageRef>,
}

impl Page {
    /// Create an empty subtopic page.
    pub fn subtopic(title: impl Into<String>) -> Self {
        Self {
            kind: PageKind::Subtopic,
            title: title.into(),
            lines: Vec::new(),
            image: None,
        }
    }

    /// Create a title page with the given lines.
    pub fn title_page(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            kind: PageKind::Title,
            title: title.into(),
            lines,
            image: None,
        }
    }

    /// Add a body line to this page.
    pub fn add_line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// True when the page has no body lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The complete ordered page sequence for one generation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in presentation order; the first is always the title page.
    pub pages: Vec<Page>,
}

impl Document {
    /// Start a document from its title page.
    pub fn new(title_page: Page) -> Self {
        Self {
            pages: vec![title_page],
        }
    }

    /// Append pages to the end of the document.
    pub fn extend_pages(&mut self, pages: impl IntoIterator<Item = Page>) {
        self.pages.extend(pages);
    }

    /// The overview page.
    pub fn title_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Every page after the title page.
    pub fn subtopic_pages(&self) -> &[Page] {
        self.pages.get(1..).unwrap_or(&[])
    }

    /// Total number of pages, title page included.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True only for a document that was deserialized without pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Body lines of all subtopic pages, flattened.
    pub fn all_body_lines(&self) -> Vec<&str> {
        self.subtopic_pages()
            .iter()
            .flat_map(|p| p.lines.iter().map(String::as_str))
            .collect()
    }
}

/// Caller-supplied request fields used to prompt the generator and to
/// annotate the title page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRequest {
    pub topic: String,
    pub grade: String,

    /// Lesson length in minutes, free-form.
    pub duration: String,
}

impl LessonRequest {
    pub fn new(
        topic: impl Into<String>,
        grade: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            grade: grade.into(),
            duration: duration.into(),
        }
    }

    /// Natural-language prompt for the text generator.
    pub fn prompt(&self) -> String {
        format!(
            "I'm a teacher for grade {}th, I want to teach about {} for {} minutes.",
            self.grade.trim(),
            self.topic.trim(),
            self.duration.trim()
        )
    }

    /// Metadata lines for the title page, skipping empty fields.
    pub fn metadata_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.topic.trim().is_empty() {
            lines.push(format!("Topic: {}", self.topic.trim()));
        }
        if !self.grade.trim().is_empty() {
            lines.push(format!("Grade: {}", self.grade.trim()));
        }
        if !self.duration.trim().is_empty() {
            lines.push(format!("Duration: {} minutes", self.duration.trim()));
        }
        lines
    }
}
