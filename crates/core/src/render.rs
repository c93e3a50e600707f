//! Plain-text rendering of a composed document.
//!
//! Each page becomes a block of lines (title first), and blocks are
//! separated by a blank line.

use crate::types::{Document, Page};

/// Renderer for plain-text slide output.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Prefix each page title with `[n/total]`.
    page_numbers: bool,
}

impl TextRenderer {
    /// Create a renderer without page counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to prefix page titles with `[n/total]`.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }

    /// Render every page as its own block of text.
    pub fn render_pages(&self, document: &Document) -> Vec<String> {
        let total = document.len();
        document
            .pages
            .iter()
            .enumerate()
            .map(|(idx, page)| self.render_page(page, idx + 1, total))
            .collect()
    }

    /// Render the document, pages separated by blank lines.
    ///
    /// # Example output
    /// ```text
    /// Photosynthesis
    /// It is a process.
    ///
    /// Light Reaction
    /// Occurs in thylakoid.
    /// Uses sunlight.
    /// ```
    pub fn render(&self, document: &Document) -> String {
        self.render_pages(document).join("\n\n")
    }

    /// Render and add a trailing newline.
    pub fn render_with_newline(&self, document: &Document) -> String {
        let rendered = self.render(document);
        if rendered.is_empty() {
            rendered
        } else {
            format!("{}\n", rendered)
        }
    }

    fn render_page(&self, page: &Page, number: usize, total: usize) -> String {
        let heading = if self.page_numbers {
            format!("[{}/{}] {}", number, total, page.title)
        } else {
            page.title.clone()
        };

        let mut lines = vec![heading];
        if let Some(image) = &page.image {
            lines.push(format!("Image: {}", image.uri));
        }
        lines.extend(page.lines.iter().cloned());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageRef;

    fn sample() -> Document {
        let mut doc = Document::new(Page::title_page(
            "Photosynthesis",
            vec!["It is a process.".to_string()],
        ));
        let mut light = Page::subtopic("Light Reaction");
        light.add_line("Occurs in thylakoid.");
        light.add_line("Uses sunlight.");
        doc.extend_pages(vec![light, Page::subtopic("Summary")]);
        doc
    }

    #[test]
    fn test_render_pages_separated_by_blank_line() {
        let expected = "Photosynthesis\nIt is a process.\n\n\
                        Light Reaction\nOccurs in thylakoid.\nUses sunlight.\n\n\
                        Summary";
        assert_eq!(TextRenderer::new().render(&sample()), expected);
    }

    #[test]
    fn test_render_with_page_numbers() {
        let pages = TextRenderer::new()
            .with_page_numbers(true)
            .render_pages(&sample());

        assert_eq!(pages.len(), 3);
        assert!(pages[0].starts_with("[1/3] Photosynthesis"));
        assert_eq!(pages[2], "[3/3] Summary");
    }

    #[test]
    fn test_render_image_reference() {
        let mut doc = sample();
        doc.pages[0].image = Some(ImageRef::new("leaf.png"));

        let pages = TextRenderer::new().render_pages(&doc);
        assert_eq!(pages[0], "Photosynthesis\nImage: leaf.png\nIt is a process.");
    }

    #[test]
    fn test_render_with_trailing_newline() {
        let rendered = TextRenderer::new().render_with_newline(&sample());
        assert!(rendered.ends_with("Summary\n"));
    }

    #[test]
    fn test_render_empty_title_page() {
        let doc = Document::new(Page::title_page("", vec![]));
        assert_eq!(TextRenderer::new().render(&doc), "");
        assert_eq!(TextRenderer::new().render_with_newline(&doc), "");
    }
}
