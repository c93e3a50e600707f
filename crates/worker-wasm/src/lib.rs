//! WASM-compatible wrapper for lesson slide composition.
//!
//! This crate exposes segmentation, pagination and text rendering to
//! JavaScript for use in Cloudflare Workers. Text generation happens on the
//! JavaScript side; the worker only ever receives the finished text.

use lesson_core::{
    Document, DocumentComposer, LessonRequest, PageGeometry, TextNormalizer, TextRenderer,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Geometry overrides from JavaScript; missing fields keep their defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryOptions {
    pub max_content_height: Option<f64>,
    pub title_reserve: Option<f64>,
    pub line_height: Option<f64>,
}

impl GeometryOptions {
    fn to_geometry(&self) -> PageGeometry {
        let defaults = PageGeometry::default();
        PageGeometry::new()
            .with_max_content_height(self.max_content_height.unwrap_or(defaults.max_content_height))
            .with_title_reserve(self.title_reserve.unwrap_or(defaults.title_reserve))
            .with_line_height(self.line_height.unwrap_or(defaults.line_height))
    }
}

/// Result of composing a lesson.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompositionResult {
    /// The composed document, title page first.
    pub document: Document,
    /// Number of output slides.
    pub slide_count: usize,
    /// Number of subtopics found in the text.
    pub subtopic_count: usize,
}

/// Compose generated lesson text into slides.
///
/// # Arguments
/// * `text` - The generated lesson text
/// * `topic`, `grade`, `duration` - The request fields shown on the title slide
/// * `geometry` - Optional `{ maxContentHeight, titleReserve, lineHeight }`
///
/// # Returns
/// A JavaScript object with the composition result, or throws on invalid geometry.
#[wasm_bindgen]
pub fn compose_lesson(
    text: &str,
    topic: &str,
    grade: &str,
    duration: &str,
    geometry: JsValue,
) -> Result<JsValue, JsValue> {
    let options: GeometryOptions = if geometry.is_undefined() || geometry.is_null() {
        GeometryOptions::default()
    } else {
        serde_wasm_bindgen::from_value(geometry)
            .map_err(|e| JsValue::from_str(&format!("Invalid geometry: {}", e)))?
    };

    let request = LessonRequest::new(topic, grade, duration);
    let result = compose_lesson_impl(text, &request, &options).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn compose_lesson_impl(
    text: &str,
    request: &LessonRequest,
    options: &GeometryOptions,
) -> Result<CompositionResult, String> {
    let composer = DocumentComposer::new(options.to_geometry()).map_err(|e| e.to_string())?;
    let raw = TextNormalizer::new().normalize(text);
    let (document, subtopic_count) = composer.compose_with_count(&raw, request);

    Ok(CompositionResult {
        slide_count: document.len(),
        subtopic_count,
        document,
    })
}

/// Render a composed document as plain text.
///
/// # Arguments
/// * `document` - A document as returned in `compose_lesson(...).document`
/// * `page_numbers` - Prefix each page title with `[n/total]`
#[wasm_bindgen]
pub fn render_lesson_text(document: JsValue, page_numbers: bool) -> Result<String, JsValue> {
    let document: Document = serde_wasm_bindgen::from_value(document)
        .map_err(|e| JsValue::from_str(&format!("Invalid document: {}", e)))?;

    Ok(render_lesson_text_impl(&document, page_numbers))
}

fn render_lesson_text_impl(document: &Document, page_numbers: bool) -> String {
    TextRenderer::new()
        .with_page_numbers(page_numbers)
        .render_with_newline(document)
}

/// The prompt to send to the text generator for a request.
#[wasm_bindgen]
pub fn lesson_prompt(topic: &str, grade: &str, duration: &str) -> String {
    LessonRequest::new(topic, grade, duration).prompt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON: &str = "Photosynthesis\nIt is a process.\nLight Reaction\nOccurs in thylakoid.\nUses sunlight.\nDark Reaction\nOccurs in stroma.\n";

    #[test]
    fn test_compose_lesson_defaults() {
        let request = LessonRequest::new("Photosynthesis", "7", "45");
        let result = compose_lesson_impl(LESSON, &request, &GeometryOptions::default()).unwrap();

        assert_eq!(result.slide_count, 3);
        assert_eq!(result.subtopic_count, 2);
        assert_eq!(result.document.pages[0].title, "Photosynthesis");
    }

    #[test]
    fn test_compose_lesson_small_geometry() {
        let options = GeometryOptions {
            max_content_height: Some(3.0),
            title_reserve: Some(2.0),
            line_height: Some(1.0),
        };
        let result =
            compose_lesson_impl(LESSON, &LessonRequest::default(), &options).unwrap();

        // Light Reaction spills onto two slides.
        assert_eq!(result.slide_count, 4);
        assert_eq!(result.subtopic_count, 2);
    }

    #[test]
    fn test_compose_lesson_invalid_geometry() {
        let options = GeometryOptions {
            line_height: Some(0.0),
            ..GeometryOptions::default()
        };
        let err = compose_lesson_impl(LESSON, &LessonRequest::default(), &options).unwrap_err();
        assert!(err.contains("line height"));
    }

    #[test]
    fn test_render_lesson_text() {
        let result = compose_lesson_impl(
            LESSON,
            &LessonRequest::default(),
            &GeometryOptions::default(),
        )
        .unwrap();

        let text = render_lesson_text_impl(&result.document, false);
        assert!(text.starts_with("Photosynthesis\nIt is a process.\n\nLight Reaction\n"));
        assert!(text.ends_with("Dark Reaction\nOccurs in stroma.\n"));
    }

    #[test]
    fn test_lesson_prompt() {
        assert_eq!(
            lesson_prompt("Magnets", "5", "30"),
            "I'm a teacher for grade 5th, I want to teach about Magnets for 30 minutes."
        );
    }
}
