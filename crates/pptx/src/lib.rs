//! PPTX (Office Open XML) export backend for composed lesson documents.
//!
//! Writes a `.pptx` ZIP archive with one slide per document page.

mod parts;
pub mod writer;
mod xml;

pub use writer::PptxWriter;
