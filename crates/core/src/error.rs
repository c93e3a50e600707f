//! Error types for lesson composition and export.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing or exporting a lesson document.
///
/// Empty or oddly shaped lesson text is never an error; composition
/// degrades to a title-only document instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The page geometry has a non-finite, non-positive or negative dimension.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// The text generator did not produce lesson text.
    #[error("Text generation failed: {0}")]
    Generation(String),

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to export a composed document.
    #[error("Export error: {0}")]
    ExportError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),
}
