//! Error types for the docfield-core library.

use thiserror::Error;

/// Main error type for the docfield library.
#[derive(Error, Debug)]
pub enum DocfieldError {
    /// The input file is neither an image nor a paginated document.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// No schema is registered for the requested document type.
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    /// Rasterization or image decoding failed.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Recognition engine error.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// A field pattern could not be applied.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning an input file into page images.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// The document is encrypted and cannot be opened with an empty password.
    #[error("document is encrypted")]
    Encrypted,

    /// The document has no pages.
    #[error("document has no pages")]
    NoPages,

    /// A page carries no raster image to recognize.
    #[error("page {0} has no raster content")]
    NoRaster(u32),

    /// Image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(String),
}

/// Errors related to the recognition engine lifecycle.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// Engine setup failed; the manager stays uninitialized and may be retried.
    #[error("engine initialization failed: {0}")]
    Initialization(String),

    /// Recognition was requested before the engine was ready.
    #[error("recognition engine is not ready")]
    NotReady,

    /// The engine failed on a page.
    #[error("recognition failed: {0}")]
    Failed(String),
}

/// Errors raised by a single field matcher.
#[derive(Error, Debug, Clone)]
pub enum PatternError {
    /// The pattern source does not compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    Compile { pattern: String, reason: String },
}

/// Result type for the docfield library.
pub type Result<T> = std::result::Result<T, DocfieldError>;
