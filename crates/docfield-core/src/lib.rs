//! Core library for OCR field extraction from French administrative documents.
//!
//! This crate provides:
//! - Declarative field schemas for identity cards, tax notices, payslips and
//!   bank statements, with checksum validators (IBAN, SIRET, NIR)
//! - Candidate scoring and resolution with ranked alternatives
//! - A recognition engine manager and a native `pure-onnx-ocr` adapter
//! - Scanned PDF rasterization with lopdf
//! - The page aggregation pipeline tying it all together

pub mod error;
pub mod extraction;
pub mod fields;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod recognition;

pub use error::{ConversionError, DocfieldError, PatternError, RecognitionError, Result};
pub use extraction::FieldExtractor;
pub use fields::{
    builtin_registry, DocumentSchema, FieldPatternConfig, Matcher, PatternRegistry, RegexMatcher,
};
pub use models::{
    Candidate, DocfieldConfig, DocumentFieldsResult, DocumentType, FieldExtractionResult,
};
pub use pdf::{DocumentFile, FileKind, PdfRasterizer, Rasterizer};
pub use pipeline::DocumentPipeline;
pub use recognition::{
    run_blocking, EngineFactory, EngineState, PageRecognition, RecognitionEngine,
    RecognitionManager,
};

#[cfg(feature = "native")]
pub use recognition::{PureEngineFactory, PureOcrEngine};
