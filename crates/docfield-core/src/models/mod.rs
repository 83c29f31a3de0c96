//! Data models and configuration.

pub mod config;
pub mod document;

pub use config::{DocfieldConfig, OutputConfig, RasterizerConfig, RecognitionConfig};
pub use document::{Candidate, DocumentFieldsResult, DocumentType, FieldExtractionResult};
