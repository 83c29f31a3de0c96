//! Document types and extraction result models.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DocfieldError;

/// Category of scanned document, driving which field schema applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// National identity card.
    Identity,
    /// Income tax notice (avis d'imposition).
    TaxNotice,
    /// Payslip (bulletin de paie).
    Payslip,
    /// Bank statement (relevé de compte).
    BankStatement,
}

impl DocumentType {
    /// All document types, in declaration order.
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Identity,
        DocumentType::TaxNotice,
        DocumentType::Payslip,
        DocumentType::BankStatement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Identity => "identity",
            DocumentType::TaxNotice => "tax_notice",
            DocumentType::Payslip => "payslip",
            DocumentType::BankStatement => "bank_statement",
        }
    }
}

impl FromStr for DocumentType {
    type Err = DocfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| DocfieldError::UnknownDocumentType(s.to_string()))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored value produced by one matcher, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Trimmed captured value.
    pub value: String,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl Candidate {
    pub fn new(value: impl Into<String>, confidence: f32) -> Self {
        Self {
            value: value.into(),
            confidence,
        }
    }
}

/// Resolved value of one schema field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExtractionResult {
    /// Field name as declared in the schema.
    pub field: String,

    /// Chosen value, `None` when the field was attempted but not found.
    pub value: Option<String>,

    /// Confidence score (0.0 - 1.0), zero when `value` is absent.
    pub confidence: f32,

    /// Up to two distinct runner-up values for manual review.
    pub alternatives: Vec<String>,
}

impl FieldExtractionResult {
    /// Result for a field present in the schema but absent from the document.
    pub fn absent(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: None,
            confidence: 0.0,
            alternatives: Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }
}

/// Complete output of one extraction call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFieldsResult {
    /// Document type the schema was taken from.
    pub document_type: DocumentType,

    /// One entry per schema field, ranked by priority then confidence.
    pub fields: Vec<FieldExtractionResult>,

    /// Recognized text of all pages, separated by blank lines.
    pub raw_text: String,

    /// Mean of the per-page recognition confidences (0.0 - 1.0).
    pub overall_confidence: f32,

    /// Normalized recognition confidence of each page, in page order.
    pub page_confidences: Vec<f32>,

    /// Number of pages recognized.
    pub page_count: usize,

    /// Wall-clock duration of the extraction call.
    #[serde(with = "duration_ms")]
    pub processing_time: Duration,
}

impl DocumentFieldsResult {
    /// Look up a field result by name.
    pub fn field(&self, name: &str) -> Option<&FieldExtractionResult> {
        self.fields.iter().find(|f| f.field == name)
    }

    /// Value of a field, if it was found.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|f| f.value.as_deref())
    }

    /// Names of schema fields that could not be found.
    pub fn missing_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.is_found())
            .map(|f| f.field.as_str())
            .collect()
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
