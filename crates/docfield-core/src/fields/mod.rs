//! Declarative field definitions per document type.
//!
//! A [`DocumentSchema`] lists every field that exists for one document type.
//! Each field carries an ordered chain of [`Matcher`]s: labelled patterns
//! first, broader fallbacks after. All matchers are applied; resolution
//! between their candidates happens later.

pub mod patterns;
pub mod registry;
pub mod schemas;
pub mod validators;

pub use registry::{builtin_registry, PatternRegistry};

use std::fmt;

use regex::Regex;

use crate::error::PatternError;
use crate::models::document::DocumentType;

/// Predicate deciding whether a captured value is plausible for a field.
pub type Validator = fn(&str) -> bool;

/// A text pattern producing zero or one captured value per occurrence.
pub trait Matcher: Send + Sync {
    /// Source text of the pattern, used to tell labelled patterns from fallbacks.
    fn source(&self) -> &str;

    /// Captured values of every non-overlapping occurrence, in text order.
    fn captures(&self, text: &str) -> Result<Vec<String>, PatternError>;
}

/// Regex-backed matcher. The value is capture group 1 when the pattern has
/// one, the whole match otherwise.
pub struct RegexMatcher {
    source: String,
    compiled: Result<Regex, PatternError>,
}

impl RegexMatcher {
    /// Compile a pattern. Compilation errors surface on first use so that a
    /// broken pattern only disables its own field.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&source).map_err(|e| PatternError::Compile {
            pattern: source.clone(),
            reason: e.to_string(),
        });
        Self { source, compiled }
    }
}

impl Matcher for RegexMatcher {
    fn source(&self) -> &str {
        &self.source
    }

    fn captures(&self, text: &str) -> Result<Vec<String>, PatternError> {
        let regex = self.compiled.as_ref().map_err(Clone::clone)?;

        Ok(regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str().to_string())
            .collect())
    }
}

impl fmt::Debug for RegexMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexMatcher")
            .field("source", &self.source)
            .field("valid", &self.compiled.is_ok())
            .finish()
    }
}

/// Extraction configuration of one field.
pub struct FieldPatternConfig {
    /// Matchers in declaration order.
    pub patterns: Vec<Box<dyn Matcher>>,
    /// Plausibility check applied to every trimmed capture.
    pub validator: Validator,
    /// Review priority, lower is more important.
    pub priority: u32,
    /// Canonical labels (lowercase) whose presence in a pattern marks it as labelled.
    pub labels: Vec<&'static str>,
}

impl FieldPatternConfig {
    pub fn new(priority: u32, validator: Validator) -> Self {
        Self {
            patterns: Vec::new(),
            validator,
            priority,
            labels: Vec::new(),
        }
    }

    /// Add a canonical label.
    pub fn label(mut self, label: &'static str) -> Self {
        self.labels.push(label);
        self
    }

    /// Append a regex pattern to the matcher chain.
    pub fn pattern(self, source: impl Into<String>) -> Self {
        self.matcher(RegexMatcher::new(source))
    }

    /// Append any matcher to the chain.
    pub fn matcher(mut self, matcher: impl Matcher + 'static) -> Self {
        self.patterns.push(Box::new(matcher));
        self
    }

    /// Whether a matcher's source references one of the field's labels.
    pub fn is_labelled(&self, matcher: &dyn Matcher) -> bool {
        let source = matcher.source().to_lowercase();
        self.labels.iter().any(|label| source.contains(label))
    }
}

impl fmt::Debug for FieldPatternConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<&str> = self.patterns.iter().map(|m| m.source()).collect();
        f.debug_struct("FieldPatternConfig")
            .field("patterns", &sources)
            .field("priority", &self.priority)
            .field("labels", &self.labels)
            .finish()
    }
}

/// Ordered catalogue of the fields of one document type.
#[derive(Debug)]
pub struct DocumentSchema {
    document_type: DocumentType,
    fields: Vec<(String, FieldPatternConfig)>,
}

impl DocumentSchema {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            fields: Vec::new(),
        }
    }

    /// Declare a field. Redeclaring a name replaces the earlier definition.
    pub fn field(mut self, name: impl Into<String>, config: FieldPatternConfig) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = config,
            None => self.fields.push((name, config)),
        }
        self
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldPatternConfig)> {
        self.fields.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub fn get(&self, name: &str) -> Option<&FieldPatternConfig> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, config)| config)
    }

    /// Priority of a field, `u32::MAX` for names outside the schema.
    pub fn priority(&self, name: &str) -> u32 {
        self.get(name).map(|c| c.priority).unwrap_or(u32::MAX)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &str) -> bool {
        true
    }

    #[test]
    fn test_regex_matcher_finds_all_occurrences() {
        let matcher = RegexMatcher::new(r"(\d{2})/\d{2}");
        let values = matcher.captures("01/02 and 03/04").unwrap();
        assert_eq!(values, vec!["01", "03"]);
    }

    #[test]
    fn test_regex_matcher_without_group_uses_whole_match() {
        let matcher = RegexMatcher::new(r"\d{4}");
        assert_eq!(matcher.captures("year 2024").unwrap(), vec!["2024"]);
    }

    #[test]
    fn test_invalid_pattern_fails_on_use() {
        let matcher = RegexMatcher::new(r"(unclosed");
        assert!(matches!(
            matcher.captures("anything"),
            Err(PatternError::Compile { .. })
        ));
    }

    #[test]
    fn test_is_labelled() {
        let config = FieldPatternConfig::new(1, always)
            .label("nom")
            .pattern(r"(?i:\bnom)\s*:\s*(\w+)")
            .pattern(r"IDFRA([A-Z]+)<");

        assert!(config.is_labelled(config.patterns[0].as_ref()));
        assert!(!config.is_labelled(config.patterns[1].as_ref()));
    }

    #[test]
    fn test_schema_keeps_declaration_order_and_replaces_duplicates() {
        let schema = DocumentSchema::new(DocumentType::Identity)
            .field("b", FieldPatternConfig::new(2, always))
            .field("a", FieldPatternConfig::new(1, always))
            .field("b", FieldPatternConfig::new(5, always));

        let names: Vec<&str> = schema.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(schema.priority("b"), 5);
        assert_eq!(schema.priority("missing"), u32::MAX);
        assert_eq!(schema.len(), 2);
    }
}
