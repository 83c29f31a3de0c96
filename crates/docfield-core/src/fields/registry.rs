//! Lookup of document schemas by type.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{schemas, DocumentSchema};
use crate::error::{DocfieldError, Result};
use crate::models::document::DocumentType;

lazy_static! {
    static ref BUILTIN: PatternRegistry = PatternRegistry::builtin();
}

/// Process-wide registry of the built-in schemas, built on first use.
pub fn builtin_registry() -> &'static PatternRegistry {
    &BUILTIN
}

/// Read-only catalogue of document schemas.
#[derive(Debug)]
pub struct PatternRegistry {
    schemas: HashMap<DocumentType, DocumentSchema>,
}

impl PatternRegistry {
    /// Registry holding the built-in French schemas.
    pub fn builtin() -> Self {
        Self::from_schemas(schemas::builtin())
    }

    /// Build a registry from custom schemas. A later schema for the same
    /// document type replaces an earlier one.
    pub fn from_schemas(schemas: impl IntoIterator<Item = DocumentSchema>) -> Self {
        let schemas = schemas
            .into_iter()
            .map(|schema| (schema.document_type(), schema))
            .collect();
        Self { schemas }
    }

    pub fn schema_for(&self, document_type: DocumentType) -> Result<&DocumentSchema> {
        self.schemas
            .get(&document_type)
            .ok_or_else(|| DocfieldError::UnknownDocumentType(document_type.to_string()))
    }

    /// Resolve a snake_case type name, then its schema.
    pub fn schema_for_name(&self, name: &str) -> Result<&DocumentSchema> {
        let document_type: DocumentType = name.parse()?;
        self.schema_for(document_type)
    }

    /// Registered document types in declaration order of [`DocumentType::ALL`].
    pub fn document_types(&self) -> Vec<DocumentType> {
        DocumentType::ALL
            .iter()
            .copied()
            .filter(|t| self.schemas.contains_key(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_covers_every_type() {
        let registry = builtin_registry();
        assert_eq!(registry.document_types(), DocumentType::ALL.to_vec());

        let names: Vec<&str> = registry
            .schema_for(DocumentType::Identity)
            .unwrap()
            .fields()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                "lastName",
                "firstName",
                "birthDate",
                "birthPlace",
                "documentNumber",
                "expiryDate",
                "sex"
            ]
        );
    }

    #[test]
    fn test_schema_sizes() {
        let registry = builtin_registry();
        assert_eq!(registry.schema_for_name("tax_notice").unwrap().len(), 6);
        assert_eq!(registry.schema_for_name("payslip").unwrap().len(), 8);
        assert_eq!(registry.schema_for_name("bank_statement").unwrap().len(), 7);
    }

    #[test]
    fn test_unknown_name() {
        let err = builtin_registry().schema_for_name("unknown_type").unwrap_err();
        assert!(matches!(err, DocfieldError::UnknownDocumentType(name) if name == "unknown_type"));
    }

    #[test]
    fn test_unregistered_type() {
        let registry = PatternRegistry::from_schemas(vec![schemas::identity::schema()]);
        assert!(registry.schema_for(DocumentType::Identity).is_ok());
        assert!(matches!(
            registry.schema_for(DocumentType::Payslip),
            Err(DocfieldError::UnknownDocumentType(_))
        ));
    }

    #[test]
    fn test_every_builtin_pattern_compiles() {
        let registry = builtin_registry();
        for document_type in DocumentType::ALL {
            let schema = registry.schema_for(document_type).unwrap();
            for (name, config) in schema.fields() {
                for matcher in &config.patterns {
                    assert!(matcher.captures("").is_ok(), "{name}: {}", matcher.source());
                }
            }
        }
    }
}
