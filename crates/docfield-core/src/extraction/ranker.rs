//! Deterministic ordering of field results.

use crate::fields::DocumentSchema;
use crate::models::document::FieldExtractionResult;

/// Order results by schema priority ascending, then confidence descending.
/// Equal keys keep their input order.
pub fn rank(
    mut results: Vec<FieldExtractionResult>,
    schema: &DocumentSchema,
) -> Vec<FieldExtractionResult> {
    results.sort_by(|a, b| {
        schema
            .priority(&a.field)
            .cmp(&schema.priority(&b.field))
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldPatternConfig;
    use crate::models::document::DocumentType;
    use pretty_assertions::assert_eq;

    fn any(_: &str) -> bool {
        true
    }

    fn found(field: &str, confidence: f32) -> FieldExtractionResult {
        FieldExtractionResult {
            field: field.to_string(),
            value: Some("x".to_string()),
            confidence,
            alternatives: Vec::new(),
        }
    }

    #[test]
    fn test_priority_then_confidence() {
        let schema = DocumentSchema::new(DocumentType::Identity)
            .field("sex", FieldPatternConfig::new(4, any))
            .field("firstName", FieldPatternConfig::new(1, any))
            .field("lastName", FieldPatternConfig::new(1, any))
            .field("birthDate", FieldPatternConfig::new(2, any));

        let ranked = rank(
            vec![
                found("sex", 1.0),
                FieldExtractionResult::absent("birthDate"),
                found("firstName", 0.8),
                found("lastName", 1.0),
            ],
            &schema,
        );

        let order: Vec<&str> = ranked.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(order, vec!["lastName", "firstName", "birthDate", "sex"]);
    }

    #[test]
    fn test_unknown_fields_sort_last() {
        let schema = DocumentSchema::new(DocumentType::Identity)
            .field("lastName", FieldPatternConfig::new(1, any));

        let ranked = rank(vec![found("extra", 1.0), found("lastName", 0.1)], &schema);
        assert_eq!(ranked[0].field, "lastName");
    }
}
