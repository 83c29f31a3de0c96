//! Selection of a field value among its candidates.

use crate::models::document::{Candidate, FieldExtractionResult};

/// Maximum number of alternatives kept next to the chosen value.
pub const MAX_ALTERNATIVES: usize = 2;

/// Pick the most confident candidate. Ties keep discovery order. Alternatives
/// are the next distinct values, never repeating the chosen one.
pub fn resolve(field: &str, mut candidates: Vec<Candidate>) -> FieldExtractionResult {
    // `sort_by` is stable.
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut ranked = candidates.into_iter();
    let Some(best) = ranked.next() else {
        return FieldExtractionResult::absent(field);
    };

    let mut alternatives: Vec<String> = Vec::with_capacity(MAX_ALTERNATIVES);
    for candidate in ranked {
        if alternatives.len() == MAX_ALTERNATIVES {
            break;
        }
        if candidate.value != best.value && !alternatives.contains(&candidate.value) {
            alternatives.push(candidate.value);
        }
    }

    FieldExtractionResult {
        field: field.to_string(),
        value: Some(best.value),
        confidence: best.confidence.clamp(0.0, 1.0),
        alternatives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_is_absent() {
        let result = resolve("iban", Vec::new());
        assert_eq!(result, FieldExtractionResult::absent("iban"));
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_highest_confidence_wins() {
        let result = resolve(
            "birthDate",
            vec![
                Candidate::new("01.01.2000", 0.8),
                Candidate::new("12.03.1985", 1.0),
            ],
        );
        assert_eq!(result.value.as_deref(), Some("12.03.1985"));
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.alternatives, vec!["01.01.2000".to_string()]);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let result = resolve(
            "netSalary",
            vec![Candidate::new("2 531,20", 1.0), Candidate::new("2 400,00", 1.0)],
        );
        assert_eq!(result.value.as_deref(), Some("2 531,20"));
    }

    #[test]
    fn test_alternatives_distinct_and_capped() {
        let result = resolve(
            "taxYear",
            vec![
                Candidate::new("2022", 1.0),
                Candidate::new("2022", 0.8),
                Candidate::new("2023", 0.8),
                Candidate::new("2023", 0.8),
                Candidate::new("2021", 0.8),
                Candidate::new("2020", 0.8),
            ],
        );
        assert_eq!(result.value.as_deref(), Some("2022"));
        assert_eq!(
            result.alternatives,
            vec!["2023".to_string(), "2021".to_string()]
        );
    }
}
