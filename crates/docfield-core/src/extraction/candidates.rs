//! Candidate generation for a single field.

use tracing::trace;

use crate::error::PatternError;
use crate::fields::FieldPatternConfig;
use crate::models::document::Candidate;

/// Score of any validated match.
pub const BASE_CONFIDENCE: f32 = 0.70;

/// Bonus when the matching pattern references one of the field's labels.
pub const LABEL_BONUS: f32 = 0.20;

/// Bonus when the value length is plausible.
pub const LENGTH_BONUS: f32 = 0.10;

/// Value lengths, in characters, earning [`LENGTH_BONUS`].
const PLAUSIBLE_LENGTH: std::ops::RangeInclusive<usize> = 3..=50;

/// Run every matcher of a field over normalized text and keep the validated,
/// scored captures in discovery order. Duplicates are kept.
pub fn extract_field(
    text: &str,
    field: &str,
    config: &FieldPatternConfig,
) -> Result<Vec<Candidate>, PatternError> {
    let mut candidates = Vec::new();

    for matcher in &config.patterns {
        let labelled = config.is_labelled(matcher.as_ref());

        for captured in matcher.captures(text)? {
            let value = captured.trim();
            if value.is_empty() {
                continue;
            }
            if !(config.validator)(value) {
                trace!("{}: rejected '{}'", field, value);
                continue;
            }

            candidates.push(Candidate::new(value, score(value, labelled)));
        }
    }

    Ok(candidates)
}

fn score(value: &str, labelled: bool) -> f32 {
    let mut score = BASE_CONFIDENCE;
    if labelled {
        score += LABEL_BONUS;
    }
    if PLAUSIBLE_LENGTH.contains(&value.chars().count()) {
        score += LENGTH_BONUS;
    }

    // Round away float noise so equal scores compare equal.
    ((score * 100.0).round() / 100.0).min(1.0)
}
