//! Avis d'impôt sur le revenu.

use crate::fields::patterns::AMOUNT;
use crate::fields::validators;
use crate::fields::{DocumentSchema, FieldPatternConfig};
use crate::models::document::DocumentType;

pub fn schema() -> DocumentSchema {
    DocumentSchema::new(DocumentType::TaxNotice)
        .field(
            "taxNumber",
            FieldPatternConfig::new(1, validators::is_tax_number)
                .label("fiscal")
                .pattern(
                    r"(?i:num[ée]ro fiscal|n° fiscal|identifiant fiscal)(?: du d[ée]clarant \d)?\s*:?\s*([0-3]\d(?: ?\d){11})\b",
                )
                .pattern(r"\b([0-3]\d{12})\b"),
        )
        .field(
            "taxYear",
            FieldPatternConfig::new(2, validators::is_tax_year)
                .label("revenus")
                .pattern(r"(?i:\brevenus de l['’]ann[ée]e|\bann[ée]e des revenus|\brevenus)\s*:?\s*((?:19|20)\d{2})\b")
                .pattern(r"\b((?:19|20)\d{2})\b"),
        )
        .field(
            "referenceIncome",
            FieldPatternConfig::new(1, validators::is_amount)
                .label("revenu fiscal")
                .pattern(format!(
                    r"(?i:\brevenu fiscal de r[ée]f[ée]rence)\s*:?\s*({AMOUNT})"
                )),
        )
        .field(
            "incomeTax",
            FieldPatternConfig::new(2, validators::is_amount)
                .label("impôt")
                .label("impot")
                .pattern(format!(
                    r"(?i:\b(?:impôt|impot) sur le revenu net|\bmontant de (?:votre |l['’])(?:impôt|impot)|\b(?:impôt|impot) net)\s*:?\s*({AMOUNT})"
                ))
                .pattern(format!(r"(?i:\btotal (?:à|a) payer)\s*:?\s*({AMOUNT})")),
        )
        .field(
            "householdShares",
            FieldPatternConfig::new(3, validators::is_household_shares)
                .label("parts")
                .pattern(r"(?i:\bnombre de parts|\bnb de parts|\bparts fiscales)\s*:?\s*(\d{1,2}(?:[.,]\d{1,2})?)\b"),
        )
        .field(
            "noticeReference",
            FieldPatternConfig::new(3, validators::is_notice_reference)
                .label("référence")
                .label("reference")
                .pattern(r"(?i:\b(?:référence|reference) de l['’]avis)\s*:?\s*(\d{2} ?\d{2} ?\d{7} ?\d{2})\b"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::FieldExtractor;
    use pretty_assertions::assert_eq;

    const NOTICE: &str = "AVIS D'IMPÔT 2023 SUR LES REVENUS DE L'ANNÉE 2022 \
        Numéro fiscal : 12 34 567 890 123 Référence de l'avis : 23 75 1234567 89 \
        Revenu fiscal de référence : 35 420 € Nombre de parts : 2,5 \
        Impôt sur le revenu net : 2 154 €";

    #[test]
    fn test_every_field_has_a_labelled_pattern() {
        for (name, config) in schema().fields() {
            assert!(
                config.patterns.iter().any(|m| config.is_labelled(m.as_ref())),
                "{name}"
            );
        }
    }

    #[test]
    fn test_full_notice() {
        let result = FieldExtractor::builtin()
            .extract_from_text(NOTICE, DocumentType::TaxNotice)
            .unwrap();

        assert_eq!(result.value("taxNumber"), Some("12 34 567 890 123"));
        assert_eq!(result.value("taxYear"), Some("2022"));
        assert_eq!(result.value("referenceIncome"), Some("35 420"));
        assert_eq!(result.value("householdShares"), Some("2,5"));
        assert_eq!(result.value("incomeTax"), Some("2 154"));
        assert_eq!(result.value("noticeReference"), Some("23 75 1234567 89"));
        assert!(result.missing_fields().is_empty());
    }

    #[test]
    fn test_notice_year_is_an_alternative() {
        let result = FieldExtractor::builtin()
            .extract_from_text(NOTICE, DocumentType::TaxNotice)
            .unwrap();
        let tax_year = result.field("taxYear").unwrap();

        assert_eq!(tax_year.confidence, 1.0);
        assert!(tax_year.alternatives.contains(&"2023".to_string()));
    }
}
