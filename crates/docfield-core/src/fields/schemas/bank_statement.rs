//! Relevé de compte bancaire.

use crate::fields::patterns::{AMOUNT, CIVILITY, NAME_WORD, NUMERIC_DATE, UPPER_WORD};
use crate::fields::validators;
use crate::fields::{DocumentSchema, FieldPatternConfig};
use crate::models::document::DocumentType;

const IBAN: &str = r"[A-Z]{2}\d{2}(?: ?[A-Z0-9]{4}){4,7}(?: ?\d{1,3})?";

pub fn schema() -> DocumentSchema {
    DocumentSchema::new(DocumentType::BankStatement)
        .field(
            "accountHolder",
            FieldPatternConfig::new(1, validators::is_person_name)
                .label("titulaire")
                .label("holder")
                .pattern(format!(
                    r"(?i:\btitulaire(?: du compte)?|\baccount holder)\s*:?\s*(?:{CIVILITY} )?({NAME_WORD}(?: {NAME_WORD}){{1,3}}?)(?: IBAN\b| BIC\b| N°| Compte\b| COMPTE\b| Adresse\b| ADRESSE\b|,|$)"
                ))
                .pattern(format!(r"\b{CIVILITY} ({UPPER_WORD} {UPPER_WORD})\b")),
        )
        .field(
            "iban",
            FieldPatternConfig::new(1, validators::is_iban)
                .label("iban")
                .pattern(format!(r"(?i:\biban\b)\s*:?\s*({IBAN})\b"))
                .pattern(format!(r"\b({IBAN})\b")),
        )
        .field(
            "bic",
            FieldPatternConfig::new(2, validators::is_bic)
                .label("bic")
                .label("swift")
                .pattern(r"(?i:\b(?:code )?(?:bic|swift)\b)\s*:?\s*([A-Z]{6}[A-Z0-9]{2}(?:[A-Z0-9]{3})?)\b"),
        )
        .field(
            "bankName",
            FieldPatternConfig::new(3, validators::is_organization_name)
                .label("domiciliation")
                .label("établissement")
                .label("etablissement")
                .pattern(format!(
                    r"(?i:\b(?:domiciliation|établissement|etablissement)\b)\s*:\s*({NAME_WORD}(?: {NAME_WORD}){{0,3}}?)(?: IBAN\b| BIC\b| Titulaire\b| TITULAIRE\b| Agence\b| AGENCE\b|,|$)"
                ))
                .pattern(
                    r"\b((?:LA BANQUE POSTALE|BANQUE|CRÉDIT|CREDIT|CAISSE D'ÉPARGNE|CAISSE D'EPARGNE|SOCIÉTÉ GÉNÉRALE|SOCIETE GENERALE|BNP PARIBAS|LCL|BOURSORAMA)(?: \p{Lu}[\p{Lu}'\-]+){0,2})\b",
                ),
        )
        .field(
            "statementDate",
            FieldPatternConfig::new(2, validators::is_date)
                .label("arrêté")
                .label("arrete")
                .label("relevé")
                .label("releve")
                .pattern(format!(
                    r"(?i:\bdate d['’](?:arrêté|arrete)|\b(?:arrêté|arrete) au|\bdate du (?:relevé|releve))\s*:?\s*({NUMERIC_DATE})"
                ))
                .pattern(format!(
                    r"(?i:\b(?:relevé|releve)\b)(?: de compte)?(?: (?i:du) {NUMERIC_DATE})? (?i:au) ({NUMERIC_DATE})"
                ))
                .pattern(format!(r"\bau ({NUMERIC_DATE})\b")),
        )
        .field(
            "openingBalance",
            FieldPatternConfig::new(3, validators::is_signed_amount)
                .label("ancien solde")
                .label("solde initial")
                .label("solde précédent")
                .label("solde precedent")
                .label("ouverture")
                .pattern(format!(
                    r"(?i:\bancien solde|\bsolde initial|\bsolde précédent|\bsolde precedent|\bsolde d['’]ouverture)(?: (?i:au) {NUMERIC_DATE})?\s*:?\s*(-? ?{AMOUNT})"
                )),
        )
        .field(
            "closingBalance",
            FieldPatternConfig::new(2, validators::is_signed_amount)
                .label("nouveau solde")
                .label("solde final")
                .label("solde créditeur")
                .label("solde crediteur")
                .label("solde débiteur")
                .label("solde debiteur")
                .pattern(format!(
                    r"(?i:\bnouveau solde|\bsolde final|\bsolde créditeur|\bsolde crediteur|\bsolde débiteur|\bsolde debiteur)(?: (?i:au) {NUMERIC_DATE})?\s*:?\s*(-? ?{AMOUNT})"
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::FieldExtractor;
    use crate::models::document::DocumentFieldsResult;
    use pretty_assertions::assert_eq;

    const STATEMENT: &str = "Domiciliation : BANQUE EXEMPLE Agence Lyon Part-Dieu \
        Relevé de compte du 01/03/2024 au 31/03/2024 \
        Titulaire : M. JEAN DUPONT IBAN : FR76 3000 6000 0112 3456 7890 189 BIC : AGRIFRPP882 \
        Ancien solde au 01/03/2024 : 1 234,56 \
        Nouveau solde au 31/03/2024 : 2 345,67";

    fn extract(text: &str) -> DocumentFieldsResult {
        FieldExtractor::builtin()
            .extract_from_text(text, DocumentType::BankStatement)
            .unwrap()
    }

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
    fn test_full_statement() {
        let result = extract(STATEMENT);

        assert_eq!(result.value("bankName"), Some("BANQUE EXEMPLE"));
        assert_eq!(result.value("accountHolder"), Some("JEAN DUPONT"));
        assert_eq!(result.value("iban"), Some("FR76 3000 6000 0112 3456 7890 189"));
        assert_eq!(result.value("bic"), Some("AGRIFRPP882"));
        assert_eq!(result.value("statementDate"), Some("31/03/2024"));
        assert_eq!(result.value("openingBalance"), Some("1 234,56"));
        assert_eq!(result.value("closingBalance"), Some("2 345,67"));
    }

    #[test]
    fn test_iban_checksum_enforced() {
        let result = extract("IBAN : FR76 3000 6000 0112 3456 7890 188");
        assert_eq!(result.value("iban"), None);
        assert_eq!(result.field("iban").unwrap().confidence, 0.0);
    }

    #[test]
    fn test_compact_iban_without_label() {
        let result = extract("Virement vers FR7630004000031234567890143 effectué");
        assert_eq!(result.value("iban"), Some("FR7630004000031234567890143"));
        assert_eq!(result.field("iban").unwrap().confidence, 0.8);
    }

    #[test]
    fn test_negative_closing_balance() {
        let result = extract("Solde débiteur : -152,30");
        assert_eq!(result.value("closingBalance"), Some("-152,30"));
    }
}
