//! French national identity card (CNI), both the legacy and the credit-card format.

use crate::fields::patterns::{LONG_DATE, NAME_WORD, NUMERIC_DATE, UPPER_WORD};
use crate::fields::validators;
use crate::fields::{DocumentSchema, FieldPatternConfig};
use crate::models::document::DocumentType;

pub fn schema() -> DocumentSchema {
    DocumentSchema::new(DocumentType::Identity)
        .field(
            "lastName",
            FieldPatternConfig::new(1, validators::is_person_name)
                .label("nom")
                .label("surname")
                .pattern(format!(
                    r"(?i:\bnom(?: de famille| ?/ ?surname)?)\s*[:\-]?\s*({UPPER_WORD}(?:[ \-]{UPPER_WORD})*?)(?: (?i:prénom|prenom|sexe|né|ne)\b|$| \P{{Lu}})"
                ))
                // MRZ line 1: IDFRA<surname><<<...
                .pattern(r"IDFRA([A-Z]{2,})<")
                // Surname recognized in mixed case.
                .pattern(format!(
                    r"(?i:\bnom(?: de famille| ?/ ?surname)?)\s*[:\-]?\s*({NAME_WORD}(?:[ \-]{NAME_WORD})*?)(?: (?i:prénom|prenom|sexe|né|ne)\b|$| \P{{Lu}})"
                )),
        )
        .field(
            "firstName",
            FieldPatternConfig::new(1, validators::is_person_name)
                .label("prénom")
                .label("prenom")
                .label("given name")
                .pattern(format!(
                    r"(?i:\b(?:prénom|prenom)s?(?: ?\(s\))?(?: ?/ ?given names?)?)\s*[:\-]?\s*({NAME_WORD}(?: ?, ?{NAME_WORD})*)"
                ))
                // MRZ line 2: document number, check digit, first names.
                .pattern(r"\b\d{13}([A-Z]{2,})<"),
        )
        .field(
            "birthDate",
            FieldPatternConfig::new(2, validators::is_date)
                .label("né")
                .label("naissance")
                .label("birth")
                .pattern(format!(
                    r"(?i:\b(?:né|ne)(?: ?\(e\)|e)? le|date de naissance|date of birth)\s*[:\-]?\s*({NUMERIC_DATE})"
                ))
                .pattern(format!(
                    r"(?i:\b(?:né|ne)(?: ?\(e\)|e)? le|date de naissance)\s*[:\-]?\s*({LONG_DATE})"
                ))
                .pattern(format!(r"\b({NUMERIC_DATE})\b")),
        )
        .field(
            "birthPlace",
            FieldPatternConfig::new(3, validators::is_place_name)
                .label("à")
                .label("naissance")
                .label("birth")
                .pattern(format!(
                    r"(?i:\b(?:né|ne)(?: ?\(e\)|e)? le\s*:?\s*(?:[\d./\-]+|\d{{1,2}} \p{{L}}+ \d{{4}}) à|lieu de naissance|place of birth)\s*[:\-]?\s*({UPPER_WORD}(?:[ \-]{UPPER_WORD})*)"
                ))
                .pattern(format!(r"\b({UPPER_WORD}(?:[ \-]{UPPER_WORD})*) \(\d{{2,3}}\)")),
        )
        .field(
            "documentNumber",
            FieldPatternConfig::new(1, validators::is_document_number)
                .label("n°")
                .label("numéro")
                .label("numero")
                .label("document no")
                .pattern(
                    r"(?i:n° ?(?:de )?(?:document|carte)?|numéro(?: du document)?|numero(?: du document)?|document no\.?)\s*[:\-]?\s*([A-Z0-9]{9,12})\b",
                )
                .pattern(r"\b(\d{12})\d[A-Z<]"),
        )
        .field(
            "expiryDate",
            FieldPatternConfig::new(3, validators::is_date)
                .label("valable")
                .label("expir")
                .pattern(format!(
                    r"(?i:valable jusqu['’]au|date d['’]expiration|expiry date|date of expiry)\s*[:\-]?\s*({NUMERIC_DATE})"
                ))
                .pattern(format!(
                    r"(?i:valable jusqu['’]au|date d['’]expiration)\s*[:\-]?\s*({LONG_DATE})"
                )),
        )
        .field(
            "sex",
            FieldPatternConfig::new(4, validators::is_sex)
                .label("sex")
                .pattern(r"(?i:\bsexe?(?: ?/ ?sex)?)\s*[:\-]?\s*([MF])\b")
                // MRZ line 2: birth date, check digit, sex.
                .pattern(r"<\d{7}([MF])\d?\b"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::FieldExtractor;
    use crate::models::document::DocumentFieldsResult;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> DocumentFieldsResult {
        FieldExtractor::builtin()
            .extract_from_text(text, DocumentType::Identity)
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
    fn test_simple_last_name() {
        let result = extract("NOM: DUPONT");
        assert_eq!(result.value("lastName"), Some("DUPONT"));
        assert_eq!(result.field("lastName").unwrap().confidence, 1.0);
    }

    #[test]
    fn test_mixed_case_last_name() {
        let result = extract("Nom: Dupont");
        assert_eq!(result.value("lastName"), Some("Dupont"));
        assert_eq!(result.field("lastName").unwrap().confidence, 1.0);

        let result = extract("Nom : Le Goff Prénom : Marie");
        assert_eq!(result.value("lastName"), Some("Le Goff"));
    }

    #[test]
    fn test_uppercase_surname_preferred() {
        let result = extract("NOM: DUPONT Prénom(s): Jean");
        let last_name = result.field("lastName").unwrap();
        assert_eq!(last_name.value.as_deref(), Some("DUPONT"));
        assert!(last_name.alternatives.is_empty());
    }

    #[test]
    fn test_legacy_card() {
        let text = "RÉPUBLIQUE FRANÇAISE CARTE NATIONALE D'IDENTITÉ N°: 880692310285 \
                    Nom: DUPONT Prénom(s): Jean, Pierre Sexe: M \
                    Né(e) le: 12.03.1985 à: LYON (69) \
                    Valable jusqu'au 11.03.2030";
        let result = extract(text);

        assert_eq!(result.value("lastName"), Some("DUPONT"));
        assert_eq!(result.value("firstName"), Some("Jean, Pierre"));
        assert_eq!(result.value("sex"), Some("M"));
        assert_eq!(result.value("birthDate"), Some("12.03.1985"));
        assert_eq!(result.value("birthPlace"), Some("LYON"));
        assert_eq!(result.value("documentNumber"), Some("880692310285"));
        assert_eq!(result.value("expiryDate"), Some("11.03.2030"));
    }

    #[test]
    fn test_machine_readable_zone_fallback() {
        let text = "IDFRADUPONT<<<<<<<<<<<<<<<<<<<<<<<<<<<<< 8806923102858JEAN<<<<<<<<8503126M0";
        let result = extract(text);

        assert_eq!(result.value("lastName"), Some("DUPONT"));
        assert_eq!(result.value("firstName"), Some("JEAN"));
        assert_eq!(result.value("documentNumber"), Some("880692310285"));
        assert_eq!(result.value("sex"), Some("M"));
        // Unlabelled matches only.
        assert_eq!(result.field("lastName").unwrap().confidence, 0.8);
    }

    #[test]
    fn test_long_birth_date() {
        let result = extract("Date de naissance : 3 août 1990");
        assert_eq!(result.value("birthDate"), Some("3 août 1990"));
    }

    #[test]
    fn test_label_words_are_not_names() {
        let result = extract("NOM: PRENOM");
        assert_eq!(result.value("lastName"), None);
    }
}
