//! Bulletin de paie.

use crate::fields::patterns::{AMOUNT, CIVILITY, MONTHS, NAME_WORD, NUMERIC_DATE, UPPER_WORD};
use crate::fields::validators;
use crate::fields::{DocumentSchema, FieldPatternConfig};
use crate::models::document::DocumentType;

pub fn schema() -> DocumentSchema {
    DocumentSchema::new(DocumentType::Payslip)
        .field(
            "employeeName",
            FieldPatternConfig::new(1, validators::is_person_name)
                .label("salarié")
                .label("salarie")
                .label("employé")
                .label("employe")
                .pattern(format!(
                    r"(?i:\b(?:salarié|salarie|employé|employe)\b)(?: ?\(e\))?\s*:?\s*(?:{CIVILITY} )?({NAME_WORD} {UPPER_WORD})"
                ))
                .pattern(format!(r"\b{CIVILITY} ({NAME_WORD} {UPPER_WORD})\b")),
        )
        .field(
            "employerName",
            FieldPatternConfig::new(2, validators::is_organization_name)
                .label("employeur")
                .label("raison sociale")
                .label("entreprise")
                .pattern(
                    r"(?i:\b(?:employeur|raison sociale|entreprise)\b)\s*:?\s*(\p{Lu}[\p{L}\d&'\-. ]{1,60}?)\s*(?:\bSIRET\b|\bSiret\b|\bCode APE\b|\bAPE\b|\bNAF\b|\bAdresse\b|\bURSSAF\b|\bSalarié\b|\bSalarie\b|\bN°|,|$)",
                )
                .pattern(r"\b((?:\p{Lu}[\p{Lu}\d&'\-]+ ){1,2}(?:SASU|SAS|SARL|EURL|SNC|SA))\b"),
        )
        .field(
            "payPeriod",
            FieldPatternConfig::new(1, validators::is_period)
                .label("période")
                .label("periode")
                .label("mois")
                .pattern(format!(
                    r"(?i:\b(?:période|periode)\b)\s*:?\s*(?i:du )?({NUMERIC_DATE} au {NUMERIC_DATE})"
                ))
                .pattern(format!(
                    r"(?i:\b(?:période|periode|mois|paie de)\b)\s*:?\s*({MONTHS} \d{{4}})"
                ))
                .pattern(format!(r"\bdu ({NUMERIC_DATE} au {NUMERIC_DATE})\b")),
        )
        .field(
            "grossSalary",
            FieldPatternConfig::new(1, validators::is_amount)
                .label("brut")
                .pattern(format!(
                    r"(?i:\b(?:salaire brut|total brut|rémunération brute|remuneration brute|brut)\b)\s*:?\s*({AMOUNT})"
                )),
        )
        .field(
            "netSalary",
            FieldPatternConfig::new(1, validators::is_amount)
                .label("net à payer")
                .label("net a payer")
                .label("net payé")
                .label("net paye")
                .pattern(format!(
                    r"(?i:(?:\bnet à payer|\bnet a payer)(?: avant (?:impôt|impot) sur le revenu)?|\bnet payé|\bnet paye)\s*:?\s*({AMOUNT})"
                )),
        )
        .field(
            "netTaxable",
            FieldPatternConfig::new(2, validators::is_amount)
                .label("net imposable")
                .label("net fiscal")
                .pattern(format!(
                    r"(?i:\bnet imposable|\bnet fiscal)\s*:?\s*({AMOUNT})"
                )),
        )
        .field(
            "siret",
            FieldPatternConfig::new(3, validators::is_siret)
                .label("siret")
                .pattern(r"(?i:\bsiret\b)\s*(?:n°)?\s*:?\s*(\d{3} ?\d{3} ?\d{3} ?\d{5})\b")
                .pattern(r"\b(\d{3} \d{3} \d{3} \d{5})\b"),
        )
        .field(
            "socialSecurityNumber",
            FieldPatternConfig::new(2, validators::is_social_security_number)
                .label("sécurité")
                .label("securite")
                .label("nir")
                .pattern(
                    r"(?i:\b(?:sécurité|securite) sociale|\bnir\b)\s*:?\s*([12] ?\d{2} ?\d{2} ?(?:\d{2}|2A|2B) ?\d{3} ?\d{3} ?\d{2})\b",
                )
                .pattern(r"\b([12] \d{2} \d{2} (?:\d{2}|2A|2B) \d{3} \d{3} \d{2})\b"),
        )
}
