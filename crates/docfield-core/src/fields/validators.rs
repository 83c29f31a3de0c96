//! Plausibility checks for captured field values.
//!
//! Validators receive trimmed captures and only decide keep/drop; they never
//! rewrite the value.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::FRENCH_MONTHS;

lazy_static! {
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"^(\d{1,2})[./\-](\d{1,2})[./\-](\d{4})$").unwrap();

    static ref LONG_DATE: Regex = Regex::new(r"^(\d{1,2}) (\p{L}+) (\d{4})$").unwrap();

    static ref MONTH_YEAR: Regex = Regex::new(r"^(\p{L}+) (\d{4})$").unwrap();

    static ref DATE_RANGE: Regex = Regex::new(r"^(.+?) au (.+)$").unwrap();

    static ref BIC_SHAPE: Regex =
        Regex::new(r"^[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}(?:[A-Z0-9]{3})?$").unwrap();

    static ref DOCUMENT_NUMBER: Regex = Regex::new(r"^[A-Z0-9]{9,12}$").unwrap();
}

/// Words that appear as field labels on scanned documents and must never be
/// taken for a name.
const LABEL_WORDS: &[&str] = &[
    "NOM",
    "PRENOM",
    "PRÉNOM",
    "PRENOMS",
    "PRÉNOMS",
    "SEXE",
    "NÉ",
    "NÉE",
    "TAILLE",
    "NATIONALITE",
    "NATIONALITÉ",
    "SIGNATURE",
    "IBAN",
    "BIC",
    "SIRET",
    "ADRESSE",
    "TITULAIRE",
    "EMPLOYEUR",
    "SALARIE",
    "SALARIÉ",
    "DATE",
    "VALABLE",
];

/// Parse a numeric (`15.01.2024`, `15/01/2024`) or French long (`15 janvier 2024`) date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    let date = if let Some(caps) = NUMERIC_DATE.captures(value) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?
    } else if let Some(caps) = LONG_DATE.captures(value) {
        let day: u32 = caps[1].parse().ok()?;
        let month = french_month_to_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?
    } else {
        return None;
    };

    (1900..=2100).contains(&date.year()).then_some(date)
}

/// Convert a French month name (accents optional) to its number.
pub fn french_month_to_number(month: &str) -> Option<u32> {
    let month = month.to_lowercase();
    FRENCH_MONTHS
        .iter()
        .position(|names| names.contains(&month.as_str()))
        .map(|i| i as u32 + 1)
}

pub fn is_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// A `<date> au <date>` range with start not after end, or a `<month> <year>` period.
pub fn is_period(value: &str) -> bool {
    if let Some(caps) = DATE_RANGE.captures(value) {
        return match (parse_date(&caps[1]), parse_date(&caps[2])) {
            (Some(start), Some(end)) => start <= end,
            _ => false,
        };
    }

    MONTH_YEAR.captures(value).is_some_and(|caps| {
        french_month_to_number(&caps[1]).is_some()
            && caps[2].parse::<i32>().is_ok_and(|y| (1900..=2100).contains(&y))
    })
}

/// Parse a French-formatted amount (e.g., "1 234,56", "1.234,56" or "1234.56").
pub fn parse_french_amount(s: &str) -> Option<Decimal> {
    let negative = s.trim_start().starts_with('-');

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = if cleaned.contains(',') && !cleaned.contains('.') {
        cleaned.replace(',', ".")
    } else if cleaned.contains(',') && cleaned.contains('.') {
        // Whichever separator comes last is the decimal one
        match (cleaned.rfind(','), cleaned.rfind('.')) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            (Some(_), Some(_)) => cleaned.replace(',', ""),
            _ => cleaned,
        }
    } else if cleaned.matches('.').count() > 1 || thousands_dot(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    let amount = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -amount } else { amount })
}

/// `1.234` style: a single dot followed by exactly three digits.
fn thousands_dot(s: &str) -> bool {
    s.rfind('.').is_some_and(|pos| s.len() - pos - 1 == 3)
}

/// Non-negative monetary amount.
pub fn is_amount(value: &str) -> bool {
    !value.trim_start().starts_with('-')
        && parse_french_amount(value).is_some_and(|a| !a.is_sign_negative())
}

/// Monetary amount that may be negative (account balances).
pub fn is_signed_amount(value: &str) -> bool {
    parse_french_amount(value).is_some()
}

/// Validate an IBAN using the mod-97 checksum.
pub fn is_iban(iban: &str) -> bool {
    let iban: String = iban
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if iban.len() < 15 || iban.len() > 34 {
        return false;
    }

    let (country_code, check_digits) = (&iban[..2], &iban[2..4]);
    if !country_code.chars().all(|c| c.is_ascii_alphabetic())
        || !check_digits.chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }

    // Move the first four characters to the end, letters become 10-35
    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    let mut remainder: u32 = 0;
    for c in rearranged.chars() {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return false,
        };
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }

    remainder == 1
}

pub fn is_bic(value: &str) -> bool {
    BIC_SHAPE.is_match(value)
}

/// Validate a SIRET: 14 digits passing the Luhn check.
pub fn is_siret(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    digits.len() == 14 && luhn(&digits)
}

fn luhn(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Validate a French social security number (NIR): 13 characters plus a
/// 2-digit key equal to `97 - (number mod 97)`. Corsican departments 2A/2B
/// count as 19/18.
pub fn is_social_security_number(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if compact.len() != 15 || !compact.is_ascii() {
        return false;
    }

    let (body, key) = compact.split_at(13);
    let body = match &body[5..7] {
        "2A" => format!("{}19{}", &body[..5], &body[7..]),
        "2B" => format!("{}18{}", &body[..5], &body[7..]),
        _ => body.to_string(),
    };

    if !matches!(body.chars().next(), Some('1' | '2')) {
        return false;
    }

    match (body.parse::<u64>(), key.parse::<u64>()) {
        (Ok(number), Ok(key)) => 97 - number % 97 == key,
        _ => false,
    }
}

/// French tax number (numéro fiscal): 13 digits starting with 0-3.
pub fn is_tax_number(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() == 13
        && compact.chars().all(|c| c.is_ascii_digit())
        && matches!(compact.chars().next(), Some('0'..='3'))
}

/// Tax notice reference: 13 digits once spaces are removed.
pub fn is_notice_reference(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() == 13 && compact.chars().all(|c| c.is_ascii_digit())
}

pub fn is_tax_year(value: &str) -> bool {
    value.parse::<i32>().is_ok_and(|y| (1990..=2100).contains(&y))
}

/// Number of household shares: a positive multiple of 0.25, at most 20.
pub fn is_household_shares(value: &str) -> bool {
    let Ok(shares) = Decimal::from_str(&value.replace(',', ".")) else {
        return false;
    };
    let quarters = shares * Decimal::from(4);
    shares > Decimal::ZERO && shares <= Decimal::from(20) && quarters.fract().is_zero()
}

pub fn is_document_number(value: &str) -> bool {
    DOCUMENT_NUMBER.is_match(value) && value.chars().any(|c| c.is_ascii_digit())
}

pub fn is_sex(value: &str) -> bool {
    matches!(value, "M" | "F")
}

/// Person name: letters, spaces, hyphens, apostrophes and commas; 2-60
/// characters; no label word.
pub fn is_person_name(value: &str) -> bool {
    let len = value.chars().count();
    (2..=60).contains(&len)
        && value
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | ',' | '.'))
        && value.chars().any(char::is_alphabetic)
        && !contains_label_word(value)
}

/// Place name: same alphabet as person names.
pub fn is_place_name(value: &str) -> bool {
    is_person_name(value)
}

/// Organization name: 2-80 characters with at least two letters.
pub fn is_organization_name(value: &str) -> bool {
    let len = value.chars().count();
    (2..=80).contains(&len)
        && value.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && !contains_label_word(value)
}

fn contains_label_word(value: &str) -> bool {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .any(|word| LABEL_WORDS.contains(&word.to_uppercase().as_str()))
}
