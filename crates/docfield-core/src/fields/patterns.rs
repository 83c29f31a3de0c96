//! Regex fragments shared by the built-in schemas.
//!
//! Patterns run against normalized text, so a single literal space stands for
//! any whitespace run of the scanned page.

/// French month names, accented and unaccented spellings.
pub const FRENCH_MONTHS: [&[&str]; 12] = [
    &["janvier"],
    &["février", "fevrier"],
    &["mars"],
    &["avril"],
    &["mai"],
    &["juin"],
    &["juillet"],
    &["août", "aout"],
    &["septembre"],
    &["octobre"],
    &["novembre"],
    &["décembre", "decembre"],
];

macro_rules! months {
    () => {
        concat!(
            r"(?i:janvier|février|fevrier|mars|avril|mai|juin|juillet",
            r"|août|aout|septembre|octobre|novembre|décembre|decembre)"
        )
    };
}

/// Case-insensitive alternation of [`FRENCH_MONTHS`].
pub const MONTHS: &str = months!();

/// Numeric day-month-year date: `12.03.1985`, `12/03/1985`, `12-03-1985`.
pub const NUMERIC_DATE: &str = r"\d{1,2}[./\-]\d{1,2}[./\-]\d{4}";

/// Long French date: `12 mars 1985`.
pub const LONG_DATE: &str = concat!(r"\d{1,2} ", months!(), r" \d{4}");

/// Amount with optional thousands separators and cents: `1 234,56`, `35 420`, `1234.56`.
pub const AMOUNT: &str = r"\d{1,3}(?:[ .]?\d{3})*(?:[.,]\d{2})?\b";

/// Civility prefix preceding a person's name.
pub const CIVILITY: &str = r"(?:M\.|Mme|Mlle|Monsieur|Madame|MR|MME)";

/// Fully uppercase word, as printed for surnames and places.
pub const UPPER_WORD: &str = r"\p{Lu}[\p{Lu}'\-]+";

/// Capitalized or uppercase word.
pub const NAME_WORD: &str = r"\p{Lu}[\p{L}'\-]+";

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn whole(pattern: &str, text: &str) -> bool {
        Regex::new(&format!("^(?:{pattern})$")).unwrap().is_match(text)
    }

    #[test]
    fn test_amount_fragment() {
        assert!(whole(AMOUNT, "1 234,56"));
        assert!(whole(AMOUNT, "35 420"));
        assert!(whole(AMOUNT, "1234.56"));
        assert!(whole(AMOUNT, "12345,00"));
        assert!(!whole(AMOUNT, "12,5"));
    }

    #[test]
    fn test_date_fragments() {
        assert!(whole(NUMERIC_DATE, "12.03.1985"));
        assert!(whole(NUMERIC_DATE, "1/3/1985"));
        assert!(whole(LONG_DATE, "12 Mars 1985"));
        assert!(whole(LONG_DATE, "1 août 2024"));
        assert!(!whole(LONG_DATE, "12 march 1985"));
        assert!(LONG_DATE.contains(MONTHS));
    }

    #[test]
    fn test_months_cover_every_spelling() {
        let months = Regex::new(&format!("^{MONTHS}$")).unwrap();
        for names in FRENCH_MONTHS {
            for name in names {
                assert!(months.is_match(name), "{name}");
            }
        }
    }

    #[test]
    fn test_name_words() {
        assert!(whole(UPPER_WORD, "DUPONT"));
        assert!(whole(UPPER_WORD, "D'ARTAGNAN"));
        assert!(!whole(UPPER_WORD, "Dupont"));
        assert!(whole(NAME_WORD, "Dupont"));
        assert!(whole(CIVILITY, "Mme"));
    }
}
