//! Built-in schemas for French administrative documents.

pub mod bank_statement;
pub mod identity;
pub mod payslip;
pub mod tax_notice;

use super::DocumentSchema;

/// Every built-in schema, one per document type.
pub fn builtin() -> Vec<DocumentSchema> {
    vec![
        identity::schema(),
        tax_notice::schema(),
        payslip::schema(),
        bank_statement::schema(),
    ]
}
