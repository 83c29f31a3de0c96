//! Rendering of extraction results.

use clap::ValueEnum;

use docfield_core::DocumentFieldsResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per field
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// Format named in the configuration, JSON when the name is unknown.
    pub fn from_config(name: &str) -> Self {
        <Self as ValueEnum>::from_str(name, true).unwrap_or(OutputFormat::Json)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(
    result: &DocumentFieldsResult,
    format: OutputFormat,
    show_alternatives: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result, show_alternatives)),
    }
}

fn format_csv(result: &DocumentFieldsResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value", "confidence", "alternatives"])?;

    for field in &result.fields {
        wtr.write_record([
            field.field.as_str(),
            field.value.as_deref().unwrap_or_default(),
            &format!("{:.2}", field.confidence),
            &field.alternatives.join(" | "),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(result: &DocumentFieldsResult, show_alternatives: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", result.document_type));
    if result.page_count > 0 {
        output.push_str(&format!(
            "Pages: {} (recognition confidence {:.1}%)\n",
            result.page_count,
            result.overall_confidence * 100.0
        ));
    }
    output.push('\n');

    let width = result
        .fields
        .iter()
        .map(|f| f.field.len())
        .max()
        .unwrap_or(0);

    for field in &result.fields {
        match &field.value {
            Some(value) => {
                output.push_str(&format!(
                    "  {:<width$}  {} ({:.0}%)",
                    field.field,
                    value,
                    field.confidence * 100.0
                ));
                if show_alternatives && !field.alternatives.is_empty() {
                    output.push_str(&format!("  [or: {}]", field.alternatives.join(", ")));
                }
            }
            None => output.push_str(&format!("  {:<width$}  -", field.field)),
        }
        output.push('\n');
    }

    let missing = result.missing_fields();
    if !missing.is_empty() {
        output.push_str(&format!("\nMissing: {}\n", missing.join(", ")));
    }

    output
}
