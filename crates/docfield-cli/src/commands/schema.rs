//! Schema command - show the fields extracted for a document type.

use clap::Args;
use console::style;

use docfield_core::builtin_registry;

/// Arguments for the schema command.
#[derive(Args)]
pub struct SchemaArgs {
    /// Document type to describe (lists all types when omitted)
    document_type: Option<String>,

    /// Print pattern sources too
    #[arg(long)]
    patterns: bool,
}

pub fn run(args: SchemaArgs) -> anyhow::Result<()> {
    let registry = builtin_registry();

    let Some(name) = args.document_type else {
        println!("{}", style("Document types:").bold());
        for document_type in registry.document_types() {
            let schema = registry.schema_for(document_type)?;
            println!("  {:<16} {} fields", document_type.as_str(), schema.len());
        }
        return Ok(());
    };

    let schema = registry.schema_for_name(&name)?;

    println!(
        "{} {} ({} fields)",
        style("Schema:").bold(),
        schema.document_type(),
        schema.len()
    );
    println!();

    let mut fields: Vec<_> = schema.fields().collect();
    fields.sort_by_key(|(_, config)| config.priority);

    for (field, config) in fields {
        println!(
            "  {:<22} priority {}  labels: {}",
            style(field).cyan(),
            config.priority,
            if config.labels.is_empty() {
                "-".to_string()
            } else {
                config.labels.join(", ")
            }
        );
        if args.patterns {
            for matcher in &config.patterns {
                let kind = if config.is_labelled(matcher.as_ref()) {
                    "labelled"
                } else {
                    "fallback"
                };
                println!("      [{}] {}", kind, matcher.source());
            }
        }
    }

    Ok(())
}
