//! Extract command - extract fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use docfield_core::{DocumentFile, DocumentPipeline, DocumentType, FieldExtractor};

use super::output::{format_result, OutputFormat};
use super::{config, native_manager};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or image, or a text file with --from-text)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (identity, tax_notice, payslip, bank_statement)
    #[arg(short = 't', long = "type")]
    document_type: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from configuration)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Treat the input as already recognized text and skip OCR
    #[arg(long)]
    from_text: bool,

    /// Show recognition confidence and timing
    #[arg(long)]
    show_confidence: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = config::load(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting from file: {}", args.input.display());

    let result = if args.from_text {
        let text = fs::read_to_string(&args.input)?;
        let document_type: DocumentType = args.document_type.parse()?;
        FieldExtractor::builtin().extract_from_text(&text, document_type)?
    } else {
        let file = DocumentFile::from_path(&args.input)?;
        let manager = native_manager(&config, args.model_dir.clone());
        let pipeline = DocumentPipeline::from_config(manager.clone(), &config);

        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
                .progress_chars("##-"),
        );
        pb.set_message(format!("Reading {}", file.file_name));

        let on_progress = |percent: f32| pb.set_position(percent as u64);
        let result = pipeline
            .extract_document_fields(&file, &args.document_type, Some(&on_progress))
            .await;
        manager.terminate().await;

        match result {
            Ok(result) => {
                pb.finish_with_message("Done");
                result
            }
            Err(e) => {
                pb.abandon_with_message("Failed");
                return Err(e.into());
            }
        }
    };

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
    let output = format_result(&result, format, config.output.show_alternatives)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        if result.page_count > 0 {
            println!(
                "{} Recognition confidence: {:.1}% over {} page(s)",
                style("ℹ").blue(),
                result.overall_confidence * 100.0,
                result.page_count
            );
        }
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time.as_millis()
        );
    }

    debug!("Total command time: {:?}", start.elapsed());

    Ok(())
}
