//! End-to-end extraction: pages, recognition, fields.

use std::sync::Arc;
use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::{ConversionError, DocfieldError, Result};
use crate::extraction::FieldExtractor;
use crate::fields::{builtin_registry, PatternRegistry};
use crate::models::config::{DocfieldConfig, MAX_SCANNED_PAGES};
use crate::models::document::{DocumentFieldsResult, DocumentType};
use crate::pdf::{decode_image, DocumentFile, FileKind, PdfRasterizer, Rasterizer};
use crate::recognition::RecognitionManager;

/// Progress share reserved for recognition, in percent.
const RECOGNITION_PROGRESS: f32 = 80.0;
/// Progress reported once recognition is over and field extraction starts.
const EXTRACTION_PROGRESS: f32 = 90.0;

/// Progress callback receiving a percentage in 0..=100.
pub type ProgressFn<'a> = &'a (dyn Fn(f32) + Sync);

/// Turns a document file into extracted fields.
pub struct DocumentPipeline<'r> {
    manager: Arc<RecognitionManager>,
    rasterizer: Box<dyn Rasterizer>,
    extractor: FieldExtractor<'r>,
    max_pages: usize,
}

impl DocumentPipeline<'static> {
    /// Pipeline with the PDF rasterizer and the built-in schemas.
    pub fn new(manager: Arc<RecognitionManager>) -> Self {
        Self {
            manager,
            rasterizer: Box::new(PdfRasterizer::new()),
            extractor: FieldExtractor::new(builtin_registry()),
            max_pages: MAX_SCANNED_PAGES,
        }
    }

    /// Pipeline honoring the rasterizer section of a configuration.
    pub fn from_config(manager: Arc<RecognitionManager>, config: &DocfieldConfig) -> Self {
        Self::new(manager).with_max_pages(config.rasterizer.effective_max_pages())
    }
}

impl<'r> DocumentPipeline<'r> {
    pub fn with_rasterizer(mut self, rasterizer: impl Rasterizer + 'static) -> Self {
        self.rasterizer = Box::new(rasterizer);
        self
    }

    /// Use custom schemas instead of the built-in ones.
    pub fn with_registry<'s>(self, registry: &'s PatternRegistry) -> DocumentPipeline<'s> {
        DocumentPipeline {
            manager: self.manager,
            rasterizer: self.rasterizer,
            extractor: FieldExtractor::new(registry),
            max_pages: self.max_pages,
        }
    }

    /// Page limit, never above [`MAX_SCANNED_PAGES`].
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.clamp(1, MAX_SCANNED_PAGES);
        self
    }

    pub fn manager(&self) -> &RecognitionManager {
        &self.manager
    }

    /// Recognize up to three pages of `file` and extract the fields of
    /// `document_type`. Progress goes from 0 to 80 during recognition, then
    /// 90 and 100.
    pub async fn extract_document_fields(
        &self,
        file: &DocumentFile,
        document_type: &str,
        on_progress: Option<ProgressFn<'_>>,
    ) -> Result<DocumentFieldsResult> {
        let start = Instant::now();
        let report = |percent: f32| {
            if let Some(callback) = on_progress {
                callback(percent);
            }
        };

        let document_type: DocumentType = document_type.parse()?;
        let schema = self.extractor.registry().schema_for(document_type)?;

        let pages = self.load_pages(file)?;
        info!(
            "Extracting {} fields from {} ({} page(s))",
            document_type,
            file.file_name,
            pages.len()
        );

        self.manager.ensure_ready().await?;

        let mut texts = Vec::with_capacity(pages.len());
        let mut page_confidences = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            let recognized = self.manager.recognize(page).await?;
            debug!(
                "Page {}: {} chars, confidence {:.2}",
                index + 1,
                recognized.text.len(),
                recognized.confidence
            );

            texts.push(recognized.text);
            page_confidences.push(recognized.confidence);
            report(RECOGNITION_PROGRESS * (index + 1) as f32 / pages.len() as f32);
        }

        let raw_text = texts.join("\n\n");
        let overall_confidence =
            page_confidences.iter().sum::<f32>() / page_confidences.len() as f32;

        report(EXTRACTION_PROGRESS);
        let fields = self.extractor.extract_fields(&raw_text, schema);
        report(100.0);

        let found = fields.iter().filter(|f| f.is_found()).count();
        info!(
            "Found {}/{} fields in {} (confidence {:.2}) in {:?}",
            found,
            fields.len(),
            file.file_name,
            overall_confidence,
            start.elapsed()
        );

        Ok(DocumentFieldsResult {
            document_type,
            fields,
            raw_text,
            overall_confidence,
            page_count: page_confidences.len(),
            page_confidences,
            processing_time: start.elapsed(),
        })
    }

    fn load_pages(&self, file: &DocumentFile) -> Result<Vec<DynamicImage>> {
        let kind = file
            .kind()
            .ok_or_else(|| DocfieldError::UnsupportedFormat(file.file_name.clone()))?;

        let mut pages = match kind {
            FileKind::Image(format) => vec![decode_image(&file.data, format)?],
            FileKind::Pdf => self.rasterizer.rasterize(&file.data, self.max_pages)?,
        };

        if pages.is_empty() {
            return Err(ConversionError::NoPages.into());
        }
        pages.truncate(self.max_pages);
        Ok(pages)
    }
}
