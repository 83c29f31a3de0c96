//! Native recognition engine using `pure-onnx-ocr`.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use super::{run_blocking, EngineFactory, PageRecognition, RecognitionEngine};
use crate::error::RecognitionError;
use crate::models::config::RecognitionConfig;

/// Height, in pixels, of the bands used to sort regions into reading order.
const ROW_HEIGHT: f64 = 20.0;

/// Recognition engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: Arc<pure_onnx_ocr::engine::OcrEngine>,
    keep_unk: bool,
}

impl PureOcrEngine {
    /// Load detection, recognition and dictionary files named by the config.
    pub fn from_config(config: &RecognitionConfig) -> Result<Self, RecognitionError> {
        if !config.models_present() {
            return Err(RecognitionError::Initialization(format!(
                "model files not found in {}",
                config.model_dir.display()
            )));
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&config.detection_path())
            .rec_model_path(&config.recognition_path())
            .dictionary_path(&config.dictionary_path())
            .build()
            .map_err(|e| RecognitionError::Initialization(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", config.model_dir.display());

        Ok(Self {
            engine: Arc::new(engine),
            keep_unk: config.keep_unk,
        })
    }

    /// Run detection and recognition on one page, on the current thread.
    pub fn process(&self, image: &DynamicImage) -> Result<PageRecognition, RecognitionError> {
        recognize_page(&self.engine, image, self.keep_unk)
    }
}

fn recognize_page(
    engine: &pure_onnx_ocr::engine::OcrEngine,
    image: &DynamicImage,
    keep_unk: bool,
) -> Result<PageRecognition, RecognitionError> {
    let start = Instant::now();
    let (width, height) = image.dimensions();
    debug!("Recognizing page: {}x{}", width, height);

    let results = engine
        .run_from_image(image)
        .map_err(|e| RecognitionError::Failed(format!("pure-onnx-ocr: {}", e)))?;

    let mut regions: Vec<(f64, f64, String, f32)> = results
        .iter()
        .map(|r| {
            let (x, y) = top_left(&r.bounding_box);
            let text = if keep_unk {
                r.text.clone()
            } else {
                r.text.replace("[UNK]", " ")
            };
            (x, y, text, r.confidence)
        })
        .collect();

    // Reading order: rows top to bottom, then left to right.
    regions.sort_by(|a, b| {
        let row_a = (a.1 / ROW_HEIGHT) as i64;
        let row_b = (b.1 / ROW_HEIGHT) as i64;
        row_a.cmp(&row_b).then_with(|| a.0.total_cmp(&b.0))
    });

    let confidence = if regions.is_empty() {
        0.0
    } else {
        regions.iter().map(|r| r.3).sum::<f32>() / regions.len() as f32
    };

    let text = regions
        .iter()
        .map(|r| r.2.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    debug!(
        "Recognized {} regions in {}ms",
        regions.len(),
        start.elapsed().as_millis()
    );

    Ok(PageRecognition { text, confidence })
}

#[async_trait]
impl RecognitionEngine for PureOcrEngine {
    async fn recognize(
        &mut self,
        image: &DynamicImage,
    ) -> Result<PageRecognition, RecognitionError> {
        let engine = Arc::clone(&self.engine);
        let image = image.clone();
        let keep_unk = self.keep_unk;
        run_blocking(move || recognize_page(&engine, &image, keep_unk)).await
    }
}

/// Factory loading a [`PureOcrEngine`] from the configured model directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureEngineFactory;

#[async_trait]
impl EngineFactory for PureEngineFactory {
    async fn create(
        &self,
        config: &RecognitionConfig,
    ) -> Result<Box<dyn RecognitionEngine>, RecognitionError> {
        let config = config.clone();
        let engine = run_blocking(move || PureOcrEngine::from_config(&config))
            .await
            .map_err(|e| match e {
                RecognitionError::Initialization(_) => e,
                other => RecognitionError::Initialization(other.to_string()),
            })?;
        Ok(Box::new(engine))
    }
}

/// Smallest x and y over the exterior points of a region polygon.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f64, f64) {
    polygon
        .exterior()
        .coords()
        .fold((f64::INFINITY, f64::INFINITY), |(x, y), c| (x.min(c.x), y.min(c.y)))
}
