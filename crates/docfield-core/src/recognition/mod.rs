//! Text recognition engine boundary.
//!
//! The pipeline never talks to an engine directly: a [`RecognitionManager`]
//! creates one through an [`EngineFactory`], serializes access to it and
//! normalizes its confidences.

pub mod manager;
#[cfg(feature = "native")]
pub mod pure_engine;

pub use manager::{EngineState, RecognitionManager};
#[cfg(feature = "native")]
pub use pure_engine::{PureEngineFactory, PureOcrEngine};

use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;
use crate::models::config::RecognitionConfig;

/// Text and confidence recognized on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecognition {
    /// Recognized text, lines separated by newlines.
    pub text: String,
    /// Page confidence. Engines may report 0..1 or 0..100; the manager
    /// always hands out 0..1.
    pub confidence: f32,
}

impl PageRecognition {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// A loaded recognition engine.
#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Recognize the text of one page image.
    async fn recognize(
        &mut self,
        image: &DynamicImage,
    ) -> Result<PageRecognition, RecognitionError>;

    /// Release engine resources. Called once before the engine is dropped.
    async fn shutdown(&mut self) {}
}

/// Creates engines for a recognition configuration.
#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn create(
        &self,
        config: &RecognitionConfig,
    ) -> Result<Box<dyn RecognitionEngine>, RecognitionError>;
}

/// Run CPU-bound engine work on tokio's blocking pool so the caller's
/// runtime keeps polling timers and other tasks meanwhile.
pub async fn run_blocking<T, F>(work: F) -> Result<T, RecognitionError>
where
    F: FnOnce() -> Result<T, RecognitionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RecognitionError::Failed(format!("recognition task failed: {}", e)))?
}

/// Bring an engine confidence into 0..1. Values above 1 are percentages.
pub fn normalize_confidence(raw: f32) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    let value = if raw > 1.0 { raw / 100.0 } else { raw };
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_confidence() {
        assert_eq!(normalize_confidence(0.8), 0.8);
        assert_eq!(normalize_confidence(80.0), 0.8);
        assert_eq!(normalize_confidence(1.0), 1.0);
        assert_eq!(normalize_confidence(250.0), 1.0);
        assert_eq!(normalize_confidence(-3.0), 0.0);
        assert_eq!(normalize_confidence(f32::NAN), 0.0);
    }

    #[tokio::test]
    async fn test_run_blocking_returns_work_result() {
        let page = run_blocking(|| Ok(PageRecognition::new("NOM: DUPONT", 0.9)))
            .await
            .unwrap();
        assert_eq!(page.text, "NOM: DUPONT");

        let err = run_blocking::<PageRecognition, _>(|| {
            Err(RecognitionError::Failed("bad page".to_string()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, RecognitionError::Failed(msg) if msg == "bad page"));
    }

    #[tokio::test]
    async fn test_run_blocking_panic_is_an_error() {
        let err = run_blocking::<(), _>(|| panic!("engine crashed")).await.unwrap_err();
        assert!(matches!(err, RecognitionError::Failed(_)));
    }
}
