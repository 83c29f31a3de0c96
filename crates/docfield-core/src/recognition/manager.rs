//! Lifecycle owner of the recognition engine.

use std::sync::Mutex as StateLock;

use image::DynamicImage;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{normalize_confidence, EngineFactory, PageRecognition, RecognitionEngine};
use crate::error::RecognitionError;
use crate::models::config::RecognitionConfig;

/// Lifecycle phase of the managed engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initializing,
    Ready,
    Terminated,
}

/// Owns at most one engine, created lazily and reused across documents.
///
/// Every engine call goes through an async mutex, so a manager can be shared
/// by reference or behind an `Arc` between concurrent extractions.
pub struct RecognitionManager {
    factory: Box<dyn EngineFactory>,
    config: RecognitionConfig,
    state: StateLock<EngineState>,
    engine: Mutex<Option<Box<dyn RecognitionEngine>>>,
}

impl RecognitionManager {
    pub fn new(factory: impl EngineFactory + 'static, config: RecognitionConfig) -> Self {
        Self {
            factory: Box::new(factory),
            config,
            state: StateLock::new(EngineState::Uninitialized),
            engine: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, state: EngineState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    pub fn is_ready(&self) -> bool {
        self.state() == EngineState::Ready
    }

    /// Create the engine unless it is already ready. On failure the manager
    /// falls back to `Uninitialized` so a later call can retry.
    pub async fn ensure_ready(&self) -> Result<(), RecognitionError> {
        let mut engine = self.engine.lock().await;
        if self.is_ready() && engine.is_some() {
            return Ok(());
        }

        self.set_state(EngineState::Initializing);
        info!(
            "Initializing recognition engine (languages: {})",
            self.config.languages.join("+")
        );

        match self.factory.create(&self.config).await {
            Ok(created) => {
                *engine = Some(created);
                self.set_state(EngineState::Ready);
                debug!("Recognition engine ready");
                Ok(())
            }
            Err(e) => {
                self.set_state(EngineState::Uninitialized);
                warn!("Recognition engine initialization failed: {}", e);
                Err(match e {
                    RecognitionError::Initialization(_) => e,
                    other => RecognitionError::Initialization(other.to_string()),
                })
            }
        }
    }

    /// Recognize one page. The confidence is normalized to 0..1.
    pub async fn recognize(
        &self,
        image: &DynamicImage,
    ) -> Result<PageRecognition, RecognitionError> {
        let mut guard = self.engine.lock().await;
        if !self.is_ready() {
            return Err(RecognitionError::NotReady);
        }
        let engine = guard.as_mut().ok_or(RecognitionError::NotReady)?;

        let page = engine.recognize(image).await?;
        Ok(PageRecognition {
            text: page.text,
            confidence: normalize_confidence(page.confidence),
        })
    }

    /// Shut the engine down. A later [`ensure_ready`](Self::ensure_ready)
    /// creates a fresh one.
    pub async fn terminate(&self) {
        let mut guard = self.engine.lock().await;
        if let Some(mut engine) = guard.take() {
            engine.shutdown().await;
            info!("Recognition engine terminated");
        }
        self.set_state(EngineState::Terminated);
    }
}

impl std::fmt::Debug for RecognitionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionManager")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish()
    }
}
