//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod output;
pub mod schema;

use std::path::PathBuf;
use std::sync::Arc;

use docfield_core::models::config::DocfieldConfig;
use docfield_core::{PureEngineFactory, RecognitionManager};

/// Recognition manager over the native engine, with an optional model
/// directory override.
pub fn native_manager(
    config: &DocfieldConfig,
    model_dir: Option<PathBuf>,
) -> Arc<RecognitionManager> {
    let mut recognition = config.recognition.clone();
    if let Some(dir) = model_dir {
        recognition.model_dir = dir;
    }
    Arc::new(RecognitionManager::new(PureEngineFactory, recognition))
}
