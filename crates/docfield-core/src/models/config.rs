//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DocfieldError, Result};

/// Hard cap on the number of pages scanned per document.
pub const MAX_SCANNED_PAGES: usize = 3;

/// Main configuration for the docfield pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocfieldConfig {
    /// Recognition engine configuration.
    pub recognition: RecognitionConfig,

    /// Rasterizer configuration.
    pub rasterizer: RasterizerConfig,

    /// Output preferences for front ends.
    pub output: OutputConfig,
}

/// Recognition engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Languages the engine is set up for (ISO 639-2 codes).
    pub languages: Vec<String>,

    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of blanking them.
    pub keep_unk: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            languages: vec!["fra".to_string()],
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl RecognitionConfig {
    pub fn detection_path(&self) -> PathBuf {
        self.model_dir.join(&self.detection_model)
    }

    pub fn recognition_path(&self) -> PathBuf {
        self.model_dir.join(&self.recognition_model)
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.model_dir.join(&self.dictionary)
    }

    /// Check that every model file is present.
    pub fn models_present(&self) -> bool {
        self.detection_path().exists()
            && self.recognition_path().exists()
            && self.dictionary_path().exists()
    }
}

/// Rasterizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizerConfig {
    /// Maximum pages to rasterize, never above [`MAX_SCANNED_PAGES`].
    pub max_pages: usize,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            max_pages: MAX_SCANNED_PAGES,
        }
    }
}

impl RasterizerConfig {
    /// Page limit actually applied.
    pub fn effective_max_pages(&self) -> usize {
        self.max_pages.clamp(1, MAX_SCANNED_PAGES)
    }
}

/// Output preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format name (json, csv, text).
    pub format: String,

    /// Print alternative candidates next to each value.
    pub show_alternatives: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            show_alternatives: true,
        }
    }
}

impl DocfieldConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DocfieldError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DocfieldError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_pages_clamped_to_hard_cap() {
        let config = RasterizerConfig { max_pages: 10 };
        assert_eq!(config.effective_max_pages(), MAX_SCANNED_PAGES);

        let config = RasterizerConfig { max_pages: 0 };
        assert_eq!(config.effective_max_pages(), 1);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DocfieldConfig =
            serde_json::from_str(r#"{"rasterizer": {"max_pages": 2}}"#).unwrap();
        assert_eq!(config.rasterizer.max_pages, 2);
        assert_eq!(config.recognition.languages, vec!["fra".to_string()]);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DocfieldConfig::default();
        config.recognition.languages = vec!["fra".to_string(), "eng".to_string()];
        config.save(&path).unwrap();

        let loaded = DocfieldConfig::from_file(&path).unwrap();
        assert_eq!(loaded.recognition.languages.len(), 2);
        assert_eq!(loaded.recognition.detection_path(), PathBuf::from("models/det.onnx"));
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            DocfieldConfig::from_file(&path),
            Err(DocfieldError::Config(_))
        ));
        assert!(matches!(
            DocfieldConfig::from_file(&dir.path().join("missing.json")),
            Err(DocfieldError::Io(_))
        ));
    }
}
