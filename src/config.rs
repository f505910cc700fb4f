//! Pipeline configuration
//!
//! Settings loaded from TOML; every section and key has a default so an
//! empty file is a valid configuration.

use crate::autofill::DEFAULT_FUZZY_THRESHOLD;
use crate::processing::DEFAULT_OVERLAP_THRESHOLD;
use crate::utils::{ExtractionError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub detection: DetectionConfig,
    pub ocr: OcrConfig,
    pub speech: SpeechConfig,
    pub output: OutputConfig,
    pub autofill: AutofillConfig,
}

/// Detector class handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Classes whose text is read aloud
    pub audio_classes: Vec<u32>,
    /// Overlap ratio at which an audio box counts as a duplicate
    pub overlap_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            audio_classes: vec![0, 1, 2],
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub language: String,
    /// Tesseract data directory, system default when unset
    pub datapath: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            datapath: None,
        }
    }
}

/// External text-to-speech program. Audio is skipped when `program` is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub program: Option<String>,
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: vec!["-w".into(), "{output}".into(), "{text}".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub record_path: PathBuf,
    pub audio_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            record_path: PathBuf::from("data.txt"),
            audio_path: PathBuf::from("audio.wav"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillConfig {
    /// Minimum similarity (exclusive) for the fuzzy fallback
    pub fuzzy_threshold: f64,
    /// Wait after opening the form and after the fill loop
    pub settle_delay_secs: u64,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            settle_delay_secs: 5,
        }
    }
}

impl AutofillConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractionError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ExtractionError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_ratio("detection.overlap_threshold", self.detection.overlap_threshold)?;
        check_ratio("autofill.fuzzy_threshold", self.autofill.fuzzy_threshold)?;
        if self.ocr.language.trim().is_empty() {
            return Err(ExtractionError::ConfigError(
                "ocr.language must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_ratio(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ExtractionError::ConfigError(format!(
            "{} must be in (0, 1], got {}",
            name, value
        )))
    }
}
