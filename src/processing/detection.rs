use crate::models::{BoundingBox, Detection};
use crate::utils::{ExtractionError, Result};
use image::DynamicImage;
use serde::Deserialize;
use std::path::Path;

/// Object detector producing class-labeled regions for one image. No
/// ordering or overlap guarantees are expected of implementations.
pub trait Detector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>>;
}

#[derive(Debug, Clone, Deserialize)]
struct DetectionRecord {
    class_id: u32,
    bbox: BoundingBox,
    #[serde(default)]
    confidence: f32,
    #[serde(default)]
    text: Option<Vec<String>>,
}

/// Detections exported by an external model as JSON:
/// `[{"class_id": 3, "bbox": [x1, y1, x2, y2], "confidence": 0.9, "text": ["..."]}]`.
/// The optional `text` lines carry an OCR read made alongside detection.
pub struct JsonDetector {
    records: Vec<DetectionRecord>,
}

impl JsonDetector {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ExtractionError::DetectionError(format!(
                "Failed to read detections from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let records: Vec<DetectionRecord> = serde_json::from_str(data)
            .map_err(|e| ExtractionError::DetectionError(format!("Invalid detections: {}", e)))?;
        Ok(JsonDetector { records })
    }
}

impl Detector for JsonDetector {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<Detection>> {
        Ok(self
            .records
            .iter()
            .map(|r| Detection {
                class_id: r.class_id,
                bbox: r.bbox,
                confidence: r.confidence,
                text: r.text.clone(),
            })
            .collect())
    }
}
