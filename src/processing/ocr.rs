use crate::models::Detection;
use crate::utils::Result;
use image::DynamicImage;

/// Text recognizer for the region of one detection. An empty result is a
/// normal outcome; callers treat errors as empty reads.
pub trait Recognizer {
    fn recognize(&self, image: &DynamicImage, detection: &Detection) -> Result<Vec<String>>;
}

/// Returns the lines an upstream OCR pass attached to each detection.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrecomputedRecognizer;

impl PrecomputedRecognizer {
    pub fn new() -> Self {
        PrecomputedRecognizer
    }
}

impl Recognizer for PrecomputedRecognizer {
    fn recognize(&self, _image: &DynamicImage, detection: &Detection) -> Result<Vec<String>> {
        Ok(detection.text.clone().unwrap_or_default())
    }
}

#[cfg(feature = "tesseract")]
pub use self::tess::TesseractRecognizer;

#[cfg(feature = "tesseract")]
mod tess {
    use super::Recognizer;
    use crate::models::Detection;
    use crate::processing::ImageProcessor;
    use crate::utils::{ExtractionError, Result};
    use image::DynamicImage;
    use tesseract::Tesseract;

    /// Runs Tesseract on each cropped region.
    pub struct TesseractRecognizer {
        datapath: Option<String>,
        language: String,
    }

    impl TesseractRecognizer {
        pub fn new(datapath: Option<String>, language: &str) -> Self {
            TesseractRecognizer {
                datapath,
                language: language.to_string(),
            }
        }
    }

    impl Recognizer for TesseractRecognizer {
        fn recognize(&self, image: &DynamicImage, detection: &Detection) -> Result<Vec<String>> {
            let Some(crop) = ImageProcessor::crop(image, &detection.bbox) else {
                return Ok(Vec::new());
            };
            let temp_path = ImageProcessor::save_to_temp_file(&crop)
                .map_err(|e| ExtractionError::RecognitionError(e.to_string()))?;
            let path_str = temp_path.to_str().ok_or_else(|| {
                ExtractionError::RecognitionError("Failed to convert path to string".to_string())
            })?;

            let text = Tesseract::new(self.datapath.as_deref(), Some(self.language.as_str()))
                .map_err(|e| {
                    ExtractionError::RecognitionError(format!("Tesseract init error: {}", e))
                })?
                .set_image(path_str)
                .map_err(|e| {
                    ExtractionError::RecognitionError(format!("Tesseract set image error: {}", e))
                })?
                .get_text()
                .map_err(|e| ExtractionError::RecognitionError(format!("Tesseract error: {}", e)))?;

            Ok(text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect())
        }
    }
}
