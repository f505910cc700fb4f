use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Image processing error: {0}")]
    ImageProcessingError(String),
    #[error("Detection error: {0}")]
    DetectionError(String),
    #[error("Recognition error: {0}")]
    RecognitionError(String),
    #[error("Synthesis error: {0}")]
    SynthesisError(String),
    #[error("Form driver error: {0}")]
    FormDriverError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Record error: {0}")]
    RecordError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExtractionError {
    /// Fatal errors end the run with no partial output. Everything else
    /// only disables the feature that hit it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExtractionError::ImageProcessingError(_)
                | ExtractionError::DetectionError(_)
                | ExtractionError::ConfigError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
