use crate::config::Config;
use crate::models::{BoundingBox, CanonicalField, Detection, FieldKey, FieldMap, FieldRecord};
use crate::processing::{
    dedup_indices, Detector, FieldResolver, FieldTextCleaner, FieldVocabulary, ImageProcessor,
    Recognizer, Synthesizer,
};
use crate::utils::Result;
use image::DynamicImage;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum AudioOutcome {
    /// No audio-class detection produced any text
    NoText,
    /// Text was found but no synthesizer is configured
    Skipped(String),
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Nothing was resolved, so no record was written
    NotWritten,
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    /// `None` when the image has no field-class detection at all
    pub fields: Option<FieldMap>,
    /// Raw text read from every field-class detection, in detection order
    pub texts: Vec<String>,
    pub audio: AudioOutcome,
    pub record: RecordOutcome,
}

pub struct ExtractionPipeline<'a> {
    config: &'a Config,
    detector: &'a dyn Detector,
    recognizer: &'a dyn Recognizer,
    synthesizer: Option<&'a dyn Synthesizer>,
    vocabulary: FieldVocabulary,
    cleaner: FieldTextCleaner,
}

impl<'a> ExtractionPipeline<'a> {
    pub fn new(
        config: &'a Config,
        detector: &'a dyn Detector,
        recognizer: &'a dyn Recognizer,
        synthesizer: Option<&'a dyn Synthesizer>,
    ) -> Self {
        let vocabulary = FieldVocabulary::new();
        let cleaner = FieldTextCleaner::new(&vocabulary);
        ExtractionPipeline {
            config,
            detector,
            recognizer,
            synthesizer,
            vocabulary,
            cleaner,
        }
    }

    // Main entry point: decode the image, then run every stage on it
    pub fn run(&self, image_path: &Path) -> Result<ExtractionOutcome> {
        log::info!("Processing {}", image_path.display());
        let image = ImageProcessor::load(image_path)?;
        self.run_on_image(&image)
    }

    pub fn run_on_image(&self, image: &DynamicImage) -> Result<ExtractionOutcome> {
        let detections = self.detector.detect(image)?;
        log::info!("{} detections", detections.len());

        // Step 1: read the audio-class regions aloud
        let audio = self.speak(image, &detections)?;

        // Step 2: read and clean every field-class region
        let mut candidates: Vec<(FieldKey, String)> = Vec::new();
        let mut texts = Vec::new();
        let mut found_fields = false;
        for detection in &detections {
            let Some(field) = CanonicalField::from_class_id(detection.class_id) else {
                continue;
            };
            found_fields = true;
            let read = self.read_region(image, detection).join(" ");
            let read = read.trim().to_string();
            let cleaned = self.cleaner.clean(field, &read);
            log::debug!("{}: {:?} -> {:?}", field, read, cleaned);
            texts.push(read);
            if !cleaned.is_empty() {
                candidates.push((FieldKey::Known(field), cleaned));
            }
        }

        if !found_fields {
            log::info!("No field detections, skipping resolution");
            return Ok(ExtractionOutcome {
                fields: None,
                texts,
                audio,
                record: RecordOutcome::NotWritten,
            });
        }

        // Step 3: one value per field, plus keyword-discovered fields
        let fields = FieldResolver::new(&self.vocabulary).resolve(&candidates, &texts);
        log::info!("Resolved {} fields", fields.len());

        // Step 4: persist the record when anything was recognized
        let record = if fields.is_empty() {
            RecordOutcome::NotWritten
        } else {
            let path = self.config.output.record_path.clone();
            match FieldRecord::save(&fields, &path) {
                Ok(()) => RecordOutcome::Saved(path),
                Err(e) => {
                    log::warn!("Failed to write {}: {}", path.display(), e);
                    RecordOutcome::Failed(e.to_string())
                }
            }
        };

        Ok(ExtractionOutcome {
            fields: Some(fields),
            texts,
            audio,
            record,
        })
    }

    fn speak(&self, image: &DynamicImage, detections: &[Detection]) -> Result<AudioOutcome> {
        let detection_config = &self.config.detection;
        let spoken: Vec<&Detection> = detections
            .iter()
            .filter(|d| detection_config.audio_classes.contains(&d.class_id))
            .collect();
        if spoken.is_empty() {
            return Ok(AudioOutcome::NoText);
        }
        let boxes: Vec<BoundingBox> = spoken.iter().map(|d| d.bbox).collect();

        let mut lines = Vec::new();
        for i in dedup_indices(&boxes, detection_config.overlap_threshold) {
            for line in self.read_region(image, spoken[i]) {
                let line = line.trim();
                if !line.is_empty() {
                    lines.push(line.to_string());
                }
            }
        }
        if lines.is_empty() {
            return Ok(AudioOutcome::NoText);
        }
        let text = lines.join(" ");

        let Some(synthesizer) = self.synthesizer else {
            log::info!("No synthesizer configured, audio skipped");
            return Ok(AudioOutcome::Skipped(text));
        };
        match synthesizer.synthesize(&text, &self.config.output.audio_path) {
            Ok(path) => {
                log::info!("Saved audio as {}", path.display());
                Ok(AudioOutcome::Saved(path))
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::warn!("Speech synthesis failed: {}", e);
                Ok(AudioOutcome::Failed(e.to_string()))
            }
        }
    }

    // A failed read only costs its own region
    fn read_region(&self, image: &DynamicImage, detection: &Detection) -> Vec<String> {
        match self.recognizer.recognize(image, detection) {
            Ok(lines) => lines,
            Err(e) => {
                log::warn!("Recognition failed for {:?}: {}", detection.bbox, e);
                Vec::new()
            }
        }
    }
}
