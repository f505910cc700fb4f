pub mod cleaner;
pub mod detection;
pub mod geometry;
pub mod image;
pub mod ocr;
pub mod resolver;
pub mod speech;
pub mod unlabeled;
pub mod vocabulary;

pub use cleaner::FieldTextCleaner;
pub use detection::{Detector, JsonDetector};
pub use geometry::{dedup_boxes, dedup_indices, DEFAULT_OVERLAP_THRESHOLD};
pub use self::image::ImageProcessor;
pub use ocr::{PrecomputedRecognizer, Recognizer};
#[cfg(feature = "tesseract")]
pub use ocr::TesseractRecognizer;
pub use resolver::FieldResolver;
pub use speech::{CommandSynthesizer, Synthesizer};
pub use unlabeled::UnlabeledFieldDetector;
pub use vocabulary::FieldVocabulary;
