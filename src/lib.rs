pub mod autofill;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod processing;
pub mod utils;

pub use config::Config;
pub use pipeline::{AudioOutcome, ExtractionOutcome, ExtractionPipeline, RecordOutcome};
