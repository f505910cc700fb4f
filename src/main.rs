// Identity document field extraction with optional form autofill

use clap::{Args, Parser, Subcommand};
use idfill::{
    autofill::{AutofillMatcher, FillReport, FormFiller, JsonFormDriver, MatchKind},
    models::{FieldMap, FieldRecord},
    processing::{
        CommandSynthesizer, JsonDetector, PrecomputedRecognizer, Recognizer, Synthesizer,
    },
    AudioOutcome, Config, ExtractionPipeline, RecordOutcome,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "idfill", version, about = "Extract identity document fields and autofill forms")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve fields from an image and its detections
    Extract {
        #[arg(long)]
        image: PathBuf,
        /// Detector output as JSON
        #[arg(long)]
        detections: PathBuf,
        /// Where to write the field record
        #[arg(long)]
        record: Option<PathBuf>,
        /// Where to write the audio artifact
        #[arg(long)]
        audio: Option<PathBuf>,
        /// Run Tesseract on each region instead of the text in the detections file
        #[arg(long)]
        tesseract: bool,
        /// Print the final fields as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Fill a form from a previously written field record
    Fill {
        #[arg(long)]
        record: PathBuf,
        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(Args)]
struct FormArgs {
    /// Form description JSON
    #[arg(long)]
    form: Option<PathBuf>,
    /// Where to write the filled answers
    #[arg(long, default_value = "answers.json")]
    answers: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("❌ {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match cli.command {
        Command::Extract {
            image,
            detections,
            record,
            audio,
            tesseract,
            json,
            form,
        } => {
            if let Some(record) = record {
                config.output.record_path = record;
            }
            if let Some(audio) = audio {
                config.output.audio_path = audio;
            }
            extract(&config, &image, &detections, tesseract, json, &form)
        }
        Command::Fill { record, form } => match FieldRecord::load(&record) {
            Ok(fields) => {
                let Some(form_path) = &form.form else {
                    eprintln!("❌ --form is required to fill a form");
                    return ExitCode::FAILURE;
                };
                fill_form(&config, &fields, form_path, &form.answers);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("❌ {}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn extract(
    config: &Config,
    image: &Path,
    detections: &Path,
    tesseract: bool,
    json: bool,
    form: &FormArgs,
) -> ExitCode {
    let detector = match JsonDetector::from_file(detections) {
        Ok(detector) => detector,
        Err(err) => {
            eprintln!("❌ {}", err);
            return ExitCode::FAILURE;
        }
    };
    let recognizer = match build_recognizer(config, tesseract) {
        Ok(recognizer) => recognizer,
        Err(err) => {
            eprintln!("❌ {}", err);
            return ExitCode::FAILURE;
        }
    };
    let synthesizer = config
        .speech
        .program
        .as_deref()
        .map(|program| CommandSynthesizer::new(program, &config.speech.args));

    let pipeline = ExtractionPipeline::new(
        config,
        &detector,
        recognizer.as_ref(),
        synthesizer.as_ref().map(|s| s as &dyn Synthesizer),
    );
    let outcome = match pipeline.run(image) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("❌ {}", err);
            return ExitCode::FAILURE;
        }
    };

    match &outcome.audio {
        AudioOutcome::Saved(path) => println!("🔊 Saved audio as '{}'", path.display()),
        AudioOutcome::Failed(msg) => println!("❌ TTS error: {}", msg),
        AudioOutcome::Skipped(_) | AudioOutcome::NoText => {}
    }

    let Some(fields) = outcome.fields else {
        println!("No identity document fields detected.");
        return ExitCode::SUCCESS;
    };
    print_fields(&fields, json);
    match &outcome.record {
        RecordOutcome::Saved(path) => println!("✅ Saved to {}", path.display()),
        RecordOutcome::Failed(msg) => println!("❌ Record error: {}", msg),
        RecordOutcome::NotWritten => {}
    }

    if let Some(form_path) = &form.form {
        if fields.is_empty() {
            println!("Nothing to fill.");
        } else {
            fill_form(config, &FieldRecord::lowercased(&fields), form_path, &form.answers);
        }
    }
    ExitCode::SUCCESS
}

#[cfg(feature = "tesseract")]
fn build_recognizer(
    config: &Config,
    tesseract: bool,
) -> idfill::utils::Result<Box<dyn Recognizer>> {
    if tesseract {
        return Ok(Box::new(idfill::processing::TesseractRecognizer::new(
            config.ocr.datapath.clone(),
            &config.ocr.language,
        )));
    }
    Ok(Box::new(PrecomputedRecognizer::new()))
}

#[cfg(not(feature = "tesseract"))]
fn build_recognizer(
    _config: &Config,
    tesseract: bool,
) -> idfill::utils::Result<Box<dyn Recognizer>> {
    if tesseract {
        return Err(idfill::utils::ExtractionError::ConfigError(
            "built without the `tesseract` feature".to_string(),
        ));
    }
    Ok(Box::new(PrecomputedRecognizer::new()))
}

fn print_fields(fields: &FieldMap, json: bool) {
    if json {
        match serde_json::to_string_pretty(fields) {
            Ok(text) => println!("{}", text),
            Err(err) => eprintln!("❌ {}", err),
        }
        return;
    }
    println!("\n📋 Final extracted fields:");
    for (key, value) in fields.iter() {
        println!("{}: {}", key, value);
    }
}

fn fill_form(config: &Config, fields: &[(String, String)], form: &Path, answers: &Path) {
    let filler = FormFiller::new(
        AutofillMatcher::new(config.autofill.fuzzy_threshold),
        config.autofill.settle_delay(),
    );
    let mut driver = JsonFormDriver::new(answers);
    let form = form.to_string_lossy();
    match filler.fill(&mut driver, &form, fields) {
        Ok(report) => {
            print_report(&report);
            if let Err(err) = driver.finish() {
                println!("❌ Form fill error: {}", err);
            } else {
                println!("✅ Form filled. Please review and submit manually.");
            }
        }
        Err(err) => println!("❌ Form fill error: {}", err),
    }
}

fn print_report(report: &FillReport) {
    for filled in &report.filled {
        let how = match filled.kind {
            MatchKind::Alias => "",
            MatchKind::Fuzzy => " (Fuzzy)",
        };
        println!("📝 Filled{}: {} → {}", how, filled.field, filled.value);
    }
    if report.skipped > 0 {
        println!("{} questions left unfilled", report.skipped);
    }
}
