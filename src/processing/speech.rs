use crate::utils::{ExtractionError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Text-to-speech backend writing an audio artifact.
pub trait Synthesizer {
    fn synthesize(&self, text: &str, output: &Path) -> Result<PathBuf>;
}

/// Shells out to a TTS program. `{text}` and `{output}` in `args` are
/// replaced with the utterance and the artifact path.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(program: &str, args: &[String]) -> Self {
        CommandSynthesizer {
            program: program.to_string(),
            args: args.to_vec(),
        }
    }

    fn expand_args(&self, text: &str, output: &Path) -> Vec<String> {
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace("{output}", &output).replace("{text}", text))
            .collect()
    }
}

impl Synthesizer for CommandSynthesizer {
    fn synthesize(&self, text: &str, output: &Path) -> Result<PathBuf> {
        let args = self.expand_args(text, output);
        log::debug!("Running {} {:?}", self.program, args);

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| {
                ExtractionError::SynthesisError(format!("Failed to start {}: {}", self.program, e))
            })?;
        if !status.success() {
            return Err(ExtractionError::SynthesisError(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        if !output.exists() {
            return Err(ExtractionError::SynthesisError(format!(
                "{} produced no file at {}",
                self.program,
                output.display()
            )));
        }
        Ok(output.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_expanded() {
        let synth = CommandSynthesizer::new(
            "espeak-ng",
            &["-w".to_string(), "{output}".to_string(), "{text}".to_string()],
        );
        let args = synth.expand_args("hello there", Path::new("/tmp/a.wav"));
        assert_eq!(args, vec!["-w", "/tmp/a.wav", "hello there"]);
    }

    #[test]
    fn missing_program_is_a_synthesis_error() {
        let synth = CommandSynthesizer::new("idfill-no-such-tts-binary", &[]);
        let err = synth
            .synthesize("hi", Path::new("/tmp/idfill-none.wav"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::SynthesisError(_)));
        assert!(!err.is_fatal());
    }
}
