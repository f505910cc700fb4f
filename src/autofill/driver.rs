use crate::utils::{ExtractionError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlId(pub usize);

/// One question as presented by the form: its label and, when the question
/// takes free text, the input control to type into.
#[derive(Debug, Clone, PartialEq)]
pub struct FormQuestion {
    pub label: String,
    pub input: Option<ControlId>,
}

/// Form automation backend.
pub trait FormDriver {
    fn open(&mut self, form: &str) -> Result<Vec<FormQuestion>>;
    fn fill(&mut self, control: ControlId, text: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct FormDescription {
    questions: Vec<QuestionSpec>,
}

#[derive(Debug, Deserialize)]
struct QuestionSpec {
    label: String,
    #[serde(default = "default_input")]
    input: String,
}

fn default_input() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub question: String,
    pub value: String,
}

/// Offline driver over a JSON form description
/// (`{"questions": [{"label": "Surname", "input": "text"}]}`); filled answers
/// are written as JSON to `answers_path` by [`JsonFormDriver::finish`].
pub struct JsonFormDriver {
    answers_path: PathBuf,
    labels: Vec<String>,
    answers: Vec<Answer>,
}

impl JsonFormDriver {
    pub fn new<P: AsRef<Path>>(answers_path: P) -> Self {
        JsonFormDriver {
            answers_path: answers_path.as_ref().to_path_buf(),
            labels: Vec::new(),
            answers: Vec::new(),
        }
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn finish(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.answers)
            .map_err(|e| ExtractionError::FormDriverError(e.to_string()))?;
        std::fs::write(&self.answers_path, json)?;
        log::info!(
            "Wrote {} answers to {}",
            self.answers.len(),
            self.answers_path.display()
        );
        Ok(())
    }
}

impl FormDriver for JsonFormDriver {
    fn open(&mut self, form: &str) -> Result<Vec<FormQuestion>> {
        let data = std::fs::read_to_string(form).map_err(|e| {
            ExtractionError::FormDriverError(format!("Failed to open form {}: {}", form, e))
        })?;
        let description: FormDescription = serde_json::from_str(&data).map_err(|e| {
            ExtractionError::FormDriverError(format!("Invalid form {}: {}", form, e))
        })?;

        self.labels = description.questions.iter().map(|q| q.label.clone()).collect();
        self.answers.clear();
        Ok(description
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| FormQuestion {
                input: (q.input == "text").then_some(ControlId(i)),
                label: q.label,
            })
            .collect())
    }

    fn fill(&mut self, control: ControlId, text: &str) -> Result<()> {
        let label = self.labels.get(control.0).ok_or_else(|| {
            ExtractionError::FormDriverError(format!("No control {}", control.0))
        })?;
        self.answers.push(Answer {
            question: label.clone(),
            value: text.to_string(),
        });
        Ok(())
    }
}
