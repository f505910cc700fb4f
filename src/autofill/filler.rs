use crate::autofill::{AutofillMatcher, FormDriver, MatchKind};
use crate::utils::Result;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct FilledQuestion {
    pub question: String,
    pub field: String,
    pub value: String,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    pub filled: Vec<FilledQuestion>,
    pub skipped: usize,
}

/// Drives one pass over a form, typing matched field values into each
/// question's text input.
pub struct FormFiller {
    matcher: AutofillMatcher,
    settle_delay: Duration,
}

impl FormFiller {
    pub fn new(matcher: AutofillMatcher, settle_delay: Duration) -> Self {
        FormFiller {
            matcher,
            settle_delay,
        }
    }

    /// Only a failure to open the form is returned as an error; questions
    /// that cannot be matched or filled are counted as skipped.
    pub fn fill<D: FormDriver>(
        &self,
        driver: &mut D,
        form: &str,
        fields: &[(String, String)],
    ) -> Result<FillReport> {
        let questions = driver.open(form)?;
        self.settle();

        let mut report = FillReport::default();
        for question in questions {
            let Some(control) = question.input else {
                log::debug!("No text input for {:?}, skipping", question.label);
                report.skipped += 1;
                continue;
            };
            let Some(found) = self.matcher.match_question(fields, &question.label) else {
                report.skipped += 1;
                continue;
            };
            match driver.fill(control, &found.value) {
                Ok(()) => {
                    log::info!("Filled: {} -> {} ({:?})", found.field, found.value, found.kind);
                    report.filled.push(FilledQuestion {
                        question: question.label,
                        field: found.field,
                        value: found.value,
                        kind: found.kind,
                    });
                }
                Err(e) => {
                    log::warn!("Could not fill {:?}: {}", question.label, e);
                    report.skipped += 1;
                }
            }
        }

        self.settle();
        Ok(report)
    }

    fn settle(&self) {
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }
    }
}
