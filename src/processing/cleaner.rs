use crate::models::CanonicalField;
use crate::processing::FieldVocabulary;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref DATE_CHARS: Regex = Regex::new(r"[^0-9./a-zA-Z -]").unwrap();
    static ref DATE_TOKEN: Regex = Regex::new(r"\b\d{1,2}[./-]\d{1,2}[./-]\d{2,4}\b").unwrap();
    static ref TEXT_CHARS: Regex = Regex::new(r"[^A-Za-z0-9\s/-]").unwrap();
}

/// Strips label text out of raw OCR reads and applies per-field cleanup.
pub struct FieldTextCleaner {
    labels: HashMap<CanonicalField, Vec<Regex>>,
}

impl FieldTextCleaner {
    pub fn new(vocabulary: &FieldVocabulary) -> Self {
        let mut labels = HashMap::new();
        for field in CanonicalField::ALL {
            let patterns = vocabulary
                .variants(field)
                .iter()
                .copied()
                .chain(std::iter::once(field.name()))
                .filter_map(label_pattern)
                .collect();
            labels.insert(field, patterns);
        }
        FieldTextCleaner { labels }
    }

    pub fn clean(&self, field: CanonicalField, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }
        let stripped = self.strip_labels(field, raw);

        if field.is_date() {
            let narrowed = DATE_CHARS.replace_all(&stripped, "");
            return DATE_TOKEN
                .find(&narrowed)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
        }

        let narrowed = TEXT_CHARS.replace_all(&stripped, "");
        // dropping punctuation can splice a label back together ("Sur.name")
        self.strip_labels(field, &narrowed)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn strip_labels(&self, field: CanonicalField, text: &str) -> String {
        let mut text = text.to_string();
        if let Some(patterns) = self.labels.get(&field) {
            for pattern in patterns {
                text = pattern.replace_all(&text, "").into_owned();
            }
        }
        text
    }
}

fn label_pattern(label: &str) -> Option<Regex> {
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(label))) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Skipping label pattern for {:?}: {}", label, e);
            None
        }
    }
}
