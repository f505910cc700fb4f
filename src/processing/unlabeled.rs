// Keyword markers for document content the detector has no class for.
const FIELD_MARKERS: &[(&str, &[&str])] = &[
    ("Phone No", &["phone", "mobile", "tel"]),
    ("Driving License", &["driving", "license"]),
    ("Aadhar", &["aadhar", "uid"]),
    ("Email", &["email", "@"]),
    ("Address", &["address", "location", "street"]),
];

/// Finds fields outside the canonical set by keyword scanning free text.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlabeledFieldDetector;

impl UnlabeledFieldDetector {
    pub fn new() -> Self {
        UnlabeledFieldDetector
    }

    /// Every marker category with a hit in `text`, in table order. The value
    /// is the trimmed part after the last `:`, or the whole text untouched.
    pub fn detect(&self, text: &str) -> Vec<(String, String)> {
        let lowered = text.to_lowercase();
        FIELD_MARKERS
            .iter()
            .filter(|(_, markers)| markers.iter().any(|m| lowered.contains(m)))
            .map(|(name, _)| (name.to_string(), extract_value(text)))
            .collect()
    }
}

fn extract_value(text: &str) -> String {
    match text.rsplit_once(':') {
        Some((_, tail)) => tail.trim().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(v: &[(&str, &str)]) -> Vec<(String, String)> {
        v.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
    }

    #[test]
    fn phone_after_separator() {
        let d = UnlabeledFieldDetector::new();
        assert_eq!(
            d.detect("Contact phone: 555-1234"),
            pairs(&[("Phone No", "555-1234")])
        );
    }

    #[test]
    fn takes_segment_after_last_colon() {
        let d = UnlabeledFieldDetector::new();
        assert_eq!(
            d.detect("Street: 12: Baker St "),
            pairs(&[("Address", "Baker St")])
        );
    }

    #[test]
    fn without_separator_uses_text_as_is() {
        let d = UnlabeledFieldDetector::new();
        assert_eq!(
            d.detect(" jane@example.com "),
            pairs(&[("Email", " jane@example.com ")])
        );
    }

    #[test]
    fn several_categories_match_one_text() {
        let d = UnlabeledFieldDetector::new();
        assert_eq!(
            d.detect("Driving License / Email: DL-998"),
            pairs(&[("Driving License", "DL-998"), ("Email", "DL-998")])
        );
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let d = UnlabeledFieldDetector::new();
        assert_eq!(d.detect("UID 1234 5678").len(), 1);
        assert_eq!(d.detect("MOBILE 98765")[0].0, "Phone No");
    }

    #[test]
    fn no_marker_no_entry() {
        let d = UnlabeledFieldDetector::new();
        assert!(d.detect("SMITH").is_empty());
        assert!(d.detect("").is_empty());
    }
}
