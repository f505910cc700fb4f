use strsim::normalized_levenshtein;

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

// Human-facing phrasings of form questions, keyed by lowercased field name.
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("passport no", &["passport number", "document number", "passport num"]),
    ("date of birth", &["dob", "birthdate"]),
    ("issue date", &["issued on", "date of issue"]),
    ("expiry date", &["expires on", "expiration date"]),
    ("personal no", &["national id", "id number"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Alias,
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: String,
    pub value: String,
    pub kind: MatchKind,
}

/// Pairs form question labels with resolved fields: alias lookup first,
/// then fuzzy similarity against the field names.
#[derive(Debug, Clone)]
pub struct AutofillMatcher {
    fuzzy_threshold: f64,
}

impl Default for AutofillMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl AutofillMatcher {
    pub fn new(fuzzy_threshold: f64) -> Self {
        AutofillMatcher { fuzzy_threshold }
    }

    pub fn aliases(field: &str) -> &'static [&'static str] {
        FIELD_ALIASES
            .iter()
            .find(|(key, _)| *key == field)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }

    /// `fields` holds `(lowercased name, value)` pairs as parsed from the
    /// field record.
    pub fn match_question(
        &self,
        fields: &[(String, String)],
        question: &str,
    ) -> Option<FieldMatch> {
        let question = question.trim().to_lowercase();
        if question.is_empty() {
            return None;
        }
        self.alias_match(fields, &question)
            .or_else(|| self.fuzzy_match(fields, &question))
    }

    fn alias_match(&self, fields: &[(String, String)], question: &str) -> Option<FieldMatch> {
        for (key, value) in fields {
            let key = key.trim().to_lowercase();
            let hit = std::iter::once(key.as_str())
                .chain(Self::aliases(&key).iter().copied())
                .any(|variant| variant_matches(variant, question));
            if hit {
                return Some(FieldMatch {
                    field: key,
                    value: value.clone(),
                    kind: MatchKind::Alias,
                });
            }
        }
        None
    }

    fn fuzzy_match(&self, fields: &[(String, String)], question: &str) -> Option<FieldMatch> {
        let mut best: Option<(f64, &String, &String)> = None;
        for (key, value) in fields {
            let ratio = similarity(&key.to_lowercase(), question);
            if best.map_or(true, |(b, _, _)| ratio > b) {
                best = Some((ratio, key, value));
            }
        }
        let (ratio, key, value) = best?;
        if ratio > self.fuzzy_threshold {
            log::debug!("Fuzzy match {:?} ~ {:?} ({:.2})", question, key, ratio);
            Some(FieldMatch {
                field: key.to_lowercase(),
                value: value.clone(),
                kind: MatchKind::Fuzzy,
            })
        } else {
            None
        }
    }
}

fn variant_matches(variant: &str, question: &str) -> bool {
    variant == question
        || question.split_whitespace().any(|token| token == variant)
        || (variant.contains(' ') && question.contains(variant))
}

pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn alias_wins_before_fuzzy() {
        let matcher = AutofillMatcher::default();
        let data = fields(&[("passport no", "X123")]);
        let m = matcher.match_question(&data, "Document Number").unwrap();
        assert_eq!(m.value, "X123");
        assert_eq!(m.kind, MatchKind::Alias);
    }

    #[test]
    fn exact_key_and_whole_token() {
        let matcher = AutofillMatcher::default();
        let data = fields(&[("surname", "SMITH"), ("date of birth", "03/04/1990")]);
        assert_eq!(matcher.match_question(&data, "surname").unwrap().value, "SMITH");
        assert_eq!(
            matcher.match_question(&data, "your surname please").unwrap().value,
            "SMITH"
        );
        assert_eq!(matcher.match_question(&data, "DOB").unwrap().value, "03/04/1990");
    }

    #[test]
    fn multi_word_variant_matches_substring() {
        let matcher = AutofillMatcher::default();
        let data = fields(&[("expiry date", "01/01/2030")]);
        let m = matcher.match_question(&data, "what is the expiration date?").unwrap();
        assert_eq!(m.kind, MatchKind::Alias);
        assert_eq!(m.field, "expiry date");
    }

    #[test]
    fn single_word_variant_needs_whole_token() {
        let matcher = AutofillMatcher::new(0.99);
        let data = fields(&[("name", "JOHN")]);
        assert!(matcher.match_question(&data, "username").is_none());
    }

    #[test]
    fn first_field_wins() {
        let matcher = AutofillMatcher::default();
        let data = fields(&[("name", "JOHN"), ("surname", "SMITH")]);
        let m = matcher.match_question(&data, "surname name").unwrap();
        assert_eq!(m.value, "JOHN");
    }

    #[test]
    fn fuzzy_threshold_is_strict() {
        let matcher = AutofillMatcher::default();
        // one edit in five characters: exactly 0.8
        let data = fields(&[("abcde", "V1")]);
        assert!((similarity("abcde", "abcdx") - 0.8).abs() < 1e-9);
        assert!(matcher.match_question(&data, "abcdx").is_none());

        // one edit against eleven characters: ~0.91
        let data = fields(&[("nationalty", "IN")]);
        let m = matcher.match_question(&data, "nationality").unwrap();
        assert_eq!(m.kind, MatchKind::Fuzzy);
        assert_eq!(m.value, "IN");
    }

    #[test]
    fn fuzzy_picks_best_ratio() {
        let matcher = AutofillMatcher::new(0.5);
        let data = fields(&[("surnam", "A"), ("surname", "B")]);
        let m = matcher.match_question(&data, "surnamee").unwrap();
        assert_eq!(m.value, "B");
    }

    #[test]
    fn unmatched_question_is_left_unfilled() {
        let matcher = AutofillMatcher::default();
        let data = fields(&[("surname", "SMITH")]);
        assert!(matcher.match_question(&data, "favourite colour").is_none());
        assert!(matcher.match_question(&data, "   ").is_none());
        assert!(matcher.match_question(&[], "surname").is_none());
    }
}
