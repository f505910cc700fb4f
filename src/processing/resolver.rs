use crate::models::{FieldKey, FieldMap};
use crate::processing::{FieldVocabulary, UnlabeledFieldDetector};

/// Collapses per-detection candidate values into one value per field.
pub struct FieldResolver<'a> {
    vocabulary: &'a FieldVocabulary,
    unlabeled: UnlabeledFieldDetector,
}

impl<'a> FieldResolver<'a> {
    pub fn new(vocabulary: &'a FieldVocabulary) -> Self {
        FieldResolver {
            vocabulary,
            unlabeled: UnlabeledFieldDetector::new(),
        }
    }

    /// Picks the longest candidate longer than one character for each field,
    /// then merges keyword-discovered fields from `texts` over the result.
    pub fn resolve(&self, candidates: &[(FieldKey, String)], texts: &[String]) -> FieldMap {
        let mut groups: Vec<(FieldKey, Vec<&str>)> = Vec::new();
        for (key, value) in candidates {
            let key = self.vocabulary.canonicalize(key.name());
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, values)) => {
                    if !values.contains(&value.as_str()) {
                        values.push(value.as_str());
                    }
                }
                None => groups.push((key, vec![value.as_str()])),
            }
        }

        let mut fields = FieldMap::new();
        for (key, values) in groups {
            let mut best: Option<&str> = None;
            for value in values.into_iter().filter(|v| v.chars().count() > 1) {
                if best.map_or(true, |b| value.chars().count() > b.chars().count()) {
                    best = Some(value);
                }
            }
            match best {
                Some(value) => {
                    log::debug!("Resolved {} = {:?}", key, value);
                    fields.insert(key, value.to_string());
                }
                None => log::debug!("No usable candidate for {}", key),
            }
        }

        // keyword evidence overrides resolved values on key collision
        for text in texts {
            for (name, value) in self.unlabeled.detect(text) {
                log::debug!("Discovered {} = {:?}", name, value);
                fields.insert(self.vocabulary.canonicalize(&name), value);
            }
        }
        fields
    }
}
