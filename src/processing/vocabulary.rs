use crate::models::{CanonicalField, FieldKey};
use std::collections::HashMap;

// Label spellings seen on documents, including recurring OCR misreads.
const FIELD_VARIANTS: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Country,
        &[
            "Country",
            "Code of State",
            "Code of Issuing State",
            "Codeof Issulng State",
            "ICode of State",
        ],
    ),
    (
        CanonicalField::IssuingOffice,
        &[
            "Issuing Office",
            "Issuing Authority",
            "Issuing office",
            "Iss. office",
            "Authority",
            "authoricy",
            "Iss office",
            "issuing authority",
        ],
    ),
    (
        CanonicalField::PassportNo,
        &["Passport No", "Document No", "IPassport No", "Passport Number"],
    ),
    (CanonicalField::PersonalNo, &["Personal No", "National ID"]),
    (
        CanonicalField::DateOfBirth,
        &["Date of Birth", "DOB", "Date ofbimn", "of birth", "ofbimn", "of pirth"],
    ),
    (CanonicalField::IssueDate, &["Issue Date", "Date of Issue", "dale"]),
    (CanonicalField::ExpiryDate, &["Expiry Date", "Date of Expiry", "of expiny"]),
    (
        CanonicalField::Name,
        &["Name", "Given Name", "Given", "nane", "Given name"],
    ),
    (CanonicalField::Surname, &["Surname", "Last Name", "Sumname"]),
    (CanonicalField::PlaceOfBirth, &["Place of Birth", "Place of binth"]),
    (CanonicalField::CardNo, &["Card No", "card no_"]),
];

/// Exact (non-fuzzy) mapping from label variants to canonical fields.
pub struct FieldVocabulary {
    index: HashMap<String, CanonicalField>,
}

impl Default for FieldVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldVocabulary {
    pub fn new() -> Self {
        let mut index = HashMap::new();
        for field in CanonicalField::ALL {
            index.insert(normalize(field.name()), field);
        }
        for (field, variants) in FIELD_VARIANTS {
            for variant in variants.iter() {
                index.insert(normalize(variant), *field);
            }
        }
        FieldVocabulary { index }
    }

    /// Declared variants for `field`, empty for fields without a table entry.
    pub fn variants(&self, field: CanonicalField) -> &'static [&'static str] {
        FIELD_VARIANTS
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| *v)
            .unwrap_or(&[])
    }

    pub fn lookup(&self, label: &str) -> Option<CanonicalField> {
        self.index.get(&normalize(label)).copied()
    }

    /// Canonical key for `label`, or the trimmed label itself (case kept)
    /// when nothing matches.
    pub fn canonicalize(&self, label: &str) -> FieldKey {
        match self.lookup(label) {
            Some(field) => FieldKey::Known(field),
            None => FieldKey::Discovered(label.trim().to_string()),
        }
    }
}

fn normalize(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_back_to_its_field() {
        let vocab = FieldVocabulary::new();
        for (field, variants) in FIELD_VARIANTS {
            for variant in variants.iter() {
                assert_eq!(vocab.lookup(variant), Some(*field), "{variant}");
                assert_eq!(vocab.lookup(&variant.to_uppercase()), Some(*field));
            }
        }
    }

    #[test]
    fn canonical_names_map_to_themselves() {
        let vocab = FieldVocabulary::new();
        for field in CanonicalField::ALL {
            assert_eq!(vocab.lookup(field.name()), Some(field));
        }
    }

    #[test]
    fn lookup_is_whitespace_normalized() {
        let vocab = FieldVocabulary::new();
        assert_eq!(
            vocab.lookup("  date   OF\tbirth "),
            Some(CanonicalField::DateOfBirth)
        );
        assert_eq!(vocab.lookup("sumname"), Some(CanonicalField::Surname));
    }

    #[test]
    fn unknown_label_is_returned_trimmed() {
        let vocab = FieldVocabulary::new();
        assert_eq!(
            vocab.canonicalize("  Blood Group "),
            FieldKey::Discovered("Blood Group".to_string())
        );
        assert_eq!(vocab.lookup("Surnam"), None);
    }

    #[test]
    fn variant_lists_do_not_conflict() {
        let mut seen: HashMap<String, CanonicalField> = HashMap::new();
        for (field, variants) in FIELD_VARIANTS {
            for variant in variants.iter() {
                if let Some(previous) = seen.insert(normalize(variant), *field) {
                    assert_eq!(previous, *field, "{variant} declared twice");
                }
            }
        }
    }
}
