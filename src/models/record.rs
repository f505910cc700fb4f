use crate::models::FieldMap;
use crate::utils::{ExtractionError, Result};
use std::fs;
use std::path::Path;

/// Line-oriented `FieldName: Value` record written after a successful
/// resolution and read back by the autofill stage.
pub struct FieldRecord;

impl FieldRecord {
    pub fn render(fields: &FieldMap) -> String {
        let mut out = String::new();
        for (key, value) in fields.iter() {
            out.push_str(key.name());
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    pub fn save<P: AsRef<Path>>(fields: &FieldMap, path: P) -> Result<()> {
        if fields.is_empty() {
            return Err(ExtractionError::RecordError(
                "Refusing to write a record with no fields".to_string(),
            ));
        }
        fs::write(path.as_ref(), Self::render(fields))?;
        log::info!("Saved {} fields to {}", fields.len(), path.as_ref().display());
        Ok(())
    }

    /// Parses record text into `(lowercased key, value)` pairs, splitting
    /// each line at its first `:`. Lines without a separator are ignored.
    pub fn parse(text: &str) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = Vec::new();
        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim().to_string();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        entries
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<(String, String)>> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| {
            ExtractionError::RecordError(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Self::parse(&text))
    }

    /// Lowercased-key view of an in-memory map, equivalent to rendering and
    /// parsing it again.
    pub fn lowercased(fields: &FieldMap) -> Vec<(String, String)> {
        Self::parse(&Self::render(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CanonicalField, FieldKey};

    fn sample() -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(CanonicalField::Surname.into(), "SMITH".into());
        map.insert(CanonicalField::DateOfBirth.into(), "03/04/1990".into());
        map.insert(FieldKey::Discovered("Address".into()), "12 Main St: Apt 4".into());
        map
    }

    #[test]
    fn renders_one_line_per_field() {
        assert_eq!(
            FieldRecord::render(&sample()),
            "Surname: SMITH\nDate of Birth: 03/04/1990\nAddress: 12 Main St: Apt 4\n"
        );
    }

    #[test]
    fn parse_lowercases_keys_and_keeps_colons_in_values() {
        let parsed = FieldRecord::lowercased(&sample());
        assert_eq!(
            parsed,
            vec![
                ("surname".to_string(), "SMITH".to_string()),
                ("date of birth".to_string(), "03/04/1990".to_string()),
                ("address".to_string(), "12 Main St: Apt 4".to_string()),
            ]
        );
    }

    #[test]
    fn parse_skips_lines_without_separator() {
        let parsed = FieldRecord::parse("garbage\n  Passport No :  X123  \n\n");
        assert_eq!(parsed, vec![("passport no".to_string(), "X123".to_string())]);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        FieldRecord::save(&sample(), &path).unwrap();
        let loaded = FieldRecord::load(&path).unwrap();
        assert_eq!(loaded, FieldRecord::lowercased(&sample()));
    }

    #[test]
    fn empty_map_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        assert!(FieldRecord::save(&FieldMap::new(), &path).is_err());
        assert!(!path.exists());
    }
}
