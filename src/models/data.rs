use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::fmt;

/// Axis-aligned pixel rectangle as reported by the detector, `x1 < x2` and
/// `y1 < y2` for well-formed boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[i32; 4]")]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl From<[i32; 4]> for BoundingBox {
    fn from(c: [i32; 4]) -> Self {
        BoundingBox::new(c[0], c[1], c[2], c[3])
    }
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        BoundingBox { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i64 {
        (self.x2 as i64 - self.x1 as i64).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.y2 as i64 - self.y1 as i64).max(0)
    }

    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    pub fn intersection_area(&self, other: &BoundingBox) -> i64 {
        let x_a = self.x1.max(other.x1) as i64;
        let y_a = self.y1.max(other.y1) as i64;
        let x_b = self.x2.min(other.x2) as i64;
        let y_b = self.y2.min(other.y2) as i64;
        (x_b - x_a).max(0) * (y_b - y_a).max(0)
    }

    /// Intersection over union; 0 when the union is empty.
    pub fn overlap_ratio(&self, other: &BoundingBox) -> f64 {
        let inter = self.intersection_area(other);
        let union = self.area() + other.area() - inter;
        if union <= 0 {
            0.0
        } else {
            inter as f64 / union as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class_id: u32,
    pub bbox: BoundingBox,
    pub confidence: f32,
    /// Lines read by an upstream OCR pass for this detection, if any.
    pub text: Option<Vec<String>>,
}

/// Closed set of document attributes the detector has a class for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    Surname,
    Name,
    Nationality,
    Sex,
    DateOfBirth,
    PlaceOfBirth,
    IssueDate,
    ExpiryDate,
    IssuingOffice,
    Height,
    DocumentType,
    Country,
    PassportNo,
    PersonalNo,
    CardNo,
}

impl CanonicalField {
    /// Detector class order, starting at class id 3.
    pub const ALL: [CanonicalField; 15] = [
        CanonicalField::Surname,
        CanonicalField::Name,
        CanonicalField::Nationality,
        CanonicalField::Sex,
        CanonicalField::DateOfBirth,
        CanonicalField::PlaceOfBirth,
        CanonicalField::IssueDate,
        CanonicalField::ExpiryDate,
        CanonicalField::IssuingOffice,
        CanonicalField::Height,
        CanonicalField::DocumentType,
        CanonicalField::Country,
        CanonicalField::PassportNo,
        CanonicalField::PersonalNo,
        CanonicalField::CardNo,
    ];

    const FIRST_CLASS_ID: u32 = 3;

    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::Surname => "Surname",
            CanonicalField::Name => "Name",
            CanonicalField::Nationality => "Nationality",
            CanonicalField::Sex => "Sex",
            CanonicalField::DateOfBirth => "Date of Birth",
            CanonicalField::PlaceOfBirth => "Place of Birth",
            CanonicalField::IssueDate => "Issue Date",
            CanonicalField::ExpiryDate => "Expiry Date",
            CanonicalField::IssuingOffice => "Issuing Office",
            CanonicalField::Height => "Height",
            CanonicalField::DocumentType => "Type",
            CanonicalField::Country => "Country",
            CanonicalField::PassportNo => "Passport No",
            CanonicalField::PersonalNo => "Personal No",
            CanonicalField::CardNo => "Card No",
        }
    }

    pub fn from_class_id(class_id: u32) -> Option<CanonicalField> {
        let idx = class_id.checked_sub(Self::FIRST_CLASS_ID)? as usize;
        Self::ALL.get(idx).copied()
    }

    pub fn from_name(name: &str) -> Option<CanonicalField> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub fn is_date(&self) -> bool {
        self.name().contains("Date")
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of the final field map: either one of the canonical fields or a
/// name found by keyword scanning of free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Known(CanonicalField),
    Discovered(String),
}

impl FieldKey {
    pub fn name(&self) -> &str {
        match self {
            FieldKey::Known(field) => field.name(),
            FieldKey::Discovered(name) => name,
        }
    }
}

impl From<CanonicalField> for FieldKey {
    fn from(field: CanonicalField) -> Self {
        FieldKey::Known(field)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Insertion-ordered map holding one resolved value per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(FieldKey, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        FieldMap::default()
    }

    /// Replaces the value of an existing key in place, otherwise appends.
    pub fn insert(&mut self, key: FieldKey, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &FieldKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_known(&self, field: CanonicalField) -> Option<&str> {
        self.get(&FieldKey::Known(field))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_ratio_of_nested_boxes() {
        let outer = BoundingBox::new(0, 0, 10, 10);
        let inner = BoundingBox::new(0, 0, 5, 10);
        assert!((outer.overlap_ratio(&inner) - 0.5).abs() < 1e-9);
        assert_eq!(outer.overlap_ratio(&BoundingBox::new(20, 20, 30, 30)), 0.0);
    }

    #[test]
    fn zero_area_boxes_have_zero_overlap() {
        let flat = BoundingBox::new(5, 5, 5, 5);
        assert_eq!(flat.area(), 0);
        assert_eq!(flat.overlap_ratio(&flat), 0.0);
    }

    #[test]
    fn class_ids_map_onto_canonical_fields() {
        assert_eq!(CanonicalField::from_class_id(2), None);
        assert_eq!(CanonicalField::from_class_id(3), Some(CanonicalField::Surname));
        assert_eq!(CanonicalField::from_class_id(15), Some(CanonicalField::PassportNo));
        assert_eq!(CanonicalField::from_class_id(17), Some(CanonicalField::CardNo));
        assert_eq!(CanonicalField::from_class_id(18), None);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(
            CanonicalField::from_name(" passport NO "),
            Some(CanonicalField::PassportNo)
        );
        assert_eq!(CanonicalField::from_name("Type"), Some(CanonicalField::DocumentType));
        assert_eq!(CanonicalField::from_name("Phone No"), None);
    }

    #[test]
    fn date_fields() {
        let dates: Vec<_> = CanonicalField::ALL.iter().filter(|f| f.is_date()).collect();
        assert_eq!(
            dates,
            vec![
                &CanonicalField::DateOfBirth,
                &CanonicalField::IssueDate,
                &CanonicalField::ExpiryDate
            ]
        );
    }

    #[test]
    fn field_map_replaces_in_place() {
        let mut map = FieldMap::new();
        map.insert(CanonicalField::Surname.into(), "SMITH".into());
        map.insert(FieldKey::Discovered("Email".into()), "a@b.c".into());
        map.insert(CanonicalField::Surname.into(), "JONES".into());
        let keys: Vec<_> = map.iter().map(|(k, v)| (k.name(), v)).collect();
        assert_eq!(keys, vec![("Surname", "JONES"), ("Email", "a@b.c")]);
    }

    #[test]
    fn field_map_serializes_as_object() {
        let mut map = FieldMap::new();
        map.insert(CanonicalField::PassportNo.into(), "X123".into());
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Passport No":"X123"}"#);
    }
}
