pub mod data;
pub mod record;

pub use data::{BoundingBox, CanonicalField, Detection, FieldKey, FieldMap};
pub use record::FieldRecord;
