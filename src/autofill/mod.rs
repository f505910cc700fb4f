pub mod driver;
pub mod filler;
pub mod matcher;

pub use driver::{Answer, ControlId, FormDriver, FormQuestion, JsonFormDriver};
pub use filler::{FillReport, FilledQuestion, FormFiller};
pub use matcher::{AutofillMatcher, FieldMatch, MatchKind, DEFAULT_FUZZY_THRESHOLD};
