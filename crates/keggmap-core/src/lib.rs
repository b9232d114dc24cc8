//! Compound comparison core for keggmap.
//!
//! Takes two MassTRIX `.annotated` files, pulls the KEGG compound ID out of
//! each record, classifies every compound as shared or exclusive, and renders
//! the two-column `map.txt` consumed by KEGG Mapper.
//!
//! # Key Types
//!
//! - [`Comparison`] / [`MapEntry`] -- Ordered classification of the union of both files
//! - [`Classification`] / [`MapColor`] -- Shared/exclusive label and its map color
//! - [`ComparisonReport`] -- Counts plus serialized map text
//! - [`Upload`] / [`UploadComparison`] -- Intake of raw uploaded blobs

pub mod compare;
pub mod error;
pub mod extract;
pub mod intake;
pub mod map;

pub use compare::{compare, compare_ids, Classification, Comparison, ComparisonReport, MapEntry};
pub use error::{IntakeError, IntakeResult};
pub use extract::{extract_ids, id_field, records, ID_FIELD_INDEX, ID_PREFIX, LINE_BREAKS};
pub use intake::{
    compare_uploads, decode_latin1, decode_pair, SummaryLine, TextEncoding, Upload,
    UploadComparison,
};
pub use map::{MapColor, MAP_FILE_NAME, MAP_HEADER};
