//! KEGG ID extraction from annotated records.
//!
//! Annotated files are tab-separated; the compound ID, when present, sits in
//! column index 6. Lines that are too short to have that column are skipped.

use tracing::debug;

/// Zero-based index of the field holding the KEGG compound ID.
pub const ID_FIELD_INDEX: usize = 6;

/// Prefix shared by every KEGG compound ID.
pub const ID_PREFIX: char = 'C';

/// Characters that end a record line. `\r\n` splits into `\r` and `\n` with an
/// empty piece between them, which `records` drops.
pub const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Non-empty record lines of `text`.
pub fn records(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_BREAKS).filter(|l| !l.is_empty())
}

/// Bounds-checked access to the ID field of a single record line.
///
/// Returns `None` when the line has fewer than `ID_FIELD_INDEX + 1` fields.
pub fn id_field(line: &str) -> Option<&str> {
    line.split('\t').nth(ID_FIELD_INDEX)
}

/// Extract every KEGG compound ID from `text`, in input order.
///
/// Duplicates are kept; deduplication happens during comparison.
pub fn extract_ids(text: &str) -> Vec<&str> {
    let mut ids = Vec::new();
    let mut scanned = 0usize;
    let mut short = 0usize;

    for line in records(text) {
        scanned += 1;
        match id_field(line) {
            Some(field) if field.starts_with(ID_PREFIX) => ids.push(field),
            Some(_) => {}
            None => short += 1,
        }
    }

    debug!(scanned, short, kept = ids.len(), "extracted compound ids");
    ids
}
