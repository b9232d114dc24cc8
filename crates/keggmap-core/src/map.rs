//! `map.txt` rendering for KEGG Mapper.
//!
//! The format is a fixed two-column, tab-separated contract: a `KEGG_ID\tcolor`
//! header followed by one `<id>\t<color>` row per compound, joined with `\n`
//! and without a trailing newline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compare::MapEntry;

/// Header row of every map file.
pub const MAP_HEADER: &str = "KEGG_ID\tcolor";

/// Conventional name of the map artifact.
pub const MAP_FILE_NAME: &str = "map.txt";

/// Colors understood by KEGG Mapper that keggmap assigns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapColor {
    /// Present in both files.
    Yellow,
    /// Present only in the first file.
    Blue,
    /// Present only in the second file.
    Red,
}

impl MapColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for MapColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render entries as map text, header first.
pub fn render_map<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a MapEntry>,
{
    let mut text = String::from(MAP_HEADER);
    for entry in entries {
        text.push('\n');
        text.push_str(&entry.id);
        text.push('\t');
        text.push_str(entry.classification.color().as_str());
    }
    text
}
