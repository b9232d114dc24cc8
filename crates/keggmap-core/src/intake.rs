//! Intake of two uploaded annotation files.
//!
//! Front ends hand over raw bytes; this module checks that both files are
//! present, decodes them, runs the comparison, and packages the result with
//! enough context (file names, encoding) to build a summary.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compare::{compare, ComparisonReport};
use crate::error::{IntakeError, IntakeResult};
use crate::map::MapColor;

/// One uploaded file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Upload {
    /// Name supplied by the client, if any.
    pub filename: Option<String>,
    /// Raw file contents.
    pub data: Bytes,
}

impl Upload {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            filename: None,
            data: data.into(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// The file name, or `fallback` when the client sent none.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.filename.as_deref().unwrap_or(fallback)
    }
}

/// Encoding used to decode an upload pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "iso-8859-1")]
    Iso8859_1,
}

/// Decode ISO-8859-1 bytes; every byte maps to the code point of equal value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decode two blobs as UTF-8, falling back to ISO-8859-1 for both if either
/// is not valid UTF-8.
pub fn decode_pair(first: &[u8], second: &[u8]) -> (String, String, TextEncoding) {
    match (std::str::from_utf8(first), std::str::from_utf8(second)) {
        (Ok(a), Ok(b)) => (a.to_owned(), b.to_owned(), TextEncoding::Utf8),
        _ => {
            warn!("upload is not valid UTF-8, decoding both files as ISO-8859-1");
            (
                decode_latin1(first),
                decode_latin1(second),
                TextEncoding::Iso8859_1,
            )
        }
    }
}

/// One sentence of the comparison summary, with the color to show it in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub color: MapColor,
    pub count: usize,
    pub text: String,
}

/// Result of comparing two uploads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadComparison {
    #[serde(flatten)]
    pub report: ComparisonReport,
    pub file1: String,
    pub file2: String,
    pub encoding: TextEncoding,
}

impl UploadComparison {
    /// Summary sentences: common compounds, then file 1, then file 2.
    pub fn summary_lines(&self) -> Vec<SummaryLine> {
        vec![
            SummaryLine {
                color: MapColor::Yellow,
                count: self.report.n_common,
                text: format!(
                    "There are {} common KeGG IDs in both files",
                    self.report.n_common
                ),
            },
            SummaryLine {
                color: MapColor::Blue,
                count: self.report.n1,
                text: format!(
                    "There are {} exclusive KeGG IDs in file {}",
                    self.report.n1, self.file1
                ),
            },
            SummaryLine {
                color: MapColor::Red,
                count: self.report.n2,
                text: format!(
                    "There are {} exclusive KeGG IDs in file {}",
                    self.report.n2, self.file2
                ),
            },
        ]
    }
}

/// Compare two uploads.
///
/// Fails only when one or both uploads are missing.
pub fn compare_uploads(
    first: Option<&Upload>,
    second: Option<&Upload>,
) -> IntakeResult<UploadComparison> {
    let (first, second) = match (first, second) {
        (Some(a), Some(b)) => (a, b),
        (None, None) => return Err(IntakeError::NoFiles),
        (None, Some(_)) => return Err(IntakeError::MissingFirst),
        (Some(_), None) => return Err(IntakeError::MissingSecond),
    };

    let (text1, text2, encoding) = decode_pair(&first.data, &second.data);
    debug!(
        bytes1 = first.data.len(),
        bytes2 = second.data.len(),
        ?encoding,
        "decoded uploads"
    );

    Ok(UploadComparison {
        report: compare(&text1, &text2),
        file1: first.display_name("file 1").to_owned(),
        file2: second.display_name("file 2").to_owned(),
        encoding,
    })
}
