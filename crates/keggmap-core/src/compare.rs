//! Set comparison of the compound IDs found in two annotated files.
//!
//! Every compound in the union of both files receives exactly one
//! [`Classification`]. The output order is the first appearance across file 1
//! followed by file 2, so a compound present in both keeps its file 1 position.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::extract_ids;
use crate::map::{render_map, MapColor};

/// Membership of a compound across the two files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Present in both files.
    #[serde(rename = "common")]
    Common,
    /// Present only in the first file.
    #[serde(rename = "only1")]
    OnlyFirst,
    /// Present only in the second file.
    #[serde(rename = "only2")]
    OnlySecond,
}

impl Classification {
    /// The map color KEGG Mapper should paint this compound with.
    pub fn color(self) -> MapColor {
        match self {
            Self::Common => MapColor::Yellow,
            Self::OnlyFirst => MapColor::Blue,
            Self::OnlySecond => MapColor::Red,
        }
    }
}

/// One row of the map: a compound and its classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub id: String,
    pub classification: Classification,
}

impl MapEntry {
    pub fn new(id: impl Into<String>, classification: Classification) -> Self {
        Self {
            id: id.into(),
            classification,
        }
    }
}

/// The classified union of two compound ID sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comparison {
    entries: Vec<MapEntry>,
    only_first: usize,
    only_second: usize,
    common: usize,
}

impl Comparison {
    /// Create an empty comparison.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in output order.
    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Returns `true` if neither file contributed a compound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the union of both files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of compounds found only in the first file.
    pub fn only_first(&self) -> usize {
        self.only_first
    }

    /// Number of compounds found only in the second file.
    pub fn only_second(&self) -> usize {
        self.only_second
    }

    /// Number of compounds found in both files.
    pub fn common(&self) -> usize {
        self.common
    }

    /// Entries carrying the given classification, in output order.
    pub fn with_classification(
        &self,
        classification: Classification,
    ) -> impl Iterator<Item = &MapEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.classification == classification)
    }

    /// Render as `map.txt` text.
    pub fn to_map_text(&self) -> String {
        render_map(&self.entries)
    }

    /// Counts plus rendered map.
    pub fn report(&self) -> ComparisonReport {
        ComparisonReport {
            n1: self.only_first,
            n2: self.only_second,
            n_common: self.common,
            map: self.to_map_text(),
        }
    }
}

/// Counts and map text for one comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Compounds only in the first file.
    pub n1: usize,
    /// Compounds only in the second file.
    pub n2: usize,
    /// Compounds in both files.
    pub n_common: usize,
    /// Serialized `map.txt` contents.
    pub map: String,
}

/// Classify two compound ID sequences.
///
/// Duplicates within a sequence count once. The result lists the union in
/// first-appearance order across `first` then `second`.
pub fn compare_ids<S: AsRef<str>>(first: &[S], second: &[S]) -> Comparison {
    let set1: HashSet<&str> = first.iter().map(S::as_ref).collect();
    let set2: HashSet<&str> = second.iter().map(S::as_ref).collect();

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(set1.len() + set2.len());
    let mut comparison = Comparison::new();

    for id in first.iter().chain(second).map(S::as_ref) {
        if !seen.insert(id) {
            continue;
        }
        let classification = match (set1.contains(id), set2.contains(id)) {
            (true, true) => {
                comparison.common += 1;
                Classification::Common
            }
            (true, false) => {
                comparison.only_first += 1;
                Classification::OnlyFirst
            }
            _ => {
                comparison.only_second += 1;
                Classification::OnlySecond
            }
        };
        entries.push(MapEntry::new(id, classification));
    }

    comparison.entries = entries;
    debug!(
        only_first = comparison.only_first,
        only_second = comparison.only_second,
        common = comparison.common,
        "compared compound sets"
    );
    comparison
}

/// Compare two decoded annotated files and produce the report.
///
/// Total over its input: empty or malformed text yields zero counts and a
/// header-only map.
pub fn compare(first: &str, second: &str) -> ComparisonReport {
    let ids1 = extract_ids(first);
    let ids2 = extract_ids(second);
    compare_ids(&ids1, &ids2).report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MAP_HEADER;
    use proptest::prelude::*;

    fn annotated(ids: &[&str]) -> String {
        ids.iter()
            .map(|id| format!("a\tb\tc\td\te\tf\t{id}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shared_and_exclusive_compounds() {
        let report = compare(&annotated(&["C001", "C002"]), &annotated(&["C002", "C003"]));
        assert_eq!(report.n1, 1);
        assert_eq!(report.n2, 1);
        assert_eq!(report.n_common, 1);
        assert_eq!(report.map, "KEGG_ID\tcolor\nC001\tblue\nC002\tyellow\nC003\tred");
    }

    #[test]
    fn both_inputs_empty() {
        let report = compare("", "");
        assert_eq!(report, ComparisonReport {
            n1: 0,
            n2: 0,
            n_common: 0,
            map: MAP_HEADER.to_string(),
        });
    }

    #[test]
    fn short_line_is_ignored() {
        let first = format!("x\ty\tz\n{}", annotated(&["C001"]));
        let report = compare(&first, "a\tb\tc");
        assert_eq!(report.n1, 1);
        assert_eq!(report.n2, 0);
        assert_eq!(report.map, "KEGG_ID\tcolor\nC001\tblue");
    }

    #[test]
    fn non_c_identifier_is_excluded() {
        let report = compare(&annotated(&["D999"]), &annotated(&["D999", "C010"]));
        assert_eq!(report.n1, 0);
        assert_eq!(report.n2, 1);
        assert_eq!(report.n_common, 0);
        assert!(!report.map.contains("D999"));
    }

    #[test]
    fn repeated_identifier_counted_once() {
        let report = compare(&annotated(&["C500", "C500"]), "");
        assert_eq!(report.n1, 1);
        assert_eq!(report.map, "KEGG_ID\tcolor\nC500\tblue");
    }

    #[test]
    fn common_compound_keeps_first_file_position() {
        let c = compare_ids(&["C003", "C001"], &["C002", "C001"]);
        let ids: Vec<_> = c.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["C003", "C001", "C002"]);
        assert_eq!(c.entries()[1].classification, Classification::Common);
    }

    #[test]
    fn only_second_duplicates_collapse() {
        let c = compare_ids(&[], &["C7", "C8", "C7"]);
        assert_eq!(c.only_second(), 2);
        assert_eq!(c.len(), 2);
        assert!(c.with_classification(Classification::OnlySecond).all(|e| e.id != "C1"));
    }

    #[test]
    fn classification_colors() {
        assert_eq!(Classification::Common.color(), MapColor::Yellow);
        assert_eq!(Classification::OnlyFirst.color(), MapColor::Blue);
        assert_eq!(Classification::OnlySecond.color(), MapColor::Red);
    }

    #[test]
    fn report_serializes_with_short_keys() {
        let report = compare(&annotated(&["C001"]), &annotated(&["C001"]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["n1"], 0);
        assert_eq!(json["n2"], 0);
        assert_eq!(json["n_common"], 1);
        assert_eq!(json["map"], "KEGG_ID\tcolor\nC001\tyellow");
    }

    #[test]
    fn bare_cr_records_are_separate_compounds() {
        let report = compare("a\tb\tc\td\te\tf\tC001\ra\tb\tc\td\te\tf\tC002", "");
        assert_eq!(report.n1, 2);
        assert_eq!(report.map, "KEGG_ID\tcolor\nC001\tblue\nC002\tblue");
    }

    #[test]
    fn trailing_cr_does_not_split_a_shared_compound() {
        let report = compare("a\tb\tc\td\te\tf\tC001\r", "a\tb\tc\td\te\tf\tC001");
        assert_eq!(report.n1, 0);
        assert_eq!(report.n2, 0);
        assert_eq!(report.n_common, 1);
        assert_eq!(report.map, "KEGG_ID\tcolor\nC001\tyellow");
    }

    fn id_seq() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("C[0-9]{1,3}", 0..40)
    }

    /// One record line and the compound ID it should contribute, if any.
    fn annotated_line() -> impl Strategy<Value = (String, Option<String>)> {
        let extra_columns = prop::collection::vec("[a-z0-9.]{0,4}", 0..3);
        prop_oneof![
            ("C[0-9]{1,3}", extra_columns.clone()).prop_map(|(id, extra)| {
                let mut line = format!("100.1\tM+H\t1\t2\t3\t4\t{id}");
                for column in extra {
                    line.push('\t');
                    line.push_str(&column);
                }
                (line, Some(id))
            }),
            (prop_oneof![Just(String::new()), "D[0-9]{1,3}", "[a-z]{1,3}"], extra_columns)
                .prop_map(|(field, extra)| {
                    let mut line = format!("100.1\tM+H\t1\t2\t3\t4\t{field}");
                    for column in extra {
                        line.push('\t');
                        line.push_str(&column);
                    }
                    (line, None::<String>)
                }),
            prop::collection::vec("[a-z0-9]{0,4}", 0..7).prop_map(|fields| (fields.join("\t"), None::<String>)),
        ]
    }

    /// A whole file with mixed terminators, plus the IDs it should yield in order.
    fn annotated_file() -> impl Strategy<Value = (String, Vec<String>)> {
        let terminator = prop_oneof![Just("\n"), Just("\r\n"), Just("\r")];
        prop::collection::vec((annotated_line(), terminator), 0..30).prop_map(|lines| {
            let mut text = String::new();
            let mut ids = Vec::new();
            for ((line, id), end) in lines {
                text.push_str(&line);
                text.push_str(end);
                ids.extend(id);
            }
            (text, ids)
        })
    }

    proptest! {
        #[test]
        fn classes_partition_the_union(first in id_seq(), second in id_seq()) {
            let set1: HashSet<&str> = first.iter().map(String::as_str).collect();
            let set2: HashSet<&str> = second.iter().map(String::as_str).collect();
            let c = compare_ids(&first, &second);

            let mut seen = HashSet::new();
            for entry in c.entries() {
                prop_assert!(seen.insert(entry.id.as_str()));
                let expected = match (set1.contains(entry.id.as_str()), set2.contains(entry.id.as_str())) {
                    (true, true) => Classification::Common,
                    (true, false) => Classification::OnlyFirst,
                    (false, true) => Classification::OnlySecond,
                    (false, false) => unreachable!("entry outside both sets"),
                };
                prop_assert_eq!(entry.classification, expected);
            }
            let union: HashSet<&str> = set1.union(&set2).copied().collect();
            prop_assert_eq!(seen, union);
        }

        #[test]
        fn counts_match_set_sizes(first in id_seq(), second in id_seq()) {
            let set1: HashSet<&String> = first.iter().collect();
            let set2: HashSet<&String> = second.iter().collect();
            let c = compare_ids(&first, &second);
            prop_assert_eq!(c.only_first() + c.common(), set1.len());
            prop_assert_eq!(c.only_second() + c.common(), set2.len());
        }

        #[test]
        fn map_has_one_line_per_compound(first in id_seq(), second in id_seq()) {
            let union: HashSet<&String> = first.iter().chain(&second).collect();
            let report = compare(
                &annotated(&first.iter().map(String::as_str).collect::<Vec<_>>()),
                &annotated(&second.iter().map(String::as_str).collect::<Vec<_>>()),
            );
            let lines: Vec<&str> = report.map.split('\n').collect();
            prop_assert_eq!(lines.len(), 1 + union.len());
            prop_assert_eq!(lines[0], MAP_HEADER);
            prop_assert!(lines[1..].iter().all(|l| l.starts_with('C')));
        }

        #[test]
        fn malformed_lines_never_reach_the_map(first in annotated_file(), second in annotated_file()) {
            let (text1, ids1) = &first;
            let (text2, ids2) = &second;
            let set1: HashSet<&str> = ids1.iter().map(String::as_str).collect();
            let set2: HashSet<&str> = ids2.iter().map(String::as_str).collect();
            let union: HashSet<&str> = set1.union(&set2).copied().collect();

            let report = compare(text1, text2);
            prop_assert_eq!(report.n1 + report.n_common, set1.len());
            prop_assert_eq!(report.n2 + report.n_common, set2.len());

            let lines: Vec<&str> = report.map.split('\n').collect();
            prop_assert_eq!(lines.len(), 1 + union.len());
            prop_assert_eq!(lines[0], MAP_HEADER);
            prop_assert!(lines[1..].iter().all(|l| l.starts_with('C') && !l.contains('\r')));

            let rows: HashSet<&str> = lines[1..]
                .iter()
                .filter_map(|l| l.split('\t').next())
                .collect();
            prop_assert_eq!(rows, union);
        }

        #[test]
        fn comparison_is_deterministic(first in id_seq(), second in id_seq()) {
            prop_assert_eq!(compare_ids(&first, &second), compare_ids(&first, &second));
        }

        #[test]
        fn first_only_order_follows_first_file(first in id_seq(), second in id_seq()) {
            let c = compare_ids(&first, &second);
            let emitted: Vec<&str> = c
                .with_classification(Classification::OnlyFirst)
                .map(|e| e.id.as_str())
                .collect();

            let set2: HashSet<&str> = second.iter().map(String::as_str).collect();
            let mut seen = HashSet::new();
            let expected: Vec<&str> = first
                .iter()
                .map(String::as_str)
                .filter(|id| !set2.contains(id) && seen.insert(*id))
                .collect();
            prop_assert_eq!(emitted, expected);
        }
    }
}
