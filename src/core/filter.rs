// JcrScope - core/filter.rs
//
// Composable filter engine for journal records.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O dependencies.

use crate::core::model::{ImpactRange, JournalRecord};
use std::collections::{BTreeSet, HashSet};

/// Complete filter state. All fields are AND-combined when applied.
///
/// Owned by a single session; the engine only ever reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Inclusive impact factor bounds. None = no bounds (the dataset had
    /// no numeric impact factors when the state was created).
    pub impact_range: Option<ImpactRange>,

    /// Quartile labels to include (empty = all).
    pub quartiles: HashSet<String>,

    /// Publishers to include (empty = all).
    pub publishers: HashSet<String>,

    /// Countries to include (empty = all).
    pub countries: HashSet<String>,

    /// Subject areas; a record passes if it carries any of them (empty = all).
    pub areas: HashSet<String>,

    /// Substring search on the journal name (case-insensitive). Empty = no filter.
    pub search: String,
}

impl FilterState {
    /// Initial state for a dataset whose observed impact span is `span`.
    pub fn for_span(span: Option<ImpactRange>) -> Self {
        Self {
            impact_range: span,
            ..Default::default()
        }
    }

    /// Returns true if no dimension restricts anything.
    ///
    /// A present range counts as a restriction even when it covers the
    /// full span, because it still excludes records with no impact factor.
    pub fn is_open(&self) -> bool {
        self.impact_range.is_none()
            && self.quartiles.is_empty()
            && self.publishers.is_empty()
            && self.countries.is_empty()
            && self.areas.is_empty()
            && self.search.is_empty()
    }

    /// Number of dimensions currently restricting the result.
    pub fn active_dimensions(&self) -> usize {
        [
            self.impact_range.is_some(),
            !self.quartiles.is_empty(),
            !self.publishers.is_empty(),
            !self.countries.is_empty(),
            !self.areas.is_empty(),
            !self.search.is_empty(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Empty every multi-select and the search term. The impact range is
    /// sticky and left untouched.
    pub fn clear_selections(&mut self) {
        self.quartiles.clear();
        self.publishers.clear();
        self.countries.clear();
        self.areas.clear();
        self.search.clear();
    }
}

// =============================================================================
// Predicate evaluators
// =============================================================================

/// Range predicate. `None` range matches everything; otherwise the record
/// must carry an impact factor inside the inclusive bounds.
pub fn matches_range(record: &JournalRecord, range: Option<&ImpactRange>) -> bool {
    match range {
        None => true,
        Some(range) => range.contains(record.impact_factor),
    }
}

/// Categorical-set predicate for quartile, publisher, and country.
/// An empty selection is open; a missing field never matches a non-empty one.
pub fn matches_category(value: Option<&str>, selected: &HashSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    match value {
        Some(v) => selected.contains(v),
        None => false,
    }
}

/// Tag-membership predicate (ANY-match).
pub fn matches_areas(areas: &BTreeSet<String>, selected: &HashSet<String>) -> bool {
    selected.is_empty() || areas.iter().any(|area| selected.contains(area))
}

/// Search predicate. `term_lower` must already be lowercased.
pub fn matches_search(journal: &str, term_lower: &str) -> bool {
    term_lower.is_empty() || journal.to_lowercase().contains(term_lower)
}

/// Check if a single record matches all active filters.
fn matches_all(record: &JournalRecord, filter: &FilterState, search_lower: &str) -> bool {
    matches_range(record, filter.impact_range.as_ref())
        && matches_category(record.quartile.as_deref(), &filter.quartiles)
        && matches_category(record.publisher.as_deref(), &filter.publishers)
        && matches_category(record.country.as_deref(), &filter.countries)
        && matches_areas(&record.areas, &filter.areas)
        && matches_search(&record.journal, search_lower)
}

// =============================================================================
// Query composer
// =============================================================================

/// Apply filters to a slice of records, returning indices of matching records.
///
/// Indices are ascending, so the filtered view keeps the dataset order.
/// Every call scans the full slice; nothing is carried between calls.
pub fn apply_filters(records: &[JournalRecord], filter: &FilterState) -> Vec<usize> {
    if filter.is_open() {
        return (0..records.len()).collect();
    }

    let search_lower = filter.search.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, filter, &search_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Filtered view over a dataset: matching records in original order plus
/// the counts reported alongside them.
#[derive(Debug, Clone)]
pub struct QueryResult<'a> {
    /// Matching records, in dataset order.
    pub records: Vec<&'a JournalRecord>,

    /// Size of the full dataset the query ran against.
    pub total: usize,
}

impl<'a> QueryResult<'a> {
    pub fn matched(&self) -> usize {
        self.records.len()
    }

    /// One-line count report, e.g. "Showing 12 journals out of 340 total".
    pub fn summary(&self) -> String {
        format!(
            "Showing {} journals out of {} total",
            self.matched(),
            self.total
        )
    }
}

/// Run the full query: filter `records` with `filter` and report counts.
pub fn query<'a>(records: &'a [JournalRecord], filter: &FilterState) -> QueryResult<'a> {
    let matched: Vec<&JournalRecord> = apply_filters(records, filter)
        .into_iter()
        .map(|idx| &records[idx])
        .collect();

    tracing::debug!(
        matched = matched.len(),
        total = records.len(),
        active = filter.active_dimensions(),
        "Query evaluated"
    );

    QueryResult {
        records: matched,
        total: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(
        journal: &str,
        impact: Option<f64>,
        quartile: Option<&str>,
        areas: &[&str],
    ) -> JournalRecord {
        JournalRecord {
            impact_factor: impact,
            quartile: quartile.map(str::to_string),
            areas: areas.iter().map(|a| a.to_string()).collect(),
            ..JournalRecord::named(journal)
        }
    }

    fn set(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// A(IF 2.0, Q1, Physics), B(IF missing, Q2), C(IF 5.0, Q1, Chemistry).
    fn scenario() -> Vec<JournalRecord> {
        vec![
            make_record("A", Some(2.0), Some("Q1"), &["Physics"]),
            make_record("B", None, Some("Q2"), &[]),
            make_record("C", Some(5.0), Some("Q1"), &["Chemistry"]),
        ]
    }

    fn names(records: &[JournalRecord], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| records[i].journal.clone()).collect()
    }

    #[test]
    fn test_default_filter_returns_all() {
        let records = scenario();
        let result = apply_filters(&records, &FilterState::default());
        assert_eq!(result, vec![0, 1, 2]);
    }

    #[test]
    fn test_full_span_returns_all_when_no_missing() {
        let records = vec![
            make_record("A", Some(2.0), Some("Q1"), &[]),
            make_record("B", Some(0.4), None, &[]),
            make_record("C", Some(9.1), Some("Q3"), &[]),
        ];
        let filter = FilterState::for_span(ImpactRange::observed(&records));
        assert_eq!(apply_filters(&records, &filter), vec![0, 1, 2]);
    }

    #[test]
    fn test_range_excludes_missing_and_out_of_range() {
        let records = scenario();
        let filter = FilterState::for_span(Some(ImpactRange::new(1.0, 3.0)));
        assert_eq!(names(&records, &apply_filters(&records, &filter)), ["A"]);
    }

    #[test]
    fn test_quartile_filter_alone() {
        let records = scenario();
        let filter = FilterState {
            quartiles: set(&["Q1"]),
            ..Default::default()
        };
        assert_eq!(
            names(&records, &apply_filters(&records, &filter)),
            ["A", "C"]
        );
    }

    #[test]
    fn test_range_and_quartile_combined() {
        let records = scenario();
        let filter = FilterState {
            impact_range: Some(ImpactRange::new(1.0, 3.0)),
            quartiles: set(&["Q1"]),
            ..Default::default()
        };
        assert_eq!(names(&records, &apply_filters(&records, &filter)), ["A"]);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let records = scenario();
        let filter = FilterState::for_span(Some(ImpactRange::new(6.0, 1.0)));
        assert!(apply_filters(&records, &filter).is_empty());
    }

    #[test]
    fn test_missing_category_never_matches_selection() {
        let mut record = make_record("X", Some(1.0), None, &[]);
        record.publisher = None;
        assert!(!matches_category(record.publisher.as_deref(), &set(&["Elsevier"])));
        assert!(matches_category(record.publisher.as_deref(), &HashSet::new()));
    }

    #[test]
    fn test_areas_any_match() {
        let both = make_record("P", None, None, &["Physics", "Chemistry"]);
        let bio = make_record("B", None, None, &["Biology"]);
        assert!(matches_areas(&both.areas, &set(&["Biology", "Physics"])));
        assert!(!matches_areas(&bio.areas, &set(&["Physics"])));
        assert!(matches_areas(&BTreeSet::new(), &HashSet::new()));
        assert!(!matches_areas(&BTreeSet::new(), &set(&["Physics"])));
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let records = vec![
            make_record("Nature Physics", None, None, &[]),
            make_record("Physical Review Letters", None, None, &[]),
            make_record("SIGNATURE STUDIES", None, None, &[]),
        ];
        let filter = FilterState {
            search: "nature".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![0, 2]);
    }

    #[test]
    fn test_search_is_literal_not_regex() {
        let records = vec![
            make_record("Journal of C++ Studies", None, None, &[]),
            make_record("Journal of Cartography", None, None, &[]),
        ];
        let filter = FilterState {
            search: "c++".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![0]);
    }

    #[test]
    fn test_idempotent() {
        let records = scenario();
        let filter = FilterState {
            quartiles: set(&["Q1", "Q2"]),
            search: "a".to_string(),
            ..Default::default()
        };
        let first = apply_filters(&records, &filter);
        let second = apply_filters(&records, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn test_narrowing_never_increases_count() {
        let records = scenario();
        let wide = FilterState::for_span(Some(ImpactRange::new(0.0, 10.0)));
        let base = apply_filters(&records, &wide).len();

        let narrower_range = FilterState::for_span(Some(ImpactRange::new(1.0, 3.0)));
        assert!(apply_filters(&records, &narrower_range).len() <= base);

        let mut with_quartile = wide.clone();
        with_quartile.quartiles = set(&["Q1"]);
        let q_count = apply_filters(&records, &with_quartile).len();
        assert!(q_count <= base);

        let mut with_area = with_quartile.clone();
        with_area.areas = set(&["Physics"]);
        assert!(apply_filters(&records, &with_area).len() <= q_count);
    }

    #[test]
    fn test_query_counts_and_summary() {
        let records = scenario();
        let filter = FilterState {
            quartiles: set(&["Q1"]),
            ..Default::default()
        };
        let result = query(&records, &filter);
        assert_eq!(result.matched(), 2);
        assert_eq!(result.total, 3);
        assert_eq!(result.records[0].journal, "A");
        assert_eq!(result.summary(), "Showing 2 journals out of 3 total");
    }

    #[test]
    fn test_empty_dataset() {
        let result = query(&[], &FilterState::for_span(Some(ImpactRange::new(0.0, 1.0))));
        assert_eq!(result.matched(), 0);
        assert_eq!(result.total, 0);
        assert_eq!(result.summary(), "Showing 0 journals out of 0 total");
    }

    #[test]
    fn test_active_dimensions_and_clear() {
        let mut filter = FilterState {
            impact_range: Some(ImpactRange::new(0.0, 1.0)),
            countries: set(&["Germany"]),
            search: "acta".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.active_dimensions(), 3);
        filter.clear_selections();
        assert_eq!(filter.active_dimensions(), 1);
        assert_eq!(filter.impact_range, Some(ImpactRange::new(0.0, 1.0)));
    }
}
