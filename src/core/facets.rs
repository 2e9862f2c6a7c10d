// JcrScope - core/facets.rs
//
// Facet enumeration: the selectable option lists for each filterable
// dimension, derived from the full unfiltered dataset.

use crate::core::model::JournalRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Sorted, duplicate-free option lists for the filter controls.
///
/// Built once per dataset load. Filtering never changes these lists, so a
/// user can always widen a selection they narrowed earlier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub quartiles: Vec<String>,
    pub publishers: Vec<String>,
    pub countries: Vec<String>,
    /// Every tag from every record's areas, flattened.
    pub areas: Vec<String>,
}

impl FacetOptions {
    /// Enumerate the facets of `records`. Missing and blank values are skipped.
    pub fn enumerate(records: &[JournalRecord]) -> Self {
        let mut quartiles = BTreeSet::new();
        let mut publishers = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut areas = BTreeSet::new();

        for record in records {
            insert_present(&mut quartiles, record.quartile.as_deref());
            insert_present(&mut publishers, record.publisher.as_deref());
            insert_present(&mut countries, record.country.as_deref());
            for area in &record.areas {
                insert_present(&mut areas, Some(area.as_str()));
            }
        }

        Self {
            quartiles: quartiles.into_iter().collect(),
            publishers: publishers.into_iter().collect(),
            countries: countries.into_iter().collect(),
            areas: areas.into_iter().collect(),
        }
    }
}

/// Values are kept verbatim so a selected option compares equal to the
/// record it came from.
fn insert_present(pool: &mut BTreeSet<String>, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        pool.insert(v.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(journal: &str, quartile: Option<&str>, areas: &[&str]) -> JournalRecord {
        JournalRecord {
            quartile: quartile.map(str::to_string),
            areas: areas.iter().map(|a| a.to_string()).collect(),
            ..JournalRecord::named(journal)
        }
    }

    #[test]
    fn test_scenario_facets() {
        let records = vec![
            make_record("A", Some("Q1"), &["Physics"]),
            make_record("B", Some("Q2"), &[]),
            make_record("C", Some("Q1"), &["Chemistry"]),
        ];
        let facets = FacetOptions::enumerate(&records);
        assert_eq!(facets.quartiles, ["Q1", "Q2"]);
        assert_eq!(facets.areas, ["Chemistry", "Physics"]);
        assert!(facets.publishers.is_empty());
        assert!(facets.countries.is_empty());
    }

    #[test]
    fn test_areas_flattened_and_deduplicated() {
        let records = vec![
            make_record("A", None, &["Oncology", "Medicine"]),
            make_record("B", None, &["Medicine", "Biochemistry"]),
        ];
        let facets = FacetOptions::enumerate(&records);
        assert_eq!(facets.areas, ["Biochemistry", "Medicine", "Oncology"]);
    }

    #[test]
    fn test_blank_and_missing_values_skipped() {
        let mut blank = JournalRecord::named("Blank");
        blank.publisher = Some("   ".to_string());
        blank.country = None;
        let mut real = JournalRecord::named("Real");
        real.publisher = Some("Springer".to_string());
        real.country = Some("Netherlands".to_string());

        let facets = FacetOptions::enumerate(&[blank, real]);
        assert_eq!(facets.publishers, ["Springer"]);
        assert_eq!(facets.countries, ["Netherlands"]);
    }

    #[test]
    fn test_facet_values_match_their_records() {
        use crate::core::filter::matches_category;
        use std::collections::HashSet;

        let mut padded = JournalRecord::named("Padded");
        padded.publisher = Some(" Wiley ".to_string());

        let facets = FacetOptions::enumerate(std::slice::from_ref(&padded));
        assert_eq!(facets.publishers, [" Wiley "]);

        let selected: HashSet<String> = facets.publishers.into_iter().collect();
        assert!(matches_category(padded.publisher.as_deref(), &selected));
    }

    #[test]
    fn test_empty_dataset_has_empty_facets() {
        assert_eq!(FacetOptions::enumerate(&[]), FacetOptions::default());
    }
}
