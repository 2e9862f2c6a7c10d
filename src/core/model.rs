// JcrScope - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Journal record (normalised output of loading)
// =============================================================================

/// A single journal row, normalised from the source dataset.
///
/// Records are immutable after load. Missing or non-coercible source
/// values are `None` rather than sentinel values, so every predicate has
/// to decide explicitly what a missing value means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Position of the journal in the source ranking, if present.
    pub rank: Option<u32>,

    /// Display name. Never empty; used for substring search.
    pub journal: String,

    /// JCR edition year, if present.
    pub year: Option<u16>,

    /// Journal impact factor. `None` when the source value was absent,
    /// non-numeric, or not finite.
    pub impact_factor: Option<f64>,

    /// Quartile label, e.g. "Q1".
    pub quartile: Option<String>,

    pub publisher: Option<String>,

    pub country: Option<String>,

    /// Subject-area tags, trimmed, no blanks.
    pub areas: BTreeSet<String>,
}

impl JournalRecord {
    /// Minimal record with only a journal name; all other fields missing.
    pub fn named(journal: impl Into<String>) -> Self {
        Self {
            rank: None,
            journal: journal.into(),
            year: None,
            impact_factor: None,
            quartile: None,
            publisher: None,
            country: None,
            areas: BTreeSet::new(),
        }
    }

    /// Areas re-joined with the source separator, in sorted order.
    pub fn areas_joined(&self) -> String {
        self.areas
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(crate::util::constants::AREAS_SEPARATOR)
    }

    /// Apply the loader's normalisation to a record built elsewhere.
    ///
    /// Text fields are trimmed, blank categorical values become None, blank
    /// area tags are dropped and a non-finite impact factor becomes None.
    pub fn normalised(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            journal: self.journal.trim().to_string(),
            impact_factor: self.impact_factor.filter(|v| v.is_finite()),
            quartile: clean(self.quartile),
            publisher: clean(self.publisher),
            country: clean(self.country),
            areas: self
                .areas
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            ..self
        }
    }
}

// =============================================================================
// Impact factor range
// =============================================================================

/// Inclusive bounds on impact factor.
///
/// The session layer keeps `min <= max`. If an inverted range does reach
/// the engine, [`ImpactRange::contains`] is false for every value, so the
/// query returns an empty result rather than a partial one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactRange {
    pub min: f64,
    pub max: f64,
}

impl ImpactRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `min > max`.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Inclusive containment. Missing values are never contained.
    pub fn contains(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => self.min <= v && v <= self.max,
            None => false,
        }
    }

    /// Clamp both bounds into `span`, then collapse an inverted result onto
    /// its lower bound.
    pub fn clamp_to(&self, span: &ImpactRange) -> ImpactRange {
        let min = self.min.clamp(span.min, span.max);
        let max = self.max.clamp(span.min, span.max);
        if min > max {
            ImpactRange::new(min, min)
        } else {
            ImpactRange::new(min, max)
        }
    }

    /// Observed span of all present impact factors. `None` when no record
    /// carries one.
    pub fn observed<'a, I>(records: I) -> Option<ImpactRange>
    where
        I: IntoIterator<Item = &'a JournalRecord>,
    {
        records
            .into_iter()
            .filter_map(|r| r.impact_factor)
            .fold(None, |acc, v| match acc {
                None => Some(ImpactRange::new(v, v)),
                Some(r) => Some(ImpactRange::new(r.min.min(v), r.max.max(v))),
            })
    }
}

impl std::fmt::Display for ImpactRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}..={:.2}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_if(name: &str, impact: Option<f64>) -> JournalRecord {
        JournalRecord {
            impact_factor: impact,
            ..JournalRecord::named(name)
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = ImpactRange::new(1.0, 3.0);
        assert!(range.contains(Some(1.0)));
        assert!(range.contains(Some(3.0)));
        assert!(!range.contains(Some(3.01)));
    }

    #[test]
    fn test_missing_never_contained() {
        let range = ImpactRange::new(f64::MIN, f64::MAX);
        assert!(!range.contains(None));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let range = ImpactRange::new(5.0, 1.0);
        assert!(range.is_inverted());
        assert!(!range.contains(Some(3.0)));
        assert!(!range.contains(Some(5.0)));
    }

    #[test]
    fn test_clamp_collapses_inverted_onto_min() {
        let span = ImpactRange::new(0.5, 10.0);
        let clamped = ImpactRange::new(7.0, 2.0).clamp_to(&span);
        assert_eq!(clamped, ImpactRange::new(7.0, 7.0));

        let wide = ImpactRange::new(-4.0, 99.0).clamp_to(&span);
        assert_eq!(wide, span);
    }

    #[test]
    fn test_observed_ignores_missing() {
        let records = vec![
            with_if("A", Some(2.0)),
            with_if("B", None),
            with_if("C", Some(5.0)),
        ];
        assert_eq!(
            ImpactRange::observed(&records),
            Some(ImpactRange::new(2.0, 5.0))
        );
    }

    #[test]
    fn test_observed_all_missing_is_none() {
        let records = vec![with_if("A", None), with_if("B", None)];
        assert_eq!(ImpactRange::observed(&records), None);
        assert_eq!(ImpactRange::observed(&Vec::<JournalRecord>::new()), None);
    }

    #[test]
    fn test_normalised_trims_and_blanks_to_none() {
        let record = JournalRecord {
            impact_factor: Some(f64::NAN),
            quartile: Some("   ".to_string()),
            publisher: Some(" Wiley ".to_string()),
            areas: [" Physics", "", "Chemistry "]
                .iter()
                .map(|a| a.to_string())
                .collect(),
            ..JournalRecord::named("  Acta  ")
        }
        .normalised();

        assert_eq!(record.journal, "Acta");
        assert_eq!(record.impact_factor, None);
        assert_eq!(record.quartile, None);
        assert_eq!(record.publisher.as_deref(), Some("Wiley"));
        assert_eq!(record.areas_joined(), "Chemistry; Physics");
    }

    #[test]
    fn test_areas_joined_uses_source_separator() {
        let mut record = JournalRecord::named("Nature Physics");
        record.areas.insert("Physics".to_string());
        record.areas.insert("Astronomy".to_string());
        assert_eq!(record.areas_joined(), "Astronomy; Physics");
    }
}
