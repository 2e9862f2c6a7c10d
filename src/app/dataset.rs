// JcrScope - app/dataset.rs
//
// The loaded dataset: immutable records plus everything derived from them
// once per load (facet option lists, observed impact factor span).
//
// A Dataset is shared read-only between sessions behind an Arc. Reloading
// means building a new Dataset; nothing here is ever mutated in place.

use crate::core::facets::FacetOptions;
use crate::core::loader::{self, ColumnMap};
use crate::core::model::{ImpactRange, JournalRecord};
use crate::util::error::LoadError;
use std::path::{Path, PathBuf};

/// One load of the journal table.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<JournalRecord>,
    facets: FacetOptions,
    observed_span: Option<ImpactRange>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Wrap records, computing facets and span once.
    ///
    /// Records are normalised first, so facet values always equal the
    /// stored values the category filters compare against.
    pub fn from_records(records: Vec<JournalRecord>, source: Option<PathBuf>) -> Self {
        let records: Vec<JournalRecord> =
            records.into_iter().map(JournalRecord::normalised).collect();
        let facets = FacetOptions::enumerate(&records);
        let observed_span = ImpactRange::observed(&records);

        tracing::debug!(
            records = records.len(),
            quartiles = facets.quartiles.len(),
            publishers = facets.publishers.len(),
            countries = facets.countries.len(),
            areas = facets.areas.len(),
            impact_span = ?observed_span,
            "Dataset facets computed"
        );

        Self {
            records,
            facets,
            observed_span,
            source,
        }
    }

    /// Load a CSV file and build the dataset from it.
    ///
    /// Returns the dataset and the loader's non-fatal warnings.
    pub fn load(path: &Path, columns: &ColumnMap) -> Result<(Self, Vec<String>), LoadError> {
        let report = loader::load_csv_path(path, columns)?;
        let dataset = Self::from_records(report.records, Some(path.to_path_buf()));
        Ok((dataset, report.warnings))
    }

    pub fn records(&self) -> &[JournalRecord] {
        &self.records
    }

    /// Facet option lists for the full dataset.
    pub fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    /// Min/max of all present impact factors. None if no record has one.
    pub fn observed_span(&self) -> Option<ImpactRange> {
        self.observed_span
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
