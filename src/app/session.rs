// JcrScope - app/session.rs
//
// One user's interactive session: a shared, read-only Dataset plus the
// FilterState this session alone owns.
//
// All user input goes through the setters here, which keep the filter
// state valid (range clamped to the observed span, never inverted) before
// the pure query engine sees it. Filter state lives only as long as the
// session; nothing is persisted.

use crate::app::dataset::Dataset;
use crate::core::facets::FacetOptions;
use crate::core::filter::{self, FilterState, QueryResult};
use crate::core::model::ImpactRange;
use std::collections::HashSet;
use std::sync::Arc;

/// Session-scoped filter state over a shared dataset.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    filter: FilterState,
}

impl Session {
    /// Start a session with every dimension open and the range set to the
    /// dataset's full observed span.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let filter = FilterState::for_span(dataset.observed_span());
        Self { dataset, filter }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Facet options of the full dataset, unaffected by this session's filter.
    pub fn facets(&self) -> &FacetOptions {
        self.dataset.facets()
    }

    /// Evaluate the current filter against the full dataset.
    pub fn query(&self) -> QueryResult<'_> {
        filter::query(self.dataset.records(), &self.filter)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
        tracing::debug!(search = %self.filter.search, "Search term set");
    }

    /// Set the impact factor bounds.
    ///
    /// Bounds are clamped into the observed span and an inverted pair is
    /// collapsed onto `min`. Non-finite input is ignored. When the dataset
    /// has no numeric impact factors the range stays unbounded.
    pub fn set_impact_range(&mut self, min: f64, max: f64) {
        if !min.is_finite() || !max.is_finite() {
            tracing::warn!(min, max, "Ignoring non-finite impact factor bounds");
            return;
        }
        let Some(span) = self.dataset.observed_span() else {
            tracing::debug!("No impact factors in dataset; range stays unbounded");
            return;
        };

        let requested = ImpactRange::new(min, max);
        let clamped = requested.clamp_to(&span);
        if clamped != requested {
            tracing::warn!(%requested, %clamped, "Impact factor bounds adjusted");
        }
        self.filter.impact_range = Some(clamped);
    }

    pub fn set_quartiles<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.quartiles = collect_selection(values);
    }

    pub fn set_publishers<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.publishers = collect_selection(values);
    }

    pub fn set_countries<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.countries = collect_selection(values);
    }

    pub fn set_areas<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.areas = collect_selection(values);
    }

    /// Clear every multi-select and the search; the range is kept.
    pub fn clear_selections(&mut self) {
        self.filter.clear_selections();
    }

    /// Back to the initial state, including the full observed range.
    pub fn reset(&mut self) {
        self.filter = FilterState::for_span(self.dataset.observed_span());
        tracing::debug!("Filters reset");
    }

    /// Swap in a freshly loaded dataset.
    ///
    /// Selections and a sticky range are kept as they are. A session without
    /// a range picks up the new span. A dataset with no numeric impact
    /// factors leaves the range unbounded, since any bound would exclude
    /// every record and `set_impact_range` could not widen it again.
    pub fn replace_dataset(&mut self, dataset: Arc<Dataset>) {
        match dataset.observed_span() {
            None => self.filter.impact_range = None,
            Some(span) if self.filter.impact_range.is_none() => {
                self.filter.impact_range = Some(span);
            }
            Some(_) => {}
        }
        self.dataset = dataset;
        tracing::info!(
            records = self.dataset.len(),
            impact_range = ?self.filter.impact_range,
            "Session dataset replaced"
        );
    }
}

/// Trimmed, non-blank selection values.
fn collect_selection<I, S>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(|v| {
            let value: String = v.into();
            value.trim().to_string()
        })
        .filter(|v| !v.is_empty())
        .collect()
}
