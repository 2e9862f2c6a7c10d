// JcrScope - core/loader.rs
//
// Normalises a JCR-style CSV export into `JournalRecord`s.
//
// Responsibilities:
//   - locate columns by header name (configurable via `ColumnMap`)
//   - coerce the impact factor to f64, non-numeric values become None
//   - turn blank categorical cells into None
//   - split the Areas column on "; " into trimmed tags
//
// Reads from any `Read` so tests can feed in-memory fixtures.

use crate::core::model::JournalRecord;
use crate::util::constants;
use crate::util::error::LoadError;
use csv::StringRecord;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// Header names of the source columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub journal: String,
    pub impact_factor: String,
    pub quartile: String,
    pub publisher: String,
    pub country: String,
    pub areas: String,
    pub rank: String,
    pub year: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            journal: constants::DEFAULT_JOURNAL_COLUMN.to_string(),
            impact_factor: constants::DEFAULT_IMPACT_FACTOR_COLUMN.to_string(),
            quartile: constants::DEFAULT_QUARTILE_COLUMN.to_string(),
            publisher: constants::DEFAULT_PUBLISHER_COLUMN.to_string(),
            country: constants::DEFAULT_COUNTRY_COLUMN.to_string(),
            areas: constants::DEFAULT_AREAS_COLUMN.to_string(),
            rank: constants::DEFAULT_RANK_COLUMN.to_string(),
            year: constants::DEFAULT_YEAR_COLUMN.to_string(),
        }
    }
}

/// Resolved positions of each column in the header row.
#[derive(Debug)]
struct ColumnIndex {
    journal: usize,
    impact_factor: Option<usize>,
    quartile: Option<usize>,
    publisher: Option<usize>,
    country: Option<usize>,
    areas: Option<usize>,
    rank: Option<usize>,
    year: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, columns: &ColumnMap) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let journal = find(columns.journal.as_str()).ok_or_else(|| LoadError::MissingColumn {
            column: columns.journal.clone(),
        })?;

        let index = Self {
            journal,
            impact_factor: find(columns.impact_factor.as_str()),
            quartile: find(columns.quartile.as_str()),
            publisher: find(columns.publisher.as_str()),
            country: find(columns.country.as_str()),
            areas: find(columns.areas.as_str()),
            rank: find(columns.rank.as_str()),
            year: find(columns.year.as_str()),
        };

        for (name, idx) in [
            (&columns.impact_factor, index.impact_factor),
            (&columns.quartile, index.quartile),
            (&columns.areas, index.areas),
        ] {
            if idx.is_none() {
                tracing::warn!(column = %name, "Optional column not found; values will be missing");
            }
        }

        Ok(index)
    }
}

/// Outcome of a load: the normalised records plus non-fatal warnings.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<JournalRecord>,

    /// Per-row problems (skipped rows), capped at `MAX_LOAD_WARNINGS`.
    pub warnings: Vec<String>,

    /// Rows dropped because they had no journal name.
    pub skipped_rows: usize,
}

impl LoadReport {
    fn warn(&mut self, message: String) {
        if self.warnings.len() < constants::MAX_LOAD_WARNINGS {
            self.warnings.push(message);
        }
    }
}

// =============================================================================
// Field normalisation
// =============================================================================

/// Coerce a raw impact factor cell. Anything that is not a finite number
/// becomes None.
pub fn parse_impact_factor(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split a raw Areas cell into trimmed, non-blank tags.
pub fn parse_areas(raw: &str) -> BTreeSet<String> {
    raw.split(constants::AREAS_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn cell<'r>(row: &'r StringRecord, idx: Option<usize>) -> Option<&'r str> {
    idx.and_then(|i| row.get(i))
}

fn text(row: &StringRecord, idx: Option<usize>) -> Option<String> {
    cell(row, idx)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn number<T: std::str::FromStr>(row: &StringRecord, idx: Option<usize>) -> Option<T> {
    cell(row, idx).and_then(|v| v.trim().parse().ok())
}

fn normalise_row(row: &StringRecord, index: &ColumnIndex) -> Option<JournalRecord> {
    let journal = text(row, Some(index.journal))?;

    Some(JournalRecord {
        rank: number(row, index.rank),
        journal,
        year: number(row, index.year),
        impact_factor: cell(row, index.impact_factor).and_then(parse_impact_factor),
        quartile: text(row, index.quartile),
        publisher: text(row, index.publisher),
        country: text(row, index.country),
        areas: cell(row, index.areas).map(parse_areas).unwrap_or_default(),
    })
}

// =============================================================================
// Entry points
// =============================================================================

/// Load and normalise records from CSV data with a header row.
pub fn load_csv<R: Read>(reader: R, columns: &ColumnMap) -> Result<LoadReport, LoadError> {
    load_csv_inner(reader, columns, None)
}

/// Load and normalise records from a CSV file on disk.
pub fn load_csv_path(path: &Path, columns: &ColumnMap) -> Result<LoadReport, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let report = load_csv_inner(file, columns, Some(path))?;
    tracing::info!(
        path = %path.display(),
        records = report.records.len(),
        skipped = report.skipped_rows,
        "Dataset loaded"
    );
    Ok(report)
}

fn load_csv_inner<R: Read>(
    reader: R,
    columns: &ColumnMap,
    path: Option<&Path>,
) -> Result<LoadReport, LoadError> {
    let csv_error = |e: csv::Error| LoadError::Csv {
        path: path.map(Path::to_path_buf),
        source: e,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let index = ColumnIndex::resolve(&headers, columns)?;
    tracing::debug!(?index, "Columns resolved");

    let mut report = LoadReport::default();
    let mut row = StringRecord::new();

    while csv_reader.read_record(&mut row).map_err(csv_error)? {
        match normalise_row(&row, &index) {
            Some(record) => {
                if report.records.len() >= constants::MAX_RECORDS {
                    return Err(LoadError::TooManyRows {
                        max: constants::MAX_RECORDS,
                    });
                }
                report.records.push(record);
            }
            None => {
                report.skipped_rows += 1;
                // Physical line the record starts on; quoted fields may span lines.
                let line = row.position().map_or(0, csv::Position::line);
                report.warn(format!("Line {line}: no journal name, row skipped"));
            }
        }
    }

    if report.skipped_rows > 0 {
        tracing::warn!(skipped = report.skipped_rows, "Rows without a journal name were skipped");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Rank,Journal Name,JCR Year,JIF 2024,JIF Quartile,Publisher,Country,Areas
1,CA-A Cancer Journal for Clinicians,2024,232.4,Q1,Wiley,United States,Hematology; Oncology
2,Nature Reviews Drug Discovery,2024,101.8,Q1,Nature Portfolio,United Kingdom,Drug Discovery; Pharmacology
3,Obscure Letters,2024,N/A,,,,
";

    #[test]
    fn test_parse_impact_factor() {
        assert_eq!(parse_impact_factor("3.25"), Some(3.25));
        assert_eq!(parse_impact_factor(" 0.5 "), Some(0.5));
        assert_eq!(parse_impact_factor("N/A"), None);
        assert_eq!(parse_impact_factor("<0.1"), None);
        assert_eq!(parse_impact_factor(""), None);
        assert_eq!(parse_impact_factor("NaN"), None);
        assert_eq!(parse_impact_factor("inf"), None);
    }

    #[test]
    fn test_parse_areas_trims_and_drops_blanks() {
        let areas = parse_areas("Physics;  Chemistry ; ; Biology");
        assert_eq!(areas.len(), 3);
        assert!(areas.contains("Chemistry"));
        assert!(areas.contains("Biology"));
        assert!(areas.iter().all(|a| a == a.trim() && !a.is_empty()));
        assert!(parse_areas("").is_empty());
    }

    #[test]
    fn test_load_sample() {
        let report = load_csv(SAMPLE.as_bytes(), &ColumnMap::default()).unwrap();
        assert_eq!(report.records.len(), 3);
        assert!(report.warnings.is_empty());

        let first = &report.records[0];
        assert_eq!(first.rank, Some(1));
        assert_eq!(first.year, Some(2024));
        assert_eq!(first.impact_factor, Some(232.4));
        assert_eq!(first.quartile.as_deref(), Some("Q1"));
        assert_eq!(first.country.as_deref(), Some("United States"));
        assert!(first.areas.contains("Oncology"));
        assert!(first.areas.contains("Hematology"));

        let obscure = &report.records[2];
        assert_eq!(obscure.impact_factor, None);
        assert_eq!(obscure.quartile, None);
        assert_eq!(obscure.publisher, None);
        assert!(obscure.areas.is_empty());
    }

    #[test]
    fn test_missing_journal_column_is_error() {
        let data = "Title,JIF 2024\nSomething,1.0\n";
        let result = load_csv(data.as_bytes(), &ColumnMap::default());
        assert!(
            matches!(result, Err(LoadError::MissingColumn { ref column }) if column == "Journal Name"),
            "expected MissingColumn, got {result:?}"
        );
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let data = "Journal Name\nJust A Name\n";
        let report = load_csv(data.as_bytes(), &ColumnMap::default()).unwrap();
        assert_eq!(report.records, vec![JournalRecord::named("Just A Name")]);
    }

    #[test]
    fn test_blank_journal_rows_skipped_with_warning() {
        let data = "Journal Name,JIF 2024\n,1.0\nKept,2.0\n";
        let report = load_csv(data.as_bytes(), &ColumnMap::default()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Line 2"), "{:?}", report.warnings);
    }

    #[test]
    fn test_skipped_row_warning_uses_file_line_after_multiline_field() {
        let data = "Journal Name,Areas\n\"Multi\nLine Journal\",Physics\n,Chemistry\n";
        let report = load_csv(data.as_bytes(), &ColumnMap::default()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].journal, "Multi\nLine Journal");
        assert_eq!(report.skipped_rows, 1);
        assert!(report.warnings[0].starts_with("Line 4:"), "{:?}", report.warnings);
    }

    #[test]
    fn test_custom_column_names() {
        let columns = ColumnMap {
            journal: "Title".to_string(),
            impact_factor: "IF".to_string(),
            ..ColumnMap::default()
        };
        let data = "Title,IF\nActa Physica,1.75\n";
        let report = load_csv(data.as_bytes(), &columns).unwrap();
        assert_eq!(report.records[0].journal, "Acta Physica");
        assert_eq!(report.records[0].impact_factor, Some(1.75));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_csv_path(
            Path::new("/nonexistent/jcrscope-test/jcr.csv"),
            &ColumnMap::default(),
        );
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
