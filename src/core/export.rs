// JcrScope - core/export.rs
//
// CSV and JSON export of filtered journal records.
// Core layer: writes to any Write trait object.

use crate::core::model::JournalRecord;
use crate::util::constants::IMPACT_FACTOR_DECIMALS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension; anything but `.json` is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

fn check_limit(count: usize, max: usize) -> Result<(), ExportError> {
    if count > max {
        return Err(ExportError::TooManyRecords { count, max });
    }
    Ok(())
}

/// Export filtered records to CSV format.
///
/// Writes: Rank, Journal, Year, IF, Q, Publisher, Country, Areas
pub fn export_csv<W: Write>(
    records: &[&JournalRecord],
    writer: W,
    export_path: &Path,
    max_records: usize,
) -> Result<usize, ExportError> {
    check_limit(records.len(), max_records)?;

    let csv_error = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "Rank",
            "Journal",
            "Year",
            "IF",
            "Q",
            "Publisher",
            "Country",
            "Areas",
        ])
        .map_err(csv_error)?;

    let mut count = 0;
    for record in records {
        let rank = record.rank.map(|r| r.to_string()).unwrap_or_default();
        let year = record.year.map(|y| y.to_string()).unwrap_or_default();
        let impact = record
            .impact_factor
            .map(|v| format!("{v:.prec$}", prec = IMPACT_FACTOR_DECIMALS))
            .unwrap_or_default();
        let areas = record.areas_joined();

        csv_writer
            .write_record([
                rank.as_str(),
                record.journal.as_str(),
                year.as_str(),
                impact.as_str(),
                record.quartile.as_deref().unwrap_or(""),
                record.publisher.as_deref().unwrap_or(""),
                record.country.as_deref().unwrap_or(""),
                areas.as_str(),
            ])
            .map_err(csv_error)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export filtered records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[&JournalRecord],
    mut writer: W,
    export_path: &Path,
    max_records: usize,
) -> Result<usize, ExportError> {
    check_limit(records.len(), max_records)?;

    serde_json::to_writer_pretty(&mut writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Create `path` and export `records` in `format`.
pub fn export_to_file(
    records: &[&JournalRecord],
    path: &Path,
    format: ExportFormat,
    max_records: usize,
) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);

    let count = match format {
        ExportFormat::Csv => export_csv(records, writer, path, max_records)?,
        ExportFormat::Json => export_json(records, writer, path, max_records)?,
    };

    tracing::info!(path = %path.display(), ?format, count, "Export written");
    Ok(count)
}
