// JcrScope - table.rs
//
// Plain-text rendering of query results and facet lists for the terminal.
// Binary-side only; the library never prints.

use jcrscope::core::facets::FacetOptions;
use jcrscope::core::model::JournalRecord;
use jcrscope::util::constants::{IMPACT_FACTOR_DECIMALS, JOURNAL_COLUMN_WIDTH};

/// Shorten `text` to at most `width` characters, marking the cut with "...".
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Format one result row.
fn format_row(record: &JournalRecord) -> String {
    let rank = record
        .rank
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let impact = record
        .impact_factor
        .map(|v| format!("{v:.prec$}", prec = IMPACT_FACTOR_DECIMALS))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{rank:>6}  {journal:<width$}  {impact:>8}  {q:<3}  {publisher:<24}  {country:<18}  {areas}",
        journal = fit(&record.journal, JOURNAL_COLUMN_WIDTH),
        width = JOURNAL_COLUMN_WIDTH,
        q = or_dash(record.quartile.as_deref()),
        publisher = fit(or_dash(record.publisher.as_deref()), 24),
        country = fit(or_dash(record.country.as_deref()), 18),
        areas = record.areas_joined(),
    )
}

/// Print up to `limit` records under a header line.
pub fn print_records(records: &[&JournalRecord], limit: usize) {
    println!(
        "{:>6}  {:<width$}  {:>8}  {:<3}  {:<24}  {:<18}  {}",
        "Rank",
        "Journal",
        "IF",
        "Q",
        "Publisher",
        "Country",
        "Areas",
        width = JOURNAL_COLUMN_WIDTH,
    );

    for record in records.iter().take(limit) {
        println!("{}", format_row(record));
    }

    if records.len() > limit {
        println!("... {} more not shown (use --limit)", records.len() - limit);
    }
}

fn print_facet(title: &str, values: &[String]) {
    println!("{title} ({}):", values.len());
    for value in values {
        println!("  {value}");
    }
}

/// Print every facet option list.
pub fn print_facets(facets: &FacetOptions) {
    print_facet("Quartiles", &facets.quartiles);
    print_facet("Publishers", &facets.publishers);
    print_facet("Countries", &facets.countries);
    print_facet("Areas", &facets.areas);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_truncates_on_char_boundary() {
        assert_eq!(fit("Nature", 10), "Nature");
        assert_eq!(fit("Zeitschrift für Physik", 12), "Zeitschri...");
        assert_eq!(fit("Ångström Letters", 5), "Ån...");
    }

    #[test]
    fn test_format_row_marks_missing_values() {
        let record = JournalRecord::named("Orphan Journal");
        let row = format_row(&record);
        assert!(row.contains("Orphan Journal"));
        assert!(row.trim_start().starts_with('-'));
    }
}
