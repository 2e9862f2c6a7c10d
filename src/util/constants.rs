// JcrScope - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "JcrScope";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "JcrScope";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Source dataset layout
// =============================================================================

/// Separator between subject-area tags in the raw Areas column.
pub const AREAS_SEPARATOR: &str = "; ";

/// Default header of the journal name column.
pub const DEFAULT_JOURNAL_COLUMN: &str = "Journal Name";

/// Default header of the impact factor column.
pub const DEFAULT_IMPACT_FACTOR_COLUMN: &str = "JIF 2024";

/// Default header of the quartile column.
pub const DEFAULT_QUARTILE_COLUMN: &str = "JIF Quartile";

/// Default header of the publisher column.
pub const DEFAULT_PUBLISHER_COLUMN: &str = "Publisher";

/// Default header of the country column.
pub const DEFAULT_COUNTRY_COLUMN: &str = "Country";

/// Default header of the subject areas column.
pub const DEFAULT_AREAS_COLUMN: &str = "Areas";

/// Default header of the rank column.
pub const DEFAULT_RANK_COLUMN: &str = "Rank";

/// Default header of the JCR year column.
pub const DEFAULT_YEAR_COLUMN: &str = "JCR Year";

// =============================================================================
// Loading limits
// =============================================================================

/// Hard upper bound on the number of records held in memory.
///
/// The full JCR edition is roughly 22k journals; the cap leaves ample room
/// for merged editions while refusing pathological inputs.
pub const MAX_RECORDS: usize = 1_000_000;

/// Maximum number of per-row loader warnings retained. Further warnings are
/// counted but not stored.
pub const MAX_LOAD_WARNINGS: usize = 1_000;

// =============================================================================
// Display
// =============================================================================

/// Default number of rows printed by the table view.
pub const DEFAULT_ROW_LIMIT: usize = 50;

/// Minimum configurable row limit.
pub const MIN_ROW_LIMIT: usize = 1;

/// Maximum configurable row limit.
pub const MAX_ROW_LIMIT: usize = 100_000;

/// Width of the journal column in the table view, in characters.
pub const JOURNAL_COLUMN_WIDTH: usize = 50;

/// Decimal places used when rendering impact factors.
pub const IMPACT_FACTOR_DECIMALS: usize = 2;

// =============================================================================
// Export
// =============================================================================

/// Default maximum number of records in a single export.
pub const DEFAULT_MAX_EXPORT_RECORDS: usize = 500_000;

/// Hard upper bound on the configurable export limit.
pub const ABSOLUTE_MAX_EXPORT_RECORDS: usize = MAX_RECORDS;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// File names
// =============================================================================

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Dataset file picked up from the data directory when no path is given.
pub const DEFAULT_DATASET_FILE_NAME: &str = "jcr.csv";
