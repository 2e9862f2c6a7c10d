// JcrScope - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::loader::ColumnMap;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for JcrScope configuration and data.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/jcrscope/ or %APPDATA%\JcrScope\config\)
    pub config_dir: PathBuf,

    /// Data directory; the fallback location of the dataset.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Dataset file used when neither the command line nor config names one.
    pub fn default_dataset(&self) -> PathBuf {
        self.data_dir.join(constants::DEFAULT_DATASET_FILE_NAME)
    }
}

/// Choose the dataset to load.
///
/// Priority: explicit path > `[data] csv_path` > the default dataset in the
/// data directory, if that file exists.
pub fn resolve_dataset_path(
    explicit: Option<&Path>,
    config: &AppConfig,
    paths: &PlatformPaths,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(ref path) = config.csv_path {
        return Ok(path.clone());
    }

    let default_path = paths.default_dataset();
    if default_path.is_file() {
        tracing::debug!(path = %default_path.display(), "Using dataset from data directory");
        Ok(default_path)
    } else {
        Err(ConfigError::NoDataset { default_path })
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so a newer config file still works
/// with an older binary.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[data]` section.
    pub data: DataSection,
    /// `[columns]` section.
    pub columns: ColumnsSection,
    /// `[display]` section.
    pub display: DisplaySection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Dataset used when no path is given on the command line.
    pub csv_path: Option<String>,
}

/// `[columns]` config section: source header overrides.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ColumnsSection {
    pub journal: Option<String>,
    pub impact_factor: Option<String>,
    pub quartile: Option<String>,
    pub publisher: Option<String>,
    pub country: Option<String>,
    pub areas: Option<String>,
    pub rank: Option<String>,
    pub year: Option<String>,
}

/// `[display]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Rows printed by the table view.
    pub row_limit: Option<usize>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Refuse exports larger than this.
    pub max_records: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default dataset path.
    pub csv_path: Option<PathBuf>,
    /// Source header names.
    pub columns: ColumnMap,
    /// Rows printed by the table view.
    pub row_limit: usize,
    /// Export cap.
    pub max_export_records: usize,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            columns: ColumnMap::default(),
            row_limit: constants::DEFAULT_ROW_LIMIT,
            max_export_records: constants::DEFAULT_MAX_EXPORT_RECORDS,
            log_level: None,
        }
    }
}

/// Read and parse config.toml without validating values.
pub fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Accept `value` if it lies in `min..=max`.
fn check_range(field: &str, value: usize, min: usize, max: usize) -> Result<usize, ConfigError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("{min}-{max}"),
        })
    }
}

fn apply_column(target: &mut String, value: Option<&String>) {
    if let Some(name) = value.map(|v| v.trim()).filter(|v| !v.is_empty()) {
        *target = name.to_string();
    }
}

/// Validate a parsed config, accumulating warnings for rejected values.
pub fn validate(raw: &RawConfig) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- Data: csv_path --
    if let Some(ref path) = raw.data.csv_path {
        if !path.trim().is_empty() {
            config.csv_path = Some(PathBuf::from(path.trim()));
        }
    }

    // -- Columns --
    let cols = &raw.columns;
    apply_column(&mut config.columns.journal, cols.journal.as_ref());
    apply_column(&mut config.columns.impact_factor, cols.impact_factor.as_ref());
    apply_column(&mut config.columns.quartile, cols.quartile.as_ref());
    apply_column(&mut config.columns.publisher, cols.publisher.as_ref());
    apply_column(&mut config.columns.country, cols.country.as_ref());
    apply_column(&mut config.columns.areas, cols.areas.as_ref());
    apply_column(&mut config.columns.rank, cols.rank.as_ref());
    apply_column(&mut config.columns.year, cols.year.as_ref());

    // -- Display: row_limit --
    if let Some(limit) = raw.display.row_limit {
        match check_range(
            "[display] row_limit",
            limit,
            constants::MIN_ROW_LIMIT,
            constants::MAX_ROW_LIMIT,
        ) {
            Ok(v) => config.row_limit = v,
            Err(e) => warnings.push(format!(
                "{e}. Using default ({}).",
                constants::DEFAULT_ROW_LIMIT
            )),
        }
    }

    // -- Export: max_records --
    if let Some(max) = raw.export.max_records {
        match check_range(
            "[export] max_records",
            max,
            1,
            constants::ABSOLUTE_MAX_EXPORT_RECORDS,
        ) {
            Ok(v) => config.max_export_records = v,
            Err(e) => warnings.push(format!(
                "{e}. Using default ({}).",
                constants::DEFAULT_MAX_EXPORT_RECORDS
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file is a normal first run: defaults, no warnings. An unreadable
/// or unparseable file yields defaults plus a warning; it never aborts startup.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let raw = match read_raw_config(&config_path) {
        Ok(raw) => raw,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, warnings) = validate(&raw);
    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }
    (config, warnings)
}
