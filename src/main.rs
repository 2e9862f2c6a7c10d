// JcrScope - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Dataset loading
// 4. Applying the filters given on the command line, then printing the
//    table, facet lists, or writing an export

mod table;

use clap::{Parser, ValueEnum};
use jcrscope::app::dataset::Dataset;
use jcrscope::app::session::Session;
use jcrscope::core::export::{self, ExportFormat};
use jcrscope::platform::config::{self, PlatformPaths};
use jcrscope::util;
use std::path::PathBuf;
use std::sync::Arc;

/// Export format selector for `--format`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// JcrScope - explore journal impact factors.
///
/// Loads a JCR-style CSV and lists the journals matching every filter
/// given. Multi-value options may be repeated; within one option any value
/// matches, across options all must match.
#[derive(Parser, Debug)]
#[command(name = "JcrScope", version, about)]
struct Cli {
    /// Dataset CSV (defaults to [data] csv_path from config.toml).
    path: Option<PathBuf>,

    /// Case-insensitive substring of the journal name.
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Lower impact factor bound (inclusive).
    #[arg(long = "min-if")]
    min_if: Option<f64>,

    /// Upper impact factor bound (inclusive).
    #[arg(long = "max-if")]
    max_if: Option<f64>,

    /// Quartile to include (repeatable).
    #[arg(short = 'q', long = "quartile")]
    quartiles: Vec<String>,

    /// Publisher to include (repeatable).
    #[arg(short = 'p', long = "publisher")]
    publishers: Vec<String>,

    /// Country to include (repeatable).
    #[arg(short = 'c', long = "country")]
    countries: Vec<String>,

    /// Subject area; journals with any listed area match (repeatable).
    #[arg(short = 'a', long = "area")]
    areas: Vec<String>,

    /// Print the selectable values of every filter instead of the table.
    #[arg(long = "facets")]
    facets: bool,

    /// Maximum number of rows to print.
    #[arg(short = 'n', long = "limit")]
    limit: Option<usize>,

    /// Write the filtered journals to this file.
    #[arg(short = 'o', long = "export")]
    export: Option<PathBuf>,

    /// Export format (guessed from the file extension if omitted).
    #[arg(long = "format", value_enum, requires = "export")]
    format: Option<FormatArg>,

    /// Directory containing config.toml.
    #[arg(long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform_paths.config_dir.clone());
    let (app_config, config_warnings) = config::load_config(&config_dir);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "JcrScope starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Err(e) = run(&cli, &app_config, &platform_paths) {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(
    cli: &Cli,
    app_config: &config::AppConfig,
    platform_paths: &PlatformPaths,
) -> util::error::Result<()> {
    let path = config::resolve_dataset_path(cli.path.as_deref(), app_config, platform_paths)?;

    let (dataset, load_warnings) = Dataset::load(&path, &app_config.columns)?;
    for warning in &load_warnings {
        tracing::warn!(warning = %warning, "Load warning");
    }

    let mut session = Session::new(Arc::new(dataset));

    if cli.facets {
        table::print_facets(session.facets());
        return Ok(());
    }

    apply_cli_filters(cli, &mut session);

    let result = session.query();

    if let Some(ref export_path) = cli.export {
        let format = cli
            .format
            .map(ExportFormat::from)
            .unwrap_or_else(|| ExportFormat::from_path(export_path));
        let count = export::export_to_file(
            &result.records,
            export_path,
            format,
            app_config.max_export_records,
        )?;
        println!("Exported {count} journals to {}", export_path.display());
    } else {
        let limit = cli.limit.unwrap_or(app_config.row_limit);
        table::print_records(&result.records, limit);
    }

    println!("{}", result.summary());
    Ok(())
}

/// Translate command-line options into session mutations.
fn apply_cli_filters(cli: &Cli, session: &mut Session) {
    if let Some(ref term) = cli.search {
        session.set_search(term.as_str());
    }

    if cli.min_if.is_some() || cli.max_if.is_some() {
        if let Some(current) = session.filter().impact_range {
            let min = cli.min_if.unwrap_or(current.min);
            let max = cli.max_if.unwrap_or(current.max);
            session.set_impact_range(min, max);
        }
    }

    session.set_quartiles(cli.quartiles.iter().map(String::as_str));
    session.set_publishers(cli.publishers.iter().map(String::as_str));
    session.set_countries(cli.countries.iter().map(String::as_str));
    session.set_areas(cli.areas.iter().map(String::as_str));

    tracing::debug!(filter = ?session.filter(), "Filters applied from command line");
}
