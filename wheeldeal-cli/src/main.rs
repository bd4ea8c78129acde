//! `wheeldeal`: terminal fleet console for a car-rental REST store.
//!
//! Runs the admin console by default; `--public` opens the read-only listing.
//! Logs go to a file because the terminal is owned by the UI.

mod logging;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Report, Result, WrapErr};

use wheeldeal::{
    AvailabilityFilter, ConsoleMode, DEFAULT_API_URL, FleetConsole, HttpCarStore, UiOptions,
    ViewMode,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Cards,
    Table,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Cards => ViewMode::Cards,
            ViewArg::Table => ViewMode::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Available,
    Unavailable,
}

impl From<FilterArg> for AvailabilityFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => AvailabilityFilter::All,
            FilterArg::Available => AvailabilityFilter::Available,
            FilterArg::Unavailable => AvailabilityFilter::Unavailable,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wheeldeal",
    version,
    about = "Browse and manage a car-rental fleet from the terminal"
)]
struct Cli {
    /// Base URL of the car store; cars live under <URL>/cars
    #[arg(long = "api-url", env = "WHEELDEAL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Admin capability token, sent as a bearer token on every request
    #[arg(long = "token", env = "WHEELDEAL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Read-only listing without add, update or delete
    #[arg(long = "public")]
    public: bool,

    /// Initial listing renderer
    #[arg(long = "view", env = "WHEELDEAL_VIEW", value_enum, default_value = "cards")]
    view: ViewArg,

    /// Initial availability filter
    #[arg(long = "filter", value_enum, default_value = "all")]
    filter: FilterArg,

    /// HTTP timeout per request, in seconds
    #[arg(long = "timeout-secs", env = "WHEELDEAL_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Title shown in the header
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Replacement keymap (JSON, same layout as the built-in one)
    #[arg(long = "keymap", value_name = "FILE")]
    keymap: Option<PathBuf>,

    /// Hide the key help line
    #[arg(long = "no-help")]
    no_help: bool,

    /// Log file; RUST_LOG controls the level
    #[arg(long = "log-file", env = "WHEELDEAL_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Disable file logging; overrides --log-file and WHEELDEAL_LOG_FILE
    #[arg(long = "no-log")]
    no_log: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if !cli.no_log {
        let path = cli
            .log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("wheeldeal.log"));
        logging::init_file_logging(&path)?;
    }

    let mode = if cli.public {
        ConsoleMode::Public
    } else {
        ConsoleMode::Admin
    };
    if mode == ConsoleMode::Admin && cli.token.is_none() {
        tracing::warn!("admin console started without a token; the store may reject mutations");
    }

    let store = HttpCarStore::builder(cli.api_url.clone())
        .timeout(Duration::from_secs(cli.timeout_secs))
        .token(cli.token.clone())
        .build()
        .wrap_err("failed to build the HTTP client")?;

    let mut options = UiOptions::default()
        .with_view(cli.view.into())
        .with_filter(cli.filter.into())
        .with_help(!cli.no_help);
    if let Some(path) = cli.keymap.as_ref() {
        let source = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read keymap {}", path.display()))?;
        options = options.with_keymap_json(&source).map_err(Report::msg)?;
    }

    let mut console = FleetConsole::new(store)
        .with_mode(mode)
        .with_options(options)
        .with_source_label(cli.api_url.clone());
    if let Some(title) = cli.title.as_ref() {
        console = console.with_title(title.clone());
    }

    console.run().map_err(Report::msg)?;
    Ok(())
}
