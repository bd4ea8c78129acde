use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Routes tracing output to `path`; stdout belongs to the terminal UI.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_thread_names(true)
        .with_target(true)
        .with_ansi(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .wrap_err("failed to install tracing subscriber")?;
    Ok(())
}
