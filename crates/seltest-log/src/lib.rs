// ABOUTME: Shared logging setup for the seltest binaries
// ABOUTME: init() for CLI subcommands, init_file() for the wizard TUI, init_for() for scoped output

use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Directory under the user config dir that holds all seltest state.
pub const APP_DIR: &str = "seltest";

/// Standard logging to stderr. Default: INFO level, RUST_LOG override.
/// Used by the non-interactive subcommands.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// File-based logging for the wizard. Default: WARN level, RUST_LOG override.
/// Logs to ~/.config/seltest/{app_name}/{app_name}.log so nothing is written
/// over the alternate screen. On failure a warning goes to stderr and the
/// wizard runs without logging.
pub fn init_file(app_name: &str) {
    let result = dirs::config_dir()
        .ok_or_else(|| "could not determine config directory".into())
        .and_then(|dir| init_file_in(&dir.join(APP_DIR), app_name));
    if let Err(e) = result {
        eprintln!("Warning: failed to set up file logging: {e}");
    }
}

/// Path of the log file `init_file` writes for `app_name` under `base`.
pub fn log_path(base: &Path, app_name: &str) -> PathBuf {
    base.join(app_name).join(format!("{app_name}.log"))
}

fn init_file_in(
    base: &Path,
    app_name: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let path = log_path(base, app_name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_ansi(false)
        .try_init()?;

    Ok(())
}

/// Crate-filtered logging to stderr. Default: INFO for the named crate, WARN for everything else.
pub fn init_for(crate_name: &str) {
    let directive = format!("{crate_name}=info");
    let filter = EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into())
        .add_directive(
            directive
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        );

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
