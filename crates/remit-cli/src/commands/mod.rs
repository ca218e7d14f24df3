//! Subcommands of the `remit` binary.

pub mod batch;
pub mod config;
pub mod inspect;
pub mod process;

use std::path::{Path, PathBuf};

use remit_core::RemitConfig;

/// Platform configuration file, e.g. `~/.config/remit/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("remit")
        .join("config.json")
}

/// The `--config` path if given, else the platform default.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration; a missing default file means built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RemitConfig> {
    let path = config_file(config_path);
    if path.exists() {
        return Ok(RemitConfig::from_file(&path)?);
    }
    if config_path.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    Ok(RemitConfig::default())
}

/// Only PDF inputs are accepted.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Check that an input exists and is a PDF.
pub fn ensure_pdf_input(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    if !is_pdf(path) {
        anyhow::bail!("File {} is not a PDF", path.display());
    }
    Ok(())
}
