//! Configuration commands

use super::Result;
use crate::AtelierError;
use crate::config::{AtelierConfig, first_time_setup};

const REDACTED: &str = "********";

/// The configuration as TOML, with the API token masked
///
/// # Errors
/// Returns `AtelierError::InvalidInput` if the configuration cannot be
/// serialized.
pub fn render(config: &AtelierConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.api.token.is_some() {
        shown.api.token = Some(REDACTED.to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| AtelierError::InvalidInput(format!("Failed to serialize config: {e}")))
}

/// Execute `config show`
///
/// # Errors
/// Returns an error if the configuration cannot be serialized.
pub fn show(config: &AtelierConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

/// Execute `config path`
///
/// # Errors
/// Returns an error if the config directory cannot be determined.
pub fn path() -> Result<()> {
    println!("{}", AtelierConfig::config_path()?.display());
    Ok(())
}

/// Execute `config init`
///
/// # Errors
/// Returns an error if input cannot be read or the file cannot be written.
pub fn init(quiet: bool) -> Result<()> {
    let config = first_time_setup()?;
    if !quiet {
        println!("Wrote {}", AtelierConfig::config_path()?.display());
        println!("Admins: {}", config.allowlist().len());
    }
    Ok(())
}
