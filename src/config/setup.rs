//! Interactive setup wizard for first-time configuration
//!
//! Asks for the site the admin works against and who they are, then writes
//! the configuration file.

use super::AtelierConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};

fn prompt(label: &str, default: String, allow_empty: bool) -> Result<String, ConfigError> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .default(default)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))
}

/// Interactive first-time setup
///
/// Prompts for:
/// 1. the site URL (default: `http://localhost:3000`)
/// 2. the admin's email address
/// 3. the comma-separated admin allowlist (default: that email)
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup() -> Result<AtelierConfig, ConfigError> {
    println!("Welcome to atelier! Let's connect to your studio site.\n");

    let mut config = AtelierConfig::default();

    config.api.base_url = prompt("Site URL", config.api.base_url.clone(), false)?;

    let identity = prompt("Your email", String::new(), true)?;
    let allowlist = prompt("Admin emails (comma-separated)", identity.clone(), true)?;

    config.identity = Some(identity).filter(|email| !email.trim().is_empty());
    config.admin_emails = allowlist;

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
