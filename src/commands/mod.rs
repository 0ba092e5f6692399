//! Command implementations
//!
//! Each command group is a module of functions that take the parsed CLI
//! arguments and run the operation against a [`Context`]. Mutating commands
//! ask the context's [`Authorizer`] first and fail with
//! `AuthError::Forbidden` before touching anything.

pub mod config;
pub mod exhibition;
pub mod media;
pub mod show;

use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use crate::AtelierError;
use crate::auth::Authorizer;
use crate::config::AtelierConfig;
use crate::content::ContentApi;

type Result<T> = std::result::Result<T, AtelierError>;

/// Everything a command needs besides its own arguments
pub struct Context<'a> {
    pub api: &'a dyn ContentApi,
    pub auth: &'a dyn Authorizer,
    pub config: &'a AtelierConfig,
    pub quiet: bool,
}

impl Context<'_> {
    /// Print an informational line unless quiet
    fn info(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }
}

/// Ask for yes/no confirmation; `assume_yes` skips the prompt
///
/// # Errors
/// Returns `AtelierError::Prompt` if the terminal cannot be read.
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
