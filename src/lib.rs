//! Atelier - admin toolkit for a fashion studio portfolio
//!
//! This library covers the admin side of the studio site: the media library
//! grouped into year and quarter tabs, ordered photo sequences for runway show
//! themes, focal points for image cropping, and the content API the site's
//! documents live behind (over HTTP or in an embedded local store).

use thiserror::Error;

pub mod auth;
pub mod browse;
pub mod cli;
pub mod commands;
pub mod config;
pub mod content;
pub mod focal;
pub mod logging;
pub mod media;
pub mod output;
pub mod pagination;
pub mod selection;
pub mod store;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AtelierError {
    /// Content API error
    #[error("Content API error: {0}")]
    Content(#[from] content::ContentError),
    /// A record failed validation before it was sent
    #[error("Invalid record: {0}")]
    Validation(#[from] content::ValidationError),
    /// Local store error
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
    /// Photo sequence edit error
    #[error("{0}")]
    Selection(#[from] selection::SelectionError),
    /// Focal point could not be saved
    #[error("{0}")]
    Focal(#[from] focal::FocalError),
    /// The session may not perform an admin action
    #[error("{0}")]
    Auth(#[from] auth::AuthError),
    /// Requested tab does not exist
    #[error("{0}")]
    Browse(#[from] browse::BrowseError),
    /// Image could not be prepared for upload
    #[error("Image error: {0}")]
    Compress(#[from] media::CompressError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
