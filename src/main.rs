//! Atelier CLI application entry point
//!
//! Admin tooling for the studio site: browse the media library by year and
//! quarter, upload and crop images, and curate runway show themes and
//! exhibitions.
//!
//! # Usage
//!
//! ```bash
//! # Newest quarter of the media library
//! atelier media list
//! atelier media list --year 2024 --quarter 2 --page 3
//!
//! # Upload images (downscaled and re-encoded unless --no-compress)
//! atelier media upload look-01.png look-02.png
//!
//! # Curate a theme
//! atelier show toggle spring-summer-25 Opening 42
//! atelier show move spring-summer-25 Opening 3 0
//!
//! # Work offline against a local store
//! atelier --local ./studio-db show list
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory
//! (`~/.config/atelier/config.toml` on Linux) and can be overridden with
//! `ATELIER_*` environment variables. Run `atelier config init` to create the
//! file interactively.

use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use atelier::{
    AtelierError,
    auth::SessionAuthorizer,
    cli::{Cli, Commands, ConfigCommands, ExhibitionCommands, MediaCommands, ShowCommands, ThemeCommands},
    commands::{self, Context, exhibition::VenueChanges},
    config::AtelierConfig,
    content::{
        ContentApi, ExhibitionDraft, ExhibitionPatch, HttpContentApi, ShowDraft, ShowPatch, Theme,
        Venue,
    },
    logging,
    store::LocalStore,
};

type Result<T> = std::result::Result<T, AtelierError>;

/// Open the backend commands run against: a local store when one is given
/// on the command line or configured, the site's API otherwise
fn open_backend(local: Option<PathBuf>, config: &AtelierConfig) -> Result<Box<dyn ContentApi>> {
    if let Some(path) = local.or_else(|| config.store_path.clone()) {
        tracing::debug!(path = %path.display(), "using local store");
        let store = LocalStore::open(&path)?.with_page_size(config.fetch_limit as usize);
        return Ok(Box::new(store));
    }
    tracing::debug!(base_url = %config.api.base_url, "using content API");
    Ok(Box::new(HttpContentApi::new(&config.api, config.fetch_limit)?))
}

fn handle_media_command(ctx: &Context<'_>, command: MediaCommands) -> Result<()> {
    match command {
        MediaCommands::List { year, quarter, page } => commands::media::list(ctx, year, quarter, page),
        MediaCommands::Periods => commands::media::periods(ctx),
        MediaCommands::Upload { files, no_compress } => {
            let report = commands::media::upload(ctx, &files, no_compress)?;
            if report.is_complete() {
                Ok(())
            } else {
                Err(AtelierError::InvalidInput(format!(
                    "{} of {} file(s) failed to upload",
                    report.failures.len(),
                    files.len()
                )))
            }
        }
        MediaCommands::Delete { id, yes } => commands::media::delete(ctx, &id, yes),
        MediaCommands::Focal { id, x, y } => commands::media::focal(ctx, &id, x, y).map(drop),
    }
}

fn handle_show_command(ctx: &Context<'_>, command: ShowCommands) -> Result<()> {
    match command {
        ShowCommands::List => commands::show::list(ctx),
        ShowCommands::Create { title, date, year, description, cover, slug, themes } => {
            let draft = ShowDraft {
                title,
                slug: slug.unwrap_or_default(),
                date,
                year,
                description,
                cover_image: cover.into(),
                themes: themes.into_iter().map(Theme::new).collect(),
            };
            commands::show::create(ctx, draft).map(drop)
        }
        ShowCommands::Edit { slug, title, new_slug, date, year, description, cover } => {
            let patch = ShowPatch {
                title,
                slug: new_slug,
                date,
                year,
                description,
                cover_image: cover.map(Into::into),
                themes: None,
            };
            commands::show::edit(ctx, &slug, patch).map(drop)
        }
        ShowCommands::Theme(command) => handle_theme_command(ctx, command),
        ShowCommands::Delete { id, yes } => commands::show::delete(ctx, &id, yes),
        ShowCommands::Photos { slug, theme } => {
            commands::show::photos(ctx, &slug, &theme).map(drop)
        }
        ShowCommands::Toggle { slug, theme, media_id } => {
            commands::show::toggle(ctx, &slug, &theme, &media_id).map(drop)
        }
        ShowCommands::Move { slug, theme, from, to } => {
            commands::show::move_photo(ctx, &slug, &theme, from, to).map(drop)
        }
        ShowCommands::Orient { slug, theme, index, orientation } => {
            commands::show::orient(ctx, &slug, &theme, index, orientation).map(drop)
        }
        ShowCommands::Remove { slug, theme, media_id } => {
            commands::show::remove(ctx, &slug, &theme, &media_id).map(drop)
        }
    }
}

fn handle_theme_command(ctx: &Context<'_>, command: ThemeCommands) -> Result<()> {
    match command {
        ThemeCommands::Add { slug, name } => commands::show::add_theme(ctx, &slug, &name).map(drop),
        ThemeCommands::Rename { slug, theme, new_name } => {
            commands::show::rename_theme(ctx, &slug, &theme, &new_name).map(drop)
        }
        ThemeCommands::Remove { slug, theme, yes } => {
            commands::show::remove_theme(ctx, &slug, &theme, yes).map(drop)
        }
    }
}

fn handle_exhibition_command(ctx: &Context<'_>, command: ExhibitionCommands) -> Result<()> {
    match command {
        ExhibitionCommands::List => commands::exhibition::list(ctx),
        ExhibitionCommands::Create {
            title,
            slug,
            date,
            time,
            year,
            venue_name,
            venue_address,
            venue_city,
            venue_description,
            description,
            cover,
            upcoming,
        } => {
            let draft = ExhibitionDraft {
                title,
                slug: slug.unwrap_or_default(),
                date,
                time,
                year,
                venue: Venue {
                    name: venue_name,
                    address: venue_address,
                    city: venue_city,
                    description: venue_description,
                },
                description,
                cover_image: cover.into(),
                is_upcoming: upcoming,
            };
            commands::exhibition::create(ctx, draft).map(drop)
        }
        ExhibitionCommands::Edit {
            id,
            title,
            slug,
            date,
            time,
            year,
            venue_name,
            venue_address,
            venue_city,
            venue_description,
            description,
            cover,
            upcoming,
        } => {
            let patch = ExhibitionPatch {
                title,
                slug,
                date,
                time,
                year,
                venue: None,
                description,
                cover_image: cover.map(Into::into),
                is_upcoming: upcoming.map(|state| state.is_on()),
            };
            let venue = VenueChanges {
                name: venue_name,
                address: venue_address,
                city: venue_city,
                description: venue_description,
            };
            commands::exhibition::edit(ctx, &id, patch, &venue).map(drop)
        }
        ExhibitionCommands::Delete { id, yes } => commands::exhibition::delete(ctx, &id, yes),
        ExhibitionCommands::Upcoming { id, state } => {
            commands::exhibition::set_upcoming(ctx, &id, state.is_on()).map(drop)
        }
    }
}

fn handle_config_command(config: &AtelierConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => commands::config::show(config),
        ConfigCommands::Path => commands::config::path(),
        ConfigCommands::Init => commands::config::init(quiet),
    }
}

/// Open the backend, build the session's authorizer and run `f` with both
fn with_context<F>(local: Option<PathBuf>, config: &AtelierConfig, quiet: bool, f: F) -> Result<()>
where
    F: FnOnce(&Context<'_>) -> Result<()>,
{
    let api = open_backend(local, config)?;
    let auth = SessionAuthorizer::new(config.allowlist(), config.identity.clone());
    f(&Context {
        api: api.as_ref(),
        auth: &auth,
        config,
        quiet,
    })
}

fn run(cli: Cli) -> Result<()> {
    if !cli.loads_config() {
        logging::init(cli.verbose, None);
        return commands::config::init(cli.quiet);
    }

    let config = AtelierConfig::load()?;
    logging::init(cli.verbose, config.log_level.as_deref());
    let quiet = cli.quiet || config.quiet;
    let local = cli.local;

    match cli.command {
        Commands::Config(command) => handle_config_command(&config, &command, quiet),
        Commands::Media(command) => {
            with_context(local, &config, quiet, |ctx| handle_media_command(ctx, command))
        }
        Commands::Show(command) => {
            with_context(local, &config, quiet, |ctx| handle_show_command(ctx, command))
        }
        Commands::Exhibition(command) => {
            with_context(local, &config, quiet, |ctx| handle_exhibition_command(ctx, command))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
