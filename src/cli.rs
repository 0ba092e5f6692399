//! Command-line interface definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use crate::media::YearKey;
use crate::selection::Orientation;

/// Parse a year tab: four digits or `undated`
fn parse_year(raw: &str) -> Result<YearKey, String> {
    YearKey::parse(raw).ok_or_else(|| format!("expected a year like 2024 or 'undated', got '{raw}'"))
}

#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(about = "Admin toolkit for a fashion studio's media library, runway shows and exhibitions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Work against a local document store at PATH instead of the site
    #[arg(long = "local", value_name = "PATH", global = true)]
    pub local: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Whether the command reads the configuration file
    ///
    /// `config init` writes a fresh file and must work when the existing one
    /// no longer parses.
    #[must_use]
    pub const fn loads_config(&self) -> bool {
        !matches!(self.command, Commands::Config(ConfigCommands::Init))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse and manage the media library
    #[command(subcommand, visible_alias = "m")]
    Media(MediaCommands),

    /// Manage runway shows and their theme photo sequences
    #[command(subcommand)]
    Show(ShowCommands),

    /// Manage exhibitions
    #[command(subcommand, visible_alias = "ex")]
    Exhibition(ExhibitionCommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug, Clone)]
pub enum MediaCommands {
    /// List one page of a year/quarter tab (newest quarter by default)
    #[command(visible_alias = "ls")]
    List {
        /// Year tab, e.g. 2024, or 'undated'
        #[arg(long, value_parser = parse_year)]
        year: Option<YearKey>,

        /// Quarter within the year (1 = Jan – Mar ... 4 = Oct – Dec)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        quarter: Option<u8>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show the years and quarters that have media, with counts
    Periods,

    /// Upload image files, one at a time
    Upload {
        /// Files to upload
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Upload the files as they are, without downscaling or re-encoding
        #[arg(long = "no-compress")]
        no_compress: bool,
    },

    /// Delete a media item
    #[command(visible_alias = "rm")]
    Delete {
        /// Media id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Set the focal point of an image, in percent from the top left
    #[command(allow_negative_numbers = true)]
    Focal {
        /// Media id
        id: String,

        /// Horizontal position (clamped to 0-100)
        x: f64,

        /// Vertical position (clamped to 0-100)
        y: f64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShowCommands {
    /// List runway shows, newest year first
    #[command(visible_alias = "ls")]
    List,

    /// Create a runway show with empty themes
    Create {
        #[arg(long)]
        title: String,

        /// Display date, e.g. "September 15, 2024"
        #[arg(long)]
        date: String,

        #[arg(long)]
        year: i32,

        #[arg(long)]
        description: String,

        /// Media id of the cover image
        #[arg(long = "cover", value_name = "MEDIA_ID")]
        cover: String,

        /// URL slug (derived from the title when omitted)
        #[arg(long)]
        slug: Option<String>,

        /// Theme name; repeat for several themes
        #[arg(long = "theme", value_name = "NAME", required = true)]
        themes: Vec<String>,
    },

    /// Change a runway show's fields; only the options given are sent
    Edit {
        /// Show slug
        slug: String,

        #[arg(long)]
        title: Option<String>,

        /// New URL slug
        #[arg(long = "slug", value_name = "NEW_SLUG")]
        new_slug: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        description: Option<String>,

        /// Media id of the cover image
        #[arg(long = "cover", value_name = "MEDIA_ID")]
        cover: Option<String>,
    },

    /// Add, rename or remove a show's themes
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Delete a runway show
    #[command(visible_alias = "rm")]
    Delete {
        /// Show id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Print a theme's photo sequence
    Photos {
        /// Show slug
        slug: String,

        /// Theme name
        theme: String,
    },

    /// Add a photo to the end of a theme, or take it out if already there
    Toggle {
        slug: String,
        theme: String,
        media_id: String,
    },

    /// Move the photo at position FROM to position TO (0-based)
    Move {
        slug: String,
        theme: String,
        from: usize,
        to: usize,
    },

    /// Set the orientation of the photo at INDEX (0-based)
    Orient {
        slug: String,
        theme: String,
        index: usize,

        /// horizontal or vertical
        orientation: Orientation,
    },

    /// Remove a photo from a theme
    Remove {
        slug: String,
        theme: String,
        media_id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ThemeCommands {
    /// Append an empty theme
    Add {
        /// Show slug
        slug: String,

        /// Theme name
        name: String,
    },

    /// Rename a theme, keeping its photos
    Rename {
        slug: String,
        theme: String,
        new_name: String,
    },

    /// Remove a theme and its photo sequence (a show keeps at least one)
    #[command(visible_alias = "rm")]
    Remove {
        slug: String,
        theme: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExhibitionCommands {
    /// List exhibitions, upcoming first
    #[command(visible_alias = "ls")]
    List,

    /// Create an exhibition
    Create {
        #[arg(long)]
        title: String,

        /// URL slug (derived from the title when omitted)
        #[arg(long)]
        slug: Option<String>,

        /// Display date, e.g. "March 3, 2025"
        #[arg(long)]
        date: String,

        /// Display time, e.g. "18:00 – 21:00"
        #[arg(long)]
        time: String,

        #[arg(long)]
        year: i32,

        #[arg(long = "venue-name")]
        venue_name: String,

        #[arg(long = "venue-address")]
        venue_address: String,

        #[arg(long = "venue-city")]
        venue_city: String,

        #[arg(long = "venue-description")]
        venue_description: String,

        #[arg(long)]
        description: String,

        /// Media id of the cover image
        #[arg(long = "cover", value_name = "MEDIA_ID")]
        cover: String,

        /// Mark the exhibition as upcoming
        #[arg(long)]
        upcoming: bool,
    },

    /// Delete an exhibition
    #[command(visible_alias = "rm")]
    Delete {
        /// Exhibition id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Change an exhibition's fields; only the options given are sent
    Edit {
        /// Exhibition id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long = "venue-name")]
        venue_name: Option<String>,

        #[arg(long = "venue-address")]
        venue_address: Option<String>,

        #[arg(long = "venue-city")]
        venue_city: Option<String>,

        #[arg(long = "venue-description")]
        venue_description: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Media id of the cover image
        #[arg(long = "cover", value_name = "MEDIA_ID")]
        cover: Option<String>,

        /// Flag as upcoming (on) or not (off)
        #[arg(long)]
        upcoming: Option<Switch>,
    },

    /// Flag an exhibition as upcoming or not
    Upcoming {
        /// Exhibition id
        id: String,

        state: Switch,
    },
}

/// On/off argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Run the interactive setup and write the configuration file
    Init,
}
