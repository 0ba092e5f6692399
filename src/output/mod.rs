//! Output formatting for CLI display
//!
//! Every function returns the line to print. In quiet mode only the
//! identifying value (id or slug) is returned so output can be piped.

use byte_unit::{Byte, UnitType};
use colored::Colorize;
use crate::content::{Exhibition, RunwayShow, UploadReport};
use crate::focal::FocalPoint;
use crate::media::{MediaItem, Quarter, YearKey};
use crate::selection::ThemePhoto;

/// Human-readable byte size, binary units
#[must_use]
pub fn format_size(bytes: u64) -> String {
    Byte::from_u64(bytes)
        .get_appropriate_unit(UnitType::Binary)
        .to_string()
}

/// One media item of a listing page
#[must_use]
pub fn media_line(item: &MediaItem, focal: FocalPoint, cdn_base: &str, quiet: bool) -> String {
    if quiet {
        return item.id.to_string();
    }
    let name = if item.filename.is_empty() { &item.alt } else { &item.filename };
    let size = if item.filesize == 0 {
        String::from("-")
    } else {
        format_size(item.filesize)
    };
    format!(
        "  {:>6}  {}  {}  {}  {}",
        item.id.as_str().yellow(),
        name,
        size.dimmed(),
        focal.to_string().cyan(),
        item.resolved_url(cdn_base).dimmed()
    )
}

/// Heading shown above a listing page
#[must_use]
pub fn tab_heading(year: YearKey, quarter: Option<Quarter>, year_total: usize) -> String {
    let tab = quarter.map_or_else(|| year.to_string(), |q| format!("{year} · {q}"));
    format!("{} ({year_total} in {year})", tab.bold())
}

/// Footer under a listing page
#[must_use]
pub fn page_footer(range: &str, current: usize, count: usize) -> String {
    format!("{range}  (page {current} of {})", count.max(1)).dimmed().to_string()
}

/// One year tab with its non-empty quarters and counts
#[must_use]
pub fn period_line(year: YearKey, quarters: &[(Quarter, usize)], total: usize, quiet: bool) -> String {
    if quiet {
        return year.to_string();
    }
    if quarters.is_empty() {
        return format!("  {}  {total}", year.to_string().bold());
    }
    let parts: Vec<String> = quarters
        .iter()
        .map(|(quarter, count)| format!("{quarter}: {count}"))
        .collect();
    format!("  {}  {total}  [{}]", year.to_string().bold(), parts.join(", "))
}

/// One entry of a theme's photo sequence; `item` is `None` for a reference
/// to media that no longer exists
#[must_use]
pub fn photo_line(position: usize, photo: &ThemePhoto, item: Option<&MediaItem>, quiet: bool) -> String {
    if quiet {
        return photo.photo.to_string();
    }
    let hero = if position == 0 { " hero".magenta().to_string() } else { String::new() };
    match item {
        Some(item) => {
            let name = if item.filename.is_empty() { &item.alt } else { &item.filename };
            format!(
                "  {position:>3}. {} {name} ({}){hero}",
                photo.photo.as_str().yellow(),
                photo.orientation
            )
        }
        None => format!(
            "  {position:>3}. {} {}",
            photo.photo.as_str().yellow(),
            "(missing)".red()
        ),
    }
}

/// One runway show of a listing
#[must_use]
pub fn show_line(show: &RunwayShow, quiet: bool) -> String {
    if quiet {
        return show.slug.clone();
    }
    let themes: Vec<String> = show
        .themes
        .iter()
        .map(|theme| format!("{} ({})", theme.name, theme.photos.len()))
        .collect();
    format!(
        "  {:>4}  {} [{}]  id {}  {}",
        show.year,
        show.title.bold(),
        show.slug,
        show.id,
        themes.join(", ").dimmed()
    )
}

/// One exhibition of a listing
#[must_use]
pub fn exhibition_line(exhibition: &Exhibition, quiet: bool) -> String {
    if quiet {
        return exhibition.slug.clone();
    }
    let status = if exhibition.is_upcoming {
        "upcoming".green().to_string()
    } else {
        "past".dimmed().to_string()
    };
    format!(
        "  {:>4}  {} [{}]  id {}  {}, {}  {status}",
        exhibition.year,
        exhibition.title.bold(),
        exhibition.slug,
        exhibition.id,
        exhibition.date,
        exhibition.venue.city
    )
}

/// Summary printed after an upload run
#[must_use]
pub fn upload_summary(report: &UploadReport) -> String {
    let mut summary = format!(
        "Uploaded {} file(s), saved {}",
        report.uploaded.len(),
        format_size(report.bytes_saved)
    );
    if !report.is_complete() {
        summary.push_str(&format!(", {} failed", report.failures.len()).red().to_string());
    }
    summary
}
