//! Media library commands

use std::path::PathBuf;
use super::{Context, Result, confirm};
use crate::AtelierError;
use crate::browse::MediaBrowser;
use crate::content::{CancelToken, ContentApi, ContentError, UploadReport, fetch_all_media, upload_all};
use crate::focal::{FocalPoint, FocalStore};
use crate::media::{MediaId, MediaItem, Quarter, YearKey, YearQuarterIndex};
use crate::output;

/// Load the whole library into a browser positioned on the requested tab
///
/// Without a year the newest tab is shown; with a year but no quarter, the
/// year's latest quarter.
///
/// # Errors
/// Returns an error if the library cannot be fetched or the tab is empty.
pub fn browse(
    api: &dyn ContentApi,
    page_size: usize,
    year: Option<YearKey>,
    quarter: Option<u8>,
    page: usize,
) -> Result<MediaBrowser> {
    let items = fetch_all_media(api, &CancelToken::new())?;
    let mut browser = MediaBrowser::new(items, page_size);

    if let Some(year) = year {
        browser.select_year(year)?;
    }
    if let Some(n) = quarter {
        let quarter = Quarter::from_number(n)
            .ok_or_else(|| AtelierError::InvalidInput(format!("Quarter must be 1-4, got {n}")))?;
        browser.select_quarter(quarter)?;
    }
    browser.go_to_page(page);
    Ok(browser)
}

/// Execute `media list`
///
/// # Errors
/// Returns an error if the library cannot be fetched or the tab is empty.
pub fn list(ctx: &Context<'_>, year: Option<YearKey>, quarter: Option<u8>, page: usize) -> Result<()> {
    let browser = browse(ctx.api, ctx.config.page_size, year, quarter, page)?;

    let Some(selected) = browser.selected_year() else {
        ctx.info("No media uploaded yet");
        return Ok(());
    };

    ctx.info(output::tab_heading(selected, browser.selected_quarter(), browser.year_total()));
    for item in browser.page_items() {
        println!(
            "{}",
            output::media_line(item, item.focal_point(), &ctx.config.cdn_base, ctx.quiet)
        );
    }
    ctx.info(output::page_footer(
        &browser.range_label(),
        browser.current_page(),
        browser.page_count(),
    ));
    Ok(())
}

/// Year tabs with per-quarter counts, newest year first
#[must_use]
pub fn periods_of(index: &YearQuarterIndex) -> Vec<(YearKey, Vec<(Quarter, usize)>, usize)> {
    index
        .years()
        .into_iter()
        .map(|year| {
            let quarters = match year {
                YearKey::Year(y) => index
                    .quarters(year)
                    .into_iter()
                    .map(|q| (q, index.bucket_len(y, q)))
                    .collect(),
                YearKey::Undated => Vec::new(),
            };
            (year, quarters, index.year_total(year))
        })
        .collect()
}

/// Execute `media periods`
///
/// # Errors
/// Returns an error if the library cannot be fetched.
pub fn periods(ctx: &Context<'_>) -> Result<()> {
    let items = fetch_all_media(ctx.api, &CancelToken::new())?;
    let index = YearQuarterIndex::build(items);
    if index.is_empty() {
        ctx.info("No media uploaded yet");
        return Ok(());
    }
    for (year, quarters, total) in periods_of(&index) {
        println!("{}", output::period_line(year, &quarters, total, ctx.quiet));
    }
    Ok(())
}

/// Execute `media upload`
///
/// Files are uploaded one at a time. A failing file is reported and the rest
/// still go up; the caller decides how to treat an incomplete report.
///
/// # Errors
/// Returns `AuthError::Forbidden` for non-admin sessions.
pub fn upload(ctx: &Context<'_>, files: &[PathBuf], no_compress: bool) -> Result<UploadReport> {
    ctx.auth.require_admin("Uploading media")?;

    let compression = (!no_compress).then_some(&ctx.config.compression);
    let report = upload_all(ctx.api, files, compression);

    for item in &report.uploaded {
        println!(
            "{}",
            output::media_line(item, item.focal_point(), &ctx.config.cdn_base, ctx.quiet)
        );
    }
    for failure in &report.failures {
        eprintln!("Error: {}: {}", failure.path.display(), failure.error);
    }
    ctx.info(output::upload_summary(&report));
    Ok(report)
}

/// Execute `media delete`
///
/// # Errors
/// Returns an error if the session is not an admin or the delete fails.
pub fn delete(ctx: &Context<'_>, id: &str, yes: bool) -> Result<()> {
    ctx.auth.require_admin("Deleting media")?;

    if !confirm(&format!("Delete media {id}?"), yes)? {
        ctx.info("Cancelled");
        return Ok(());
    }
    ctx.api.delete_media(&MediaId::from(id))?;
    ctx.info(format!("Deleted media {id}"));
    Ok(())
}

fn find_media(api: &dyn ContentApi, id: &MediaId) -> Result<MediaItem> {
    fetch_all_media(api, &CancelToken::new())?
        .into_iter()
        .find(|item| &item.id == id)
        .ok_or_else(|| {
            ContentError::NotFound {
                kind: "media",
                id: id.to_string(),
            }
            .into()
        })
}

/// Execute `media focal`
///
/// Values outside 0-100 are clamped. Returns the point that was saved.
///
/// # Errors
/// Returns an error if the session is not an admin, the media item does not
/// exist, or the update is rejected.
pub fn focal(ctx: &Context<'_>, id: &str, x: f64, y: f64) -> Result<FocalPoint> {
    ctx.auth.require_admin("Setting focal points")?;

    let id = MediaId::from(id);
    let item = find_media(ctx.api, &id)?;
    let point = FocalPoint::new(x, y);
    if (point.x(), point.y()) != (x, y) {
        tracing::info!(x, y, clamped = %point, "focal point clamped to image bounds");
    }

    let mut store = FocalStore::new();
    let saved = store.commit(ctx.api, &item.id, point)?;
    ctx.info(format!("Focal point for {id}: {saved}"));
    Ok(saved)
}
