//! Runway show commands
//!
//! Theme edits load the show, change its theme list or one theme's
//! [`PhotoSequence`] and send the full theme list back as a partial update.

use std::collections::HashMap;
use super::{Context, Result, confirm};
use crate::AtelierError;
use crate::content::{
    CancelToken, ContentApi, ContentError, RecordId, RunwayShow, ShowDraft, ShowPatch, Theme,
    fetch_all_media,
};
use crate::media::{MediaId, MediaItem};
use crate::output;
use crate::selection::{Orientation, PhotoSequence, resolve};

/// Execute `show list`
///
/// # Errors
/// Returns an error if the shows cannot be fetched.
pub fn list(ctx: &Context<'_>) -> Result<()> {
    let shows = ctx.api.list_shows()?;
    if shows.is_empty() {
        ctx.info("No runway shows yet");
    }
    for show in &shows {
        println!("{}", output::show_line(show, ctx.quiet));
    }
    Ok(())
}

/// Execute `show create`
///
/// # Errors
/// Returns an error if the session is not an admin, the draft is invalid, or
/// the content API rejects it.
pub fn create(ctx: &Context<'_>, draft: ShowDraft) -> Result<RunwayShow> {
    ctx.auth.require_admin("Creating runway shows")?;
    let draft = draft.normalize()?;
    let show = ctx.api.create_show(&draft)?;
    ctx.info(format!("Created runway show {} ({}) with id {}", show.title, show.slug, show.id));
    Ok(show)
}

/// Execute `show delete`
///
/// # Errors
/// Returns an error if the session is not an admin or the delete fails.
pub fn delete(ctx: &Context<'_>, id: &str, yes: bool) -> Result<()> {
    ctx.auth.require_admin("Deleting runway shows")?;
    if !confirm(&format!("Delete runway show {id}?"), yes)? {
        ctx.info("Cancelled");
        return Ok(());
    }
    ctx.api.delete_show(&RecordId::from(id))?;
    ctx.info(format!("Deleted runway show {id}"));
    Ok(())
}

/// Execute `show edit`: send only the supplied fields
///
/// # Errors
/// Returns an error if the session is not an admin, nothing is supplied, a
/// supplied field is blank, the new slug is taken, or the update fails.
pub fn edit(ctx: &Context<'_>, slug: &str, patch: ShowPatch) -> Result<RunwayShow> {
    ctx.auth.require_admin("Editing runway shows")?;
    if patch.is_empty() {
        return Err(AtelierError::InvalidInput("Nothing to change".to_string()));
    }
    patch.validate()?;

    let show = ctx.api.find_show(slug)?;
    let updated = ctx.api.update_show(&show.id, &patch)?;
    tracing::info!(show = %updated.id, slug = %updated.slug, "runway show edited");
    ctx.info(format!("Updated runway show {} ({})", updated.title, updated.slug));
    Ok(updated)
}

fn theme_not_found(slug: &str, theme: &str) -> ContentError {
    ContentError::NotFound {
        kind: "theme",
        id: format!("{slug}/{theme}"),
    }
}

/// Execute `show photos`
///
/// Prints the sequence with each photo resolved against the media library.
/// Returns the ids that no longer resolve.
///
/// # Errors
/// Returns an error if the show, theme or media library cannot be loaded.
pub fn photos(ctx: &Context<'_>, slug: &str, theme: &str) -> Result<Vec<MediaId>> {
    let show = ctx.api.find_show(slug)?;
    let theme = show.theme(theme).ok_or_else(|| theme_not_found(slug, theme))?;
    let media = fetch_all_media(ctx.api, &CancelToken::new())?;

    let resolution = resolve(&theme.photos, &media);
    let found: HashMap<&MediaId, &MediaItem> = resolution
        .photos
        .iter()
        .map(|(photo, item)| (&photo.photo, *item))
        .collect();

    if theme.photos.is_empty() {
        ctx.info(format!("{} has no photos yet", theme.name));
    }
    for (position, photo) in theme.photos.iter().enumerate() {
        println!(
            "{}",
            output::photo_line(position, photo, found.get(&photo.photo).copied(), ctx.quiet)
        );
    }
    if !resolution.is_complete() && !ctx.quiet {
        eprintln!(
            "Warning: {} photo(s) reference media that no longer exists",
            resolution.dangling.len()
        );
    }
    Ok(resolution.dangling)
}

/// Load a show, run `edit` on its theme list and save it
///
/// `edit` returns whether it changed anything; unchanged lists are not sent.
fn edit_themes<F>(ctx: &Context<'_>, action: &str, slug: &str, edit: F) -> Result<RunwayShow>
where
    F: FnOnce(&mut Vec<Theme>) -> Result<bool>,
{
    ctx.auth.require_admin(action)?;

    let mut show = ctx.api.find_show(slug)?;
    if !edit(&mut show.themes)? {
        return Ok(show);
    }

    let patch = ShowPatch::themes(std::mem::take(&mut show.themes));
    patch.validate()?;
    let updated = ctx.api.update_show(&show.id, &patch)?;
    tracing::info!(show = %updated.slug, themes = updated.themes.len(), "themes updated");
    Ok(updated)
}

/// Like [`edit_themes`], for one theme's photo sequence
fn edit_theme<F>(ctx: &Context<'_>, action: &str, slug: &str, theme: &str, edit: F) -> Result<RunwayShow>
where
    F: FnOnce(&mut PhotoSequence) -> Result<bool>,
{
    edit_themes(ctx, action, slug, |themes| {
        let target = themes
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(theme))
            .ok_or_else(|| theme_not_found(slug, theme))?;
        edit(&mut target.photos)
    })
}

/// Execute `show theme add`: append an empty theme
///
/// # Errors
/// Returns `ValidationError::DuplicateTheme` if the show already has a theme
/// of that name, or an error if loading or saving the show fails.
pub fn add_theme(ctx: &Context<'_>, slug: &str, name: &str) -> Result<RunwayShow> {
    let name = name.trim();
    let show = edit_themes(ctx, "Editing runway shows", slug, |themes| {
        themes.push(Theme::new(name));
        Ok(true)
    })?;
    ctx.info(format!("Added theme {name} to {}", show.slug));
    Ok(show)
}

/// Execute `show theme rename`; the photo sequence is kept
///
/// # Errors
/// Returns an error if the theme does not exist, the new name is blank or
/// taken, or loading or saving the show fails.
pub fn rename_theme(ctx: &Context<'_>, slug: &str, theme: &str, new_name: &str) -> Result<RunwayShow> {
    let new_name = new_name.trim();
    let show = edit_themes(ctx, "Editing runway shows", slug, |themes| {
        let target = themes
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(theme))
            .ok_or_else(|| theme_not_found(slug, theme))?;
        if target.name == new_name {
            return Ok(false);
        }
        target.name = new_name.to_string();
        Ok(true)
    })?;
    ctx.info(format!("Renamed theme {theme} to {new_name}"));
    Ok(show)
}

/// Execute `show theme remove`; asks first when the theme still has photos
///
/// Returns whether the theme was removed.
///
/// # Errors
/// Returns `ValidationError::NoThemes` for a show's last theme, or an error
/// if the theme does not exist or loading or saving the show fails.
pub fn remove_theme(ctx: &Context<'_>, slug: &str, theme: &str, yes: bool) -> Result<bool> {
    let mut removed = false;
    edit_themes(ctx, "Editing runway shows", slug, |themes| {
        let position = themes
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(theme))
            .ok_or_else(|| theme_not_found(slug, theme))?;
        let photos = themes[position].photos.len();
        if photos > 0 && !confirm(&format!("Remove theme {theme} and its {photos} photo(s)?"), yes)? {
            return Ok(false);
        }
        themes.remove(position);
        removed = true;
        Ok(true)
    })?;
    if removed {
        ctx.info(format!("Removed theme {theme} from {slug}"));
    } else {
        ctx.info("Cancelled");
    }
    Ok(removed)
}

fn ensure_media_exists(api: &dyn ContentApi, id: &MediaId) -> Result<()> {
    let media = fetch_all_media(api, &CancelToken::new())?;
    if media.iter().any(|item| &item.id == id) {
        return Ok(());
    }
    Err(ContentError::NotFound {
        kind: "media",
        id: id.to_string(),
    }
    .into())
}

/// Execute `show toggle`: append the photo, or take it out if present
///
/// Returns `true` if the photo was added.
///
/// # Errors
/// Returns an error if the session is not an admin, the show, theme or media
/// item does not exist, or the update fails.
pub fn toggle(ctx: &Context<'_>, slug: &str, theme: &str, media_id: &str) -> Result<bool> {
    let id = MediaId::from(media_id);
    let mut added = false;
    edit_theme(ctx, "Editing runway shows", slug, theme, |photos| {
        if !photos.contains(&id) {
            ensure_media_exists(ctx.api, &id)?;
        }
        added = photos.toggle(id.clone());
        Ok(true)
    })?;
    if added {
        ctx.info(format!("Added {id} to {theme}"));
    } else {
        ctx.info(format!("Removed {id} from {theme}"));
    }
    Ok(added)
}

/// Execute `show move`
///
/// # Errors
/// Returns `SelectionError::IndexOutOfRange` for positions outside the
/// sequence, or an error if loading or saving the show fails.
pub fn move_photo(ctx: &Context<'_>, slug: &str, theme: &str, from: usize, to: usize) -> Result<RunwayShow> {
    let show = edit_theme(ctx, "Editing runway shows", slug, theme, |photos| {
        photos.reorder(Some(from), to)?;
        Ok(from != to)
    })?;
    ctx.info(format!("Moved photo {from} to {to} in {theme}"));
    Ok(show)
}

/// Execute `show orient`
///
/// # Errors
/// Returns `SelectionError::IndexOutOfRange` for an index outside the
/// sequence, or an error if loading or saving the show fails.
pub fn orient(
    ctx: &Context<'_>,
    slug: &str,
    theme: &str,
    index: usize,
    orientation: Orientation,
) -> Result<RunwayShow> {
    let show = edit_theme(ctx, "Editing runway shows", slug, theme, |photos| {
        photos.set_orientation(index, orientation)?;
        Ok(true)
    })?;
    ctx.info(format!("Photo {index} in {theme} is now {orientation}"));
    Ok(show)
}

/// Execute `show remove`
///
/// Returns whether the photo was part of the theme.
///
/// # Errors
/// Returns an error if loading or saving the show fails.
pub fn remove(ctx: &Context<'_>, slug: &str, theme: &str, media_id: &str) -> Result<bool> {
    let id = MediaId::from(media_id);
    let mut removed = false;
    edit_theme(ctx, "Editing runway shows", slug, theme, |photos| {
        removed = photos.remove(&id);
        Ok(removed)
    })?;
    if removed {
        ctx.info(format!("Removed {id} from {theme}"));
    } else {
        ctx.info(format!("{id} is not in {theme}"));
    }
    Ok(removed)
}
