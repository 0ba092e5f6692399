//! Exhibition commands

use super::{Context, Result, confirm};
use crate::AtelierError;
use crate::content::{ContentError, Exhibition, ExhibitionDraft, ExhibitionPatch, RecordId, Venue};
use crate::output;

/// Venue fields to change; the rest of the stored venue is kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
}

impl VenueChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.city.is_none() && self.description.is_none()
    }

    /// `venue` with the supplied fields replaced
    #[must_use]
    pub fn applied_to(&self, venue: &Venue) -> Venue {
        Venue {
            name: self.name.clone().unwrap_or_else(|| venue.name.clone()),
            address: self.address.clone().unwrap_or_else(|| venue.address.clone()),
            city: self.city.clone().unwrap_or_else(|| venue.city.clone()),
            description: self.description.clone().unwrap_or_else(|| venue.description.clone()),
        }
    }
}

fn find_exhibition(ctx: &Context<'_>, id: &RecordId) -> Result<Exhibition> {
    ctx.api
        .list_exhibitions()?
        .into_iter()
        .find(|exhibition| &exhibition.id == id)
        .ok_or_else(|| {
            ContentError::NotFound {
                kind: "exhibition",
                id: id.to_string(),
            }
            .into()
        })
}

/// Execute `exhibition list`
///
/// # Errors
/// Returns an error if the exhibitions cannot be fetched.
pub fn list(ctx: &Context<'_>) -> Result<()> {
    let exhibitions = ctx.api.list_exhibitions()?;
    if exhibitions.is_empty() {
        ctx.info("No exhibitions yet");
    }
    for exhibition in &exhibitions {
        println!("{}", output::exhibition_line(exhibition, ctx.quiet));
    }
    Ok(())
}

/// Execute `exhibition create`
///
/// # Errors
/// Returns an error if the session is not an admin, the draft is invalid, or
/// the content API rejects it.
pub fn create(ctx: &Context<'_>, draft: ExhibitionDraft) -> Result<Exhibition> {
    ctx.auth.require_admin("Creating exhibitions")?;
    let draft = draft.normalize()?;
    let exhibition = ctx.api.create_exhibition(&draft)?;
    ctx.info(format!(
        "Created exhibition {} ({}) with id {}",
        exhibition.title, exhibition.slug, exhibition.id
    ));
    Ok(exhibition)
}

/// Execute `exhibition delete`
///
/// # Errors
/// Returns an error if the session is not an admin or the delete fails.
pub fn delete(ctx: &Context<'_>, id: &str, yes: bool) -> Result<()> {
    ctx.auth.require_admin("Deleting exhibitions")?;
    if !confirm(&format!("Delete exhibition {id}?"), yes)? {
        ctx.info("Cancelled");
        return Ok(());
    }
    ctx.api.delete_exhibition(&RecordId::from(id))?;
    ctx.info(format!("Deleted exhibition {id}"));
    Ok(())
}

/// Execute `exhibition edit`: send only the supplied fields
///
/// Venue changes are merged into the stored venue, which is then sent whole.
///
/// # Errors
/// Returns an error if the session is not an admin, nothing is supplied, a
/// supplied field is blank, the new slug is taken, or the update fails.
pub fn edit(ctx: &Context<'_>, id: &str, mut patch: ExhibitionPatch, venue: &VenueChanges) -> Result<Exhibition> {
    ctx.auth.require_admin("Editing exhibitions")?;
    if patch.is_empty() && venue.is_empty() {
        return Err(AtelierError::InvalidInput("Nothing to change".to_string()));
    }

    let id = RecordId::from(id);
    if !venue.is_empty() {
        let current = find_exhibition(ctx, &id)?;
        patch.venue = Some(venue.applied_to(&current.venue));
    }
    patch.validate()?;

    let exhibition = ctx.api.update_exhibition(&id, &patch)?;
    tracing::info!(exhibition = %exhibition.id, slug = %exhibition.slug, "exhibition edited");
    ctx.info(format!("Updated exhibition {} ({})", exhibition.title, exhibition.slug));
    Ok(exhibition)
}

/// Execute `exhibition upcoming`: only the flag is sent
///
/// # Errors
/// Returns an error if the session is not an admin or the update fails.
pub fn set_upcoming(ctx: &Context<'_>, id: &str, upcoming: bool) -> Result<Exhibition> {
    ctx.auth.require_admin("Editing exhibitions")?;
    let exhibition = ctx
        .api
        .update_exhibition(&RecordId::from(id), &ExhibitionPatch::upcoming(upcoming))?;
    let state = if exhibition.is_upcoming { "upcoming" } else { "not upcoming" };
    ctx.info(format!("{} is now {state}", exhibition.title));
    Ok(exhibition)
}
