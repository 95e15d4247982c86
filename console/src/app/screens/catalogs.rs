//! Catalog screens.

use crate::app::context::AppContext;
use crate::app::render;
use crate::domain::catalog::{self, Catalog};
use crate::domain::ports::{CatalogsGateway, Notice, Notifier};
use crate::domain::DomainError;

/// `console catalogs list`.
pub async fn list(ctx: &AppContext) -> Result<String, DomainError> {
    let catalogs = ctx.catalogs.list().await?;
    Ok(render_table(&catalogs))
}

/// `console catalogs add`.
pub async fn add(
    ctx: &AppContext,
    name: String,
    description: String,
    url: Option<String>,
) -> Result<String, DomainError> {
    let catalog = Catalog {
        id: 0,
        name,
        description,
        image_url: url,
    };
    catalog.validate()?;
    let existing = ctx.catalogs.list().await?;
    catalog::ensure_unique_name(&existing, &catalog.name, None)?;
    let stored = ctx.catalogs.create(&catalog).await?;
    ctx.notifier
        .notify(Notice::info(format!("Catalog {} created", stored.id)));
    Ok(format!("Created catalog {} ({})\n", stored.id, stored.name))
}

/// `console catalogs edit <id>`.
pub async fn edit(
    ctx: &AppContext,
    id: u64,
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
) -> Result<String, DomainError> {
    let mut catalog = ctx.catalogs.get(id).await?;
    if let Some(name) = name {
        catalog.name = name;
    }
    if let Some(description) = description {
        catalog.description = description;
    }
    if let Some(url) = url {
        catalog.image_url = Some(url);
    }
    catalog.validate()?;
    let existing = ctx.catalogs.list().await?;
    catalog::ensure_unique_name(&existing, &catalog.name, Some(id))?;
    let stored = ctx.catalogs.update(id, &catalog).await?;
    ctx.notifier
        .notify(Notice::info(format!("Catalog {} updated", stored.id)));
    Ok(format!("Updated catalog {} ({})\n", stored.id, stored.name))
}

/// `console catalogs rm <id>`: advisory guard, confirmation, delete, then a
/// full refetch of the list.
pub async fn remove(ctx: &AppContext, id: u64, assume_yes: bool) -> Result<String, DomainError> {
    ctx.guards.ensure_catalog_deletable(id).await?;
    if !super::confirm(&format!("Delete catalog {id}?"), assume_yes)? {
        return Ok("Nothing deleted\n".to_owned());
    }
    ctx.catalogs.delete(id).await?;
    ctx.notifier
        .notify(Notice::info(format!("Catalog {id} deleted")));
    let remaining = ctx.catalogs.list().await?;
    Ok(render_table(&remaining))
}

fn render_table(catalogs: &[Catalog]) -> String {
    let rows: Vec<Vec<String>> = catalogs
        .iter()
        .map(|catalog| {
            vec![
                catalog.id.to_string(),
                catalog.name.clone(),
                catalog.description.clone(),
            ]
        })
        .collect();
    render::table(&["id", "name", "description"], &rows)
}
