//! Product screens.

use crate::app::cli::{ProductFields, ProductPatch};
use crate::app::context::AppContext;
use crate::app::render;
use crate::domain::ports::{CatalogsGateway, Notice, Notifier, ProductsGateway};
use crate::domain::{DomainError, ErrorCode, Product};

/// `console products list`.
pub async fn list(ctx: &AppContext) -> Result<String, DomainError> {
    let products = ctx.products.list().await?;
    Ok(render_table(&products))
}

/// `console products show <id>`.
pub async fn show(ctx: &AppContext, id: u64) -> Result<String, DomainError> {
    let product = ctx.products.get(id).await?;
    Ok(format!(
        "#{} {}\n{}\nprice {}  stock {}  catalog {}\nimage {}\n",
        product.id,
        product.name,
        product.description,
        render::money(product.price),
        product.availability,
        product.catalog_id,
        product.image_url_or_default(),
    ))
}

/// `console products add`.
pub async fn add(ctx: &AppContext, fields: ProductFields) -> Result<String, DomainError> {
    let product = Product {
        id: 0,
        name: fields.name,
        description: fields.description,
        price: fields.price,
        availability: fields.availability,
        catalog_id: fields.catalog,
        image_url: fields.url,
    };
    product.validate()?;
    // Make sure the chosen catalog actually exists before submitting.
    if let Err(err) = ctx.catalogs.get(product.catalog_id).await {
        if err.code() == ErrorCode::NotFound {
            return Err(DomainError::invalid_request(format!(
                "catalog {} does not exist",
                product.catalog_id
            )));
        }
        return Err(err);
    }
    let stored = ctx.products.create(&product).await?;
    ctx.notifier
        .notify(Notice::info(format!("Product {} created", stored.id)));
    Ok(format!("Created product {} ({})\n", stored.id, stored.name))
}

/// `console products edit <id>`.
pub async fn edit(ctx: &AppContext, id: u64, patch: ProductPatch) -> Result<String, DomainError> {
    let mut product = ctx.products.get(id).await?;
    if let Some(name) = patch.name {
        product.name = name;
    }
    if let Some(description) = patch.description {
        product.description = description;
    }
    if let Some(price) = patch.price {
        product.price = price;
    }
    if let Some(availability) = patch.availability {
        product.availability = availability;
    }
    if let Some(catalog) = patch.catalog {
        product.catalog_id = catalog;
    }
    if let Some(url) = patch.url {
        product.image_url = Some(url);
    }
    product.validate()?;
    let stored = ctx.products.update(id, &product).await?;
    ctx.notifier
        .notify(Notice::info(format!("Product {} updated", stored.id)));
    Ok(format!("Updated product {} ({})\n", stored.id, stored.name))
}

/// `console products rm <id>`: advisory guard, confirmation, delete, then a
/// full refetch of the list.
pub async fn remove(ctx: &AppContext, id: u64, assume_yes: bool) -> Result<String, DomainError> {
    ctx.guards.ensure_product_deletable(id).await?;
    if !super::confirm(&format!("Delete product {id}?"), assume_yes)? {
        return Ok("Nothing deleted\n".to_owned());
    }
    ctx.products.delete(id).await?;
    ctx.notifier
        .notify(Notice::info(format!("Product {id} deleted")));
    let remaining = ctx.products.list().await?;
    Ok(render_table(&remaining))
}

fn render_table(products: &[Product]) -> String {
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|product| {
            vec![
                product.id.to_string(),
                product.name.clone(),
                render::money(product.price),
                product.availability.to_string(),
                product.catalog_id.to_string(),
            ]
        })
        .collect();
    render::table(&["id", "name", "price", "stock", "catalog"], &rows)
}
