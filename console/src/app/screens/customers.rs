//! Customer screens.

use crate::app::cli::{CustomerFields, CustomerPatch};
use crate::app::context::AppContext;
use crate::app::render;
use crate::domain::ports::{CustomersGateway, Notice, Notifier};
use crate::domain::{Customer, DomainError};

/// `console customers list`.
pub async fn list(ctx: &AppContext) -> Result<String, DomainError> {
    let customers = ctx.customers.list().await?;
    Ok(render_table(&customers))
}

/// `console customers show <id>`.
pub async fn show(ctx: &AppContext, id: u64) -> Result<String, DomainError> {
    let customer = ctx.customers.get(id).await?;
    Ok(format!(
        "#{} {}\nemail {}  phone {}\n{}\n",
        customer.id, customer.name, customer.email, customer.phone, customer.address,
    ))
}

/// `console customers add`.
pub async fn add(ctx: &AppContext, fields: CustomerFields) -> Result<String, DomainError> {
    let customer = Customer {
        id: 0,
        name: fields.name,
        email: fields.email,
        phone: fields.phone,
        address: fields.address,
        image_url: fields.url,
    };
    customer.validate()?;
    let stored = ctx.customers.create(&customer).await?;
    ctx.notifier
        .notify(Notice::info(format!("Customer {} created", stored.id)));
    Ok(format!("Created customer {} ({})\n", stored.id, stored.name))
}

/// `console customers edit <id>`.
pub async fn edit(ctx: &AppContext, id: u64, patch: CustomerPatch) -> Result<String, DomainError> {
    let mut customer = ctx.customers.get(id).await?;
    if let Some(name) = patch.name {
        customer.name = name;
    }
    if let Some(email) = patch.email {
        customer.email = email;
    }
    if let Some(phone) = patch.phone {
        customer.phone = phone;
    }
    if let Some(address) = patch.address {
        customer.address = address;
    }
    if let Some(url) = patch.url {
        customer.image_url = Some(url);
    }
    customer.validate()?;
    let stored = ctx.customers.update(id, &customer).await?;
    ctx.notifier
        .notify(Notice::info(format!("Customer {} updated", stored.id)));
    Ok(format!("Updated customer {} ({})\n", stored.id, stored.name))
}

/// `console customers rm <id>`: advisory guard, confirmation, delete, then a
/// full refetch of the list.
pub async fn remove(ctx: &AppContext, id: u64, assume_yes: bool) -> Result<String, DomainError> {
    ctx.guards.ensure_customer_deletable(id).await?;
    if !super::confirm(&format!("Delete customer {id}?"), assume_yes)? {
        return Ok("Nothing deleted\n".to_owned());
    }
    ctx.customers.delete(id).await?;
    ctx.notifier
        .notify(Notice::info(format!("Customer {id} deleted")));
    let remaining = ctx.customers.list().await?;
    Ok(render_table(&remaining))
}

fn render_table(customers: &[Customer]) -> String {
    let rows: Vec<Vec<String>> = customers
        .iter()
        .map(|customer| {
            vec![
                customer.id.to_string(),
                customer.name.clone(),
                customer.email.clone(),
                customer.phone.clone(),
                customer.address.clone(),
            ]
        })
        .collect();
    render::table(&["id", "name", "email", "phone", "address"], &rows)
}
