//! Order screens, including the order-entry workflow.

use crate::app::cli::LineArg;
use crate::app::context::AppContext;
use crate::app::render;
use crate::domain::draft::{AddOutcome, OrderDraft};
use crate::domain::ports::{
    CustomersGateway, Notice, Notifier, OrderLinesGateway, OrdersGateway, ProductsGateway,
};
use crate::domain::{DomainError, ErrorCode, OrderSubmitError, Product};

/// `console orders list`.
pub async fn list(ctx: &AppContext) -> Result<String, DomainError> {
    let orders = ctx.orders.list().await?;
    let rows: Vec<Vec<String>> = orders
        .iter()
        .map(|order| {
            vec![
                order.id.to_string(),
                order.customer_id.to_string(),
                order
                    .placed_at
                    .map_or_else(|| "-".to_owned(), |at| at.format("%Y-%m-%d %H:%M").to_string()),
                render::flag(order.completed),
                render::money(order.subtotal),
            ]
        })
        .collect();
    Ok(render::table(
        &["id", "customer", "placed", "completed", "subtotal"],
        &rows,
    ))
}

/// `console orders show <id>`: the order, its customer, and its lines joined
/// against the product catalog.
pub async fn show(ctx: &AppContext, id: u64) -> Result<String, DomainError> {
    let order = ctx.orders.get(id).await?;
    let lines = ctx.order_lines.for_order(id).await?;
    let products = ctx.products.list().await?;
    let customer_name = match ctx.customers.get(order.customer_id).await {
        Ok(customer) => customer.name,
        Err(_) => "unknown".to_owned(),
    };

    let mut output = format!(
        "Order #{} for {} ({})\nplaced {}  completed {}\n",
        order.id,
        customer_name,
        order.customer_id,
        order
            .placed_at
            .map_or_else(|| "-".to_owned(), |at| at.to_rfc3339()),
        render::flag(order.completed),
    );
    if let Some(notes) = &order.notes {
        output.push_str(&format!("notes: {notes}\n"));
    }

    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| {
            let name = products
                .iter()
                .find(|product| product.id == line.product_id)
                .map_or_else(|| "unknown".to_owned(), |product| product.name.clone());
            vec![
                line.product_id.to_string(),
                name,
                line.quantity.to_string(),
                render::money(line.unit_price),
                render::money(line.subtotal()),
            ]
        })
        .collect();
    output.push_str(&render::table(
        &["product", "name", "qty", "unit price", "subtotal"],
        &rows,
    ));
    output.push_str(&format!("total {}\n", render::money(order.subtotal)));
    Ok(output)
}

/// `console orders add`: compose a draft from the selection flags and run
/// the create-path saga.
pub async fn add(
    ctx: &AppContext,
    customer: u64,
    lines: &[LineArg],
    notes: Option<String>,
) -> Result<String, DomainError> {
    // The customer must exist before anything is written.
    if let Err(err) = ctx.customers.get(customer).await {
        if err.code() == ErrorCode::NotFound {
            return Err(DomainError::invalid_request(format!(
                "customer {customer} does not exist"
            )));
        }
        return Err(err);
    }
    let products = ctx.products.list().await?;

    let mut draft = OrderDraft::new();
    draft.load_catalog(&products);
    draft.choose_customer(customer);
    draft.set_notes(notes);
    apply_lines(&mut draft, &products, lines, ctx.notifier.as_ref())?;

    let order = ctx
        .submissions
        .submit_new(&draft)
        .await
        .map_err(map_submit_error)?;
    ctx.notifier
        .notify(Notice::info(format!("Order {} created", order.id)));
    Ok(format!(
        "Created order {} for customer {}, total {}\n",
        order.id,
        order.customer_id,
        render::money(order.subtotal),
    ))
}

/// `console orders edit <id>`: hydrate the persisted order into a draft,
/// optionally replace its selection and notes, and run the edit-path saga
/// (full replace of the lines).
pub async fn edit(
    ctx: &AppContext,
    id: u64,
    lines: &[LineArg],
    notes: Option<String>,
) -> Result<String, DomainError> {
    let order = ctx.orders.get(id).await?;
    let persisted = ctx.order_lines.for_order(id).await?;
    let products = ctx.products.list().await?;

    let mut draft = OrderDraft::hydrate(&order, &persisted, &products);
    if !lines.is_empty() {
        let selected: Vec<u64> = draft.lines().iter().map(|line| line.product_id).collect();
        for product_id in selected {
            draft.remove_line(product_id);
        }
        apply_lines(&mut draft, &products, lines, ctx.notifier.as_ref())?;
    }
    if notes.is_some() {
        draft.set_notes(notes);
    }

    let updated = ctx
        .submissions
        .submit_edit(&order, &draft)
        .await
        .map_err(map_submit_error)?;
    ctx.notifier
        .notify(Notice::info(format!("Order {} updated", updated.id)));
    Ok(format!(
        "Updated order {}, total {}\n",
        updated.id,
        render::money(updated.subtotal),
    ))
}

/// `console orders status <id> --completed <bool>`.
pub async fn status(ctx: &AppContext, id: u64, completed: bool) -> Result<String, DomainError> {
    let order = ctx.orders.set_completed(id, completed).await?;
    Ok(format!(
        "Order {} is now {}\n",
        order.id,
        if order.completed { "completed" } else { "open" },
    ))
}

/// `console orders rm <id>`: confirmation, then lines-before-parent
/// deletion.
pub async fn remove(ctx: &AppContext, id: u64, assume_yes: bool) -> Result<String, DomainError> {
    if !super::confirm(&format!("Delete order {id} and its lines?"), assume_yes)? {
        return Ok("Nothing deleted\n".to_owned());
    }
    ctx.submissions
        .delete_order(id)
        .await
        .map_err(map_submit_error)?;
    ctx.notifier
        .notify(Notice::info(format!("Order {id} deleted")));
    Ok(format!("Deleted order {id}\n"))
}

/// Apply the selection flags through the draft operations so the stock
/// clamps hold. Quantities that the draft cuts down are reported as
/// warnings; adds that bounce off zero stock stay silent per entry, with a
/// single summary warning at the end.
fn apply_lines(
    draft: &mut OrderDraft,
    products: &[Product],
    lines: &[LineArg],
    notifier: &dyn Notifier,
) -> Result<(), DomainError> {
    for arg in lines {
        let product = products
            .iter()
            .find(|product| product.id == arg.product_id)
            .ok_or_else(|| {
                DomainError::invalid_request(format!(
                    "product {} is not in the catalog",
                    arg.product_id
                ))
            })?;
        match draft.add_product(product) {
            AddOutcome::OutOfStock => {}
            AddOutcome::Added | AddOutcome::Incremented => {
                if arg.quantity > 1 {
                    let got = draft.set_quantity(product.id, arg.quantity);
                    if got != Some(arg.quantity) {
                        notifier.notify(Notice::warning(format!(
                            "quantity for `{}` clamped to {} (stock limit)",
                            product.name,
                            got.unwrap_or(1)
                        )));
                    }
                }
            }
        }
    }
    if draft.rejected_adds() > 0 {
        notifier.notify(Notice::warning(format!(
            "{} product(s) skipped: no remaining stock",
            draft.rejected_adds()
        )));
    }
    Ok(())
}

/// Keep the underlying error code (a 401 must still clear the session) but
/// spell out the partial-write situation for the operator.
fn map_submit_error(err: OrderSubmitError) -> DomainError {
    match err {
        OrderSubmitError::NotReady(inner) => DomainError::invalid_request(inner.to_string()),
        OrderSubmitError::Rejected(inner) => inner,
        OrderSubmitError::Partial {
            order_id,
            step,
            completed,
            source,
        } => DomainError::new(
            source.code(),
            format!(
                "order {order_id} was left partially written: step `{step}` failed ({source}); \
                 {} step(s) had already committed and no rollback is attempted — review the \
                 order manually",
                completed.len()
            ),
        ),
    }
}
