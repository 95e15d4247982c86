//! Sales report screen (administrators only; the backend re-checks).

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::app::context::AppContext;
use crate::app::render;
use crate::domain::ports::{
    CustomersGateway, OrderLinesGateway, OrdersGateway, ProductsGateway,
};
use crate::domain::reports::{DateRange, sales_summary};
use crate::domain::{DomainError, OrderLine};

/// Window applied when no bounds are given: the last seven days.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// `console reports sales [--from --to]`.
pub async fn sales(
    ctx: &AppContext,
    from: Option<String>,
    to: Option<String>,
    now: chrono::DateTime<Utc>,
) -> Result<String, DomainError> {
    let range = resolve_range(from.as_deref(), to.as_deref(), now)?;

    let orders = ctx.orders.list().await?;
    // Fetch lines only for orders inside the window, one at a time.
    let mut lines: Vec<OrderLine> = Vec::new();
    for order in &orders {
        if order.placed_at.is_some_and(|at| range.contains(at)) {
            lines.extend(ctx.order_lines.for_order(order.id).await?);
        }
    }
    let products = ctx.products.list().await?;
    let customers = ctx.customers.list().await?;

    let summary = sales_summary(range, &orders, &lines, &products, &customers);

    let mut output = format!(
        "Sales from {} to {}\nrevenue {}\n\nTop products\n",
        summary.range.from.format("%Y-%m-%d"),
        summary.range.to.format("%Y-%m-%d"),
        render::money(summary.revenue),
    );
    let product_rows: Vec<Vec<String>> = summary
        .top_products
        .iter()
        .map(|entry| {
            vec![
                entry.product_id.to_string(),
                entry.name.clone(),
                entry.quantity.to_string(),
            ]
        })
        .collect();
    output.push_str(&render::table(&["id", "name", "units"], &product_rows));

    output.push_str("\nTop customers\n");
    let customer_rows: Vec<Vec<String>> = summary
        .top_customers
        .iter()
        .map(|entry| {
            vec![
                entry.customer_id.to_string(),
                entry.name.clone(),
                render::money(entry.total),
            ]
        })
        .collect();
    output.push_str(&render::table(&["id", "name", "total"], &customer_rows));
    Ok(output)
}

fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    now: chrono::DateTime<Utc>,
) -> Result<DateRange, DomainError> {
    let to = match to {
        Some(raw) => day_bound(raw, NaiveTime::from_hms_opt(23, 59, 59))?,
        None => now,
    };
    let from = match from {
        Some(raw) => day_bound(raw, NaiveTime::from_hms_opt(0, 0, 0))?,
        None => to - Duration::days(DEFAULT_WINDOW_DAYS),
    };
    if from > to {
        return Err(DomainError::invalid_request(
            "--from must not be after --to",
        ));
    }
    Ok(DateRange { from, to })
}

fn day_bound(
    raw: &str,
    time: Option<NaiveTime>,
) -> Result<chrono::DateTime<Utc>, DomainError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| {
        DomainError::invalid_request(format!("`{raw}` is not a YYYY-MM-DD date: {err}"))
    })?;
    let time = time
        .ok_or_else(|| DomainError::internal("day boundary time must be constructible"))?;
    Utc.from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| DomainError::internal(format!("`{raw}` does not map to a UTC instant")))
}
