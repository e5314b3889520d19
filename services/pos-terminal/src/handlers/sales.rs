use std::fmt::Write;

use anyhow::Result;
use domain::DeliveryType;
use tracing::info;

use crate::state::SessionState;

/// Submit the cart as a sale. On success the orchestrator has already
/// cleared the cart and refreshed the catalog.
pub async fn complete_sale(
    state: &SessionState,
    delivery_type: DeliveryType,
    client_id: Option<i64>,
) -> Result<String> {
    let confirmation = state
        .orchestrator
        .checkout(&state.cart, client_id, delivery_type)
        .await?;

    info!(sale_id = confirmation.sale_id, "Sale completed");
    Ok(format!(
        "Sale #{} completed. Total: ${:.3}",
        confirmation.sale_id, confirmation.total
    ))
}

/// Show the sales listing.
pub async fn list_sales(state: &SessionState) -> Result<String> {
    let sales = state.api.list_sales().await?;

    if sales.is_empty() {
        return Ok("No sales recorded".to_string());
    }

    let mut out = String::new();
    for sale in &sales {
        writeln!(
            out,
            "#{} {} ${:.3} {} {:?} {}",
            sale.id,
            sale.client_name.as_deref().unwrap_or("(no client)"),
            sale.total,
            sale.delivery_type.as_str(),
            sale.status,
            sale.created_at.format("%Y-%m-%d %H:%M"),
        )?;
    }
    Ok(out)
}

/// Show one sale with its line items.
pub async fn show_sale(state: &SessionState, id: i64) -> Result<String> {
    let detail = state.api.get_sale(id).await?;

    let mut out = format!(
        "Sale #{} — total ${:.3} ({})\n",
        detail.sale.id,
        detail.sale.total,
        detail.sale.delivery_type.as_str(),
    );
    for item in &detail.items {
        writeln!(
            out,
            "  {} x{} @ ${:.3} = ${:.3}",
            item.product_name, item.quantity, item.unit_price, item.subtotal,
        )?;
    }
    Ok(out)
}
