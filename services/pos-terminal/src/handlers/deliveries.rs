use std::fmt::Write;

use anyhow::Result;
use domain::{DeliveryStatus, NewDelivery};
use tracing::info;
use validator::Validate;

use crate::state::SessionState;

pub async fn list_deliveries(
    state: &SessionState,
    status: Option<DeliveryStatus>,
) -> Result<String> {
    let deliveries = state.api.list_deliveries(status).await?;

    if deliveries.is_empty() {
        return Ok("No deliveries".to_string());
    }

    let mut out = String::new();
    for delivery in &deliveries {
        writeln!(
            out,
            "#{} sale {} {} {} ${:.3} [{}]",
            delivery.id,
            delivery.sale_id,
            delivery.client_name.as_deref().unwrap_or("-"),
            delivery.address,
            delivery.total,
            delivery.status.as_str(),
        )?;
    }
    Ok(out)
}

/// Register a delivery for an existing delivery-typed sale.
pub async fn create_delivery(
    state: &SessionState,
    sale_id: i64,
    address: String,
) -> Result<String> {
    let delivery = NewDelivery {
        sale_id,
        address,
        notes: None,
        scheduled_date: None,
    };
    delivery.validate()?;

    let id = state.api.create_delivery(&delivery).await?;
    info!(delivery_id = id, sale_id, "Delivery registered");
    Ok(format!("Delivery #{} registered", id))
}

pub async fn update_status(
    state: &SessionState,
    id: i64,
    status: DeliveryStatus,
) -> Result<String> {
    state.api.update_delivery_status(id, status).await?;
    info!(delivery_id = id, status = status.as_str(), "Delivery status updated");
    Ok(format!("Delivery #{} set to {}", id, status.as_str()))
}
