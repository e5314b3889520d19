use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    EnRoute,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::EnRoute => "en_route",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DeliveryStatus::Pending),
            "en_route" => Some(DeliveryStatus::EnRoute),
            "delivered" => Some(DeliveryStatus::Delivered),
            "cancelled" => Some(DeliveryStatus::Cancelled),
            _ => None,
        }
    }
}

/// Delivery row as returned by the deliveries listing. Client fields
/// come joined from the sale the delivery belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: i64,
    pub sale_id: i64,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: String,
    pub total: f64,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
}

/// Request body for registering a delivery for an existing sale. The
/// backend rejects sales that are missing or not delivery-typed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDelivery {
    pub sale_id: i64,

    #[validate(length(min = 1, message = "Delivery address cannot be empty"))]
    pub address: String,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_status_wire_format_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::EnRoute).unwrap(),
            "\"en_route\""
        );
        assert_eq!(DeliveryStatus::parse("en_route"), Some(DeliveryStatus::EnRoute));
    }

    #[test]
    fn test_new_delivery_empty_address_fails_validation() {
        let delivery = NewDelivery {
            sale_id: 3,
            address: "".to_string(),
            notes: None,
            scheduled_date: None,
        };

        assert!(delivery.validate().is_err());
    }
}
