use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fulfillment channel attached to a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Counter,
    Delivery,
    Pickup,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Counter => "counter",
            DeliveryType::Delivery => "delivery",
            DeliveryType::Pickup => "pickup",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "counter" => Some(DeliveryType::Counter),
            "delivery" => Some(DeliveryType::Delivery),
            "pickup" => Some(DeliveryType::Pickup),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Sale row as returned by the sales listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(default)]
    pub client_name: Option<String>,
    pub total: f64,
    pub delivery_type: DeliveryType,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
}

/// One line of a committed sale, as returned by the sale detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Sale with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleLine>,
}

/// Item of a sale submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SaleItem {
    pub product_id: i64,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

/// Body of a sale submission. Built from the cart at checkout time and
/// not retained afterwards. The backend validates stock and commits the
/// whole request atomically or rejects it wholly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SaleRequest {
    #[serde(default)]
    pub client_id: Option<i64>,

    pub delivery_type: DeliveryType,

    #[validate(length(min = 1, message = "Sale must have at least one item"), nested)]
    pub items: Vec<SaleItem>,
}

/// Confirmation returned by the backend for a committed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleConfirmation {
    pub sale_id: i64,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&DeliveryType::Counter).unwrap(),
            "\"counter\""
        );
        assert_eq!(DeliveryType::parse("pickup"), Some(DeliveryType::Pickup));
        assert_eq!(DeliveryType::parse("mail"), None);
    }

    #[test]
    fn test_sale_request_empty_items_fails_validation() {
        let request = SaleRequest {
            client_id: None,
            delivery_type: DeliveryType::Counter,
            items: vec![],
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_sale_request_zero_quantity_item_fails_validation() {
        let request = SaleRequest {
            client_id: Some(1),
            delivery_type: DeliveryType::Delivery,
            items: vec![SaleItem {
                product_id: 4,
                quantity: 0,
            }],
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_sale_request_serializes_items_in_order() {
        let request = SaleRequest {
            client_id: None,
            delivery_type: DeliveryType::Counter,
            items: vec![
                SaleItem {
                    product_id: 2,
                    quantity: 1,
                },
                SaleItem {
                    product_id: 1,
                    quantity: 3,
                },
            ],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["items"][0]["product_id"], 2);
        assert_eq!(json["items"][1]["product_id"], 1);
    }

    #[test]
    fn test_sale_detail_flattens_sale_fields() {
        let json = r#"{
            "id": 12,
            "client_name": "Ana",
            "total": 9.5,
            "delivery_type": "counter",
            "status": "completed",
            "created_at": "2026-05-02T10:30:00Z",
            "items": [
                {"product_name": "Baguette", "quantity": 3, "unit_price": 2.5, "subtotal": 7.5}
            ]
        }"#;

        let detail: SaleDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.sale.id, 12);
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].subtotal, 7.5);
    }
}
