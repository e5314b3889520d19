use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product category as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bread,
    Cake,
    Dessert,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bread => "bread",
            Category::Cake => "cake",
            Category::Dessert => "dessert",
            Category::Other => "other",
        }
    }

    /// Parse a category name as typed at the terminal.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bread" => Some(Category::Bread),
            "cake" => Some(Category::Cake),
            "dessert" => Some(Category::Dessert),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Product snapshot owned by the backend. The catalog mirror replaces
/// these wholesale on refresh and never patches individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub description: Option<String>,
    pub active: bool,
}

/// Request body for registering a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub name: String,

    pub category: Category,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub description: Option<String>,
}
