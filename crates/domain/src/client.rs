use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registered client as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Request body for registering a new client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewClient {
    #[validate(length(min = 1, message = "Client name cannot be empty"))]
    pub name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub address: Option<String>,
}
