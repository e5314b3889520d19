pub mod client;
pub mod envelope;
pub mod gateway;

pub use client::{ApiClient, ProductQuery};
pub use envelope::{ApiEnvelope, CreatedResponse};
pub use gateway::{ProductSource, SalesGateway};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
