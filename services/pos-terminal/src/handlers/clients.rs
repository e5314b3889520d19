use std::fmt::Write;

use anyhow::Result;
use domain::NewClient;
use tracing::info;
use validator::Validate;

use crate::state::SessionState;

pub async fn list_clients(state: &SessionState) -> Result<String> {
    let clients = state.api.list_clients().await?;

    if clients.is_empty() {
        return Ok("No clients registered".to_string());
    }

    let mut out = String::new();
    for client in &clients {
        writeln!(
            out,
            "#{} {} {} {}",
            client.id,
            client.name,
            client.phone.as_deref().unwrap_or("-"),
            client.email.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(out)
}

pub async fn create_client(
    state: &SessionState,
    name: String,
    phone: Option<String>,
    email: Option<String>,
) -> Result<String> {
    let client = NewClient {
        name,
        phone,
        email,
        address: None,
    };
    client.validate()?;

    let id = state.api.create_client(&client).await?;
    info!(client_id = id, "Client registered");
    Ok(format!("Client #{} registered", id))
}
