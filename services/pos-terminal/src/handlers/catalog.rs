use std::fmt::Write;

use anyhow::Result;
use domain::{Category, NewProduct, Product};
use tracing::info;
use validator::Validate;

use crate::state::SessionState;

/// Presentation-only icon lookup; not part of the cart contract.
fn category_icon(category: Category) -> &'static str {
    match category {
        Category::Bread => "🥖",
        Category::Cake => "🎂",
        Category::Dessert => "🍰",
        Category::Other => "🧁",
    }
}

fn render_product(product: &Product) -> String {
    format!(
        "{} [{}] {} — ${:.3} (stock: {}){}",
        category_icon(product.category),
        product.id,
        product.name,
        product.price,
        product.stock,
        if product.stock == 0 { "  OUT OF STOCK" } else { "" },
    )
}

/// Re-fetch the catalog from the backend.
pub async fn refresh(state: &SessionState) -> Result<String> {
    let count = state.catalog.refresh().await?;
    Ok(format!("Catalog refreshed: {} products", count))
}

/// Show cached products, optionally filtered to one category.
pub fn list_products(state: &SessionState, filter: Option<Category>) -> Result<String> {
    let products = state.catalog.list(filter);

    if products.is_empty() {
        return Ok("No products in the catalog (try `refresh`)".to_string());
    }

    let mut out = String::new();
    for product in &products {
        writeln!(out, "{}", render_product(product))?;
    }
    Ok(out)
}

/// Register a new product and reload the catalog.
pub async fn create_product(
    state: &SessionState,
    name: String,
    category: Category,
    price: f64,
    stock: u32,
) -> Result<String> {
    let product = NewProduct {
        name,
        category,
        price,
        stock,
        description: None,
    };
    product.validate()?;

    let id = state.api.create_product(&product).await?;
    info!(product_id = id, "Product created");

    state.catalog.refresh().await?;
    Ok(format!("Product #{} created", id))
}
