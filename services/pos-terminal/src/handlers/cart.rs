use std::fmt::Write;

use anyhow::Result;

use crate::state::SessionState;

fn lock_cart(state: &SessionState) -> std::sync::MutexGuard<'_, domain::Cart> {
    state.cart.lock().unwrap_or_else(|e| e.into_inner())
}

/// Add one unit of a cached product to the cart.
pub fn add_to_cart(state: &SessionState, product_id: i64) -> Result<String> {
    let product = state.catalog.get(product_id)?;
    lock_cart(state).add_product(&product)?;
    Ok(format!("Added {} to the cart", product.name))
}

/// Set a cart line's quantity (0 removes the line).
pub fn set_quantity(state: &SessionState, index: usize, quantity: u32) -> Result<String> {
    lock_cart(state).set_quantity(index, quantity)?;
    Ok(if quantity == 0 {
        format!("Line {} removed", index)
    } else {
        format!("Line {} set to {}", index, quantity)
    })
}

/// Remove a cart line.
pub fn remove_line(state: &SessionState, index: usize) -> Result<String> {
    lock_cart(state).remove_line(index)?;
    Ok(format!("Line {} removed", index))
}

/// Empty the cart.
pub fn clear(state: &SessionState) -> Result<String> {
    lock_cart(state).clear();
    Ok("Cart cleared".to_string())
}

/// Render the cart with per-line subtotals and the grand total.
pub fn show(state: &SessionState) -> Result<String> {
    let cart = lock_cart(state);

    if cart.is_empty() {
        return Ok("Cart is empty".to_string());
    }

    let mut out = String::new();
    for (index, line) in cart.lines().iter().enumerate() {
        writeln!(
            out,
            "[{}] {} x{} @ ${:.3} = ${:.3}",
            index,
            line.product.name,
            line.quantity,
            line.product.price,
            line.subtotal(),
        )?;
    }
    writeln!(out, "Total: ${:.3}", cart.total())?;
    Ok(out)
}
