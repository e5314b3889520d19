use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use backend_api::SalesGateway;
use catalog::CatalogCache;
use domain::{Cart, DeliveryType, SaleConfirmation};
use tracing::{error, info, warn};

use crate::errors::{CheckoutError, Result};

/// Converts cart lines into a committed sale.
///
/// A checkout attempt moves Idle -> Submitting -> Confirmed/Failed.
/// Submitting is not re-entrant: a second attempt while one is in
/// flight is rejected with `CheckoutInProgress` rather than queued.
pub struct CheckoutOrchestrator {
    sales: Arc<dyn SalesGateway>,
    catalog: Arc<CatalogCache>,
    in_flight: AtomicBool,
}

/// Releases the in-flight flag when the attempt resolves, including
/// when the future is dropped mid-submission.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CheckoutOrchestrator {
    pub fn new(sales: Arc<dyn SalesGateway>, catalog: Arc<CatalogCache>) -> Self {
        Self {
            sales,
            catalog,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit the cart as a single atomic sale.
    ///
    /// The line snapshot is taken under the cart lock before the first
    /// await point, so concurrent cart edits cannot tear the request.
    /// On success the cart is cleared and the catalog refreshed (stock
    /// is now stale); on failure the cart is left untouched so the
    /// user can adjust and retry.
    pub async fn checkout(
        &self,
        cart: &Mutex<Cart>,
        client_id: Option<i64>,
        delivery_type: DeliveryType,
    ) -> Result<SaleConfirmation> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CheckoutError::CheckoutInProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let (request, expected_total) = {
            let cart = cart.lock().unwrap_or_else(|e| e.into_inner());
            if cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            (cart.to_sale_request(client_id, delivery_type), cart.total())
        };

        info!(
            items = request.items.len(),
            expected_total,
            delivery_type = delivery_type.as_str(),
            "Submitting sale"
        );

        let confirmation = match self.sales.submit_sale(&request).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                error!(error = %e, "Sale submission failed, cart left unchanged");
                return Err(e.into());
            }
        };

        info!(
            sale_id = confirmation.sale_id,
            total = confirmation.total,
            "Sale confirmed"
        );

        cart.lock().unwrap_or_else(|e| e.into_inner()).clear();

        // Stock changed server-side; the mirror is stale until refreshed.
        // The sale is already committed, so a refresh failure is only logged.
        if let Err(e) = self.catalog.refresh().await {
            warn!(error = %e, "Catalog refresh after sale failed");
        }

        Ok(confirmation)
    }
}
