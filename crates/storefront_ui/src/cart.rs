//! Cart and wishlist actions.
//!
//! Thin compositions of the dispatcher and the notifier: one endpoint, one
//! notification, one indicator update. No state is held here; the cart
//! count shown in the navbar is read from and written back to the DOM.

use serde::Deserialize;
use serde_json::json;
use std::rc::Rc;

use crate::get_document;
use crate::http::{Dispatcher, FAILURE_MESSAGE, RequestError, RequestOptions};
use crate::notify::{Notifier, Severity};

/// Element id of the navbar cart-count indicator.
pub const CART_COUNT_ID: &str = "cart-count";

/// What the add-to-cart endpoint answers with.
#[derive(Debug, Default, Deserialize)]
struct CartEnvelope {
    /// Did the item land in the cart.
    #[serde(default)]
    success: bool,
    /// Server-phrased success message.
    #[serde(default)]
    message: Option<String>,
    /// Updated number of cart lines.
    #[serde(default)]
    cart_count: Option<u64>,
    /// Server-phrased failure reason, shown verbatim.
    #[serde(default)]
    error: Option<String>,
}

/// What the wishlist-toggle endpoint answers with.
#[derive(Debug, Default, Deserialize)]
struct WishlistEnvelope {
    /// Did the toggle apply.
    #[serde(default)]
    success: bool,
    /// True when the product is now on the wishlist.
    #[serde(default)]
    added: Option<bool>,
    /// Server-phrased failure reason, shown verbatim.
    #[serde(default)]
    error: Option<String>,
}

/// Cart actions bound to the shared dispatcher and notifier.
#[derive(Debug, Clone)]
pub struct Cart {
    /// Shared request pipeline.
    dispatcher: Dispatcher,
    /// Sink for success and failure feedback.
    notifier: Rc<Notifier>,
}

impl Cart {
    /// Create the cart helper over the shared pipeline pieces.
    pub fn new(dispatcher: Dispatcher, notifier: Rc<Notifier>) -> Self {
        Self {
            dispatcher,
            notifier,
        }
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// Resolves `Ok(true)` when the server accepted the item; the visible
    /// cart-count indicator is updated and a success notification emitted.
    /// A `success: false` answer emits the server-supplied error text (one
    /// notification, indicator untouched) and resolves `Ok(false)`.
    ///
    /// # Errors
    /// Propagates [`RequestError`] from the dispatcher, which has already
    /// reported it to the user.
    pub async fn add_to_cart(
        &self,
        product_id: u64,
        quantity: u32,
    ) -> Result<bool, RequestError> {
        let quantity = quantity.max(1);
        let path = format!("/orders/cart/add/{product_id}/");
        let body = json!({ "quantity": quantity });

        let value = self.dispatcher.request(&path, RequestOptions::post(body)).await?;
        let envelope: CartEnvelope = serde_json::from_value(value).unwrap_or_default();

        if envelope.success {
            update_cart_indicator(envelope.cart_count);
            let message = envelope.message.as_deref().unwrap_or("Added to cart.");
            self.notifier.notify(message, Severity::Success);
            Ok(true)
        } else {
            let message = envelope.error.as_deref().unwrap_or(FAILURE_MESSAGE);
            self.notifier.notify(message, Severity::Error);
            Ok(false)
        }
    }

    /// Toggle a product on the wishlist.
    ///
    /// Resolves `Ok(true)` when the product is now wishlisted, `Ok(false)`
    /// when it was removed or the server refused.
    ///
    /// # Errors
    /// Propagates [`RequestError`] from the dispatcher, which has already
    /// reported it to the user.
    pub async fn toggle_wishlist(&self, product_id: u64) -> Result<bool, RequestError> {
        let path = format!("/products/product/{product_id}/wishlist/");

        let value = self.dispatcher.request(&path, RequestOptions::post(json!({}))).await?;
        let envelope: WishlistEnvelope = serde_json::from_value(value).unwrap_or_default();

        if envelope.success {
            let added = envelope.added.unwrap_or(true);
            let message = if added {
                "Added to wishlist."
            } else {
                "Removed from wishlist."
            };
            self.notifier.notify(message, Severity::Success);
            Ok(added)
        } else {
            let message = envelope.error.as_deref().unwrap_or(FAILURE_MESSAGE);
            self.notifier.notify(message, Severity::Error);
            Ok(false)
        }
    }
}

/// Write the new cart count into the navbar indicator.
///
/// Prefers the server-supplied count; a page whose markup predates the
/// `cart_count` field falls back to read-increment of the displayed value.
fn update_cart_indicator(server_count: Option<u64>) {
    let document = get_document();
    let Some(indicator) = document.get_element_by_id(CART_COUNT_ID) else {
        log::debug!("No cart indicator on this page");
        return;
    };

    if server_count.is_none() {
        log::debug!("Cart endpoint answered without a cart_count field, incrementing");
    }
    let displayed = indicator.text_content().unwrap_or_default();
    let next = next_count(&displayed, server_count);
    indicator.set_text_content(Some(&next.to_string()));
}

/// The count to display: the server's answer, else displayed value plus one.
fn next_count(displayed: &str, server_count: Option<u64>) -> u64 {
    server_count.unwrap_or_else(|| {
        displayed
            .trim()
            .parse::<u64>()
            .unwrap_or(0)
            .saturating_add(1)
    })
}
