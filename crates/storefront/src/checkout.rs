//! Checkout: form validation, order totals, and cart hand-off.
//!
//! Validation happens before anything else; a rejected form leaves the cart
//! untouched. A successful checkout returns an [`OrderConfirmation`] and
//! clears the cart.

use chrono::{DateTime, Utc};
use larder_core::{Email, EmailError, Notification, Notifier, OrderId, Price, PriceError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::cart::{CartItem, CartStore};
use crate::config::CheckoutConfig;

/// Reasons a checkout is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PriceError),
}

/// Shipping and contact details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl CheckoutForm {
    /// Check required fields, in form order, and parse the email.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<Email, CheckoutError> {
        let required = [
            ("Full name", &self.full_name),
            ("Email", &self.email),
            ("Address", &self.address),
            ("City", &self.city),
            ("Postal code", &self.postal_code),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CheckoutError::MissingField(*field));
        }
        Ok(Email::parse(&self.email)?)
    }
}

/// Money breakdown for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderTotals {
    /// Apply shipping and tax rules to a subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] if the rules produce a negative charge.
    pub fn compute(subtotal: Price, rules: &CheckoutConfig) -> Result<Self, PriceError> {
        let currency = subtotal.currency_code();
        let shipping_amount = if subtotal.amount() >= rules.free_shipping_over {
            Decimal::ZERO
        } else {
            rules.flat_shipping
        };
        let shipping = Price::new(shipping_amount, currency)?;
        let tax = Price::new((subtotal.amount() * rules.tax_rate).round_dp(2), currency)?;
        let total = subtotal.plus(shipping).plus(tax);
        Ok(Self {
            subtotal,
            shipping,
            tax,
            total,
        })
    }
}

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub email: Email,
    pub items: Vec<CartItem>,
    pub totals: OrderTotals,
    pub placed_at: DateTime<Utc>,
}

/// Validate the form, price the cart, and clear it.
///
/// # Errors
///
/// Returns [`CheckoutError`] and raises a warning notification when the cart
/// is empty or the form is invalid. The cart is kept in that case.
pub fn place_order(
    cart: &CartStore,
    form: &CheckoutForm,
    rules: &CheckoutConfig,
    notifier: &dyn Notifier,
) -> Result<OrderConfirmation, CheckoutError> {
    let result = build_confirmation(cart, form, rules);
    match &result {
        Ok(confirmation) => {
            cart.clear_cart();
            info!(order_id = %confirmation.order_id, total = %confirmation.totals.total, "order placed");
            notifier.notify(Notification::success(format!(
                "Order {} placed",
                confirmation.order_id
            )));
        }
        Err(err) => notifier.notify(Notification::warning(err.to_string())),
    }
    result
}

fn build_confirmation(
    cart: &CartStore,
    form: &CheckoutForm,
    rules: &CheckoutConfig,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let email = form.validate()?;
    let totals = OrderTotals::compute(cart.subtotal(), rules)?;

    let short = uuid::Uuid::new_v4().simple().to_string();
    let order_id = OrderId::new(format!(
        "ORD-{}",
        short.get(..8).unwrap_or(&short).to_ascii_uppercase()
    ));

    Ok(OrderConfirmation {
        order_id,
        email,
        items: cart.items(),
        totals,
        placed_at: Utc::now(),
    })
}
