//! Shopping cart store.
//!
//! The cart is an ordered list of [`CartItem`]s, unique by product id, kept
//! in insertion order for display. Every action mutates the list
//! synchronously and wakes subscribers.
//!
//! Quantity rules:
//! - Adding an item already in the cart bumps its quantity by one, whatever
//!   quantity the incoming item carries.
//! - `update_quantity` with zero or a negative number removes the line.
//!
//! Every line is priced in the cart's currency. Items in any other currency
//! are refused with a warning.

use std::sync::Arc;

use larder_core::{CurrencyCode, Notification, Notifier, Price, ProductId, Store};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// A line with quantity one.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Totals for rendering a cart badge or summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub line_count: usize,
    pub item_count: u32,
    pub subtotal: Price,
}

/// Cart state container.
pub struct CartStore {
    items: Store<Vec<CartItem>>,
    currency: CurrencyCode,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// An empty cart priced in `currency`.
    #[must_use]
    pub fn new(currency: CurrencyCode, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            items: Store::default(),
            currency,
            notifier,
        }
    }

    /// Add `item`, or bump the existing line for the same id by one.
    ///
    /// Returns `false`, leaving the cart untouched, when `item` is priced in
    /// a different currency from the cart.
    pub fn add_item(&self, item: CartItem) -> bool {
        let item_currency = item.price.currency_code();
        if item_currency != self.currency {
            warn!(
                product_id = %item.id,
                cart = ?self.currency,
                item = ?item_currency,
                "cart currency mismatch"
            );
            self.notifier.notify(Notification::warning(format!(
                "{} is priced in {item_currency:?} and cannot be added to a {:?} cart",
                item.name, self.currency
            )));
            return false;
        }

        let mut bumped: Option<(String, u32)> = None;
        let name = item.name.clone();
        let id = item.id.clone();

        self.items.update(|items| {
            if let Some(existing) = items.iter_mut().find(|line| line.id == item.id) {
                existing.quantity = existing.quantity.saturating_add(1);
                bumped = Some((existing.name.clone(), existing.quantity));
            } else {
                let quantity = item.quantity.max(1);
                items.push(item.with_quantity(quantity));
            }
            true
        });

        match bumped {
            Some((name, quantity)) => {
                debug!(product_id = %id, quantity, "cart quantity bumped");
                self.notifier.notify(Notification::info(format!(
                    "Updated {name} quantity to {quantity}"
                )));
            }
            None => {
                debug!(product_id = %id, "cart line added");
                self.notifier
                    .notify(Notification::success(format!("{name} added to cart")));
            }
        }
        true
    }

    /// Remove the line for `id`. Returns whether a line was removed; an
    /// unknown id is not an error.
    pub fn remove_item(&self, id: &ProductId) -> bool {
        let removed = self.items.update(|items| {
            let before = items.len();
            items.retain(|line| &line.id != id);
            items.len() != before
        });
        if removed {
            debug!(product_id = %id, "cart line removed");
        }
        removed
    }

    /// Set the quantity for `id`. Zero or negative removes the line.
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&self, id: &ProductId, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            return self.set_quantity(id, u32::MAX);
        };
        if quantity == 0 {
            return self.remove_item(id);
        }
        self.set_quantity(id, quantity)
    }

    fn set_quantity(&self, id: &ProductId, quantity: u32) -> bool {
        self.items.update(|items| {
            match items.iter_mut().find(|line| &line.id == id) {
                Some(line) if line.quantity != quantity => {
                    line.quantity = quantity;
                    true
                }
                _ => false,
            }
        })
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.items.replace(Vec::new());
        debug!("cart cleared");
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.snapshot()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read(Vec::is_empty)
    }

    /// Quantity of `id`, or zero when absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.items.read(|items| {
            items
                .iter()
                .find(|line| &line.id == id)
                .map_or(0, |line| line.quantity)
        })
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .read(|items| items.iter().map(|line| line.quantity).sum())
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.read(|items| {
            items
                .iter()
                .fold(Price::zero(self.currency), |acc, line| acc.plus(line.line_total()))
        })
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_count: self.items.read(Vec::len),
            item_count: self.item_count(),
            subtotal: self.subtotal(),
        }
    }

    /// Subscribe to cart changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.items.subscribe()
    }
}
