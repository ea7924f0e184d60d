//! Larder storefront library.
//!
//! Client-side state for the shop: the cart, the product catalog resource,
//! and checkout. Everything is reachable from [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod products;
pub mod state;

pub use cart::{CartItem, CartStore, CartSummary};
pub use checkout::{CheckoutError, CheckoutForm, OrderConfirmation, OrderTotals};
pub use config::{CheckoutConfig, ConfigError, StorefrontConfig};
pub use error::AppError;
pub use state::AppState;
