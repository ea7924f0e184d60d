//! Application state shared across the storefront UI.
//!
//! `AppState` is the composition root: it owns the cart store, the products
//! resource, and the notifier, and hands them to whatever renders the UI.
//! Each `AppState` is independent, so two instances never share a cart.

use std::sync::Arc;

use larder_core::{MemoryNotifier, Notifier, Pagination};

use crate::cart::CartStore;
use crate::catalog::{CatalogApi, MockCatalogApi, Product, ProductQuery};
use crate::checkout::{self, CheckoutForm, OrderConfirmation};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::products::ProductsResource;

/// Application state shared across all views.
///
/// This struct is cheaply cloneable via `Arc`.
pub struct AppState<A = MockCatalogApi> {
    inner: Arc<AppStateInner<A>>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<A> {
    config: StorefrontConfig,
    cart: CartStore,
    products: ProductsResource<A>,
    notifier: Arc<dyn Notifier>,
}

impl AppState<MockCatalogApi> {
    /// State backed by an in-memory catalog holding `products`.
    ///
    /// Notifications are queued on a [`MemoryNotifier`] that is also returned
    /// so the UI can drain it.
    #[must_use]
    pub fn with_mock_catalog(
        config: StorefrontConfig,
        products: Vec<Product>,
    ) -> (Self, Arc<MemoryNotifier>) {
        let api = Arc::new(MockCatalogApi::with_products(config.api_latency, products));
        let notifier = Arc::new(MemoryNotifier::new());
        (Self::new(config, api, notifier.clone()), notifier)
    }
}

impl<A: CatalogApi> AppState<A> {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        let cart = CartStore::new(config.currency, Arc::clone(&notifier));
        let products = ProductsResource::new(api, Arc::clone(&notifier));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                products,
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn products(&self) -> &ProductsResource<A> {
        &self.inner.products
    }

    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    /// Pagination for `query` over the loaded products, positioned at `page`.
    #[must_use]
    pub fn catalog_page(&self, query: &ProductQuery, page: usize) -> (Vec<Product>, Pagination) {
        let matches = self.products().query(query);
        let mut pagination = Pagination::new(matches.len(), self.config().products_per_page);
        pagination.go_to_page(page);
        let items = pagination.paginate(&matches).to_vec();
        (items, pagination)
    }

    /// Place an order for the current cart using the configured pricing rules.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Checkout`] when the cart
    /// is empty or the form is invalid. The failure is logged before returning.
    pub fn checkout(&self, form: &CheckoutForm) -> Result<OrderConfirmation> {
        checkout::place_order(
            self.cart(),
            form,
            &self.config().checkout,
            self.notifier(),
        )
        .map_err(|e| {
            let err = AppError::from(e);
            err.report("checkout");
            err
        })
    }
}
