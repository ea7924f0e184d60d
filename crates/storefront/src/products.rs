//! Products resource: loading/error/data state over the catalog API.
//!
//! Every action awaits the API first and only then touches local state, so
//! the list never shows a product the API rejected. Failures set `error`,
//! raise an error notification, and are returned to the caller.

use std::sync::Arc;

use larder_core::{FetchTicket, Notification, Notifier, ProductId, ResourceState, Store};
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::catalog::{CatalogApi, Product, ProductDraft, ProductPatch, ProductQuery};
use crate::error::{AppError, Result};

/// Observable product list backed by a [`CatalogApi`].
pub struct ProductsResource<A> {
    api: Arc<A>,
    state: Store<ResourceState<Product>>,
    tickets: FetchTicket,
    notifier: Arc<dyn Notifier>,
}

impl<A: CatalogApi> ProductsResource<A> {
    #[must_use]
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            state: Store::default(),
            tickets: FetchTicket::new(),
            notifier,
        }
    }

    /// Current loading/error/data triple.
    #[must_use]
    pub fn state(&self) -> ResourceState<Product> {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Product>> {
        self.state.subscribe()
    }

    /// Load the product list.
    ///
    /// When several fetches overlap, only the most recently started one may
    /// write its result; earlier responses are discarded.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording it in state.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<Product>> {
        let ticket = self.tickets.issue();
        self.state.update(|state| {
            state.begin();
            true
        });

        match self.api.get_products().await {
            Ok(response) => {
                let products = response.data;
                if self.tickets.is_current(ticket) {
                    let data = products.clone();
                    self.state.update(|state| {
                        state.data = data;
                        state.succeed();
                        true
                    });
                    debug!(count = products.len(), "products loaded");
                } else {
                    debug!(ticket, "discarding stale products response");
                }
                Ok(products)
            }
            Err(e) => {
                let err = AppError::from(e);
                if self.tickets.is_current(ticket) {
                    self.fail("Failed to load products", &err);
                }
                Err(err)
            }
        }
    }

    /// Create a product and append it to the list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` without calling the API when the name is
    /// blank, or the API error otherwise.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: ProductDraft) -> Result<Product> {
        if draft.name.trim().is_empty() {
            let err = AppError::BadRequest("Product name is required".to_string());
            self.notifier.notify(Notification::warning(err.user_message()));
            return Err(err);
        }

        match self.api.create_product(draft).await {
            Ok(response) => {
                let product = response.data;
                let appended = product.clone();
                self.state.update(|state| {
                    state.data.push(appended);
                    state.error = None;
                    true
                });
                self.notifier.notify(Notification::success(format!(
                    "{} created",
                    product.name
                )));
                Ok(product)
            }
            Err(e) => {
                let err = AppError::from(e);
                self.fail("Failed to create product", &err);
                Err(err)
            }
        }
    }

    /// Update a product and replace it in place.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording it in state.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product> {
        match self.api.update_product(id, patch).await {
            Ok(response) => {
                let product = response.data;
                let replacement = product.clone();
                self.state.update(|state| {
                    if let Some(slot) = state.data.iter_mut().find(|p| p.id == replacement.id) {
                        *slot = replacement;
                    }
                    state.error = None;
                    true
                });
                self.notifier.notify(Notification::success(format!(
                    "{} updated",
                    product.name
                )));
                Ok(product)
            }
            Err(e) => {
                let err = AppError::from(e);
                self.fail("Failed to update product", &err);
                Err(err)
            }
        }
    }

    /// Delete a product and drop it from the list.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording it in state.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ProductId) -> Result<()> {
        match self.api.delete_product(id).await {
            Ok(_) => {
                self.state.update(|state| {
                    state.data.retain(|p| &p.id != id);
                    state.error = None;
                    true
                });
                self.notifier
                    .notify(Notification::success("Product deleted".to_string()));
                Ok(())
            }
            Err(e) => {
                let err = AppError::from(e);
                self.fail("Failed to delete product", &err);
                Err(err)
            }
        }
    }

    /// Look up a loaded product. `None` renders as a "not found" page.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<Product> {
        self.state
            .read(|state| state.data.iter().find(|p| &p.id == id).cloned())
    }

    /// Loaded products filtered and sorted by `query`.
    #[must_use]
    pub fn query(&self, query: &ProductQuery) -> Vec<Product> {
        self.state.read(|state| query.apply(&state.data))
    }

    fn fail(&self, context: &str, err: &AppError) {
        err.report(context);
        let message = format!("{context}: {}", err.user_message());
        self.state.update(|state| {
            state.fail(message.clone());
            true
        });
        self.notifier.notify(Notification::error(message));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::Utc;
    use larder_core::{ApiError, ApiResponse, ApiResult, MemoryNotifier, NotificationLevel, Price};

    use super::*;
    use crate::catalog::MockCatalogApi;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: String::new(),
            price: Price::usd_cents(899),
            category: "Pantry".to_string(),
            image: String::new(),
            stock: 5,
        }
    }

    fn resource() -> (
        ProductsResource<MockCatalogApi>,
        Arc<MockCatalogApi>,
        Arc<MemoryNotifier>,
    ) {
        let api = Arc::new(MockCatalogApi::new(Duration::ZERO));
        let notifier = Arc::new(MemoryNotifier::new());
        (
            ProductsResource::new(api.clone(), notifier.clone()),
            api,
            notifier,
        )
    }

    #[tokio::test]
    async fn test_fetch_populates_state() {
        let (products, api, _) = resource();
        api.create_product(draft("Honey")).await.unwrap();

        let loaded = products.fetch().await.unwrap();
        assert_eq!(loaded.len(), 1);

        let state = products.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.data, loaded);
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_error_and_notifies() {
        let (products, api, notifier) = resource();
        api.fail_next();

        let err = products.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::Unavailable(_))));

        let state = products.state();
        assert!(!state.loading);
        assert!(state.error.unwrap().starts_with("Failed to load products"));
        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.first().unwrap().level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_crud_mutates_local_state() {
        let (products, _, _) = resource();
        let created = products.create(draft("Honey")).await.unwrap();
        assert_eq!(products.state().data.len(), 1);

        let patch = ProductPatch {
            name: Some("Wildflower Honey".to_string()),
            ..ProductPatch::default()
        };
        products.update(&created.id, patch).await.unwrap();
        assert_eq!(
            products.find(&created.id).unwrap().name,
            "Wildflower Honey"
        );

        products.delete(&created.id).await.unwrap();
        assert!(products.find(&created.id).is_none());
    }

    #[tokio::test]
    async fn test_blank_name_blocked_locally() {
        let (products, api, notifier) = resource();
        let err = products.create(draft("")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(api.get_products().await.unwrap().data.is_empty());
        assert_eq!(
            notifier.drain().first().map(|n| n.level),
            Some(NotificationLevel::Warning)
        );
    }

    #[tokio::test]
    async fn test_delete_missing_keeps_list() {
        let (products, _, _) = resource();
        products.create(draft("Honey")).await.unwrap();
        let err = products.delete(&ProductId::new("ghost")).await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::NotFound { .. })));
        assert_eq!(products.state().data.len(), 1);
        assert!(products.state().error.is_some());
    }

    /// Answers the first `get_products` slowly and later ones quickly.
    struct SlowThenFast {
        calls: AtomicUsize,
    }

    fn named(name: &str) -> Product {
        Product {
            id: ProductId::new(name),
            name: name.to_string(),
            description: String::new(),
            price: Price::usd_cents(100),
            category: "Pantry".to_string(),
            image: String::new(),
            stock: 1,
            rating: 0.0,
            created_at: Utc::now(),
        }
    }

    impl CatalogApi for SlowThenFast {
        async fn get_products(&self) -> ApiResult<Vec<Product>> {
            let (delay, name) = if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                (50, "stale")
            } else {
                (5, "fresh")
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(ApiResponse::new(vec![named(name)]))
        }

        async fn create_product(&self, _draft: ProductDraft) -> ApiResult<Product> {
            Err(ApiError::Invalid("unsupported".to_string()))
        }

        async fn update_product(&self, _id: &ProductId, _patch: ProductPatch) -> ApiResult<Product> {
            Err(ApiError::Invalid("unsupported".to_string()))
        }

        async fn delete_product(&self, _id: &ProductId) -> ApiResult<()> {
            Err(ApiError::Invalid("unsupported".to_string()))
        }
    }

    #[tokio::test]
    async fn test_stale_fetch_does_not_overwrite() {
        let api = Arc::new(SlowThenFast {
            calls: AtomicUsize::new(0),
        });
        let products = ProductsResource::new(api, Arc::new(MemoryNotifier::new()));

        let first = products.fetch();
        let second = async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            products.fetch().await
        };
        let (first, second) = tokio::join!(first, second);

        // Both callers get their own response...
        assert_eq!(first.unwrap().first().unwrap().name, "stale");
        assert_eq!(second.unwrap().first().unwrap().name, "fresh");

        // ...but only the newest one lands in state.
        let state = products.state();
        assert!(!state.loading);
        assert_eq!(state.data.first().unwrap().name, "fresh");
    }
}
