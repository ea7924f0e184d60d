//! In-memory catalog API.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::Utc;
use larder_core::{ApiError, ApiResponse, ApiResult, MockBehavior, ProductId};
use tracing::instrument;

use super::{CatalogApi, Product, ProductDraft, ProductPatch};

/// Catalog served from memory, with simulated latency.
#[derive(Debug, Default)]
pub struct MockCatalogApi {
    products: RwLock<Vec<Product>>,
    behavior: MockBehavior,
}

impl MockCatalogApi {
    /// An empty catalog.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self::with_products(latency, Vec::new())
    }

    #[must_use]
    pub fn with_products(latency: Duration, products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            behavior: MockBehavior::new(latency),
        }
    }

    /// Load products from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `json` is not a valid product list.
    pub fn from_json(latency: Duration, json: &str) -> Result<Self, serde_json::Error> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::with_products(latency, products))
    }

    /// Make the next call fail.
    pub fn fail_next(&self) {
        self.behavior.fail_next();
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Product>>, ApiError> {
        self.products
            .read()
            .map_err(|_| ApiError::Unavailable("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Product>>, ApiError> {
        self.products
            .write()
            .map_err(|_| ApiError::Unavailable("catalog lock poisoned".to_string()))
    }
}

impl CatalogApi for MockCatalogApi {
    #[instrument(skip(self))]
    async fn get_products(&self) -> ApiResult<Vec<Product>> {
        self.behavior.simulate("getProducts").await?;
        Ok(ApiResponse::new(self.read()?.clone()))
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_product(&self, draft: ProductDraft) -> ApiResult<Product> {
        self.behavior.simulate("createProduct").await?;
        if draft.name.trim().is_empty() {
            return Err(ApiError::Invalid("Product name is required".to_string()));
        }

        let product = Product {
            id: ProductId::generate(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image: draft.image,
            stock: draft.stock,
            rating: 0.0,
            created_at: Utc::now(),
        };
        self.write()?.push(product.clone());
        Ok(ApiResponse::new(product))
    }

    #[instrument(skip(self, patch))]
    async fn update_product(&self, id: &ProductId, patch: ProductPatch) -> ApiResult<Product> {
        self.behavior.simulate("updateProduct").await?;
        if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ApiError::Invalid("Product name is required".to_string()));
        }

        let mut products = self.write()?;
        let product = products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| ApiError::not_found("Product", id.as_str()))?;
        patch.apply_to(product);
        Ok(ApiResponse::new(product.clone()))
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: &ProductId) -> ApiResult<()> {
        self.behavior.simulate("deleteProduct").await?;
        let mut products = self.write()?;
        let before = products.len();
        products.retain(|product| &product.id != id);
        if products.len() == before {
            return Err(ApiError::not_found("Product", id.as_str()));
        }
        Ok(ApiResponse::new(()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use larder_core::Price;

    use super::*;

    const CATALOG_JSON: &str = r#"[
        {
            "id": "P1",
            "name": "Olive Oil",
            "description": "Cold pressed",
            "price": {"amount": "12.50", "currency_code": "USD"},
            "category": "Pantry",
            "image": "/img/p1.jpg",
            "stock": 8,
            "rating": 4.5,
            "created_at": "2026-01-05T10:00:00Z"
        }
    ]"#;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: String::new(),
            price: Price::usd_cents(499),
            category: "Pantry".to_string(),
            image: String::new(),
            stock: 3,
        }
    }

    #[tokio::test]
    async fn test_from_json_and_list() {
        let api = MockCatalogApi::from_json(Duration::ZERO, CATALOG_JSON).unwrap();
        let products = api.get_products().await.unwrap().data;
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().unwrap().id, ProductId::new("P1"));
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let api = MockCatalogApi::new(Duration::ZERO);
        let created = api.create_product(draft("Sea Salt")).await.unwrap().data;
        assert!(!created.id.as_str().is_empty());
        assert_eq!(api.get_products().await.unwrap().data, vec![created]);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let api = MockCatalogApi::new(Duration::ZERO);
        let err = api.create_product(draft("  ")).await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let api = MockCatalogApi::from_json(Duration::ZERO, CATALOG_JSON).unwrap();
        let patch = ProductPatch {
            stock: Some(0),
            ..ProductPatch::default()
        };
        let updated = api
            .update_product(&ProductId::new("P1"), patch)
            .await
            .unwrap()
            .data;
        assert_eq!(updated.stock, 0);
        assert_eq!(updated.name, "Olive Oil");
        assert!(!updated.in_stock());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let api = MockCatalogApi::new(Duration::ZERO);
        let missing = ProductId::new("nope");
        assert!(matches!(
            api.update_product(&missing, ProductPatch::default()).await,
            Err(ApiError::NotFound { .. })
        ));
        assert!(matches!(
            api.delete_product(&missing).await,
            Err(ApiError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let api = MockCatalogApi::new(Duration::ZERO);
        api.fail_next();
        assert!(matches!(
            api.get_products().await,
            Err(ApiError::Unavailable(_))
        ));
        assert!(api.get_products().await.is_ok());
    }
}
