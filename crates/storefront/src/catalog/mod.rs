//! Product catalog: types, the API contract, and query helpers.
//!
//! # Architecture
//!
//! - [`CatalogApi`] is the in-process contract the products resource talks to
//! - [`MockCatalogApi`] serves it from memory with simulated latency
//! - [`ProductQuery`] filters, sorts, and searches a product list

mod mock;
mod query;

pub use mock::MockCatalogApi;
pub use query::{ProductQuery, ProductSort, categories};

use std::future::Future;

use chrono::{DateTime, Utc};
use larder_core::{ApiResult, Price, ProductId};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image: String,
    pub stock: u32,
    /// Average review score, 0.0 to 5.0.
    pub rating: f32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub stock: u32,
}

/// Partial update; only the fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub stock: Option<u32>,
}

impl ProductPatch {
    /// Apply the patch in place.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// Catalog operations used by the storefront.
///
/// Implementations must be thread-safe (`Send + Sync`). Every call may fail;
/// callers decide how to surface the error.
pub trait CatalogApi: Send + Sync {
    /// List every product.
    fn get_products(&self) -> impl Future<Output = ApiResult<Vec<Product>>> + Send;

    /// Create a product and return it with its assigned id.
    fn create_product(
        &self,
        draft: ProductDraft,
    ) -> impl Future<Output = ApiResult<Product>> + Send;

    /// Apply `patch` to product `id` and return the updated product.
    fn update_product(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> impl Future<Output = ApiResult<Product>> + Send;

    /// Delete product `id`.
    fn delete_product(&self, id: &ProductId) -> impl Future<Output = ApiResult<()>> + Send;
}
