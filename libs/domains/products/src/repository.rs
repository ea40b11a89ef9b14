use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ProductResult;
use crate::models::Product;

/// Stream of stored products, backed by a live cursor
pub type ProductStream = BoxStream<'static, ProductResult<Product>>;

/// Repository trait for Product persistence
///
/// Ids are the hex form of the document `_id`; an id that cannot be parsed
/// matches no document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> ProductResult<ProductStream>;

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Products with `min <= price <= max`
    async fn find_by_price_between(&self, min: f64, max: f64) -> ProductResult<ProductStream>;

    /// Store a new product; the returned product carries the assigned id
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Overwrite the stored document with the same id; `None` when no
    /// document with that id exists any more
    async fn replace(&self, product: Product) -> ProductResult<Option<Product>>;

    /// Returns whether a document was removed
    async fn delete_by_id(&self, id: &str) -> ProductResult<bool>;
}
