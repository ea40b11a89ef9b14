use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductDto};
use crate::repository::ProductRepository;

/// Lazy stream of products as returned to callers
pub type ProductDtoStream = BoxStream<'static, ProductResult<ProductDto>>;

/// Product use cases
///
/// Single results are futures, collections are streams that do no work until
/// polled. A missing product is `Ok(None)`, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    fn get_products(&self) -> ProductDtoStream;

    async fn get_product(&self, id: &str) -> ProductResult<Option<ProductDto>>;

    /// Products priced within `[min, max]`
    fn get_product_in_range(&self, min: f64, max: f64) -> ProductDtoStream;

    /// Persist a new product; any id in the payload is ignored
    async fn save_product(&self, product: ProductDto) -> ProductResult<ProductDto>;

    /// Overwrite name, qty and price of product `id`
    async fn update_product(
        &self,
        product: ProductDto,
        id: &str,
    ) -> ProductResult<Option<ProductDto>>;

    /// Completes normally when `id` does not exist
    async fn delete_product(&self, id: &str) -> ProductResult<()>;
}

/// ProductService backed by a ProductRepository
pub struct DefaultProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> DefaultProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

impl<R: ProductRepository> Clone for DefaultProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> ProductService for DefaultProductService<R> {
    fn get_products(&self) -> ProductDtoStream {
        let repository = Arc::clone(&self.repository);

        stream::once(async move { repository.find_all().await })
            .try_flatten()
            .map_ok(ProductDto::from)
            .boxed()
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &str) -> ProductResult<Option<ProductDto>> {
        let product = self.repository.find_by_id(id).await?;
        Ok(product.map(ProductDto::from))
    }

    fn get_product_in_range(&self, min: f64, max: f64) -> ProductDtoStream {
        if min > max {
            tracing::debug!(min, max, "Empty price range");
            return stream::empty().boxed();
        }

        let repository = Arc::clone(&self.repository);

        stream::once(async move { repository.find_by_price_between(min, max).await })
            .try_flatten()
            .map_ok(ProductDto::from)
            .boxed()
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn save_product(&self, product: ProductDto) -> ProductResult<ProductDto> {
        let mut entity = Product::from(product);
        entity.id = None;

        let stored = self.repository.insert(entity).await?;
        Ok(stored.into())
    }

    #[instrument(skip(self, product))]
    async fn update_product(
        &self,
        product: ProductDto,
        id: &str,
    ) -> ProductResult<Option<ProductDto>> {
        let Some(mut existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        existing.apply(product);
        let stored = self.repository.replace(existing).await?;
        Ok(stored.map(ProductDto::from))
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: &str) -> ProductResult<()> {
        if !self.repository.delete_by_id(id).await? {
            tracing::debug!("No product to delete");
        }
        Ok(())
    }
}
