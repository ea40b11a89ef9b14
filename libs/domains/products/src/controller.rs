use std::sync::Arc;

use crate::error::ProductResult;
use crate::models::ProductDto;
use crate::service::{ProductDtoStream, ProductService};

/// Entry point for product operations
///
/// Every method forwards to the service exactly once and hands back its
/// result untouched; mapping to HTTP happens in [`crate::handlers`].
pub struct ProductController<S: ProductService> {
    service: Arc<S>,
}

impl<S: ProductService> ProductController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn get_products(&self) -> ProductDtoStream {
        self.service.get_products()
    }

    pub async fn get_product(&self, id: &str) -> ProductResult<Option<ProductDto>> {
        self.service.get_product(id).await
    }

    pub fn get_product_between_range(&self, min: f64, max: f64) -> ProductDtoStream {
        self.service.get_product_in_range(min, max)
    }

    pub async fn save_product(&self, product: ProductDto) -> ProductResult<ProductDto> {
        self.service.save_product(product).await
    }

    pub async fn update_product(
        &self,
        product: ProductDto,
        id: &str,
    ) -> ProductResult<Option<ProductDto>> {
        self.service.update_product(product, id).await
    }

    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        self.service.delete_product(id).await
    }
}

impl<S: ProductService> Clone for ProductController<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
