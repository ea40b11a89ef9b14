//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::{ProductRepository, ProductStream};

pub const COLLECTION_NAME: &str = "products";

pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Create the ascending `price` index used by range queries
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "price": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_price".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// `None` when `id` is not a valid ObjectId
    fn id_filter(id: &str) -> Option<Document> {
        ObjectId::parse_str(id).ok().map(|oid| doc! { "_id": oid })
    }

    fn price_filter(min: f64, max: f64) -> Document {
        doc! { "price": { "$gte": min, "$lte": max } }
    }

    async fn find_stream(&self, filter: Document) -> ProductResult<ProductStream> {
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.map_err(ProductError::from).boxed())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<ProductStream> {
        self.find_stream(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let Some(filter) = Self::id_filter(id) else {
            tracing::debug!("Malformed product id, treating as missing");
            return Ok(None);
        };

        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_price_between(&self, min: f64, max: f64) -> ProductResult<ProductStream> {
        self.find_stream(Self::price_filter(min, max)).await
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn insert(&self, mut product: Product) -> ProductResult<Product> {
        let id = ObjectId::new();
        product.id = Some(id);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = ?product.id))]
    async fn replace(&self, product: Product) -> ProductResult<Option<Product>> {
        let id = product
            .id
            .ok_or_else(|| ProductError::Internal("cannot replace a product without id".into()))?;

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &product)
            .await?;

        if result.matched_count == 0 {
            tracing::warn!(product_id = %id, "Product vanished before replace");
            return Ok(None);
        }
        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(Some(product))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> ProductResult<bool> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(filter).await?;
        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }
}
