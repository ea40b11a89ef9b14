use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Product document as stored in the `products` collection
///
/// `{ _id, name, qty, price }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned on insert
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    /// Quantity as free text, e.g. "12" or "3 boxes"
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub price: f64,
}

impl Product {
    /// Copy the mutable fields from `dto`, keeping this product's id
    pub fn apply(&mut self, dto: ProductDto) {
        self.name = dto.name;
        self.qty = dto.qty;
        self.price = dto.price;
    }
}

/// Product representation used by the API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    /// 24 character hex ObjectId; ignored on create and update
    #[serde(default)]
    #[schema(example = "65f1c0ffee0000000000cafe")]
    pub id: Option<String>,
    #[serde(default)]
    #[schema(example = "Mechanical keyboard")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "12")]
    pub qty: Option<String>,
    #[serde(default)]
    #[schema(example = 89.99)]
    pub price: f64,
}

impl ProductDto {
    pub fn new(name: impl Into<String>, qty: Option<&str>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            qty: qty.map(str::to_string),
            price,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()),
            name: product.name,
            qty: product.qty,
            price: product.price,
        }
    }
}

/// An id that is not a valid ObjectId becomes `None`
impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id.and_then(|id| ObjectId::parse_str(&id).ok()),
            name: dto.name,
            qty: dto.qty,
            price: dto.price,
        }
    }
}

/// Closed price range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PriceRange {
    /// Lowest price, inclusive
    pub min: f64,
    /// Highest price, inclusive
    pub max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_entity_dto_conversion_keeps_fields() {
        let id = ObjectId::new();
        let product = Product {
            id: Some(id),
            name: "Desk lamp".to_string(),
            qty: Some("4".to_string()),
            price: 24.5,
        };

        let dto = ProductDto::from(product.clone());
        assert_eq!(dto.id.as_deref(), Some(id.to_hex().as_str()));
        assert_eq!(dto.name, "Desk lamp");
        assert_eq!(dto.qty.as_deref(), Some("4"));
        assert_eq!(dto.price, 24.5);

        assert_eq!(Product::from(dto), product);
    }

    #[test]
    fn test_malformed_dto_id_is_dropped() {
        let product = Product::from(ProductDto::new("Mug", None, 8.0).with_id("1"));
        assert!(product.id.is_none());
    }

    #[test]
    fn test_apply_keeps_id() {
        let id = ObjectId::new();
        let mut product = Product {
            id: Some(id),
            name: "Old".to_string(),
            qty: None,
            price: 1.0,
        };

        product.apply(ProductDto::new("New", Some("7"), 2.0).with_id(ObjectId::new().to_hex()));

        assert_eq!(product.id, Some(id));
        assert_eq!(product.name, "New");
        assert_eq!(product.qty.as_deref(), Some("7"));
        assert_eq!(product.price, 2.0);
    }

    #[test]
    fn test_document_shape() {
        let id = ObjectId::new();
        let product = Product {
            id: Some(id),
            name: "Chair".to_string(),
            qty: Some("2".to_string()),
            price: 120.0,
        };

        let doc = bson::to_document(&product).unwrap();
        assert_eq!(doc.get_object_id("_id").unwrap(), id);
        assert_eq!(doc.get_str("name").unwrap(), "Chair");
        assert_eq!(doc.get_str("qty").unwrap(), "2");
        assert_eq!(doc.get_f64("price").unwrap(), 120.0);
        assert!(!doc.contains_key("id"));
    }

    #[test]
    fn test_unsaved_product_has_no_id_field() {
        let doc = bson::to_document(&Product::from(ProductDto::new("Chair", None, 1.0))).unwrap();
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn test_dto_missing_fields_use_defaults() {
        let dto: ProductDto = serde_json::from_str(r#"{"qty":"3"}"#).unwrap();
        assert_eq!(dto.name, "");
        assert_eq!(dto.price, 0.0);
        assert!(dto.id.is_none());
    }
}
