//! The document served at `/api-docs/openapi.json`

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        description = "Product catalogue over MongoDB; list endpoints can stream NDJSON"
    ),
    nest((path = "/api/products", api = domain_products::ApiDoc)),
    tags((name = "Products"))
)]
pub struct ApiDoc;
