//! HTTP handlers for Products API

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestJsonResponse, BadRequestQueryResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    JsonBody, QueryParams,
};
use futures::{future, TryStreamExt};
use utoipa::OpenApi;

use crate::controller::ProductController;
use crate::error::{ProductError, ProductResult};
use crate::models::{PriceRange, ProductDto};
use crate::service::{ProductDtoStream, ProductService};

pub const NDJSON: &str = "application/x-ndjson";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        get_product_between_range,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductDto, PriceRange),
        responses(
            NotFoundResponse,
            BadRequestJsonResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<S: ProductService + 'static>(controller: ProductController<S>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/product-range", get(get_product_between_range))
        .route("/update/{id}", put(update_product))
        .route("/delete/{id}", delete(delete_product))
        .route("/{id}", get(get_product))
        .with_state(controller)
}

fn wants_ndjson(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(accepts_ndjson)
}

/// Media types match case-insensitively; `q=0` means "not acceptable".
fn accepts_ndjson(range: &str) -> bool {
    let mut parts = range.split(';').map(str::trim);
    if !parts
        .next()
        .is_some_and(|media| media.eq_ignore_ascii_case(NDJSON))
    {
        return false;
    }

    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("q"))
        .map(|(_, value)| value.trim().parse::<f32>().unwrap_or(0.0))
        .unwrap_or(1.0);
    quality > 0.0
}

fn ndjson_line(product: &ProductDto) -> ProductResult<Vec<u8>> {
    let mut line =
        serde_json::to_vec(product).map_err(|e| ProductError::Internal(e.to_string()))?;
    line.push(b'\n');
    Ok(line)
}

/// JSON array by default; one JSON document per line when NDJSON is accepted
async fn stream_response(stream: ProductDtoStream, headers: &HeaderMap) -> ProductResult<Response> {
    if wants_ndjson(headers) {
        let lines = stream.and_then(|product| future::ready(ndjson_line(&product)));

        let mut response = Body::from_stream(lines).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(NDJSON));
        return Ok(response);
    }

    let products: Vec<ProductDto> = stream.try_collect().await?;
    Ok(Json(products).into_response())
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products; one per line with `Accept: application/x-ndjson`", body = Vec<ProductDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: ProductService>(
    State(controller): State<ProductController<S>>,
    headers: HeaderMap,
) -> ProductResult<Response> {
    stream_response(controller.get_products(), &headers).await
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<S: ProductService>(
    State(controller): State<ProductController<S>>,
    Path(id): Path<String>,
) -> ProductResult<Json<ProductDto>> {
    let product = controller.get_product(&id).await?;
    product.map(Json).ok_or(ProductError::NotFound(id))
}

/// Products priced between `min` and `max`, inclusive
#[utoipa::path(
    get,
    path = "/product-range",
    tag = "Products",
    params(PriceRange),
    responses(
        (status = 200, description = "Products in range", body = Vec<ProductDto>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product_between_range<S: ProductService>(
    State(controller): State<ProductController<S>>,
    QueryParams(range): QueryParams<PriceRange>,
    headers: HeaderMap,
) -> ProductResult<Response> {
    stream_response(
        controller.get_product_between_range(range.min, range.max),
        &headers,
    )
    .await
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductDto,
    responses(
        (status = 201, description = "Product created successfully", body = ProductDto),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: ProductService>(
    State(controller): State<ProductController<S>>,
    JsonBody(input): JsonBody<ProductDto>,
) -> ProductResult<impl IntoResponse> {
    let product = controller.save_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (hex ObjectId)")
    ),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductDto),
        (status = 400, response = BadRequestJsonResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<S: ProductService>(
    State(controller): State<ProductController<S>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ProductDto>,
) -> ProductResult<Json<ProductDto>> {
    let product = controller.update_product(input, &id).await?;
    product.map(Json).ok_or(ProductError::NotFound(id))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (hex ObjectId)")
    ),
    responses(
        (status = 204, description = "Product deleted, or did not exist"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<S: ProductService>(
    State(controller): State<ProductController<S>>,
    Path(id): Path<String>,
) -> ProductResult<impl IntoResponse> {
    controller.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
