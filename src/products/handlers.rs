// HTTP handlers for the product catalog
// Reads are public; writes require an admin identity.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::middleware::AdminUser;
use crate::error::ApiError;
use crate::products::models::{CreateProductRequest, Product, ProductPage, UpdateProductRequest};
use crate::AppState;

/// Query parameters for the catalog listing
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    /// Case-insensitive substring match on the product name
    pub keyword: Option<String>,
    /// 1-indexed page number
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Handler for GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("keyword" = Option<String>, Query, description = "Substring filter on product name"),
        ("page" = Option<u32>, Query, description = "1-indexed page number"),
        ("page_size" = Option<u32>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ProductPage>, ApiError> {
    tracing::debug!(?query, "Listing products");
    let page = state
        .product_service
        .list(query.keyword, query.page, query.page_size)
        .await?;
    Ok(Json(page))
}

/// Handler for GET /api/products/top
#[utoipa::path(
    get,
    path = "/api/products/top",
    responses(
        (status = 200, description = "Highest-rated products", body = Vec<Product>),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn top_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.product_service.top_rated().await?;
    Ok(Json(products))
}

/// Handler for GET /api/products/:id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with its reviews", body = Product),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product = state.product_service.get(id).await?;
    Ok(Json(product))
}

/// Handler for POST /api/products (admin)
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Missing credentials"),
        (status = 403, description = "Not an admin"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.product_service.create(admin.0.id, request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for PUT /api/products/:id (admin)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let product = state.product_service.update(id, request).await?;
    Ok(Json(product))
}

/// Handler for DELETE /api/products/:id (admin)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.product_service.delete(id).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
