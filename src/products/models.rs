use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::reviews::models::Review;

/// Product as stored in the catalog
///
/// `rating` and `num_reviews` are denormalized aggregates kept in step with
/// the reviews table inside the review-insert transaction. `reviews` is
/// populated only on the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    /// Admin who created the product
    pub user_id: Uuid,
    #[schema(example = "Airpods Wireless Bluetooth Headphones")]
    pub name: String,
    #[schema(example = "/images/airpods.jpg")]
    pub image: String,
    #[schema(example = "Apple")]
    pub brand: String,
    #[schema(example = "Electronics")]
    pub category: String,
    pub description: String,
    #[schema(value_type = f64, example = 89.99)]
    pub price: Decimal,
    #[schema(example = 10)]
    pub count_in_stock: i32,
    #[schema(example = 4.5, minimum = 0.0, maximum = 5.0)]
    pub rating: f64,
    #[schema(example = 12)]
    pub num_reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// One page of catalog results
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: u32,
    pub pages: u32,
}

/// Product creation payload
///
/// Every field is required; they are `Option` so a missing field is
/// reported by name, and so a stock count of zero is not mistaken for an
/// absent one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock count must not be negative"))]
    pub count_in_stock: Option<i32>,
}

/// Partial product update; absent fields keep their stored values
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock count must not be negative"))]
    pub count_in_stock: Option<i32>,
}

/// Validated fields for a product insert, produced by the service layer
#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub count_in_stock: i32,
}
