use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::products::models::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "id, user_id, name, image, brand, category, description, price, \
                               count_in_stock, rating, num_reviews, created_at, updated_at";

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of products plus the total match count
    ///
    /// Keyword matching is a case-insensitive substring match on the name.
    /// Pagination is LIMIT/OFFSET: pages are not stable while concurrent
    /// writes reorder the catalog, which is accepted behavior here.
    pub async fn list(
        &self,
        keyword: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Product>, i64), ApiError> {
        let pattern = match keyword {
            Some(kw) => format!("%{}%", kw),
            None => "%".to_string(),
        };

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE name ILIKE $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((products, total))
    }

    /// Highest-rated products, descending
    pub async fn top_rated(&self, limit: i64) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rating DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn create(&self, user_id: Uuid, product: NewProduct) -> Result<Product, ApiError> {
        let created = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (user_id, name, image, brand, category, description, price, count_in_stock)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(user_id)
        .bind(product.name)
        .bind(product.image)
        .bind(product.brand)
        .bind(product.category)
        .bind(product.description)
        .bind(product.price)
        .bind(product.count_in_stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partial update via COALESCE; returns None when the id is unknown
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        price: Option<Decimal>,
        description: Option<String>,
        image: Option<String>,
        brand: Option<String>,
        category: Option<String>,
        count_in_stock: Option<i32>,
    ) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products
             SET name = COALESCE($2, name),
                 price = COALESCE($3, price),
                 description = COALESCE($4, description),
                 image = COALESCE($5, image),
                 brand = COALESCE($6, brand),
                 category = COALESCE($7, category),
                 count_in_stock = COALESCE($8, count_in_stock),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(image)
        .bind(brand)
        .bind(category)
        .bind(count_in_stock)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Delete a product; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
