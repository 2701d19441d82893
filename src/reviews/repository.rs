use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::reviews::models::Review;
use crate::reviews::rating_calculator;

const REVIEW_COLUMNS: &str = "id, product_id, user_id, name, rating, comment, created_at";

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether this user already reviewed this product
    pub async fn exists_for(&self, product_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE product_id = $1 AND user_id = $2)",
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    /// All reviews for a product, oldest first
    pub async fn list_for_product(&self, product_id: Uuid) -> Result<Vec<Review>, ApiError> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE product_id = $1 ORDER BY created_at"
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Insert a review and bring the product's aggregates in step, all
    /// inside one transaction.
    ///
    /// The ratings are re-read within the same transaction that inserted
    /// the new row, so the stored mean and count always describe the same
    /// snapshot; concurrent reviewers cannot interleave a lost update.
    /// A duplicate slipping past the service pre-check hits the
    /// (product_id, user_id) unique constraint and rolls back.
    pub async fn add_and_recompute(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        name: &str,
        rating: i16,
        comment: &str,
    ) -> Result<Review, ApiError> {
        let mut tx = self.pool.begin().await?;

        let review = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO reviews (product_id, user_id, name, rating, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(product_id)
        .bind(user_id)
        .bind(name)
        .bind(rating)
        .bind(comment)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return ApiError::Conflict("Product already reviewed".to_string());
                }
            }
            ApiError::Database(e)
        })?;

        let ratings: Vec<i16> =
            sqlx::query_scalar("SELECT rating FROM reviews WHERE product_id = $1")
                .bind(product_id)
                .fetch_all(&mut *tx)
                .await?;

        let rating_avg = rating_calculator::average(&ratings).unwrap_or(0.0);

        sqlx::query(
            "UPDATE products SET rating = $2, num_reviews = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(product_id)
        .bind(rating_avg)
        .bind(ratings.len() as i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(review)
    }
}
