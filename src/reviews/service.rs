// Review service

use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::products::repository::ProductRepository;
use crate::reviews::models::{CreateReviewRequest, Review};
use crate::reviews::repository::ReviewRepository;
use crate::validation::require;

pub struct ReviewService {
    reviews: ReviewRepository,
    products: ProductRepository,
}

impl ReviewService {
    pub fn new(reviews: ReviewRepository, products: ProductRepository) -> Self {
        Self { reviews, products }
    }

    /// Submit a review for a product
    ///
    /// 404 for an unknown product, 409 for a second review by the same
    /// user; the aggregate update happens atomically with the insert.
    pub async fn add_review(
        &self,
        product_id: Uuid,
        user: &AuthenticatedUser,
        request: CreateReviewRequest,
    ) -> Result<Review, ApiError> {
        request.validate()?;

        let rating = require(request.rating, "rating")?;
        let comment = request.comment.unwrap_or_default();
        let name = request
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| user.name.clone());

        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(ApiError::NotFound { resource: "Product" });
        }

        // Friendly pre-check; the unique constraint still wins a race.
        if self.reviews.exists_for(product_id, user.id).await? {
            return Err(ApiError::Conflict("Product already reviewed".to_string()));
        }

        let review = self
            .reviews
            .add_and_recompute(product_id, user.id, &name, rating, &comment)
            .await?;

        tracing::info!(product_id = %product_id, user_id = %user.id, "Review added");
        Ok(review)
    }
}
