// HTTP handler for review submission

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::reviews::models::CreateReviewRequest;
use crate::AppState;

/// Handler for POST /api/products/:id/reviews
pub async fn create_review_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(product_id): Path<Uuid>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state
        .review_service
        .add_review(product_id, &user, request)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Review added" }))))
}
