// Product review module
// Review submission plus the rating aggregation kept on the product row.

pub mod handlers;
pub mod models;
pub mod rating_calculator;
pub mod repository;
pub mod service;

pub use models::{CreateReviewRequest, Review};
pub use repository::ReviewRepository;
pub use service::ReviewService;
