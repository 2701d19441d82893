// Product catalog module
// Public browsing (list/top/detail) and admin-gated catalog writes.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use models::{CreateProductRequest, Product, ProductPage, UpdateProductRequest};
pub use repository::ProductRepository;
pub use service::ProductService;
