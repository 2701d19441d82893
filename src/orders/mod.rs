// Orders module
// Order placement with server-side pricing, plus the paid/delivered
// fulfillment lifecycle.

pub mod handlers;
pub mod models;
pub mod price_calculator;
pub mod repository;
pub mod service;

pub use models::{CreateOrderRequest, Order, OrderItem};
pub use repository::OrderRepository;
pub use service::OrderService;
