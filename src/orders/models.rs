use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An order with its line items
///
/// Items are loaded alongside the order row on every read path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub payment_method: String,
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub shipping_price: Decimal,
    pub total_price: Decimal,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    /// Payment provider reference recorded when the order is paid
    pub payment_id: Option<String>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// A line item snapshotting the product at order time
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub image: String,
    pub qty: i32,
    pub price: Decimal,
}

/// One requested line item: the product and a quantity
///
/// Name and price are deliberately absent; the server snapshots both from
/// the catalog so clients cannot set their own prices.
#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub qty: i32,
}

/// Shipping destination for an order
#[derive(Debug, Deserialize)]
pub struct ShippingAddressRequest {
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Order creation payload
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub order_items: Option<Vec<OrderItemRequest>>,
    pub shipping_address: Option<ShippingAddressRequest>,
    pub payment_method: Option<String>,
}

/// Payment confirmation from the provider callback
#[derive(Debug, Deserialize)]
pub struct PaymentResultRequest {
    pub id: Option<String>,
    pub status: Option<String>,
    pub email_address: Option<String>,
}
