use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::orders::models::{Order, OrderItem};
use crate::orders::price_calculator::PriceBreakdown;

const ORDER_COLUMNS: &str = "id, user_id, address, city, postal_code, country, payment_method, \
                             items_price, tax_price, shipping_price, total_price, \
                             is_paid, paid_at, payment_id, is_delivered, delivered_at, created_at";

/// A validated line item ready for insertion
#[derive(Debug)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub image: String,
    pub qty: i32,
    pub price: rust_decimal::Decimal,
}

/// Shipping destination columns
#[derive(Debug)]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order and its line items atomically
    pub async fn create(
        &self,
        user_id: Uuid,
        shipping: ShippingAddress,
        payment_method: &str,
        items: Vec<NewOrderItem>,
        prices: PriceBreakdown,
    ) -> Result<Order, ApiError> {
        let mut tx = self.pool.begin().await?;

        let mut order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (user_id, address, city, postal_code, country, payment_method,
                                 items_price, tax_price, shipping_price, total_price)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(shipping.address)
        .bind(shipping.city)
        .bind(shipping.postal_code)
        .bind(shipping.country)
        .bind(payment_method)
        .bind(prices.items_price)
        .bind(prices.tax_price)
        .bind(prices.shipping_price)
        .bind(prices.total_price)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            let inserted = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items (order_id, product_id, name, image, qty, price)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id, order_id, product_id, name, image, qty, price",
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.name)
            .bind(item.image)
            .bind(item.qty)
            .bind(item.price)
            .fetch_one(&mut *tx)
            .await?;

            order.items.push(inserted);
        }

        tx.commit().await?;
        Ok(order)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ApiError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match order {
            Some(mut order) => {
                order.items = self.items_for(order.id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Orders belonging to one user, newest first
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, ApiError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_items(orders).await
    }

    /// Every order, newest first (admin listing)
    pub async fn list_all(&self) -> Result<Vec<Order>, ApiError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        self.attach_items(orders).await
    }

    /// Mark an order paid; single-statement update, no read-modify-write
    pub async fn mark_paid(
        &self,
        id: Uuid,
        payment_id: Option<&str>,
    ) -> Result<Option<Order>, ApiError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders
             SET is_paid = TRUE, paid_at = NOW(), payment_id = COALESCE($2, payment_id)
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await?;

        match order {
            Some(mut order) => {
                order.items = self.items_for(order.id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Mark a paid order delivered; the is_paid guard lives in the
    /// statement so an unpaid order cannot be flipped concurrently.
    pub async fn mark_delivered(&self, id: Uuid) -> Result<Option<Order>, ApiError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders
             SET is_delivered = TRUE, delivered_at = NOW()
             WHERE id = $1 AND is_paid
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match order {
            Some(mut order) => {
                order.items = self.items_for(order.id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    async fn items_for(&self, order_id: Uuid) -> Result<Vec<OrderItem>, ApiError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, name, image, qty, price
             FROM order_items WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn attach_items(&self, mut orders: Vec<Order>) -> Result<Vec<Order>, ApiError> {
        for order in &mut orders {
            order.items = self.items_for(order.id).await?;
        }
        Ok(orders)
    }
}
