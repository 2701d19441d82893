// Order service - placement, access control and fulfillment transitions

use std::collections::HashMap;

use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::orders::models::{CreateOrderRequest, Order, PaymentResultRequest};
use crate::orders::price_calculator;
use crate::orders::repository::{NewOrderItem, OrderRepository, ShippingAddress};
use crate::products::repository::ProductRepository;
use crate::validation::require_text;

pub struct OrderService {
    orders: OrderRepository,
    products: ProductRepository,
}

impl OrderService {
    pub fn new(orders: OrderRepository, products: ProductRepository) -> Self {
        Self { orders, products }
    }

    /// Place an order for the authenticated user
    ///
    /// Line items snapshot the current catalog name/image/price; the price
    /// breakdown is computed here rather than accepted from the client.
    pub async fn create_order(
        &self,
        user_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<Order, ApiError> {
        let items = request
            .order_items
            .filter(|items| !items.is_empty())
            .ok_or_else(|| ApiError::Validation("Order must contain at least one item".to_string()))?;

        let shipping_req = request
            .shipping_address
            .ok_or_else(|| ApiError::Validation("Field 'shipping_address' is required".to_string()))?;

        let shipping = ShippingAddress {
            address: require_text(shipping_req.address, "address")?,
            city: require_text(shipping_req.city, "city")?,
            postal_code: require_text(shipping_req.postal_code, "postal_code")?,
            country: require_text(shipping_req.country, "country")?,
        };

        let payment_method = require_text(request.payment_method, "payment_method")?;

        // Resolve every referenced product before writing anything.
        let mut new_items = Vec::with_capacity(items.len());
        let mut subtotals = Vec::with_capacity(items.len());
        let mut product_cache = HashMap::new();

        for item in &items {
            if item.qty < 1 {
                return Err(ApiError::Validation(format!(
                    "Quantity must be at least 1, got {}",
                    item.qty
                )));
            }

            if !product_cache.contains_key(&item.product_id) {
                let product = self
                    .products
                    .find_by_id(item.product_id)
                    .await?
                    .ok_or(ApiError::NotFound { resource: "Product" })?;
                product_cache.insert(item.product_id, product);
            }
            let product = &product_cache[&item.product_id];

            subtotals.push(price_calculator::subtotal(item.qty, product.price));
            new_items.push(NewOrderItem {
                product_id: product.id,
                name: product.name.clone(),
                image: product.image.clone(),
                qty: item.qty,
                price: product.price,
            });
        }

        let prices = price_calculator::breakdown(&subtotals);

        let order = self
            .orders
            .create(user_id, shipping, &payment_method, new_items, prices)
            .await?;

        tracing::info!(order_id = %order.id, user_id = %user_id, "Order placed");
        Ok(order)
    }

    /// Fetch one order; visible to its owner and to admins only
    pub async fn get_order(&self, id: Uuid, user: &AuthenticatedUser) -> Result<Order, ApiError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound { resource: "Order" })?;

        ensure_visible(&order, user)?;
        Ok(order)
    }

    /// The caller's own orders
    pub async fn my_orders(&self, user_id: Uuid) -> Result<Vec<Order>, ApiError> {
        self.orders.find_by_user(user_id).await
    }

    /// Every order (admin)
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.orders.list_all().await
    }

    /// Record payment for an order
    pub async fn pay_order(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        payment: PaymentResultRequest,
    ) -> Result<Order, ApiError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound { resource: "Order" })?;

        ensure_visible(&order, user)?;

        let paid = self
            .orders
            .mark_paid(id, payment.id.as_deref())
            .await?
            .ok_or(ApiError::NotFound { resource: "Order" })?;

        tracing::info!(order_id = %id, "Order marked as paid");
        Ok(paid)
    }

    /// Mark a paid order as delivered (admin)
    pub async fn deliver_order(&self, id: Uuid) -> Result<Order, ApiError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound { resource: "Order" })?;

        if !order.is_paid {
            return Err(ApiError::Validation(
                "Order has not been paid yet".to_string(),
            ));
        }

        let delivered = self
            .orders
            .mark_delivered(id)
            .await?
            .ok_or(ApiError::NotFound { resource: "Order" })?;

        tracing::info!(order_id = %id, "Order marked as delivered");
        Ok(delivered)
    }
}

/// Orders are visible to their owner and to admins.
fn ensure_visible(order: &Order, user: &AuthenticatedUser) -> Result<(), ApiError> {
    if order.user_id != user.id && !user.is_admin {
        return Err(ApiError::Forbidden(
            "Not authorized to access this order".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn sample_order(user_id: Uuid) -> Order {
        Order {
            id: Uuid::new_v4(),
            user_id,
            address: "1 Main St".to_string(),
            city: "Cairo".to_string(),
            postal_code: "11511".to_string(),
            country: "Egypt".to_string(),
            payment_method: "PayPal".to_string(),
            items_price: Decimal::new(5000, 2),
            tax_price: Decimal::new(750, 2),
            shipping_price: Decimal::new(1000, 2),
            total_price: Decimal::new(6750, 2),
            is_paid: false,
            paid_at: None,
            payment_id: None,
            is_delivered: false,
            delivered_at: None,
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    fn user(id: Uuid, is_admin: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            name: "Joe".to_string(),
            is_admin,
        }
    }

    #[test]
    fn test_owner_can_see_own_order() {
        let owner = Uuid::new_v4();
        assert!(ensure_visible(&sample_order(owner), &user(owner, false)).is_ok());
    }

    #[test]
    fn test_admin_can_see_any_order() {
        let order = sample_order(Uuid::new_v4());
        assert!(ensure_visible(&order, &user(Uuid::new_v4(), true)).is_ok());
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let order = sample_order(Uuid::new_v4());
        let err = ensure_visible(&order, &user(Uuid::new_v4(), false)).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
