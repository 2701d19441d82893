// Order price computation
// Totals are derived server-side from the snapshotted line items; values
// sent by clients are never trusted.

use rust_decimal::Decimal;

/// Tax applied on the items subtotal (15%)
fn tax_rate() -> Decimal {
    Decimal::new(15, 2)
}

/// Orders at or above this subtotal ship free
fn free_shipping_threshold() -> Decimal {
    Decimal::new(100, 0)
}

/// Flat shipping charge below the threshold
fn flat_shipping() -> Decimal {
    Decimal::new(10, 0)
}

/// Server-computed price breakdown for an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub shipping_price: Decimal,
    pub total_price: Decimal,
}

/// Subtotal of one line item
pub fn subtotal(qty: i32, price: Decimal) -> Decimal {
    Decimal::from(qty) * price
}

/// Full breakdown from the line-item subtotals
pub fn breakdown(subtotals: &[Decimal]) -> PriceBreakdown {
    let items_price: Decimal = subtotals.iter().sum();

    let shipping_price = if items_price >= free_shipping_threshold() {
        Decimal::ZERO
    } else {
        flat_shipping()
    };

    let tax_price = (items_price * tax_rate()).round_dp(2);
    let total_price = items_price + shipping_price + tax_price;

    PriceBreakdown {
        items_price,
        tax_price,
        shipping_price,
        total_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_subtotal_multiplies_quantity() {
        assert_eq!(subtotal(3, dec!(4.33)), dec!(12.99));
    }

    #[test]
    fn test_small_order_pays_flat_shipping() {
        let b = breakdown(&[dec!(40.00), dec!(19.99)]);
        assert_eq!(b.items_price, dec!(59.99));
        assert_eq!(b.shipping_price, dec!(10));
        assert_eq!(b.tax_price, dec!(9.00));
        assert_eq!(b.total_price, dec!(78.99));
    }

    #[test]
    fn test_large_order_ships_free() {
        let b = breakdown(&[dec!(150.00)]);
        assert_eq!(b.shipping_price, Decimal::ZERO);
        assert_eq!(b.tax_price, dec!(22.50));
        assert_eq!(b.total_price, dec!(172.50));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let b = breakdown(&[dec!(100.00)]);
        assert_eq!(b.shipping_price, Decimal::ZERO);
    }

    #[test]
    fn test_tax_rounds_to_cents() {
        // 15% of 0.33 is 0.0495; stored money stays at two decimals.
        let b = breakdown(&[dec!(0.33)]);
        assert_eq!(b.tax_price, dec!(0.05));
    }
}
