//! Shopping cart types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use wellnest_core::{CartId, CartItemId, ProductId, UserId};

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// A user's cart. One per user, created on first add.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    /// Always equal to the sum of `price * quantity` over `items`.
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of a cart.
///
/// Only the product id is kept; the product itself is read from the
/// catalog when the cart is rendered.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    /// Catalog price when the line was created.
    pub unit_price: Decimal,
    /// Between 1 and [`MAX_LINE_QUANTITY`].
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl Cart {
    #[must_use]
    pub fn new(id: CartId, user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Re-derive the subtotal from every line and bump `updated_at`.
    pub fn recalculate(&mut self) {
        self.subtotal = self.items.iter().map(CartItem::line_total).sum();
        self.updated_at = Utc::now();
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;

    #[test]
    fn test_recalculate_sums_lines() {
        let products = seed::products();
        let mut cart = Cart::new(CartId::new(1), UserId::new(1));
        cart.items.push(CartItem {
            id: CartItemId::new(1),
            product_id: products[0].id,
            unit_price: products[0].price,
            quantity: 2,
        });
        cart.items.push(CartItem {
            id: CartItemId::new(2),
            product_id: products[4].id,
            unit_price: products[4].price,
            quantity: 1,
        });

        cart.recalculate();

        // 2 x 24.99 + 15.99
        assert_eq!(cart.subtotal, Decimal::new(6597, 2));
        assert_eq!(cart.item_count(), 3);

        cart.clear();
        assert_eq!(cart.subtotal, Decimal::ZERO);
    }

    #[test]
    fn test_item_count_does_not_overflow() {
        let mut cart = Cart::new(CartId::new(1), UserId::new(1));
        for id in 1..=3 {
            cart.items.push(CartItem {
                id: CartItemId::new(id),
                product_id: ProductId::new(id),
                unit_price: Decimal::ONE,
                quantity: u32::MAX,
            });
        }
        assert_eq!(cart.item_count(), 3 * u64::from(u32::MAX));
    }
}
