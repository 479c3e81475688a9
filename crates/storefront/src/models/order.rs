//! Order types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use wellnest_core::{OrderId, OrderItemId, OrderStatus, PaymentMethod, PaymentStatus, UserId};

use super::{Address, Product};

/// A placed order. Items are a snapshot taken at checkout.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    /// Equal to `subtotal`; no tax or shipping is charged.
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product: Product,
    pub quantity: u32,
    /// Unit price at checkout time.
    pub price: Decimal,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
