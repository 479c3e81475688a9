//! Order table.

use wellnest_core::{OrderId, OrderItemId, UserId};

use super::Sequence;
use crate::models::Order;

#[derive(Debug, Default)]
pub struct OrderTable {
    rows: Vec<Order>,
    ids: Sequence,
    item_ids: Sequence,
}

impl OrderTable {
    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.rows.iter().find(|o| o.id == id)
    }

    /// A user's orders, newest first.
    #[must_use]
    pub fn for_user(&self, user_id: UserId) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.rows.iter().filter(|o| o.user_id == user_id).collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        orders
    }

    pub const fn next_id(&mut self) -> OrderId {
        OrderId::new(self.ids.next())
    }

    pub const fn next_item_id(&mut self) -> OrderItemId {
        OrderItemId::new(self.item_ids.next())
    }

    pub fn insert(&mut self, order: Order) {
        self.rows.push(order);
    }
}
