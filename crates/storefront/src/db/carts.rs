//! Cart table.

use wellnest_core::{CartId, CartItemId, UserId};

use super::Sequence;
use crate::models::Cart;

#[derive(Debug, Default)]
pub struct CartTable {
    rows: Vec<Cart>,
    ids: Sequence,
    item_ids: Sequence,
}

impl CartTable {
    #[must_use]
    pub fn for_user(&self, user_id: UserId) -> Option<&Cart> {
        self.rows.iter().find(|c| c.user_id == user_id)
    }

    pub fn for_user_mut(&mut self, user_id: UserId) -> Option<&mut Cart> {
        self.rows.iter_mut().find(|c| c.user_id == user_id)
    }

    /// The user's cart, created empty on first use.
    #[allow(clippy::indexing_slicing)] // index comes from position() or the push just above
    pub fn get_or_create(&mut self, user_id: UserId) -> &mut Cart {
        let index = match self.rows.iter().position(|c| c.user_id == user_id) {
            Some(index) => index,
            None => {
                let cart = Cart::new(CartId::new(self.ids.next()), user_id);
                self.rows.push(cart);
                self.rows.len() - 1
            }
        };
        &mut self.rows[index]
    }

    /// Allocate a cart line id.
    pub const fn next_item_id(&mut self) -> CartItemId {
        CartItemId::new(self.item_ids.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut carts = CartTable::default();
        let first = carts.get_or_create(UserId::new(7)).id;
        let second = carts.get_or_create(UserId::new(7)).id;
        assert_eq!(first, second);
        assert!(carts.for_user(UserId::new(8)).is_none());
    }
}
