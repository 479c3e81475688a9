//! Cart mutations.
//!
//! Each user has at most one cart, created on the first `add_item`. The
//! subtotal is re-reduced from every line after each change.

use thiserror::Error;
use tracing::instrument;

use wellnest_core::{CartItemId, ProductId, UserId};

use crate::db::{CartTable, ProductTable};
use crate::models::{Cart, CartItem, MAX_LINE_QUANTITY};

/// Errors from cart operations. Display strings are client-facing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("Cart not found")]
    CartNotFound,

    #[error("Cart item not found")]
    ItemNotFound,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Quantity cannot exceed 999")]
    QuantityTooLarge,
}

/// Reject quantities a line may never hold.
const fn check_line_quantity(quantity: u32) -> Result<u32, CartError> {
    if quantity > MAX_LINE_QUANTITY {
        Err(CartError::QuantityTooLarge)
    } else {
        Ok(quantity)
    }
}

/// Cart operations over the cart and product tables.
pub struct CartService<'a> {
    carts: &'a mut CartTable,
    products: &'a ProductTable,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(carts: &'a mut CartTable, products: &'a ProductTable) -> Self {
        Self { carts, products }
    }

    /// Add `quantity` of a product, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` when `quantity < 1`,
    /// `CartError::QuantityTooLarge` when the line would exceed
    /// [`MAX_LINE_QUANTITY`], and `CartError::ProductNotFound` for an
    /// unknown product.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub fn add_item(
        &mut self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Cart, CartError> {
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or(CartError::InvalidQuantity)?;
        let product = self
            .products
            .get(product_id)
            .ok_or(CartError::ProductNotFound)?;

        let existing = self
            .carts
            .for_user(user_id)
            .and_then(|cart| cart.items.iter().find(|i| i.product_id == product_id))
            .map(|item| item.quantity);
        let merged = check_line_quantity(existing.unwrap_or(0).saturating_add(quantity))?;
        let new_item_id = existing.is_none().then(|| self.carts.next_item_id());

        let cart = self.carts.get_or_create(user_id);
        match new_item_id {
            Some(id) => cart.items.push(CartItem {
                id,
                product_id,
                unit_price: product.price,
                quantity: merged,
            }),
            None => {
                if let Some(item) = cart.items.iter_mut().find(|i| i.product_id == product_id) {
                    item.quantity = merged;
                }
            }
        }

        cart.recalculate();
        Ok(cart.clone())
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound`, `CartError::ItemNotFound`, or
    /// `CartError::QuantityTooLarge`.
    #[instrument(skip(self), fields(user_id = %user_id, item_id = %item_id))]
    pub fn update_item(
        &mut self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<Cart, CartError> {
        let cart = self
            .carts
            .for_user_mut(user_id)
            .ok_or(CartError::CartNotFound)?;
        let index = cart
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or(CartError::ItemNotFound)?;

        match u32::try_from(quantity) {
            Ok(quantity) if quantity > 0 => {
                let quantity = check_line_quantity(quantity)?;
                if let Some(item) = cart.items.get_mut(index) {
                    item.quantity = quantity;
                }
            }
            _ => {
                cart.items.remove(index);
            }
        }

        cart.recalculate();
        Ok(cart.clone())
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` or `CartError::ItemNotFound`.
    #[instrument(skip(self), fields(user_id = %user_id, item_id = %item_id))]
    pub fn remove_item(&mut self, user_id: UserId, item_id: CartItemId) -> Result<Cart, CartError> {
        let cart = self
            .carts
            .for_user_mut(user_id)
            .ok_or(CartError::CartNotFound)?;
        let before = cart.items.len();
        cart.items.retain(|i| i.id != item_id);
        if cart.items.len() == before {
            return Err(CartError::ItemNotFound);
        }

        cart.recalculate();
        Ok(cart.clone())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the user has no cart yet.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub fn clear(&mut self, user_id: UserId) -> Result<Cart, CartError> {
        let cart = self
            .carts
            .for_user_mut(user_id)
            .ok_or(CartError::CartNotFound)?;
        cart.clear();
        Ok(cart.clone())
    }
}
