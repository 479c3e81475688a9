//! Order placement.
//!
//! Turns the user's cart into an order snapshot. There is no payment
//! gateway: card details are format-checked and the order is recorded as
//! paid.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use thiserror::Error;
use tracing::instrument;

use wellnest_core::{OrderStatus, PaymentMethod, PaymentStatus, UserId};

use crate::db::{CartTable, OrderTable, ProductTable, UserTable};
use crate::models::{Address, Order, OrderItem};

static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{16}$").expect("Invalid regex"));

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("Invalid regex"));

static CVV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("Invalid regex"));

/// Errors from checkout. Display strings are client-facing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cannot checkout an empty cart")]
    EmptyCart,

    #[error("Shipping address not found")]
    MissingShippingAddress,

    #[error("{0}")]
    InvalidShipping(&'static str),

    #[error("{0}")]
    InvalidCard(&'static str),

    #[error("User not found")]
    UserNotFound,

    #[error("Product not found")]
    ProductNotFound,
}

/// Where to ship. Contact fields are accepted for the form's sake but only
/// the address is kept on the order.
#[derive(Debug, Clone, Default)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingDetails {
    fn validate(&self) -> Result<(), CheckoutError> {
        let required = [
            (&self.address_line1, "Address line 1 is required"),
            (&self.city, "City is required"),
            (&self.state, "State is required"),
            (&self.postal_code, "Postal code is required"),
            (&self.country, "Country is required"),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::InvalidShipping(message));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardDetails {
    pub card_name: String,
    pub card_number: String,
    pub exp_date: String,
    pub cvv: String,
}

impl CardDetails {
    /// Check the card fields in form order, reporting the first problem.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidCard` with the field message.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let invalid = |message| Err(CheckoutError::InvalidCard(message));

        if self.card_name.trim().is_empty() {
            return invalid("Name on card is required");
        }

        let number: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if number.is_empty() {
            return invalid("Card number is required");
        }
        if !CARD_NUMBER_RE.is_match(&number) {
            return invalid("Card number must be 16 digits");
        }

        let expiry = self.exp_date.trim();
        if expiry.is_empty() {
            return invalid("Expiration date is required");
        }
        if !EXPIRY_RE.is_match(expiry) {
            return invalid("Expiration date must be in MM/YY format");
        }

        let cvv = self.cvv.trim();
        if cvv.is_empty() {
            return invalid("CVV is required");
        }
        if !CVV_RE.is_match(cvv) {
            return invalid("CVV must be 3 or 4 digits");
        }

        Ok(())
    }
}

/// Checkout form contents.
#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    /// Falls back to the user's saved address when absent.
    pub shipping: Option<ShippingDetails>,
    pub payment_method: PaymentMethod,
    /// Required when paying by card.
    pub card: Option<CardDetails>,
}

/// Order placement over the user, cart, and order tables.
pub struct CheckoutService<'a> {
    users: &'a mut UserTable,
    carts: &'a mut CartTable,
    orders: &'a mut OrderTable,
    products: &'a ProductTable,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(
        users: &'a mut UserTable,
        carts: &'a mut CartTable,
        orders: &'a mut OrderTable,
        products: &'a ProductTable,
    ) -> Self {
        Self {
            users,
            carts,
            orders,
            products,
        }
    }

    /// Place an order for everything in the user's cart and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidCard` for bad card details,
    /// `CheckoutError::EmptyCart` when there is nothing to buy, and
    /// `CheckoutError::MissingShippingAddress` when no address was given
    /// and none is saved.
    #[instrument(
        skip(self, request),
        fields(user_id = %user_id, payment_method = %request.payment_method)
    )]
    pub fn place_order(
        &mut self,
        user_id: UserId,
        request: OrderRequest,
    ) -> Result<Order, CheckoutError> {
        if request.payment_method == PaymentMethod::CreditCard {
            request
                .card
                .as_ref()
                .ok_or(CheckoutError::InvalidCard("Card number is required"))?
                .validate()?;
        }

        let cart = self
            .carts
            .for_user_mut(user_id)
            .filter(|c| !c.is_empty())
            .ok_or(CheckoutError::EmptyCart)?;

        let shipping_address = match request.shipping {
            Some(shipping) => {
                shipping.validate()?;
                Address {
                    id: self.users.next_address_id(),
                    line1: shipping.address_line1,
                    line2: shipping.address_line2.filter(|l| !l.trim().is_empty()),
                    city: shipping.city,
                    state: shipping.state,
                    postal_code: shipping.postal_code,
                    country: shipping.country,
                }
            }
            None => self
                .users
                .get(user_id)
                .ok_or(CheckoutError::UserNotFound)?
                .address
                .clone()
                .ok_or(CheckoutError::MissingShippingAddress)?,
        };

        // Orders keep the product as it looks now, at the price the line was added at.
        let items = cart
            .items
            .iter()
            .map(|line| {
                let product = self
                    .products
                    .get(line.product_id)
                    .ok_or(CheckoutError::ProductNotFound)?;
                Ok(OrderItem {
                    id: self.orders.next_item_id(),
                    product: product.clone(),
                    quantity: line.quantity,
                    price: line.unit_price,
                })
            })
            .collect::<Result<Vec<_>, CheckoutError>>()?;
        let subtotal = items.iter().map(OrderItem::line_total).sum();

        let now = Utc::now();
        let order = Order {
            id: self.orders.next_id(),
            user_id,
            items,
            subtotal,
            total: subtotal,
            status: OrderStatus::Processing,
            payment_status: PaymentStatus::Completed,
            payment_method: request.payment_method,
            shipping_address,
            created_at: now,
            updated_at: now,
        };

        cart.clear();
        self.orders.insert(order.clone());

        tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{ProductTable, seed};
    use crate::services::CartService;
    use rust_decimal::Decimal;
    use wellnest_core::{Email, ProductId};

    struct Fixture {
        users: UserTable,
        carts: CartTable,
        orders: OrderTable,
        products: ProductTable,
        user_id: UserId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut users = UserTable::default();
            let user_id = users
                .create(Email::parse("ada@example.com").unwrap(), "hash".into())
                .unwrap()
                .id;
            Self {
                users,
                carts: CartTable::default(),
                orders: OrderTable::default(),
                products: ProductTable::new(seed::products()),
                user_id,
            }
        }

        fn add(&mut self, product: i32, quantity: i32) {
            CartService::new(&mut self.carts, &self.products)
                .add_item(self.user_id, ProductId::new(product), quantity)
                .unwrap();
        }

        fn checkout(&mut self, request: OrderRequest) -> Result<Order, CheckoutError> {
            CheckoutService::new(
                &mut self.users,
                &mut self.carts,
                &mut self.orders,
                &self.products,
            )
            .place_order(self.user_id, request)
        }
    }

    fn card() -> CardDetails {
        CardDetails {
            card_name: "Ada Lovelace".into(),
            card_number: "4111 1111 1111 1111".into(),
            exp_date: "12/29".into(),
            cvv: "123".into(),
        }
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            address_line1: "1 Analytical Way".into(),
            address_line2: None,
            city: "London".into(),
            state: "LDN".into(),
            postal_code: "N1 9GU".into(),
            country: "United Kingdom".into(),
        }
    }

    fn request() -> OrderRequest {
        OrderRequest {
            shipping: Some(shipping()),
            payment_method: PaymentMethod::CreditCard,
            card: Some(card()),
        }
    }

    #[test]
    fn test_place_order_snapshots_and_clears_cart() {
        let mut fx = Fixture::new();
        fx.add(1, 2);
        fx.add(5, 1);

        let order = fx.checkout(request()).unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.subtotal, Decimal::new(6597, 2));
        assert_eq!(order.total, order.subtotal);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.payment_status, PaymentStatus::Completed);
        assert_eq!(order.shipping_address.city, "London");

        assert!(fx.carts.for_user(fx.user_id).unwrap().is_empty());
        assert_eq!(fx.orders.for_user(fx.user_id).len(), 1);
    }

    #[test]
    fn test_order_snapshots_current_product_at_cart_price() {
        let mut fx = Fixture::new();
        fx.add(1, 1);
        let added_at = fx.products.get(ProductId::new(1)).unwrap().price;

        let product = fx.products.get_mut(ProductId::new(1)).unwrap();
        product.rating = 1.5;
        product.review_count += 1;

        let order = fx.checkout(request()).unwrap();
        assert!((order.items[0].product.rating - 1.5).abs() < f64::EPSILON);
        assert_eq!(order.items[0].price, added_at);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut fx = Fixture::new();
        assert_eq!(fx.checkout(request()).unwrap_err(), CheckoutError::EmptyCart);

        fx.add(1, 1);
        fx.checkout(request()).unwrap();
        assert_eq!(fx.checkout(request()).unwrap_err(), CheckoutError::EmptyCart);
    }

    #[test]
    fn test_falls_back_to_saved_address() {
        let mut fx = Fixture::new();
        fx.add(3, 1);
        let paypal = OrderRequest {
            shipping: None,
            payment_method: PaymentMethod::Paypal,
            card: None,
        };

        assert_eq!(
            fx.checkout(paypal.clone()).unwrap_err(),
            CheckoutError::MissingShippingAddress
        );

        let address_id = fx.users.next_address_id();
        fx.users.get_mut(fx.user_id).unwrap().address = Some(Address {
            id: address_id,
            line1: "2 Engine Row".into(),
            line2: None,
            city: "Bath".into(),
            state: "SOM".into(),
            postal_code: "BA1".into(),
            country: "United Kingdom".into(),
        });
        let order = fx.checkout(paypal).unwrap();
        assert_eq!(order.shipping_address.city, "Bath");
        assert_eq!(order.payment_method, PaymentMethod::Paypal);
    }

    #[test]
    fn test_card_validation_messages() {
        let cases = [
            (
                CardDetails {
                    card_name: String::new(),
                    ..card()
                },
                "Name on card is required",
            ),
            (
                CardDetails {
                    card_number: String::new(),
                    ..card()
                },
                "Card number is required",
            ),
            (
                CardDetails {
                    card_number: "4111".into(),
                    ..card()
                },
                "Card number must be 16 digits",
            ),
            (
                CardDetails {
                    exp_date: String::new(),
                    ..card()
                },
                "Expiration date is required",
            ),
            (
                CardDetails {
                    exp_date: "13/29".into(),
                    ..card()
                },
                "Expiration date must be in MM/YY format",
            ),
            (
                CardDetails {
                    cvv: String::new(),
                    ..card()
                },
                "CVV is required",
            ),
            (
                CardDetails {
                    cvv: "12a".into(),
                    ..card()
                },
                "CVV must be 3 or 4 digits",
            ),
        ];

        for (details, message) in cases {
            assert_eq!(details.validate().unwrap_err(), CheckoutError::InvalidCard(message));
        }
        assert!(card().validate().is_ok());
    }

    #[test]
    fn test_incomplete_shipping_rejected() {
        let mut fx = Fixture::new();
        fx.add(2, 1);
        let request = OrderRequest {
            shipping: Some(ShippingDetails {
                city: "  ".into(),
                ..shipping()
            }),
            ..request()
        };
        assert_eq!(
            fx.checkout(request).unwrap_err(),
            CheckoutError::InvalidShipping("City is required")
        );
        assert!(!fx.carts.for_user(fx.user_id).unwrap().is_empty());
    }
}
