//! Status enums for orders and payments.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// New orders are created as `Processing`; the remaining states exist for
/// fulfillment updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "PROCESSING"),
            Self::Shipped => write!(f, "SHIPPED"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

/// How the customer pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreditCard => write!(f, "credit-card"),
            Self::Paypal => write!(f, "paypal"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit-card" | "CREDIT_CARD" => Ok(Self::CreditCard),
            "paypal" | "PAYPAL" => Ok(Self::Paypal),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_roundtrip() {
        for method in [PaymentMethod::CreditCard, PaymentMethod::Paypal] {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_order_status_serializes_screaming() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");
    }
}
