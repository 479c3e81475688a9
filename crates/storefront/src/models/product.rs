//! Catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use wellnest_core::{CategoryId, Price, ProductId, ReviewId, UserId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Average rating out of 5.
    pub rating: f64,
    pub review_count: u32,
    pub image: String,
    pub category: Category,
    pub tags: Vec<String>,
    /// Free-text ingredient list, matched against allergies.
    pub ingredients: Option<String>,
    pub usage: Option<String>,
    pub benefits: Vec<String>,
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::new(self.price, wellnest_core::CurrencyCode::USD)
    }

    /// Case-insensitive tag match.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether the ingredient list mentions `needle` (case-insensitive).
    #[must_use]
    pub fn mentions_ingredient(&self, needle: &str) -> bool {
        self.ingredients
            .as_deref()
            .is_some_and(|i| i.to_lowercase().contains(&needle.to_lowercase()))
    }

    /// Ranking score for the default "recommended" ordering.
    #[must_use]
    pub fn popularity_score(&self) -> f64 {
        self.rating * f64::from(self.review_count.max(1)).log10()
    }

    /// Recompute `rating` and `review_count` from the stored reviews.
    pub fn refresh_rating(&mut self) {
        if self.reviews.is_empty() {
            return;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        let count = u32::try_from(self.reviews.len()).unwrap_or(u32::MAX);
        self.rating = f64::from(total) / f64::from(count);
        self.review_count = count;
    }
}

/// A customer review.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub author: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
