//! Product table.

use wellnest_core::{CategoryId, ProductId, ReviewId};

use super::Sequence;
use crate::models::{Category, Product};

#[derive(Debug)]
pub struct ProductTable {
    rows: Vec<Product>,
    review_ids: Sequence,
}

impl ProductTable {
    #[must_use]
    pub fn new(rows: Vec<Product>) -> Self {
        Self {
            rows,
            review_ids: Sequence::default(),
        }
    }

    /// Every product in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.rows.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.rows.iter_mut().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut seen: Vec<Category> = Vec::new();
        for product in &self.rows {
            if !seen.iter().any(|c| c.id == product.category.id) {
                seen.push(product.category.clone());
            }
        }
        seen
    }

    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.rows
            .iter()
            .find(|p| p.category.id == id)
            .map(|p| p.category.clone())
    }

    pub const fn next_review_id(&mut self) -> ReviewId {
        ReviewId::new(self.review_ids.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;

    #[test]
    fn test_categories_unique_in_order() {
        let table = ProductTable::new(seed::products());
        let names: Vec<_> = table.categories().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "Vitamins",
                "Supplements",
                "Nutrition",
                "Digestive Health",
                "Minerals",
                "Beauty",
                "Sleep"
            ]
        );
        assert_eq!(
            table.category(CategoryId::new(4)).map(|c| c.name),
            Some("Digestive Health".to_owned())
        );
        assert!(table.category(CategoryId::new(99)).is_none());
    }
}
