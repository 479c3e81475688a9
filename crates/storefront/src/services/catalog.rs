//! Product browsing: filtering, sorting, pagination, related products, and
//! reviews.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use wellnest_core::ProductId;

use crate::db::ProductTable;
use crate::models::{Product, Review, User};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default number of related products.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("You have already reviewed this product")]
    AlreadyReviewed,

    #[error("Rating must be between 1 and 5")]
    InvalidRating,
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, async_graphql::Enum)]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
    /// Most reviewed first.
    Popular,
    /// Rating weighted by review volume.
    Recommended,
}

/// Filters and paging for a product listing.
#[derive(Debug, Clone)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            tag: None,
            search: None,
            sort_by: None,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && !product.category.name.eq_ignore_ascii_case(category)
        {
            return false;
        }
        if let Some(tag) = &self.tag
            && !product.has_tag(tag)
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            return product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle);
        }
        true
    }
}

/// Filter, sort, then page the catalog. Without a sort key the catalog
/// order is kept.
#[must_use]
pub fn list_products<'a>(products: &'a ProductTable, filter: &ProductFilter) -> Vec<&'a Product> {
    let mut matches: Vec<&Product> = products
        .all()
        .iter()
        .filter(|p| filter.matches(p))
        .collect();

    if let Some(sort_by) = filter.sort_by {
        sort_products(&mut matches, sort_by);
    }

    matches
        .into_iter()
        .skip(filter.offset)
        .take(filter.limit)
        .collect()
}

/// Stable sort by the given key.
pub fn sort_products(products: &mut [&Product], sort_by: SortBy) {
    match sort_by {
        SortBy::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Popular => products.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        SortBy::Recommended => {
            products.sort_by(|a, b| b.popularity_score().total_cmp(&a.popularity_score()));
        }
    }
}

/// Other products in the same category, in catalog order.
#[must_use]
pub fn related_products(
    products: &ProductTable,
    product_id: ProductId,
    limit: usize,
) -> Vec<&Product> {
    let Some(product) = products.get(product_id) else {
        return Vec::new();
    };

    products
        .all()
        .iter()
        .filter(|p| p.id != product_id && p.category.id == product.category.id)
        .take(limit)
        .collect()
}

/// Add a review and refresh the product's rating from all its reviews.
///
/// # Errors
///
/// Returns `CatalogError::InvalidRating` outside 1..=5,
/// `CatalogError::ProductNotFound`, or `CatalogError::AlreadyReviewed` when
/// the user has reviewed this product before.
#[instrument(
    skip(products, user, title, content),
    fields(user_id = %user.id, product_id = %product_id)
)]
pub fn create_review(
    products: &mut ProductTable,
    user: &User,
    product_id: ProductId,
    rating: i32,
    title: String,
    content: String,
) -> Result<Review, CatalogError> {
    let rating = u8::try_from(rating)
        .ok()
        .filter(|r| (1..=5).contains(r))
        .ok_or(CatalogError::InvalidRating)?;

    let id = products.next_review_id();
    let product = products
        .get_mut(product_id)
        .ok_or(CatalogError::ProductNotFound)?;

    if product.reviews.iter().any(|r| r.user_id == user.id) {
        return Err(CatalogError::AlreadyReviewed);
    }

    let review = Review {
        id,
        product_id,
        user_id: user.id,
        author: user.display_name(),
        rating,
        title,
        content,
        created_at: Utc::now(),
    };
    product.reviews.push(review.clone());
    product.refresh_rating();

    tracing::info!(rating = product.rating, "Review added");
    Ok(review)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{UserTable, seed};
    use wellnest_core::Email;

    fn table() -> ProductTable {
        ProductTable::new(seed::products())
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_default_listing_keeps_catalog_order() {
        let table = table();
        let page = list_products(&table, &ProductFilter::default());
        assert_eq!(page.len(), 8);
        assert_eq!(page.first().unwrap().name, "Daily Multivitamin");
    }

    #[test]
    fn test_category_and_tag_are_case_insensitive() {
        let table = table();
        let filter = ProductFilter {
            category: Some("vitamins".into()),
            ..ProductFilter::default()
        };
        assert_eq!(
            names(&list_products(&table, &filter)),
            ["Daily Multivitamin", "Vitamin D3"]
        );

        let filter = ProductFilter {
            tag: Some("SLEEP".into()),
            ..ProductFilter::default()
        };
        assert_eq!(
            names(&list_products(&table, &filter)),
            ["Magnesium Complex", "Sleep Support Formula"]
        );
    }

    #[test]
    fn test_search_covers_name_and_description() {
        let table = table();
        let filter = ProductFilter {
            search: Some("OMEGA".into()),
            ..ProductFilter::default()
        };
        let found = list_products(&table, &filter);
        assert!(found.iter().any(|p| p.name == "Omega-3 Fish Oil"));
        assert!(found.iter().all(|p| {
            p.name.to_lowercase().contains("omega")
                || p.description.to_lowercase().contains("omega")
        }));
    }

    #[test]
    fn test_sorting() {
        let table = table();
        let sorted = |sort_by| {
            list_products(
                &table,
                &ProductFilter {
                    sort_by: Some(sort_by),
                    ..ProductFilter::default()
                },
            )
        };

        assert_eq!(sorted(SortBy::PriceAsc).first().unwrap().name, "Vitamin D3");
        assert_eq!(sorted(SortBy::PriceDesc).first().unwrap().name, "Protein Powder");
        assert_eq!(sorted(SortBy::Rating).first().unwrap().name, "Vitamin D3");
        assert_eq!(sorted(SortBy::Popular).first().unwrap().name, "Collagen Peptides");
        assert_eq!(sorted(SortBy::Newest).first().unwrap().name, "Sleep Support Formula");

        let by_price = sorted(SortBy::PriceAsc);
        assert!(by_price.windows(2).all(|w| match w {
            [a, b] => a.price <= b.price,
            _ => true,
        }));
    }

    #[test]
    fn test_pagination() {
        let table = table();
        let filter = ProductFilter {
            limit: 3,
            offset: 6,
            ..ProductFilter::default()
        };
        assert_eq!(list_products(&table, &filter).len(), 2);

        let filter = ProductFilter {
            offset: 20,
            ..ProductFilter::default()
        };
        assert!(list_products(&table, &filter).is_empty());
    }

    #[test]
    fn test_related_products_share_category() {
        let table = table();
        let related = related_products(&table, ProductId::new(1), DEFAULT_RELATED_LIMIT);
        assert_eq!(names(&related), ["Vitamin D3"]);
        assert!(related_products(&table, ProductId::new(99), 4).is_empty());
    }

    #[test]
    fn test_create_review_updates_rating() {
        let mut table = table();
        let mut users = UserTable::default();
        let user = users
            .create(Email::parse("ada@example.com").unwrap(), "hash".into())
            .unwrap();

        let review = create_review(
            &mut table,
            &user,
            ProductId::new(2),
            4,
            "Solid".into(),
            "No fishy aftertaste.".into(),
        )
        .unwrap();
        assert_eq!(review.author, "ada");

        let product = table.get(ProductId::new(2)).unwrap();
        assert_eq!(product.review_count, 1);
        assert!((product.rating - 4.0).abs() < f64::EPSILON);

        assert_eq!(
            create_review(&mut table, &user, ProductId::new(2), 5, String::new(), String::new())
                .unwrap_err(),
            CatalogError::AlreadyReviewed
        );
        assert_eq!(
            create_review(&mut table, &user, ProductId::new(3), 6, String::new(), String::new())
                .unwrap_err(),
            CatalogError::InvalidRating
        );
        assert_eq!(
            create_review(&mut table, &user, ProductId::new(42), 3, String::new(), String::new())
                .unwrap_err(),
            CatalogError::ProductNotFound
        );
    }
}
