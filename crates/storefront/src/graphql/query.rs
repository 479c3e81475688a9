//! Query root.

use async_graphql::{Context, ID, Object, Result};

use wellnest_core::onboarding::SURVEY_QUESTIONS;
use wellnest_core::{CategoryId, OrderId, ProductId};

use super::context::{current_user, parse_id, state};
use super::types::SurveyQuestionObject;
use crate::error::{AppError, GraphQLResultExt};
use crate::models::{Cart, Category, HealthProfileRecord, Order, Product, User};
use crate::services::catalog::{self, DEFAULT_PAGE_SIZE, DEFAULT_RELATED_LIMIT};
use crate::services::{ProductFilter, SortBy, recommendations};

#[derive(Default)]
pub struct QueryRoot;

/// Negative paging arguments count as zero.
fn count(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[Object]
impl QueryRoot {
    /// The signed-in user.
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let store = state(ctx)?.db().read().await;
        current_user(ctx, &store.users)
    }

    /// Filtered, sorted, paged product listing.
    #[allow(clippy::too_many_arguments)]
    async fn products(
        &self,
        ctx: &Context<'_>,
        category: Option<String>,
        tag: Option<String>,
        search: Option<String>,
        sort_by: Option<SortBy>,
        #[graphql(default = 10)] limit: i32,
        #[graphql(default = 0)] offset: i32,
    ) -> Result<Vec<Product>> {
        let filter = ProductFilter {
            category,
            tag,
            search,
            sort_by,
            limit: usize::try_from(limit).unwrap_or(DEFAULT_PAGE_SIZE),
            offset: count(offset),
        };

        let store = state(ctx)?.db().read().await;
        Ok(catalog::list_products(&store.products, &filter)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Product>> {
        let Some(id) = parse_id::<ProductId>(&id) else {
            return Ok(None);
        };
        let store = state(ctx)?.db().read().await;
        Ok(store.products.get(id).cloned())
    }

    /// Unique categories in first-seen catalog order.
    async fn categories(&self, ctx: &Context<'_>) -> Result<Vec<Category>> {
        let store = state(ctx)?.db().read().await;
        Ok(store.products.categories())
    }

    async fn category(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Category>> {
        let Some(id) = parse_id::<CategoryId>(&id) else {
            return Ok(None);
        };
        let store = state(ctx)?.db().read().await;
        Ok(store.products.category(id))
    }

    /// Other products in the same category.
    async fn related_products(
        &self,
        ctx: &Context<'_>,
        product_id: ID,
        #[graphql(default = 4)] limit: i32,
    ) -> Result<Vec<Product>> {
        let Some(product_id) = parse_id::<ProductId>(&product_id) else {
            return Ok(Vec::new());
        };
        let limit = usize::try_from(limit).unwrap_or(DEFAULT_RELATED_LIMIT);

        let store = state(ctx)?.db().read().await;
        Ok(catalog::related_products(&store.products, product_id, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Picks for the signed-in user's health profile.
    async fn recommended_products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        let store = state(ctx)?.db().read().await;
        let user = current_user(ctx, &store.users)?;

        let profile = store.health_profiles.for_user(user.id).map(|r| &r.profile);
        Ok(recommendations::recommend(&store.products, profile)
            .into_iter()
            .cloned()
            .collect())
    }

    /// The signed-in user's cart, if one has been created.
    async fn cart(&self, ctx: &Context<'_>) -> Result<Option<Cart>> {
        let store = state(ctx)?.db().read().await;
        let user = current_user(ctx, &store.users)?;
        Ok(store.carts.for_user(user.id).cloned())
    }

    /// The signed-in user's orders, newest first.
    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let store = state(ctx)?.db().read().await;
        let user = current_user(ctx, &store.users)?;
        Ok(store.orders.for_user(user.id).into_iter().cloned().collect())
    }

    async fn order(&self, ctx: &Context<'_>, id: ID) -> Result<Order> {
        let store = state(ctx)?.db().read().await;
        let user = current_user(ctx, &store.users)?;

        let order = parse_id::<OrderId>(&id)
            .and_then(|id| store.orders.get(id))
            .ok_or_else(|| AppError::NotFound("Order not found".into()))
            .graphql()?;

        if order.user_id != user.id {
            return Err(AppError::Unauthorized("Not authorized to view this order".into()))
                .graphql();
        }

        Ok(order.clone())
    }

    /// The static survey catalog, in display order.
    async fn survey_questions(&self) -> Vec<SurveyQuestionObject> {
        SURVEY_QUESTIONS.iter().map(SurveyQuestionObject).collect()
    }

    /// The signed-in user's derived health profile.
    async fn health_profile(&self, ctx: &Context<'_>) -> Result<Option<HealthProfileRecord>> {
        let store = state(ctx)?.db().read().await;
        let user = current_user(ctx, &store.users)?;
        Ok(store.health_profiles.for_user(user.id).cloned())
    }
}
