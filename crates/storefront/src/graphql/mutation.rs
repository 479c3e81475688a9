//! Mutation root.
//!
//! Every mutation that changes the store holds the write guard from the
//! token check to the last write. Password hashing and verification run
//! with no guard held.

use async_graphql::{Context, ID, Json, Object, Result};

use wellnest_core::onboarding::SurveyAnswers;
use wellnest_core::{CartItemId, ProductId};

use super::context::{current_user, parse_id, state};
use super::types::{AuthPayload, PlaceOrderInput, UpdateProfileInput};
use crate::error::{AppError, GraphQLResultExt, add_breadcrumb, clear_sentry_user};
use crate::models::{Cart, Order, Review, User};
use crate::services::{
    CartError, CartService, CatalogError, CheckoutService, OnboardingService, ProfileUpdate,
    catalog,
};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    // =========================================================================
    // Auth
    // =========================================================================

    async fn sign_up(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthPayload> {
        let state = state(ctx)?;
        let auth = state.auth();

        let credentials = auth.prepare_registration(&email, &password).graphql()?;
        let user = auth
            .register(&mut state.db().write().await.users, credentials)
            .graphql()?;
        let token = auth.issue_token(&user).graphql()?;

        Ok(AuthPayload { token, user })
    }

    async fn sign_in(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthPayload> {
        let state = state(ctx)?;
        let auth = state.auth();

        let email = auth.begin_login(&email, &password).graphql()?;
        let account = state.db().read().await.users.find_by_email(&email).cloned();
        let user = auth.finish_login(account, &password).graphql()?;
        let token = auth.issue_token(&user).graphql()?;

        Ok(AuthPayload { token, user })
    }

    /// Tokens are stateless; the client discards its copy.
    async fn sign_out(&self) -> bool {
        clear_sentry_user();
        true
    }

    /// Always succeeds so callers cannot learn which emails are registered.
    async fn forgot_password(&self, ctx: &Context<'_>, email: String) -> Result<bool> {
        let state = state(ctx)?;
        let mut guard = state.db().write().await;
        let store = &mut *guard;

        state
            .auth()
            .request_password_reset(&store.users, &mut store.password_resets, &email);
        Ok(true)
    }

    async fn reset_password(
        &self,
        ctx: &Context<'_>,
        token: String,
        password: String,
    ) -> Result<bool> {
        let state = state(ctx)?;
        let auth = state.auth();
        let hash = auth.hash_new_password(&password).graphql()?;

        let mut guard = state.db().write().await;
        let store = &mut *guard;
        auth.apply_password_reset(&mut store.users, &mut store.password_resets, &token, hash)
            .graphql()?;
        Ok(true)
    }

    // =========================================================================
    // Onboarding
    // =========================================================================

    async fn update_profile(&self, ctx: &Context<'_>, input: UpdateProfileInput) -> Result<User> {
        let mut guard = state(ctx)?.db().write().await;
        let store = &mut *guard;
        let user = current_user(ctx, &store.users)?;

        OnboardingService::new(&mut store.users, &mut store.health_profiles)
            .update_profile(user.id, &ProfileUpdate::from(input))
            .graphql()
    }

    /// Answers are stored as given. The configured submit delay runs before
    /// the store is locked.
    async fn update_survey(
        &self,
        ctx: &Context<'_>,
        answers: Json<serde_json::Value>,
    ) -> Result<User> {
        let state = state(ctx)?;
        let user_id = current_user(ctx, &state.db().read().await.users)?.id;

        let answers: SurveyAnswers = serde_json::from_value(answers.0)
            .map_err(|e| AppError::BadRequest(format!("Invalid survey answers: {e}")))
            .graphql()?;

        let delay = state.config().survey_submit_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut guard = state.db().write().await;
        let store = &mut *guard;
        let (user, _) = OnboardingService::new(&mut store.users, &mut store.health_profiles)
            .submit_survey(user_id, answers)
            .graphql()?;
        Ok(user)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    async fn add_to_cart(
        &self,
        ctx: &Context<'_>,
        product_id: ID,
        #[graphql(default = 1)] quantity: i32,
    ) -> Result<Cart> {
        let mut guard = state(ctx)?.db().write().await;
        let store = &mut *guard;
        let user = current_user(ctx, &store.users)?;
        let product_id = parse_id::<ProductId>(&product_id)
            .ok_or(CartError::ProductNotFound)
            .graphql()?;

        CartService::new(&mut store.carts, &store.products)
            .add_item(user.id, product_id, quantity)
            .graphql()
    }

    /// Zero or negative quantity removes the line.
    async fn update_cart_item(&self, ctx: &Context<'_>, id: ID, quantity: i32) -> Result<Cart> {
        let mut guard = state(ctx)?.db().write().await;
        let store = &mut *guard;
        let user = current_user(ctx, &store.users)?;
        let item_id = parse_id::<CartItemId>(&id)
            .ok_or(CartError::ItemNotFound)
            .graphql()?;

        CartService::new(&mut store.carts, &store.products)
            .update_item(user.id, item_id, quantity)
            .graphql()
    }

    async fn remove_cart_item(&self, ctx: &Context<'_>, id: ID) -> Result<Cart> {
        let mut guard = state(ctx)?.db().write().await;
        let store = &mut *guard;
        let user = current_user(ctx, &store.users)?;
        let item_id = parse_id::<CartItemId>(&id)
            .ok_or(CartError::ItemNotFound)
            .graphql()?;

        CartService::new(&mut store.carts, &store.products)
            .remove_item(user.id, item_id)
            .graphql()
    }

    async fn clear_cart(&self, ctx: &Context<'_>) -> Result<Cart> {
        let mut guard = state(ctx)?.db().write().await;
        let store = &mut *guard;
        let user = current_user(ctx, &store.users)?;

        CartService::new(&mut store.carts, &store.products)
            .clear(user.id)
            .graphql()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    async fn place_order(&self, ctx: &Context<'_>, input: PlaceOrderInput) -> Result<Order> {
        let mut guard = state(ctx)?.db().write().await;
        let store = &mut *guard;
        let user = current_user(ctx, &store.users)?;

        add_breadcrumb("checkout", "Placing order", None);
        let order = CheckoutService::new(
            &mut store.users,
            &mut store.carts,
            &mut store.orders,
            &store.products,
        )
        .place_order(user.id, input.into())
        .graphql()?;

        let order_id = order.id.to_string();
        let data = [("order_id", order_id.as_str())];
        add_breadcrumb("checkout", "Order placed", Some(data.as_slice()));
        Ok(order)
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    async fn create_review(
        &self,
        ctx: &Context<'_>,
        product_id: ID,
        rating: i32,
        title: String,
        content: String,
    ) -> Result<Review> {
        let mut guard = state(ctx)?.db().write().await;
        let store = &mut *guard;
        let user = current_user(ctx, &store.users)?;
        let product_id = parse_id::<ProductId>(&product_id)
            .ok_or(CatalogError::ProductNotFound)
            .graphql()?;

        catalog::create_review(&mut store.products, &user, product_id, rating, title, content)
            .graphql()
    }
}
