//! GraphQL object, enum, and input types.
//!
//! Output types are implemented directly on the store models. Core enums
//! are mirrored with `remote` derives so `wellnest-core` stays free of
//! GraphQL dependencies.

use async_graphql::{Context, Enum, ID, InputObject, Json, Object, Result, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use wellnest_core::onboarding::{PostalAddress, Preferences, SurveyQuestion};
use wellnest_core::{CurrencyCode, Price};

use crate::models::{
    Address, Cart, CartItem, Category, HealthProfileRecord, Order, OrderItem, Product, Review,
    User,
};
use crate::error::GraphQLResultExt;
use crate::services::{CardDetails, CartError, OrderRequest, ProfileUpdate, ShippingDetails};

/// Money goes over the wire as a float.
fn money(amount: Decimal) -> f64 {
    Price::new(amount, CurrencyCode::USD).to_f64()
}

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "OrderStatus", remote = "wellnest_core::OrderStatus")]
pub enum GqlOrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "PaymentStatus", remote = "wellnest_core::PaymentStatus")]
pub enum GqlPaymentStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "PaymentMethod", remote = "wellnest_core::PaymentMethod")]
pub enum GqlPaymentMethod {
    CreditCard,
    Paypal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "QuestionKind", remote = "wellnest_core::onboarding::QuestionKind")]
pub enum GqlQuestionKind {
    MultipleChoice,
    Checkbox,
    Slider,
}

// =============================================================================
// Users
// =============================================================================

#[derive(SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

#[derive(SimpleObject)]
#[graphql(name = "Preferences")]
pub struct PreferencesObject {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub language: String,
}

impl From<&Preferences> for PreferencesObject {
    fn from(p: &Preferences) -> Self {
        Self {
            email_notifications: p.email_notifications,
            sms_notifications: p.sms_notifications,
            language: p.language.clone(),
        }
    }
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn email(&self) -> &str {
        self.email.as_str()
    }

    async fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    async fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    async fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    async fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    async fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    async fn mailing_address(&self) -> Option<&Address> {
        self.mailing_address.as_ref()
    }

    async fn preferences(&self) -> PreferencesObject {
        PreferencesObject::from(&self.preferences)
    }

    async fn profile_completed(&self) -> bool {
        self.profile_completed
    }

    async fn survey_completed(&self) -> bool {
        self.survey_completed
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[Object]
impl Address {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn line1(&self) -> &str {
        &self.line1
    }

    async fn line2(&self) -> Option<&str> {
        self.line2.as_deref()
    }

    async fn city(&self) -> &str {
        &self.city
    }

    async fn state(&self) -> &str {
        &self.state
    }

    async fn postal_code(&self) -> &str {
        &self.postal_code
    }

    async fn country(&self) -> &str {
        &self.country
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[Object]
impl Category {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }
}

#[Object]
impl Product {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn description(&self) -> &str {
        &self.description
    }

    async fn price(&self) -> f64 {
        money(self.price)
    }

    /// Price formatted for display, e.g. `$24.99`.
    async fn formatted_price(&self) -> String {
        self.unit_price().display()
    }

    async fn rating(&self) -> f64 {
        self.rating
    }

    async fn review_count(&self) -> u32 {
        self.review_count
    }

    async fn image(&self) -> &str {
        &self.image
    }

    async fn category(&self) -> &Category {
        &self.category
    }

    async fn tags(&self) -> &[String] {
        &self.tags
    }

    async fn ingredients(&self) -> Option<&str> {
        self.ingredients.as_deref()
    }

    async fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    async fn benefits(&self) -> &[String] {
        &self.benefits
    }

    async fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[Object]
impl Review {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn product_id(&self) -> ID {
        ID(self.product_id.to_string())
    }

    async fn author(&self) -> &str {
        &self.author
    }

    async fn rating(&self) -> u8 {
        self.rating
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn content(&self) -> &str {
        &self.content
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// Cart & Orders
// =============================================================================

#[Object]
impl CartItem {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    /// The catalog entry as it is now.
    async fn product(&self, ctx: &Context<'_>) -> Result<Product> {
        super::context::state(ctx)?
            .db()
            .read()
            .await
            .products
            .get(self.product_id)
            .cloned()
            .ok_or(CartError::ProductNotFound)
            .graphql()
    }

    async fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price captured when the product was added.
    async fn price(&self) -> f64 {
        money(self.unit_price)
    }

    #[graphql(name = "lineTotal")]
    async fn line_total_amount(&self) -> f64 {
        money(self.line_total())
    }
}

#[Object]
impl Cart {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn items(&self) -> &[CartItem] {
        &self.items
    }

    async fn subtotal(&self) -> f64 {
        money(self.subtotal)
    }

    /// Sum of line quantities.
    #[graphql(name = "itemCount")]
    async fn total_quantity(&self) -> u64 {
        self.item_count()
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[Object]
impl OrderItem {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn product(&self) -> &Product {
        &self.product
    }

    async fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price at checkout time.
    async fn price(&self) -> f64 {
        money(self.price)
    }
}

#[Object]
impl Order {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn items(&self) -> &[OrderItem] {
        &self.items
    }

    async fn subtotal(&self) -> f64 {
        money(self.subtotal)
    }

    async fn total(&self) -> f64 {
        money(self.total)
    }

    async fn status(&self) -> GqlOrderStatus {
        self.status.into()
    }

    async fn payment_status(&self) -> GqlPaymentStatus {
        self.payment_status.into()
    }

    async fn payment_method(&self) -> GqlPaymentMethod {
        self.payment_method.into()
    }

    async fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// =============================================================================
// Survey
// =============================================================================

#[derive(SimpleObject)]
pub struct SurveyOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A catalog question. Slider bounds are null for choice questions.
pub struct SurveyQuestionObject(pub &'static SurveyQuestion);

#[Object(name = "SurveyQuestion")]
impl SurveyQuestionObject {
    async fn id(&self) -> &str {
        self.0.id
    }

    async fn text(&self) -> &str {
        self.0.text
    }

    async fn kind(&self) -> GqlQuestionKind {
        self.0.kind.into()
    }

    async fn options(&self) -> Vec<SurveyOption> {
        self.0
            .options
            .iter()
            .map(|o| SurveyOption {
                value: o.value,
                label: o.label,
            })
            .collect()
    }

    async fn min(&self) -> Option<f64> {
        self.0.range.map(|r| r.min)
    }

    async fn max(&self) -> Option<f64> {
        self.0.range.map(|r| r.max)
    }

    async fn step(&self) -> Option<f64> {
        self.0.range.map(|r| r.step)
    }
}

#[Object(name = "HealthProfile")]
impl HealthProfileRecord {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn age_group(&self) -> Option<&str> {
        self.profile.age_group.as_deref()
    }

    async fn activity_level(&self) -> Option<&str> {
        self.profile.activity_level.as_deref()
    }

    async fn health_goals(&self) -> &[String] {
        &self.profile.health_goals
    }

    async fn sleep_hours(&self) -> Option<f64> {
        self.profile.sleep_hours
    }

    async fn stress_level(&self) -> Option<f64> {
        self.profile.stress_level
    }

    async fn diet(&self) -> Option<&str> {
        self.profile.diet.as_deref()
    }

    async fn allergies(&self) -> &[String] {
        &self.profile.allergies
    }

    /// Raw answers keyed by question id.
    async fn answers(&self) -> Json<&wellnest_core::onboarding::SurveyAnswers> {
        Json(&self.answers)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// =============================================================================
// Inputs
// =============================================================================

#[derive(Debug, InputObject)]
pub struct AddressInput {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<AddressInput> for PostalAddress {
    fn from(input: AddressInput) -> Self {
        Self {
            line1: input.line1,
            line2: input.line2,
            city: input.city,
            state: input.state,
            postal_code: input.postal_code,
            country: input.country,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct UpdateProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub address: AddressInput,
    /// Omit to reuse the billing address.
    pub mailing_address: Option<AddressInput>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub language: Option<String>,
}

impl From<UpdateProfileInput> for ProfileUpdate {
    fn from(input: UpdateProfileInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            birth_date: input.birth_date,
            address: input.address.into(),
            mailing_address: input.mailing_address.map(Into::into),
            email_notifications: input.email_notifications,
            sms_notifications: input.sms_notifications,
            language: input.language,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct ShippingAddressInput {
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

#[derive(Debug, InputObject)]
pub struct CardInput {
    pub card_name: String,
    pub card_number: String,
    pub exp_date: String,
    pub cvv: String,
}

#[derive(Debug, InputObject)]
pub struct PlaceOrderInput {
    /// Omit to ship to the saved address.
    pub shipping_address: Option<ShippingAddressInput>,
    pub payment_method: GqlPaymentMethod,
    pub card: Option<CardInput>,
}

impl From<PlaceOrderInput> for OrderRequest {
    fn from(input: PlaceOrderInput) -> Self {
        Self {
            shipping: input.shipping_address.map(|s| ShippingDetails {
                first_name: s.first_name,
                last_name: s.last_name,
                email: s.email,
                phone: s.phone,
                address_line1: s.address_line1,
                address_line2: s.address_line2,
                city: s.city,
                state: s.state,
                postal_code: s.postal_code,
                country: s.country,
            }),
            payment_method: input.payment_method.into(),
            card: input.card.map(|c| CardDetails {
                card_name: c.card_name,
                card_number: c.card_number,
                exp_date: c.exp_date,
                cvv: c.cvv,
            }),
        }
    }
}
