//! Request/response types shared between server and its callers
//!
//! Checkout and admin-auth DTOs used in API communication. Kept here so the
//! integration tests drive the API with the exact wire types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Currency, GatewayTransaction, Order, OrderItem};

// =============================================================================
// Checkout DTOs
// =============================================================================

/// One cart line submitted at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
}

/// Checkout form (customer contact + addresses + settlement currency)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutForm {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "phone number must be at least 10 digits"))]
    pub phone: String,
    #[validate(length(min = 10, message = "please enter a complete shipping address"))]
    pub shipping_address: String,
    #[serde(default)]
    pub billing_address: Option<String>,
    #[serde(default = "default_true")]
    pub same_as_billing: bool,
    #[serde(default)]
    pub currency: Currency,
}

fn default_true() -> bool {
    true
}

/// Checkout create request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutCreateRequest {
    #[serde(flatten)]
    pub form: CheckoutForm,
    pub items: Vec<CartLine>,
}

/// Checkout create response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutCreateResponse {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Gateway handoff request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayInitRequest {
    pub order_id: i64,
}

/// Gateway handoff response: submission URL plus the complete signed field
/// set the browser posts to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayInitResponse {
    pub gateway_url: String,
    pub params: std::collections::BTreeMap<String, String>,
}

/// Order detail response (order + priced items + payment attempts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    pub transactions: Vec<GatewayTransaction>,
}

/// Order item joined with display fields from the product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product_name: Option<String>,
    pub product_image_url: Option<String>,
}

// =============================================================================
// Admin Auth DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

/// Admin information (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: i64,
    pub email: String,
    pub role: String,
}

// =============================================================================
// Admin Dashboard DTOs
// =============================================================================

/// Read-only back-office statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_transactions: i64,
    pub pending_orders: i64,
    pub paid_orders: i64,
    pub failed_orders: i64,
    pub revenue_inr: String,
    pub revenue_usd: String,
    pub successful_transactions: i64,
    pub failed_transactions: i64,
}
