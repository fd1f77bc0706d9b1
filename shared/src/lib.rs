//! Shared types for the storefront
//!
//! Domain models, request/response DTOs, money helpers and identifier
//! generation used by the server and its integration tests.

pub mod client;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    AdminRole, AdminUser, Currency, GatewayTransaction, Order, OrderItem, OrderStatus, Product,
    TxnStatus,
};
pub use money::{round_money, to_settlement};
