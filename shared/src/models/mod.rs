//! Domain models
//!
//! Row types match the SQLite schema in `store-server/migrations`. Money
//! columns are two-decimal TEXT, timestamps are epoch millis.

mod admin_user;
mod order;
mod product;
mod transaction;

pub use admin_user::{AdminRole, AdminUser, AdminUserCreate, AdminUserUpdate};
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use transaction::{GatewayTransaction, TxnStatus};

use serde::{Deserialize, Serialize};

/// Settlement / display currency. INR is the base currency products are
/// priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Inr => write!(f, "INR"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}
