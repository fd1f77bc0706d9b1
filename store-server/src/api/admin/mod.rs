//! Back-office API (`/api/admin`)
//!
//! Every route here except `auth/login` sits behind the JWT middleware;
//! the `users` routes additionally require the superadmin role.

pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod transactions;
pub mod users;

use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(transactions::router())
        .merge(users::router())
}
