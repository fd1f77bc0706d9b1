//! Storefront server
//!
//! Checkout-to-payment reconciliation service: product catalog, order
//! intake, hosted-gateway handoff with request signing, callback
//! reconciliation and an admin back office.

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod gateway;
pub mod utils;
