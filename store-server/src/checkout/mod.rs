//! Checkout and payment reconciliation
//!
//! [`orchestrator`] turns a validated cart into a `pending` order and
//! builds the signed gateway handoff. [`reconcile`] consumes the
//! asynchronous gateway callbacks and applies the resulting state
//! transition exactly once.

pub mod orchestrator;
pub mod reconcile;

pub use orchestrator::CheckoutService;
pub use reconcile::{CallbackOutcome, Reconciler};
