//! Checkout orchestration: cart -> pending order -> signed gateway handoff

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::client::{CartLine, CheckoutForm, GatewayInitResponse};
use shared::models::{Order, OrderItem};
use shared::{money, util};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::core::config::Config;
use crate::db::repository::{order, product, transaction};
use crate::gateway::{self, PaymentParams};
use crate::utils::error::AppError;
use crate::utils::validation::{self, MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN};

/// Maximum lines accepted in a single cart.
const MAX_CART_LINES: usize = 100;

/// Turns validated carts into pending orders and builds the signed field
/// set the browser posts to the gateway. Holds no state beyond the pool
/// and config; cloneable per request.
#[derive(Clone)]
pub struct CheckoutService {
    pool: SqlitePool,
    config: Arc<Config>,
}

impl CheckoutService {
    pub fn new(pool: SqlitePool, config: Arc<Config>) -> Self {
        Self { pool, config }
    }

    /// Create a `pending` order from the checkout form and cart.
    ///
    /// Prices are read from the catalog at this moment and snapshotted
    /// into the order items; per-line amounts are converted to the
    /// settlement currency unrounded and rounded exactly once at the
    /// end, so the stored total always equals the sum of stored
    /// subtotals. Stock is only checked here, never reserved; the
    /// decrement happens when the gateway confirms payment.
    pub async fn create_order(
        &self,
        form: CheckoutForm,
        items: Vec<CartLine>,
    ) -> Result<(Order, Vec<OrderItem>), AppError> {
        form.validate()?;
        validation::validate_required_text(&form.name, "name", MAX_NAME_LEN)?;
        validation::validate_required_text(&form.email, "email", MAX_EMAIL_LEN)?;
        validation::validate_required_text(&form.shipping_address, "shippingAddress", MAX_ADDRESS_LEN)?;
        if items.is_empty() {
            return Err(AppError::validation("cart must contain at least one item"));
        }
        if items.len() > MAX_CART_LINES {
            return Err(AppError::validation("too many cart lines"));
        }

        let billing_address = match (&form.billing_address, form.same_as_billing) {
            (Some(addr), false) if !addr.trim().is_empty() => {
                validation::validate_required_text(addr, "billingAddress", MAX_ADDRESS_LEN)?;
                addr.clone()
            }
            _ => form.shipping_address.clone(),
        };

        let mut total_inr = Decimal::ZERO;
        let mut line_inserts = Vec::with_capacity(items.len());
        for line in &items {
            if line.quantity <= 0 {
                return Err(AppError::validation("quantity must be at least 1"));
            }
            let product = product::find_by_id(&self.pool, line.product_id)
                .await?
                .filter(|p| p.is_active)
                .ok_or_else(|| AppError::not_found(format!("Product {}", line.product_id)))?;
            if product.stock < line.quantity {
                return Err(AppError::OutOfStock(product.name));
            }
            let unit_inr = validation::validate_money(&product.price_base, "price")?;
            let qty = Decimal::from(line.quantity);
            total_inr += unit_inr * qty;

            let unit = money::to_settlement(unit_inr, form.currency);
            line_inserts.push(order::OrderItemInsert {
                product_id: product.id,
                quantity: line.quantity,
                price_each: money::fmt_money(money::round_money(unit)),
                subtotal: money::fmt_money(money::round_money(unit * qty)),
            });
        }

        let amount_total =
            money::fmt_money(money::round_money(money::to_settlement(total_inr, form.currency)));
        let fx_rate = money::settlement_rate(form.currency).normalize().to_string();

        let (created, created_items) = order::create_with_items(
            &self.pool,
            order::OrderInsert {
                order_number: util::order_number(),
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone: form.phone.trim().to_string(),
                shipping_address: form.shipping_address.trim().to_string(),
                billing_address: billing_address.trim().to_string(),
                currency: form.currency,
                amount_total,
                fx_rate,
            },
            line_inserts,
        )
        .await?;

        info!(
            order_id = created.id,
            order_number = %created.order_number,
            amount = %created.amount_total,
            currency = ?created.currency,
            "order created"
        );
        Ok((created, created_items))
    }

    /// Build the signed gateway handoff for an order.
    ///
    /// Each call mints a fresh transaction id, so a shopper who backs
    /// out and retries gets a new attempt row; the amount string is the
    /// stored order total verbatim, never re-derived, because the
    /// gateway signs the exact bytes it receives.
    pub async fn initiate_payment(&self, order_id: i64) -> Result<GatewayInitResponse, AppError> {
        let order = order::find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
        if order.status != shared::models::OrderStatus::Pending {
            return Err(AppError::conflict(format!(
                "order {order_id} is {} and cannot be paid",
                order.status
            )));
        }

        let firstname = order
            .name
            .split_whitespace()
            .next()
            .unwrap_or(order.name.as_str())
            .to_string();
        let params = PaymentParams {
            txnid: util::txn_id(),
            amount: order.amount_total.clone(),
            productinfo: format!("Order {}", order.order_number),
            firstname,
            email: order.email.clone(),
            phone: order.phone.clone(),
            surl: self.config.success_callback_url(),
            furl: self.config.failure_callback_url(),
            udf1: Some(order.id.to_string()),
            udf2: None,
            udf3: None,
            udf4: None,
            udf5: None,
        };
        let hash = gateway::payment_request_hash(&self.config.gateway, &params);
        let form = gateway::build_payment_form(&self.config.gateway, &params, &hash);

        let raw_request = serde_json::to_string(&params)
            .map_err(|e| AppError::internal(format!("serialize payment params: {e}")))?;
        let txn = transaction::create(
            &self.pool,
            transaction::TxnInsert {
                order_id: order.id,
                txn_id: params.txnid.clone(),
                amount: params.amount.clone(),
                currency: order.currency,
                hash_sent: hash,
                raw_request,
            },
        )
        .await?;

        info!(
            order_id = order.id,
            txn_id = %txn.txn_id,
            gateway_url = self.config.gateway.payment_url(),
            "payment initiated"
        );
        Ok(GatewayInitResponse {
            gateway_url: self.config.gateway.payment_url().to_string(),
            params: form,
        })
    }
}
