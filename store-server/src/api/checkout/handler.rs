//! Checkout handlers
//!
//! The callback handlers answer the gateway with a browser redirect and
//! nothing else; reconciliation errors are logged, never surfaced, so a
//! transient failure on our side can't strand the shopper on a gateway
//! error page.

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use shared::client::{
    CheckoutCreateRequest, CheckoutCreateResponse, GatewayInitRequest, GatewayInitResponse,
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, ok};

pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CheckoutCreateRequest>,
) -> Result<Json<AppResponse<CheckoutCreateResponse>>, AppError> {
    let (order, items) = state.checkout().create_order(req.form, req.items).await?;
    Ok(ok(CheckoutCreateResponse { order, items }))
}

pub async fn gateway_init(
    State(state): State<ServerState>,
    Json(req): Json<GatewayInitRequest>,
) -> Result<Json<AppResponse<GatewayInitResponse>>, AppError> {
    let resp = state.checkout().initiate_payment(req.order_id).await?;
    Ok(ok(resp))
}

pub async fn gateway_success(
    State(state): State<ServerState>,
    Form(raw): Form<HashMap<String, String>>,
) -> Redirect {
    let reconciler = state.reconciler();
    let outcome = reconciler.handle_success(raw).await;
    Redirect::to(&reconciler.landing_url(&outcome))
}

pub async fn gateway_failure(
    State(state): State<ServerState>,
    Form(raw): Form<HashMap<String, String>>,
) -> Redirect {
    let reconciler = state.reconciler();
    let outcome = reconciler.handle_failure(raw).await;
    Redirect::to(&reconciler.landing_url(&outcome))
}
