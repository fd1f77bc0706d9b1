//! Back-office dashboard

use axum::{Json, Router, extract::State, routing::get};
use shared::client::DashboardStats;

use crate::core::ServerState;
use crate::db::repository::stats;
use crate::utils::{AppError, AppResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/dashboard/stats", get(dashboard_stats))
}

async fn dashboard_stats(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<DashboardStats>>, AppError> {
    let data = stats::dashboard_stats(&state.pool).await?;
    Ok(ok(data))
}
