//! Admin login and session introspection

use std::time::Duration;

use axum::{Extension, Json, Router, extract::State, routing::{get, post}};
use shared::client::{AdminInfo, LoginRequest, LoginResponse};
use tokio::time::Instant;
use validator::Validate;

use crate::auth::{CurrentAdmin, password};
use crate::core::ServerState;
use crate::db::repository::admin_user;
use crate::utils::{AppError, AppResponse, ok};

/// Login always takes this long, found or not, so response timing does
/// not reveal whether an email exists.
const AUTH_FIXED_DELAY_MS: u64 = 500;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AppResponse<LoginResponse>>, AppError> {
    req.validate()?;
    let started = Instant::now();
    let result = authenticate(&state, &req).await;
    if let Some(remaining) =
        Duration::from_millis(AUTH_FIXED_DELAY_MS).checked_sub(started.elapsed())
    {
        tokio::time::sleep(remaining).await;
    }
    result.map(ok)
}

async fn authenticate(
    state: &ServerState,
    req: &LoginRequest,
) -> Result<LoginResponse, AppError> {
    let admin = admin_user::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let verified = password::verify_password(&req.password, &admin.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !verified {
        tracing::warn!(email = %req.email, "Admin login with wrong password");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt
        .generate_token(admin.id, &admin.email, admin.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
    tracing::info!(admin_id = admin.id, email = %admin.email, "Admin logged in");

    Ok(LoginResponse {
        token,
        admin: AdminInfo {
            id: admin.id,
            email: admin.email,
            role: admin.role.to_string(),
        },
    })
}

async fn me(
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<Json<AppResponse<AdminInfo>>, AppError> {
    Ok(ok(AdminInfo {
        id: admin.id,
        email: admin.email,
        role: admin.role.to_string(),
    }))
}
