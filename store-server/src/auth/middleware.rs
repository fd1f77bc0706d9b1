//! Authentication middleware
//!
//! Axum middleware gating the admin back office.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentAdmin, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Require an authenticated admin for `/api/admin/*` routes.
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// then injects [`CurrentAdmin`] into request extensions.
///
/// Skipped paths:
/// - anything outside `/api/admin/`
/// - `/api/admin/auth/login`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if !path.starts_with("/api/admin/") || path == "/api/admin/auth/login" {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(uri = %req.uri(), "Admin request without authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            let admin = CurrentAdmin::try_from(claims).map_err(|_| AppError::InvalidToken)?;
            req.extensions_mut().insert(admin);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "Admin token rejected");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

/// Require the superadmin role (admin-user management routes).
pub async fn require_superadmin(req: Request, next: Next) -> Result<Response, AppError> {
    let admin = req
        .extensions()
        .get::<CurrentAdmin>()
        .ok_or(AppError::Unauthorized)?;

    if !admin.is_superadmin() {
        tracing::warn!(admin_id = admin.id, email = %admin.email, "Superadmin required");
        return Err(AppError::forbidden("Superadmin role required".to_string()));
    }

    Ok(next.run(req).await)
}
