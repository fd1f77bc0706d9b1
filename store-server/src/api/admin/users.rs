//! Admin account management (superadmin only)

use axum::{
    Json, Router, middleware,
    extract::{Extension, Path, State},
    routing::{get, put},
};
use shared::models::{AdminRole, AdminUser, AdminUserCreate, AdminUserUpdate};

use crate::auth::{CurrentAdmin, password, require_superadmin};
use crate::core::ServerState;
use crate::db::repository::admin_user;
use crate::utils::validation::{self, MAX_EMAIL_LEN, MAX_PASSWORD_LEN};
use crate::utils::{AppError, AppResponse, ok};

const MIN_PASSWORD_LEN: usize = 6;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn(require_superadmin))
}

async fn list_users(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<AdminUser>>>, AppError> {
    let users = admin_user::find_all(&state.pool).await?;
    Ok(ok(users))
}

async fn create_user(
    State(state): State<ServerState>,
    Json(data): Json<AdminUserCreate>,
) -> Result<Json<AppResponse<AdminUser>>, AppError> {
    validation::validate_required_text(&data.email, "email", MAX_EMAIL_LEN)?;
    validate_password(&data.password)?;

    let hash = password::hash_password(&data.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let role = data.role.unwrap_or(AdminRole::Admin);
    let created = admin_user::create(&state.pool, data.email.trim(), &hash, role).await?;
    tracing::info!(admin_id = created.id, email = %created.email, role = %role, "Admin created");
    Ok(ok(created))
}

async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(data): Json<AdminUserUpdate>,
) -> Result<Json<AppResponse<AdminUser>>, AppError> {
    if let Some(email) = &data.email {
        validation::validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    }
    let password_hash = match &data.password {
        Some(pass) => {
            validate_password(pass)?;
            Some(
                password::hash_password(pass)
                    .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?,
            )
        }
        None => None,
    };
    let updated = admin_user::update(
        &state.pool,
        id,
        data.email.as_deref(),
        password_hash.as_deref(),
        data.role,
    )
    .await?;
    Ok(ok(updated))
}

async fn delete_user(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentAdmin>,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<()>>, AppError> {
    if current.id == id {
        return Err(AppError::validation("you cannot delete your own account"));
    }
    admin_user::delete(&state.pool, id).await?;
    tracing::info!(admin_id = id, by = current.id, "Admin deleted");
    Ok(ok(()))
}

fn validate_password(pass: &str) -> Result<(), AppError> {
    if pass.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation("password must be at least 6 characters"));
    }
    if pass.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("password is too long"));
    }
    Ok(())
}
