//! Admin User Repository

use shared::models::{AdminRole, AdminUser};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const ADMIN_COLS: &str = "id, email, password_hash, role, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<AdminUser>> {
    let users = sqlx::query_as::<_, AdminUser>(&format!(
        "SELECT {ADMIN_COLS} FROM admin_users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AdminUser>> {
    let user = sqlx::query_as::<_, AdminUser>(&format!(
        "SELECT {ADMIN_COLS} FROM admin_users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<AdminUser>> {
    let user = sqlx::query_as::<_, AdminUser>(&format!(
        "SELECT {ADMIN_COLS} FROM admin_users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_users")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    role: AdminRole,
) -> RepoResult<AdminUser> {
    let now = shared::util::now_millis();
    let user = sqlx::query_as::<_, AdminUser>(&format!(
        "INSERT INTO admin_users (email, password_hash, role, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING {ADMIN_COLS}"
    ))
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

/// Partial update; `password_hash` is already hashed by the caller.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    email: Option<&str>,
    password_hash: Option<&str>,
    role: Option<AdminRole>,
) -> RepoResult<AdminUser> {
    let now = shared::util::now_millis();
    let user = sqlx::query_as::<_, AdminUser>(&format!(
        "UPDATE admin_users SET \
             email = COALESCE(?1, email), \
             password_hash = COALESCE(?2, password_hash), \
             role = COALESCE(?3, role), \
             updated_at = ?4 \
         WHERE id = ?5 RETURNING {ADMIN_COLS}"
    ))
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    user.ok_or_else(|| RepoError::NotFound(format!("Admin user {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM admin_users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Admin user {id} not found")));
    }
    Ok(())
}
