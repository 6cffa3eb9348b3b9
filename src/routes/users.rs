use crate::{activity_log::ActivityLog, error::AppError, models::User};
use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Lists every registered user.
///
/// No authentication, and the rows are returned in full, password hashes
/// included. See DESIGN.md before exposing this publicly.
#[get("/users")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    activity: web::Data<ActivityLog>,
) -> Result<impl Responder, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, created_at FROM users ORDER BY id",
    )
    .fetch_all(&**pool)
    .await
    .map_err(|e| {
        activity.record("User list query failed", &format!("error: {}", e));
        AppError::from(e)
    })?;

    activity.record(
        "User list query successful",
        &format!("count: {}", users.len()),
    );
    Ok(HttpResponse::Ok().json(users))
}
