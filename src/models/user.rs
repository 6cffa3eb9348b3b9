use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a user row as stored in the database.
///
/// The full row, `password_hash` included, is what the registration
/// response and `GET /api/users` serialize. Deployments that cannot accept
/// exposing the hash should strip the field rather than change the row type.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
