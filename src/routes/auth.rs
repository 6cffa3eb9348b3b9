use crate::{
    activity_log::ActivityLog,
    auth::{hash_password, verify_password, LoginRequest, LoginResponse, RegisterRequest, TokenService},
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. Responds 201 with the created row. A
/// duplicate username or email is not pre-checked; the store's uniqueness
/// constraint rejects the insert and the failure surfaces as a 500.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    activity: web::Data<ActivityLog>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    if register_data.validate().is_err() {
        activity.record("Registration failed", "missing data");
        return Err(AppError::BadRequest(
            "Missing data to register the user".into(),
        ));
    }

    let password_hash = hash_password(&register_data.password).map_err(|e| {
        activity.record("Registration failed", &format!("error: {}", e));
        e
    })?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3)
         RETURNING id, username, email, password_hash, created_at",
    )
    .bind(&register_data.username)
    .bind(&register_data.email)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await
    .map_err(|e| {
        activity.record("Registration failed", &format!("error: {}", e));
        AppError::from(e)
    })?;

    activity.record(
        "Registration successful",
        &format!("user: {}", user.username),
    );

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "user": user
    })))
}

/// Login user
///
/// Authenticates by username and password and returns a session token.
/// An unknown username and a wrong password produce byte-identical 401
/// responses, so the endpoint cannot be used to enumerate accounts.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    activity: web::Data<ActivityLog>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1",
    )
    .bind(&login_data.username)
    .fetch_optional(&**pool)
    .await
    .map_err(|e| {
        activity.record("Login failed", &format!("error: {}", e));
        AppError::from(e)
    })?;

    if let Some(user) = user {
        if verify_password(&login_data.password, &user.password_hash)? {
            let token = tokens.issue(&user.username)?;
            activity.record("Login successful", &format!("user: {}", user.username));
            return Ok(HttpResponse::Ok().json(LoginResponse {
                message: "User accepted".into(),
                token,
            }));
        }
    }

    activity.record("Login failed", &format!("user: {}", login_data.username));
    Err(AppError::Unauthorized("Invalid username or password".into()))
}
