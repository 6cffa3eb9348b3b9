use crate::{
    activity_log::ActivityLog, auth::AuthenticatedUser, error::AppError,
    palindrome::longest_palindromic_substring,
};
use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

/// Plaintext welcome page.
#[get("/")]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().body("Welcome to the home page!")
}

/// Echoes the authenticated identity back to the caller. Mostly useful for
/// checking a token by hand.
pub async fn protected(
    activity: web::Data<ActivityLog>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    activity.record(
        "Protected route accessed",
        &format!("user: {}", user.username()),
    );
    Ok(HttpResponse::Ok().json(json!({
        "message": "Access to protected route granted",
        "user": user.0
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PalindromeRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

/// Finds the longest palindromic substring of the submitted text.
///
/// The text is lowercased before the search, so "Abba" counts as a
/// four-character palindrome.
pub async fn palindrome(
    activity: web::Data<ActivityLog>,
    payload: web::Json<PalindromeRequest>,
) -> Result<impl Responder, AppError> {
    if payload.validate().is_err() {
        activity.record("Palindrome search failed", "no text provided");
        return Err(AppError::BadRequest(
            "Missing text to search for the palindrome".into(),
        ));
    }

    let normalized = payload.text.to_lowercase();
    let largest = longest_palindromic_substring(&normalized);

    activity.record(
        "Palindrome search successful",
        &format!("text: {}, palindrome: {}", payload.text, largest),
    );

    Ok(HttpResponse::Ok().json(json!({
        "largest_palindrome": largest
    })))
}
