pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a user login request.
///
/// Login is by username. The handler never distinguishes "unknown user"
/// from "wrong password" in its response.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
/// All three fields are required and must be non-empty; there are no
/// further format or strength rules.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response body for a successful login: a confirmation message and the
/// bearer token for subsequent requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            username: "alice".to_string(),
            password: "pw123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let empty_username = LoginRequest {
            username: "".to_string(),
            password: "pw123".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = LoginRequest {
            username: "alice".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        // Short passwords are accepted; only empty fields are rejected.
        let short_password = RegisterRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "p".to_string(),
        };
        assert!(short_password.validate().is_ok());

        let empty_email = RegisterRequest {
            username: "alice".to_string(),
            email: "".to_string(),
            password: "pw123".to_string(),
        };
        assert!(empty_email.validate().is_err());
    }
}
