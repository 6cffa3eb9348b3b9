use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token lifetime in seconds.
const TOKEN_TTL: i64 = 60 * 60; // 1 hour

/// Represents the claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username of the authenticated user.
    pub username: String,
    /// Issue timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies signed session tokens.
///
/// The signing secret is injected once at construction (from configuration)
/// and held for the lifetime of the process; handlers and middleware share
/// one instance. Tokens are stateless: validity is purely a function of the
/// signature and the embedded expiry, so there is no revocation before a
/// token naturally expires.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The library default tolerates 60 seconds of clock skew; a token
        // here is invalid the instant its expiry passes.
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Signs a token for `username`, expiring one hour from issuance.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            username: username.to_string(),
            iat: now as usize,
            exp: (now + TOKEN_TTL) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token's signature and expiry and decodes its claims.
    ///
    /// Malformed input, a signature that does not match this service's
    /// secret, and an elapsed expiry all fail with `AppError::Forbidden`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Forbidden(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_issue_and_verify() {
        let service = TokenService::new("test_secret_for_issue_verify");
        let token = service.issue("alice").unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL as usize);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let secret = "test_secret_for_expiration";
        let service = TokenService::new(secret);

        let now = chrono::Utc::now().timestamp() as usize;
        let claims_expired = Claims {
            username: "bob".to_string(),
            iat: now - 2 * TOKEN_TTL as usize,
            exp: now - TOKEN_TTL as usize,
        };
        let expired_token = encode(
            &Header::default(),
            &claims_expired,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        match service.verify(&expired_token) {
            Err(AppError::Forbidden(msg)) => {
                assert!(
                    msg.contains("ExpiredSignature"),
                    "Unexpected error message for expired token: {}",
                    msg
                );
            }
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let service = TokenService::new("the_real_secret");
        let other = TokenService::new("a_completely_different_secret");

        let token = other.issue("mallory").unwrap();
        match service.verify(&token) {
            Err(AppError::Forbidden(msg)) => {
                assert!(
                    msg.contains("InvalidSignature") || msg.contains("InvalidToken"),
                    "Unexpected error message for foreign signature: {}",
                    msg
                );
            }
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let service = TokenService::new("test_secret_for_malformed");
        assert!(service.verify("not-a-token").is_err());
        assert!(service.verify("").is_err());
        assert!(service.verify("a.b.c").is_err());
    }
}
