use thiserror::Error;

use crate::error::VariantlyError;

/// Authentication failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Missing or malformed bearer token")]
    MissingToken,
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("Unknown user")]
    UnknownUser,
    #[error("Token lifetime is out of range")]
    TokenLifetime,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(error: argon2::password_hash::Error) -> Self {
        Self::Hashing(error.to_string())
    }
}

impl From<AuthError> for VariantlyError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::TokenLifetime => VariantlyError::Internal(error.to_string()),
            AuthError::Hashing(msg) => VariantlyError::Internal(msg),
            AuthError::InvalidToken(e) => {
                VariantlyError::Internal(format!("token handling failed: {e}"))
            }
            other => VariantlyError::Unauthorized(other.to_string()),
        }
    }
}
