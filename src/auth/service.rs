use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::config::{AuthConfig, TOKEN_TTL_HOURS_RANGE};
use crate::error::Result;
use crate::store::UserStore;
use crate::types::{AuthResponse, CredentialsRequest, User, UserProfile};

use super::error::AuthError;
use super::password::{hash_password, verify_password};
use super::token::TokenIssuer;

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Registration, login, and bearer-token checks.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    pub fn from_config(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        let tokens = TokenIssuer::new(
            &config.signing_secret(),
            Duration::hours(
                config
                    .token_ttl_hours
                    .clamp(*TOKEN_TTL_HOURS_RANGE.start(), *TOKEN_TTL_HOURS_RANGE.end()),
            ),
        );
        Self::new(users, tokens)
    }

    pub async fn register(&self, request: CredentialsRequest) -> Result<AuthResponse> {
        request.validate()?;
        let hash = hash_password(&request.password)?;
        let user = self.users.create_user(&request.email, hash).await?;
        info!(user_id = %user.id, "registered user");
        self.respond(&user)
    }

    pub async fn login(&self, request: CredentialsRequest) -> Result<AuthResponse> {
        request.validate()?;
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        debug!(user_id = %user.id, "user logged in");
        self.respond(&user)
    }

    /// Resolve a bearer token to a user that still exists.
    pub async fn authenticate(&self, token: &str) -> std::result::Result<AuthUser, AuthError> {
        let claims = self.tokens.verify(token)?;
        let user = self
            .users
            .find_by_id(claims.sub)
            .await
            .ok()
            .flatten()
            .ok_or(AuthError::UnknownUser)?;
        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }

    fn respond(&self, user: &User) -> Result<AuthResponse> {
        Ok(AuthResponse {
            access_token: self.tokens.issue(user.id, &user.email)?,
            user: UserProfile::from(user),
        })
    }
}
