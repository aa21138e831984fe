//! Authentication service — register, login, and refresh orchestration.

use daybook_core::error::DaybookError;
use daybook_core::models::user::{CreateUser, User};
use daybook_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token::{self, TokenPair};

/// Input for the register flow (shape-validated at the request boundary).
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Input for the login flow.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful register/login result.
#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Authentication service.
///
/// Generic over the user repository so this crate has no dependency on
/// the database crate.
pub struct AuthService<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new account and issue its first token pair.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthOutput, AuthError> {
        // Reject duplicates up front; the unique email index is the
        // backstop for concurrent registrations.
        match self.users.get_by_email(&input.email).await {
            Ok(_) => return Err(AuthError::EmailTaken),
            Err(DaybookError::NotFound { .. }) => {}
            Err(e) => return Err(AuthError::Core(e)),
        }

        let password_hash = password::hash_password(&input.password)?;

        let user = self
            .users
            .create(CreateUser {
                email: input.email,
                password_hash,
                first_name: input.first_name,
                last_name: input.last_name,
            })
            .await
            .map_err(|e| match e {
                DaybookError::AlreadyExists { .. } => AuthError::EmailTaken,
                other => AuthError::Core(other),
            })?;

        let tokens = token::issue_pair(user.id, &user.email, &self.config)?;
        Ok(AuthOutput { user, tokens })
    }

    /// Authenticate with email + password and issue a fresh token pair.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, input: LoginInput) -> Result<AuthOutput, AuthError> {
        let user = match self.users.get_by_email(&input.email).await {
            Ok(u) => u,
            Err(DaybookError::NotFound { .. }) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(AuthError::Core(e)),
        };

        let valid = password::verify_password(&input.password, &user.password_hash)?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = token::issue_pair(user.id, &user.email, &self.config)?;
        Ok(AuthOutput { user, tokens })
    }

    /// Exchange a valid refresh token for a brand-new token pair.
    ///
    /// Both tokens are reissued and nothing is invalidated server-side,
    /// so the presented refresh token stays usable until its own expiry.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = token::verify_refresh(refresh_token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject: {e}")))?;

        // The token may outlive the account; re-check before reissuing.
        let user = match self.users.get_by_id(user_id).await {
            Ok(u) => u,
            Err(DaybookError::NotFound { .. }) => return Err(AuthError::UserNotFound),
            Err(e) => return Err(AuthError::Core(e)),
        };

        token::issue_pair(user.id, &user.email, &self.config)
    }
}
