//! Authentication Service
//!
//! Handles account registration, credential checks, and JWT access tokens.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::error::{Resource, ServiceError};
use crate::application::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::config::JwtSettings;
use crate::domain::{NewUser, Role, User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new `user`-role account
    async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<(UserResponse, TokenResponse), AuthError>;

    /// Authenticate user with credentials
    async fn authenticate(&self, request: LoginRequest) -> Result<TokenResponse, AuthError>;

    /// Validate access token and extract its claims
    async fn validate_token(&self, access_token: &str) -> Result<Claims, AuthError>;

    /// Create the administrator account if no user of that name exists
    async fn ensure_admin(&self, name: &str, password: &str) -> Result<User, AuthError>;
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Role at the time the token was issued
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User name '{0}' is already taken")]
    NameTaken(String),

    #[error("User name '{0}' belongs to a non-admin account")]
    NotAdmin(String),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::InvalidToken => AppError::Unauthorized("Invalid token".into()),
            AuthError::NameTaken(name) => AppError::Service(ServiceError::invalid(
                Resource::User,
                format!("User name '{}' is already taken", name),
            )),
            AuthError::NotAdmin(name) => AppError::Service(ServiceError::invalid(
                Resource::User,
                format!("User name '{}' belongs to a non-admin account", name),
            )),
            AuthError::Validation(errors) => validation_error(errors),
            AuthError::Internal(message) => AppError::Internal(message),
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    jwt_settings: JwtSettings,
}

impl<U> AuthServiceImpl<U>
where
    U: UserRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(user_repo: Arc<U>, jwt_settings: JwtSettings) -> Self {
        Self {
            user_repo,
            jwt_settings,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate a signed access token
    fn generate_token(&self, user: &User) -> Result<TokenResponse, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.jwt_settings.access_token_expiry_minutes);

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(TokenResponse {
            access_token,
            expires_in: self.jwt_settings.access_token_expiry_minutes * 60,
            token_type: "Bearer".to_string(),
        })
    }

    /// Decode and validate access token
    fn decode_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }

    async fn create_user(&self, name: &str, password: &str, role: Role) -> Result<User, AuthError> {
        if self
            .user_repo
            .find_by_name(name)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .is_some()
        {
            return Err(AuthError::NameTaken(name.to_string()));
        }

        let password_hash = self.hash_password(password)?;

        self.user_repo
            .create(&NewUser {
                name: name.to_string(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AuthError::NameTaken(name.to_string()),
                e => AuthError::Internal(e.to_string()),
            })
    }
}

#[async_trait]
impl<U> AuthService for AuthServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<(UserResponse, TokenResponse), AuthError> {
        request.validate()?;

        let user = self
            .create_user(&request.name, &request.password, Role::User)
            .await?;
        let token = self.generate_token(&user)?;

        tracing::info!(user_id = user.id, name = %user.name, "User registered");

        Ok((UserResponse::from(user), token))
    }

    async fn authenticate(&self, request: LoginRequest) -> Result<TokenResponse, AuthError> {
        request.validate()?;

        let user = self
            .user_repo
            .find_by_name(&request.name)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(&request.password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Rejected login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.generate_token(&user)
    }

    async fn validate_token(&self, access_token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode_access_token(access_token)?;
        claims.user_id()?;
        Ok(claims)
    }

    async fn ensure_admin(&self, name: &str, password: &str) -> Result<User, AuthError> {
        let existing = self
            .user_repo
            .find_by_name(name)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        match existing {
            Some(user) if user.is_admin() => Ok(user),
            Some(user) => {
                tracing::error!(
                    user_id = user.id,
                    name,
                    "Configured admin name belongs to a non-admin account"
                );
                Err(AuthError::NotAdmin(user.name))
            }
            None => {
                let user = self.create_user(name, password, Role::Admin).await?;
                tracing::info!(user_id = user.id, name, "Administrator account created");
                Ok(user)
            }
        }
    }
}
