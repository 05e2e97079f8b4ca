//! Authentication service: login, logout and session checks

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, LoginResponse, Role, SessionClaims, SessionInfo, User},
    repository::Repository,
    services::redis::RedisService,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(user: &User, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    redis: RedisService,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig, redis: RedisService) -> Self {
        Self {
            repository,
            config,
            redis,
        }
    }

    fn ttl_seconds(&self) -> i64 {
        self.config.jwt_expiration_hours as i64 * 3600
    }

    /// Authenticate by email and password and open a session
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&user, password)? {
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let claims = SessionClaims::for_user(&user, Utc::now().timestamp(), self.ttl_seconds());
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(user_id = user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.ttl_seconds(),
            session: SessionInfo::from(&claims),
        })
    }

    /// Decode a bearer token and reject revoked sessions
    pub async fn authenticate(&self, token: &str) -> AppResult<SessionClaims> {
        let claims = SessionClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))?;

        if self.redis.is_session_revoked(&claims.jti).await? {
            return Err(AppError::Authentication("Session has been logged out".to_string()));
        }

        Ok(claims)
    }

    /// Revoke the session; the token stays rejected until its expiry
    pub async fn logout(&self, claims: &SessionClaims) -> AppResult<()> {
        let remaining = (claims.exp - Utc::now().timestamp()).max(0) as u64;
        self.redis.revoke_session(&claims.jti, remaining).await?;
        tracing::info!(user_id = claims.user_id, "User logged out");
        Ok(())
    }

    /// Create the configured admin account if no admin exists yet
    pub async fn ensure_admin(&self) -> AppResult<()> {
        let (Some(email), Some(password)) = (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        if self.repository.users.count_with_role(Role::Admin).await? > 0 {
            return Ok(());
        }

        let admin = CreateUser {
            nic: None,
            name: "Administrator".to_string(),
            email: email.clone(),
            phone: None,
            password: password.clone(),
            retype_password: password.clone(),
            role: Some(Role::Admin),
            address: None,
        };
        let hash = hash_password(&admin.password)?;
        let user = self.repository.users.create(&admin, &hash).await?;
        tracing::info!(user_id = user.id, "Created initial admin account");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_password(password: &str) -> User {
        User {
            id: 1,
            nic: None,
            name: "Front Desk".to_string(),
            email: "desk@example.com".to_string(),
            phone: None,
            address: None,
            role: Role::Staff,
            password: hash_password(password).unwrap(),
            crea_date: Utc::now(),
            modif_date: None,
        }
    }

    #[test]
    fn test_password_verification() {
        let user = user_with_password("s3cret");
        assert!(verify_password(&user, "s3cret").unwrap());
        assert!(!verify_password(&user, "wrong").unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let mut user = user_with_password("x");
        user.password = "plain".to_string();
        assert!(matches!(verify_password(&user, "plain"), Err(AppError::Internal(_))));
    }
}
