//! User model and session claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::access::{AccessPolicy, Capability, View};
use crate::error::AppError;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    Staff,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::User => "User",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "user" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

super::text_column!(Role);

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    /// National identity card number
    pub nic: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Staff member, as offered when assigning service requests
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffMember {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// User query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct UserQuery {
    /// Search in name, email, phone, NIC and address
    pub search: Option<String>,
    pub role: Option<Role>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    pub nic: Option<String>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub retype_password: String,
    pub role: Option<Role>,
    pub address: Option<String>,
}

/// Update user request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    pub nic: Option<String>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub session: SessionInfo,
}

/// What the current session may see and do
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionInfo {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
    pub views: Vec<View>,
    pub capabilities: Vec<Capability>,
    pub expires_at: i64,
}

impl From<&SessionClaims> for SessionInfo {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.sub.clone(),
            role: claims.role,
            views: claims.views(),
            capabilities: claims.access.capabilities.clone(),
            expires_at: claims.exp,
        }
    }
}

/// JWT claims for an authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User email
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub access: AccessPolicy,
    /// Token id, used for revocation on logout
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for a fresh session; the access policy is evaluated here, once.
    pub fn for_user(user: &User, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            access: AccessPolicy::for_role(user.role),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and validate a JWT token (signature and expiry)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.access.allows(capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Missing capability {:?}",
                capability
            )))
        }
    }

    /// Require any one of the given capabilities
    pub fn require_any(&self, capabilities: &[Capability]) -> Result<(), AppError> {
        if capabilities.iter().any(|c| self.can(*c)) {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights".to_string()))
        }
    }

    pub fn views(&self) -> Vec<View> {
        self.access.views()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 7,
            nic: None,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            address: None,
            role,
            password: String::new(),
            crea_date: Utc::now(),
            modif_date: None,
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Staff".parse::<Role>(), Ok(Role::Staff));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_token_round_trip_keeps_capabilities() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims::for_user(&user(Role::Staff), now, 3600);
        let token = claims.create_token("secret").unwrap();

        let decoded = SessionClaims::from_token(&token, "secret").unwrap();
        assert_eq!(decoded.sub, "jane@example.com");
        assert_eq!(decoded.jti, claims.jti);
        assert!(decoded.require(Capability::ManageBookings).is_ok());
        assert!(decoded.require(Capability::ManageUsers).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let now = Utc::now().timestamp();
        let token = SessionClaims::for_user(&user(Role::User), now, 3600)
            .create_token("secret")
            .unwrap();
        assert!(SessionClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let issued = Utc::now().timestamp() - 7200;
        let token = SessionClaims::for_user(&user(Role::User), issued, 60)
            .create_token("secret")
            .unwrap();
        assert!(SessionClaims::from_token(&token, "secret").is_err());
    }

    #[test]
    fn test_session_info_lists_views() {
        let claims = SessionClaims::for_user(&user(Role::User), 0, 60);
        let info = SessionInfo::from(&claims);
        assert_eq!(info.email, "jane@example.com");
        assert_eq!(info.expires_at, 60);
        assert!(info.views.contains(&View::Rooms));
        assert!(!info.views.contains(&View::Users));
    }

    #[test]
    fn test_create_user_passwords_must_match() {
        let request = CreateUser {
            nic: None,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: None,
            password: "secret".to_string(),
            retype_password: "secrets".to_string(),
            role: None,
            address: None,
        };
        assert!(request.validate().is_err());
    }
}
