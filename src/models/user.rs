//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account holding the credential record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    /// Globally unique identifier used to log in
    pub email: String,
    /// Argon2id digest; never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String, // ADMIN, GESTIONNAIRE
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role claim carried in tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "GESTIONNAIRE")]
    Gestionnaire,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Gestionnaire => "GESTIONNAIRE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Anything that is not ADMIN becomes GESTIONNAIRE, including an absent role
// on registration.
impl From<&str> for Role {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("ADMIN") {
            Role::Admin
        } else {
            Role::Gestionnaire
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// Update user request; absent fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// User response (without the password hash)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: Role::from(user.role),
            created_at: user.created_at,
        }
    }
}
