//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, Clock, SystemClock, TokenPurpose, TokenRejection, TokenService};
pub use middleware::{extract_token, require_auth, AuthContext};
pub use password::PasswordHasher;
