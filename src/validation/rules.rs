//! Rule sets for each operation, one constructor per endpoint payload.
//!
//! Messages mirror what API consumers already rely on, so they change
//! only deliberately.

use crate::repository::UserStore;
use crate::validation::{Field, RuleSet};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ().-]{5,18}[0-9]$").expect("valid phone regex"));

fn password_message(min_length: usize) -> String {
    format!("Password must be at least {} characters long.", min_length)
}

/// Uniqueness lookup against the credential store. A store failure counts
/// as a failed check for the email field, not a fatal error.
fn email_unique(users: Arc<dyn UserStore>, exclude_id: Option<i32>) -> impl Fn(serde_json::Value) -> futures::future::BoxFuture<'static, Result<(), String>> + Send + Sync {
    move |value: serde_json::Value| {
        let users = users.clone();
        Box::pin(async move {
            let Some(email) = value.as_str().map(|s| s.to_string()) else {
                return Err("Invalid email format.".to_string());
            };

            match users.find_by_email(&email).await {
                Ok(Some(existing)) if exclude_id != Some(existing.id) => {
                    Err("Email is already in use".to_string())
                }
                Ok(_) => Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "Email uniqueness check failed");
                    Err("Email could not be verified".to_string())
                }
            }
        })
    }
}

/// POST /auth/register and POST /api/users
pub fn register(users: Arc<dyn UserStore>, password_min_length: usize) -> RuleSet {
    RuleSet::new()
        .field(
            Field::new("email")
                .required("Email is required")
                .bail()
                .email("Invalid email format.")
                .custom_async(email_unique(users, None)),
        )
        .field(
            Field::new("password")
                .required("Password is required")
                .min_length(password_min_length, &password_message(password_min_length)),
        )
        .field(Field::new("role").is_string("Role must be a string"))
}

/// POST /auth/login
pub fn login() -> RuleSet {
    RuleSet::new()
        .field(Field::new("email").required("Email is required").email("Invalid email format."))
        .field(Field::new("password").required("Password is required"))
}

/// POST /auth/forgot-password
pub fn forgot_password() -> RuleSet {
    RuleSet::new()
        .field(Field::new("email").required("Email is required").email("Invalid email format."))
}

/// POST /auth/reset-password/{token}
pub fn reset_password(password_min_length: usize) -> RuleSet {
    RuleSet::new().field(
        Field::new("password")
            .required("Password is required")
            .min_length(password_min_length, &password_message(password_min_length)),
    )
}

/// PUT /api/users/{id}. Email uniqueness excludes the record being updated.
pub fn update_user(
    users: Arc<dyn UserStore>,
    user_id: i32,
    password_min_length: usize,
) -> RuleSet {
    RuleSet::new()
        .field(
            Field::new("email")
                .bail()
                .email("Invalid email format.")
                .custom_async(email_unique(users, Some(user_id))),
        )
        .field(
            Field::new("password")
                .min_length(password_min_length, &password_message(password_min_length)),
        )
        .field(Field::new("role").is_string("Role must be a string"))
}

/// POST /api/clients
pub fn create_client() -> RuleSet {
    RuleSet::new()
        .field(Field::new("name").required("Name is required").is_string("Name must be a string"))
        .field(Field::new("email").required("Valid email is required").email("Valid email is required"))
        .field(Field::new("phone").matches(&PHONE_RE, "Phone number must be valid"))
}

/// PUT /api/clients/{id}
pub fn update_client() -> RuleSet {
    RuleSet::new()
        .field(Field::new("name").is_string("Name must be a string"))
        .field(Field::new("email").email("Valid email is required"))
        .field(Field::new("phone").matches(&PHONE_RE, "Phone number must be valid"))
}

/// POST /api/complaints
pub fn create_complaint() -> RuleSet {
    RuleSet::new()
        .field(
            Field::new("title")
                .required("Title is required")
                .is_string("Title must be a string"),
        )
        .field(
            Field::new("description")
                .required("Description is required")
                .is_string("Description must be a string"),
        )
        .field(
            Field::new("clientId")
                .required("Client ID is required")
                .is_integer("Client ID must be an integer"),
        )
        .field(Field::new("categoryId").is_integer("Category ID must be an integer"))
        .field(Field::new("priorityId").is_integer("Priority ID must be an integer"))
}

/// PUT /api/complaints/{id}
pub fn update_complaint() -> RuleSet {
    RuleSet::new()
        .field(Field::new("title").is_string("Title must be a string"))
        .field(Field::new("description").is_string("Description must be a string"))
        .field(Field::new("clientId").is_integer("Client ID must be an integer"))
        .field(Field::new("categoryId").is_integer("Category ID must be an integer"))
        .field(Field::new("priorityId").is_integer("Priority ID must be an integer"))
}

/// POST /api/categories
pub fn create_category() -> RuleSet {
    RuleSet::new()
        .field(Field::new("name").required("Name is required").is_string("Name must be a string"))
        .field(Field::new("description").is_string("Description must be a string"))
}

/// PUT /api/categories/{id}
pub fn update_category() -> RuleSet {
    RuleSet::new()
        .field(Field::new("name").is_string("Name must be a string"))
        .field(Field::new("description").is_string("Description must be a string"))
}

/// POST /api/priorities
pub fn create_priority() -> RuleSet {
    RuleSet::new()
        .field(Field::new("name").required("Name is required").is_string("Name must be a string"))
        .field(
            Field::new("level")
                .required("Level is required")
                .is_integer("Level must be an integer"),
        )
}

/// PUT /api/priorities/{id}
pub fn update_priority() -> RuleSet {
    RuleSet::new()
        .field(Field::new("name").is_string("Name must be a string"))
        .field(Field::new("level").is_integer("Level must be an integer"))
}
