//! Data access layer
//!
//! Store failures surface as a closed set of tagged variants that callers
//! match exhaustively instead of inspecting driver-specific codes.

pub mod category_repo;
pub mod client_repo;
pub mod complaint_repo;
pub mod priority_repo;
pub mod user_store;

pub use category_repo::CategoryRepository;
pub use client_repo::ClientRepository;
pub use complaint_repo::ComplaintRepository;
pub use priority_repo::PriorityRepository;
pub use user_store::{NewUser, PgUserStore, UserChanges, UserStore};

use crate::error::AppError;
use thiserror::Error;

/// Store collaborator errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("unique constraint violated on {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.constraint().unwrap_or("unique field").to_string())
            }
            _ => StoreError::Unavailable(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::NotFound,
            StoreError::Conflict(field) => {
                AppError::Conflict(format!("Duplicate value for unique field ({})", field))
            }
            StoreError::Unavailable(detail) => AppError::Internal(detail),
        }
    }
}
