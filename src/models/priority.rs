//! Priority domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complaint priority level
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Priority {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePriorityRequest {
    pub name: String,
    pub level: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriorityRequest {
    pub name: Option<String>,
    pub level: Option<i32>,
}
