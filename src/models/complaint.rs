//! Complaint domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A filed complaint
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub client_id: i32,
    pub category_id: Option<i32>,
    pub priority_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    pub title: String,
    pub description: String,
    pub client_id: i32,
    pub category_id: Option<i32>,
    pub priority_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<i32>,
    pub category_id: Option<i32>,
    pub priority_id: Option<i32>,
}
