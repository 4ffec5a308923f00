//! Complaint repository

use crate::models::complaint::{Complaint, CreateComplaintRequest, UpdateComplaintRequest};
use crate::repository::StoreError;
use sqlx::PgPool;

pub struct ComplaintRepository {
    db: PgPool,
}

impl ComplaintRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Complaint>, StoreError> {
        let complaints =
            sqlx::query_as::<_, Complaint>("SELECT * FROM complaints ORDER BY created_at DESC")
                .fetch_all(&self.db)
                .await?;

        Ok(complaints)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Complaint>, StoreError> {
        let complaint = sqlx::query_as::<_, Complaint>("SELECT * FROM complaints WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(complaint)
    }

    pub async fn create(&self, req: &CreateComplaintRequest) -> Result<Complaint, StoreError> {
        let complaint = sqlx::query_as::<_, Complaint>(
            r#"
            INSERT INTO complaints (title, description, client_id, category_id, priority_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.client_id)
        .bind(req.category_id)
        .bind(req.priority_id)
        .fetch_one(&self.db)
        .await?;

        Ok(complaint)
    }

    pub async fn update(
        &self,
        id: i32,
        req: &UpdateComplaintRequest,
    ) -> Result<Complaint, StoreError> {
        let complaint = sqlx::query_as::<_, Complaint>(
            r#"
            UPDATE complaints
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                client_id = COALESCE($4, client_id),
                category_id = COALESCE($5, category_id),
                priority_id = COALESCE($6, priority_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.client_id)
        .bind(req.category_id)
        .bind(req.priority_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(complaint)
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
