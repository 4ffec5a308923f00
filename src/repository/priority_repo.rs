//! Priority repository

use crate::models::priority::{CreatePriorityRequest, Priority, UpdatePriorityRequest};
use crate::repository::StoreError;
use sqlx::PgPool;

pub struct PriorityRepository {
    db: PgPool,
}

impl PriorityRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Priority>, StoreError> {
        let priorities = sqlx::query_as::<_, Priority>("SELECT * FROM priorities ORDER BY level")
            .fetch_all(&self.db)
            .await?;

        Ok(priorities)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Priority>, StoreError> {
        let priority = sqlx::query_as::<_, Priority>("SELECT * FROM priorities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(priority)
    }

    pub async fn create(&self, req: &CreatePriorityRequest) -> Result<Priority, StoreError> {
        let priority = sqlx::query_as::<_, Priority>(
            r#"
            INSERT INTO priorities (name, level)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(req.level)
        .fetch_one(&self.db)
        .await?;

        Ok(priority)
    }

    pub async fn update(
        &self,
        id: i32,
        req: &UpdatePriorityRequest,
    ) -> Result<Priority, StoreError> {
        let priority = sqlx::query_as::<_, Priority>(
            r#"
            UPDATE priorities
            SET
                name = COALESCE($2, name),
                level = COALESCE($3, level),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(req.level)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(priority)
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM priorities WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
