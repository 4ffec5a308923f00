//! Category repository

use crate::models::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::repository::StoreError;
use sqlx::PgPool;

pub struct CategoryRepository {
    db: PgPool,
}

impl CategoryRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(category)
    }

    pub async fn create(&self, req: &CreateCategoryRequest) -> Result<Category, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .fetch_one(&self.db)
        .await?;

        Ok(category)
    }

    pub async fn update(
        &self,
        id: i32,
        req: &UpdateCategoryRequest,
    ) -> Result<Category, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(category)
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
