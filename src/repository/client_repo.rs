//! Client repository

use crate::models::client::{Client, CreateClientRequest, UpdateClientRequest};
use crate::repository::StoreError;
use sqlx::PgPool;

pub struct ClientRepository {
    db: PgPool,
}

impl ClientRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Client>, StoreError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        Ok(clients)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Client>, StoreError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(client)
    }

    pub async fn create(&self, req: &CreateClientRequest) -> Result<Client, StoreError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .fetch_one(&self.db)
        .await?;

        Ok(client)
    }

    pub async fn update(&self, id: i32, req: &UpdateClientRequest) -> Result<Client, StoreError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(client)
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
