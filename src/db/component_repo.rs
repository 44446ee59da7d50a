// src/db/component_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::component::{Component, ComponentPayload},
};

#[derive(Clone)]
pub struct ComponentRepository;

impl ComponentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &ComponentPayload,
    ) -> Result<Component, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let component = sqlx::query_as::<_, Component>(
            r#"
            INSERT INTO components (name, brand, category, quantity, unit_price, supplier, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.brand)
        .bind(&payload.category)
        .bind(payload.quantity)
        .bind(payload.unit_price)
        .bind(&payload.supplier)
        .bind(&payload.description)
        .fetch_one(executor)
        .await?;

        Ok(component)
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Component>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let components = sqlx::query_as::<_, Component>("SELECT * FROM components ORDER BY name ASC")
            .fetch_all(executor)
            .await?;
        Ok(components)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Component>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let component = sqlx::query_as::<_, Component>("SELECT * FROM components WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(component)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &ComponentPayload,
    ) -> Result<Component, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let component = sqlx::query_as::<_, Component>(
            r#"
            UPDATE components SET
                name = $2,
                brand = $3,
                category = $4,
                quantity = $5,
                unit_price = $6,
                supplier = $7,
                description = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.brand)
        .bind(&payload.category)
        .bind(payload.quantity)
        .bind(payload.unit_price)
        .bind(&payload.supplier)
        .bind(&payload.description)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Peça"))?;

        Ok(component)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
