// src/db/announcement_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::announcement::{Announcement, AnnouncementPayload},
};

#[derive(Clone)]
pub struct AnnouncementRepository;

impl AnnouncementRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &AnnouncementPayload,
    ) -> Result<Announcement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (title, content, announcement_type, visible_to_visitors)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.content)
        .bind(payload.announcement_type)
        .bind(payload.visible_to_visitors)
        .fetch_one(executor)
        .await?;

        Ok(announcement)
    }

    /// Página do mural, mais recentes primeiro. Página além do fim
    /// retorna vazio, nunca erro.
    pub async fn list_page<'e, E>(
        &self,
        executor: E,
        only_visible: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Announcement>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Announcement>(
            r#"
            SELECT * FROM announcements
            WHERE ($1 = FALSE OR visible_to_visitors = TRUE)
            ORDER BY published_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(only_visible)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn count<'e, E>(&self, executor: E, only_visible: bool) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM announcements WHERE ($1 = FALSE OR visible_to_visitors = TRUE)",
        )
        .bind(only_visible)
        .fetch_one(executor)
        .await?;
        Ok(total)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &AnnouncementPayload,
    ) -> Result<Announcement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            UPDATE announcements SET
                title = $2,
                content = $3,
                announcement_type = $4,
                visible_to_visitors = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.content)
        .bind(payload.announcement_type)
        .bind(payload.visible_to_visitors)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Aviso"))?;

        Ok(announcement)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
