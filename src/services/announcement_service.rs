// src/services/announcement_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AnnouncementRepository,
    models::announcement::{Announcement, AnnouncementPage, AnnouncementPayload},
};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct AnnouncementService {
    repo: AnnouncementRepository,
}

impl AnnouncementService {
    pub fn new(repo: AnnouncementRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        pool: &PgPool,
        payload: &AnnouncementPayload,
    ) -> Result<Announcement, AppError> {
        self.repo.create(pool, payload).await
    }

    /// Listagem paginada do mural. Visitante anônimo só vê os avisos
    /// marcados como públicos; página além do fim volta vazia.
    pub async fn list_page(
        &self,
        pool: &PgPool,
        only_visible: bool,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<AnnouncementPage, AppError> {
        let page = page.unwrap_or(0).max(0);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        let total_elements = self.repo.count(pool, only_visible).await?;
        let content = self
            .repo
            .list_page(pool, only_visible, size, page * size)
            .await?;

        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };

        Ok(AnnouncementPage {
            content,
            page,
            size,
            total_elements,
            total_pages,
        })
    }

    pub async fn update(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: &AnnouncementPayload,
    ) -> Result<Announcement, AppError> {
        self.repo.update(pool, id, payload).await
    }

    pub async fn delete(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Aviso"));
        }
        Ok(())
    }
}
