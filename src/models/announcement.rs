// src/models/announcement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "announcement_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementType {
    Promotions,
    Holiday,
    Warnings,
    Recommendations,
    Updates,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub announcement_type: AnnouncementType,
    pub visible_to_visitors: bool,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    #[schema(example = "Promoção de limpeza de ar condicionado")]
    pub title: String,

    #[validate(length(min = 1, message = "O conteúdo é obrigatório."))]
    pub content: String,

    #[serde(rename = "type")]
    pub announcement_type: AnnouncementType,

    #[serde(default = "default_visible")]
    pub visible_to_visitors: bool,
}

fn default_visible() -> bool {
    true
}

/// Listagem pública paginada do mural.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPage {
    pub content: Vec<Announcement>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}
