// src/handlers/announcements.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::announcement::{Announcement, AnnouncementPage, AnnouncementPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

// GET /announcements
#[utoipa::path(
    get,
    path = "/announcements",
    tag = "Announcements",
    params(PageQuery),
    responses(
        (status = 200, description = "Página do mural (visitante só vê avisos públicos)", body = AnnouncementPage)
    )
)]
pub async fn list_announcements(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Rota pública: com token válido a equipe enxerga tudo; sem token
    // (ou com token ruim) vale o filtro de visitante.
    let is_staff = match bearer {
        Some(TypedHeader(Authorization(bearer))) => app_state
            .auth_service
            .validate_token(bearer.token())
            .await
            .is_ok(),
        None => false,
    };

    let page = app_state
        .announcement_service
        .list_page(&app_state.db_pool, !is_staff, query.page, query.size)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

// POST /announcements
#[utoipa::path(
    post,
    path = "/announcements",
    tag = "Announcements",
    request_body = AnnouncementPayload,
    responses(
        (status = 201, description = "Aviso publicado", body = Announcement)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_announcement(
    State(app_state): State<AppState>,
    Json(payload): Json<AnnouncementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let announcement = app_state
        .announcement_service
        .create(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

// PUT /announcements/{id}
#[utoipa::path(
    put,
    path = "/announcements/{id}",
    tag = "Announcements",
    request_body = AnnouncementPayload,
    responses(
        (status = 200, description = "Aviso atualizado", body = Announcement),
        (status = 404, description = "Aviso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_announcement(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnnouncementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let announcement = app_state
        .announcement_service
        .update(&app_state.db_pool, id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(announcement)))
}

// DELETE /announcements/{id}
#[utoipa::path(
    delete,
    path = "/announcements/{id}",
    tag = "Announcements",
    responses(
        (status = 204, description = "Aviso removido"),
        (status = 404, description = "Aviso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_announcement(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .announcement_service
        .delete(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
