// src/handlers/components.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::users::SearchQuery,
    models::component::{Component, ComponentPayload},
};

// GET /components
#[utoipa::path(
    get,
    path = "/components",
    tag = "Components",
    params(SearchQuery),
    responses(
        // Catálogo vazio responde lista vazia, nunca 204.
        (status = 200, description = "Catálogo de peças", body = Vec<Component>)
    )
)]
pub async fn list_components(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let components = app_state
        .component_service
        .list(&app_state.db_pool, query.q.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(components)))
}

// POST /components
#[utoipa::path(
    post,
    path = "/components",
    tag = "Components",
    request_body = ComponentPayload,
    responses(
        (status = 201, description = "Peça criada", body = Component),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_component(
    State(app_state): State<AppState>,
    Json(payload): Json<ComponentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let component = app_state
        .component_service
        .create(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(component)))
}

// PUT /components/{id}
#[utoipa::path(
    put,
    path = "/components/{id}",
    tag = "Components",
    request_body = ComponentPayload,
    responses(
        (status = 200, description = "Peça atualizada", body = Component),
        (status = 404, description = "Peça não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_component(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ComponentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let component = app_state
        .component_service
        .update(&app_state.db_pool, id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(component)))
}

// DELETE /components/{id}
#[utoipa::path(
    delete,
    path = "/components/{id}",
    tag = "Components",
    responses(
        (status = 204, description = "Peça removida"),
        (status = 404, description = "Peça não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_component(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .component_service
        .delete(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
