// src/handlers/users.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{UpdateProfilePayload, User, UserType},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Texto de busca: nome, CPF ou telefone (com ou sem máscara).
    pub q: Option<String>,
}

// GET /users/customers
#[utoipa::path(
    get,
    path = "/users/customers",
    tag = "Users",
    params(SearchQuery),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<User>)
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .customer_service
        .list_customers(&app_state.db_pool, query.q.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(customers)))
}

// PUT /users/{id}
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = User),
        (status = 403, description = "Sem permissão"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    AuthenticatedUser(auth_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Cliente só edita o próprio perfil; admin edita qualquer um.
    if auth_user.id != id && auth_user.user_type != UserType::Admin {
        return Err(AppError::Forbidden);
    }

    let user = app_state
        .customer_service
        .update_profile(&app_state.db_pool, id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
