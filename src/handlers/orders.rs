// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::order::{CreateOrderPayload, OrderDetail, UpdateOrderPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    /// Filtra as ordens de um cliente específico.
    pub user_id: Option<Uuid>,
}

// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Ordens com cliente embutido e totais derivados", body = Vec<OrderDetail>)
    )
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .order_service
        .list_orders(&app_state.db_pool, query.user_id)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    responses(
        (status = 200, description = "Detalhe da ordem", body = OrderDetail),
        (status = 404, description = "Ordem não encontrada")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .get_order(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(order)))
}

// POST /orders
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "OS criada como NAO_INICIADO", body = OrderDetail),
        (status = 400, description = "Rascunho incompleto (cliente ou aparelho faltando)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .create_order(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// PATCH /orders/{id}
#[utoipa::path(
    patch,
    path = "/orders/{id}",
    tag = "Orders",
    request_body = UpdateOrderPayload,
    responses(
        (status = 200, description = "Ordem atualizada", body = OrderDetail),
        (status = 404, description = "Ordem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_order(&app_state.db_pool, id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(order)))
}

// DELETE /order-items/{id}
#[utoipa::path(
    delete,
    path = "/order-items/{id}",
    tag = "Orders",
    responses(
        // Idempotente: repetir o delete após um save parcialmente
        // falho também responde 204.
        (status = 204, description = "Item removido (aparelho ou peça)")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_order_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .order_service
        .delete_order_item(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
