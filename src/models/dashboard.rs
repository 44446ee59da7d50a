// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Cards do painel gerencial.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: i64,
    pub open_orders: i64,        // não iniciadas + em andamento
    pub finished_orders: i64,    // finalizadas + entregues
    pub total_customers: i64,
    pub low_stock_components: i64,
    pub revenue: Decimal,        // peças + mão de obra - desconto das OS concluídas
}

// Contagem de ordens por status (gráfico de pizza).
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountEntry {
    pub status: crate::models::order::OrderStatus,
    pub total: Option<i64>,
}
