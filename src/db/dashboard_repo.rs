// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::{auth::UserType, dashboard::StatusCountEntry},
};

// Estoque baixo: menos de 5 unidades em mãos.
const LOW_STOCK_THRESHOLD: i32 = 5;

#[derive(Clone)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn count_orders_by_status<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<StatusCountEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, StatusCountEntry>(
            "SELECT status, COUNT(*) AS total FROM orders GROUP BY status",
        )
        .fetch_all(executor)
        .await?;
        Ok(entries)
    }

    pub async fn count_customers<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_type = $1")
            .bind(UserType::Customer)
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    pub async fn count_low_stock_components<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM components WHERE quantity < $1")
            .bind(LOW_STOCK_THRESHOLD)
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    /// Receita das OS concluídas (finalizadas + entregues), com a mesma
    /// regra do domain::pricing: peças + mão de obra - desconto, nunca
    /// abaixo de zero por ordem.
    pub async fn finished_orders_revenue<'e, E>(&self, executor: E) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let revenue: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(sub.total), 0)
            FROM (
                SELECT GREATEST(
                    COALESCE(p.parts_total, 0) + COALESCE(a.labor_total, 0) - o.discount,
                    0
                ) AS total
                FROM orders o
                LEFT JOIN (
                    SELECT order_id, SUM(unit_price * quantity) AS parts_total
                    FROM order_parts GROUP BY order_id
                ) p ON p.order_id = o.id
                LEFT JOIN (
                    SELECT order_id, SUM(labor_value) AS labor_total
                    FROM order_appliances GROUP BY order_id
                ) a ON a.order_id = o.id
                WHERE o.status IN ('FINALIZADO', 'ENTREGUE')
            ) sub
            "#,
        )
        .fetch_one(executor)
        .await?;
        Ok(revenue)
    }
}
