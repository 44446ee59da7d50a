// src/services/dashboard_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{dashboard::DashboardSummary, order::OrderStatus},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self, pool: &PgPool) -> Result<DashboardSummary, AppError> {
        let by_status = self.repo.count_orders_by_status(pool).await?;

        let mut total_orders = 0;
        let mut open_orders = 0;
        let mut finished_orders = 0;
        for entry in &by_status {
            let count = entry.total.unwrap_or(0);
            total_orders += count;
            match entry.status {
                OrderStatus::NaoIniciado | OrderStatus::EmAndamento => open_orders += count,
                OrderStatus::Finalizado | OrderStatus::Entregue => finished_orders += count,
                OrderStatus::Cancelado => {}
            }
        }

        Ok(DashboardSummary {
            total_orders,
            open_orders,
            finished_orders,
            total_customers: self.repo.count_customers(pool).await?,
            low_stock_components: self.repo.count_low_stock_components(pool).await?,
            revenue: self.repo.finished_orders_revenue(pool).await?,
        })
    }
}
