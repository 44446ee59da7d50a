// src/services/component_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ComponentRepository,
    domain::lookup,
    models::component::{Component, ComponentPayload},
};

#[derive(Clone)]
pub struct ComponentService {
    repo: ComponentRepository,
}

impl ComponentService {
    pub fn new(repo: ComponentRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        pool: &PgPool,
        payload: &ComponentPayload,
    ) -> Result<Component, AppError> {
        self.guard_non_negative(payload)?;
        self.repo.create(pool, payload).await
    }

    /// Catálogo completo; com `query`, aplica a busca aproximada do
    /// domain::lookup (nome, descrição e código).
    pub async fn list(
        &self,
        pool: &PgPool,
        query: Option<&str>,
    ) -> Result<Vec<Component>, AppError> {
        let components = self.repo.list(pool).await?;

        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return Ok(components);
        };

        let matched: Vec<Uuid> = lookup::match_components(query, &components)
            .into_iter()
            .map(|c| c.id)
            .collect();

        Ok(components
            .into_iter()
            .filter(|c| matched.contains(&c.id))
            .collect())
    }

    pub async fn update(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: &ComponentPayload,
    ) -> Result<Component, AppError> {
        self.guard_non_negative(payload)?;
        self.repo.update(pool, id, payload).await
    }

    pub async fn delete(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Peça"));
        }
        Ok(())
    }

    // O CHECK do banco também barra, mas aqui a falha vira mensagem de
    // validação em vez de erro 500.
    fn guard_non_negative(&self, payload: &ComponentPayload) -> Result<(), AppError> {
        if payload.quantity < 0 || payload.unit_price < Decimal::ZERO {
            let mut errors = validator::ValidationErrors::new();
            let mut err = validator::ValidationError::new("range");
            err.message = Some("Quantidade e preço não podem ser negativos.".into());
            errors.add("unitPrice", err);
            return Err(AppError::ValidationError(errors));
        }
        Ok(())
    }
}
