// src/services/customer_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    domain::{cpf::validate_cpf, format::digits_only, lookup},
    models::auth::{UpdateProfilePayload, User},
};

#[derive(Clone)]
pub struct CustomerService {
    repo: UserRepository,
}

impl CustomerService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Lista de clientes, com busca aproximada opcional. A filtragem
    /// roda em memória sobre a lista completa (nome, telefone e CPF com
    /// ou sem máscara), igual ao comportamento das telas.
    pub async fn list_customers(
        &self,
        pool: &PgPool,
        query: Option<&str>,
    ) -> Result<Vec<User>, AppError> {
        let customers = self.repo.list_customers(pool).await?;

        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return Ok(customers);
        };

        let matched: Vec<Uuid> = lookup::match_customers(query, &customers)
            .into_iter()
            .map(|c| c.id)
            .collect();

        Ok(customers
            .into_iter()
            .filter(|c| matched.contains(&c.id))
            .collect())
    }

    pub async fn update_profile(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: &UpdateProfilePayload,
    ) -> Result<User, AppError> {
        let cpf_digits = match payload.cpf.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                if !validate_cpf(raw) {
                    return Err(AppError::InvalidCpf);
                }
                Some(digits_only(raw))
            }
            None => None,
        };

        self.repo
            .update_profile(pool, id, payload, cpf_digits.as_deref())
            .await
    }
}
