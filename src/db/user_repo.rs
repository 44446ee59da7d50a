// src/db/user_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{RegisterUserPayload, UpdateProfilePayload, User, UserType},
};

#[derive(Clone)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        payload: &RegisterUserPayload,
        password_hash: &str,
        user_type: UserType,
        cpf_digits: Option<&str>,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                name, last_name, email, password_hash, user_type,
                phone, cpf, cep, address, address_number, complement,
                has_whatsapp, in_first_login
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(password_hash)
        .bind(user_type)
        .bind(&payload.phone)
        .bind(cpf_digits)
        .bind(&payload.cep)
        .bind(&payload.address)
        .bind(&payload.address_number)
        .bind(&payload.complement)
        .bind(payload.has_whatsapp)
        .bind(payload.in_first_login)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    pub async fn find_by_email<'e, E>(
        &self,
        executor: E,
        email: &str,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    /// Lista completa de clientes; a busca aproximada roda em memória
    /// (domain::lookup), igual à tela que carrega tudo uma vez.
    pub async fn list_customers<'e, E>(&self, executor: E) -> Result<Vec<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE user_type = $1 ORDER BY name ASC, last_name ASC",
        )
        .bind(UserType::Customer)
        .fetch_all(executor)
        .await?;
        Ok(customers)
    }

    pub async fn update_profile<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateProfilePayload,
        cpf_digits: Option<&str>,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = $2,
                last_name = $3,
                phone = $4,
                cpf = $5,
                cep = $6,
                address = $7,
                address_number = $8,
                complement = $9,
                has_whatsapp = $10,
                in_first_login = FALSE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.last_name)
        .bind(&payload.phone)
        .bind(cpf_digits)
        .bind(&payload.cep)
        .bind(&payload.address)
        .bind(&payload.address_number)
        .bind(&payload.complement)
        .bind(payload.has_whatsapp)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }
}
