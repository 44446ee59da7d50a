// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    domain::{cpf::validate_cpf, format::digits_only},
    models::auth::{Claims, RegisterUserPayload, User, UserType},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self {
            user_repo,
            jwt_secret,
            pool,
        }
    }

    /// Cadastro de cliente (auto-registro ou feito pelo admin no balcão).
    /// Devolve token + perfil para o cliente já sair logado.
    pub async fn register_user(
        &self,
        payload: &RegisterUserPayload,
    ) -> Result<(String, User), AppError> {
        // CPF é opcional, mas quando presente precisa passar no módulo-11.
        let cpf_digits = match payload.cpf.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                if !validate_cpf(raw) {
                    return Err(AppError::InvalidCpf);
                }
                Some(digits_only(raw))
            }
            None => None,
        };

        // Hashing fora do executor async, como manda o bcrypt.
        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user_type = payload.user_type.unwrap_or(UserType::Customer);

        let user = self
            .user_repo
            .create_user(
                &self.pool,
                payload,
                &hashed_password,
                user_type,
                cpf_digits.as_deref(),
            )
            .await?;

        tracing::info!("✅ Novo usuário cadastrado: {}", user.email);

        let token = self.create_token(user.id)?;
        Ok((token, user))
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let user = self
            .user_repo
            .find_by_email(&self.pool, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id)?;
        Ok((token, user))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(&self.pool, token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
