// src/models/component.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Peça de catálogo/estoque. Ordens de serviço referenciam (nunca possuem)
// um componente; o preço é copiado por valor para a linha da ordem.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: Uuid,
    #[schema(example = "Compressor 1/4 HP")]
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    #[schema(example = 12)]
    pub quantity: i32,
    #[schema(example = "189.90")]
    pub unit_price: Decimal,
    pub supplier: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPayload {
    #[validate(length(min = 1, message = "O nome da peça é obrigatório."))]
    pub name: String,

    pub brand: Option<String>,
    pub category: Option<String>,

    // Quantidade e preço nunca podem ser negativos.
    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    #[serde(default)]
    pub quantity: i32,

    #[serde(default)]
    pub unit_price: Decimal,

    pub supplier: Option<String>,
    pub description: Option<String>,
}
