// src/models/order.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::auth::User;

// --- ENUMS ---

/// Status canônico da OS. O vocabulário legado em inglês
/// (PENDING/IN_ANALYSIS/COMPLETED/DELIVERED) é aceito na entrada via
/// `alias`; a resposta sai sempre na forma canônica. A tabela de
/// rótulos/cores fica em `domain::status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[serde(alias = "PENDING")]
    NaoIniciado,
    #[serde(alias = "IN_ANALYSIS")]
    EmAndamento,
    #[serde(alias = "COMPLETED")]
    Finalizado,
    #[serde(alias = "DELIVERED")]
    Entregue,
    Cancelado,
}

/// Vocabulário fechado de aparelhos. Fonte única de verdade: criação,
/// edição e exibição usam este enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appliance_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplianceType {
    #[serde(alias = "Geladeira")]
    Geladeira,
    #[serde(alias = "Micro-ondas")]
    MicroOndas,
    #[serde(alias = "Cafeteira")]
    Cafeteira,
    #[serde(alias = "Liquidificador")]
    Liquidificador,
    #[serde(alias = "Ferro de Passar")]
    FerroDePassar,
    #[serde(alias = "Ar Condicionado")]
    ArCondicionado,
    #[serde(alias = "Máquina de Lavar")]
    MaquinaDeLavar,
    #[serde(alias = "Fogão")]
    Fogao,
    #[serde(alias = "Ventilador")]
    Ventilador,
    #[serde(alias = "Outro")]
    Outro,
}

impl ApplianceType {
    pub const ALL: [ApplianceType; 10] = [
        ApplianceType::Geladeira,
        ApplianceType::MicroOndas,
        ApplianceType::Cafeteira,
        ApplianceType::Liquidificador,
        ApplianceType::FerroDePassar,
        ApplianceType::ArCondicionado,
        ApplianceType::MaquinaDeLavar,
        ApplianceType::Fogao,
        ApplianceType::Ventilador,
        ApplianceType::Outro,
    ];

    /// Rótulo de exibição em português.
    pub fn label(&self) -> &'static str {
        match self {
            ApplianceType::Geladeira => "Geladeira",
            ApplianceType::MicroOndas => "Micro-ondas",
            ApplianceType::Cafeteira => "Cafeteira",
            ApplianceType::Liquidificador => "Liquidificador",
            ApplianceType::FerroDePassar => "Ferro de Passar",
            ApplianceType::ArCondicionado => "Ar Condicionado",
            ApplianceType::MaquinaDeLavar => "Máquina de Lavar",
            ApplianceType::Fogao => "Fogão",
            ApplianceType::Ventilador => "Ventilador",
            ApplianceType::Outro => "Outro",
        }
    }

    /// Interpreta o texto vindo do formulário: aceita o rótulo de
    /// exibição ou o nome canônico, sem diferenciar maiúsculas.
    /// Retorna None para texto em branco (linha descartada no envio).
    pub fn from_label(raw: &str) -> Option<Result<ApplianceType, String>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();
        for kind in ApplianceType::ALL {
            if kind.label().to_lowercase() == lowered || kind.canonical_name().to_lowercase() == lowered {
                return Some(Ok(kind));
            }
        }
        Some(Err(trimmed.to_string()))
    }

    fn canonical_name(&self) -> &'static str {
        match self {
            ApplianceType::Geladeira => "GELADEIRA",
            ApplianceType::MicroOndas => "MICRO_ONDAS",
            ApplianceType::Cafeteira => "CAFETEIRA",
            ApplianceType::Liquidificador => "LIQUIDIFICADOR",
            ApplianceType::FerroDePassar => "FERRO_DE_PASSAR",
            ApplianceType::ArCondicionado => "AR_CONDICIONADO",
            ApplianceType::MaquinaDeLavar => "MAQUINA_DE_LAVAR",
            ApplianceType::Fogao => "FOGAO",
            ApplianceType::Ventilador => "VENTILADOR",
            ApplianceType::Outro => "OUTRO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "voltage")]
pub enum Voltage {
    #[serde(rename = "127V")]
    #[sqlx(rename = "V127")]
    V127,
    #[serde(rename = "220V")]
    #[sqlx(rename = "V220")]
    V220,
    #[serde(rename = "Bivolt")]
    #[sqlx(rename = "BIVOLT")]
    Bivolt,
}

// --- REGISTROS PERSISTIDOS ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub received_at: NaiveDate,
    pub deadline: Option<NaiveDate>,
    #[schema(example = "90 dias")]
    pub warranty: Option<String>,
    #[schema(example = "10.00")]
    pub discount: Decimal,
    pub notes: Option<String>,
    pub service_description: Option<String>,
    pub invoice_number: Option<String>,
    pub return_guarantee: bool,
    pub fabric_guarantee: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderAppliance {
    pub id: Uuid,
    pub order_id: Uuid,
    pub appliance_type: ApplianceType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub voltage: Option<Voltage>,
    pub serial_number: Option<String>,
    pub customer_note: Option<String>,
    #[schema(example = "50.00")]
    pub labor_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl OrderAppliance {
    pub fn to_item(&self) -> ApplianceItem {
        ApplianceItem {
            id: Some(self.id),
            appliance_type: self.appliance_type,
            brand: self.brand.clone(),
            model: self.model.clone(),
            voltage: self.voltage,
            serial_number: self.serial_number.clone(),
            customer_note: self.customer_note.clone(),
            labor_value: self.labor_value,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPart {
    pub id: Uuid,
    pub order_id: Uuid,
    pub component_id: Option<Uuid>,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl OrderPart {
    pub fn to_item(&self) -> PartItem {
        PartItem {
            id: Some(self.id),
            component_id: self.component_id,
            name: self.name.clone(),
            unit_price: self.unit_price,
            quantity: self.quantity,
            removed: false,
        }
    }
}

// --- ITENS EM EDIÇÃO (o "rascunho" de uma linha) ---

/// Aparelho como circula na sessão de edição e no payload de PATCH.
/// `id == None` significa item ainda não persistido.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceItem {
    pub id: Option<Uuid>,
    pub appliance_type: ApplianceType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub voltage: Option<Voltage>,
    pub serial_number: Option<String>,
    pub customer_note: Option<String>,
    pub labor_value: Option<Decimal>,
}

/// Peça na sessão de edição. A remoção é marcada no lugar (quantidade
/// zerada + flag) em vez de tirar a linha do vetor, para a tela manter
/// os índices estáveis até o salvamento.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartItem {
    pub id: Option<Uuid>,
    pub component_id: Option<Uuid>,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,

    #[serde(skip)]
    #[schema(ignore)]
    pub removed: bool,
}

// --- PAYLOADS ---

/// Linha de aparelho como chega do formulário de criação: o tipo vem
/// como texto livre (pode estar em branco) e os valores monetários como
/// texto, interpretados na fronteira pelo `domain::draft`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceDraft {
    #[serde(default, rename = "type")]
    #[schema(example = "Micro-ondas")]
    pub appliance_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub voltage: Option<Voltage>,
    #[serde(alias = "serial")]
    pub serial_number: Option<String>,
    pub customer_note: Option<String>,
    #[schema(example = "50.00")]
    pub labor_value: Option<String>,
}

/// Linha de peça do formulário de criação. Só entra no payload final se
/// tiver componente selecionado e quantidade preenchida.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartDraft {
    #[serde(alias = "id")]
    pub component_id: Option<Uuid>,
    #[schema(example = "2")]
    pub quantity: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub user_id: Option<Uuid>,

    #[serde(default)]
    pub appliances: Vec<ApplianceDraft>,
    #[serde(default)]
    pub parts: Vec<PartDraft>,

    pub discount: Option<String>,
    #[schema(example = "25/08/2026")]
    pub received_at: Option<String>,
    pub deadline: Option<String>,
    pub warranty: Option<String>,
    pub service_description: Option<String>,
    pub notes: Option<String>,
    #[serde(alias = "nf")]
    pub invoice_number: Option<String>,

    #[serde(default)]
    pub return_guarantee: bool,
    #[serde(default)]
    pub fabric_guarantee: bool,
}

/// Corpo do PATCH /orders/{id}: campos escalares + itens sobreviventes
/// da sessão de edição, cada um com id quando já persistido.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    pub status: OrderStatus,
    pub service_description: Option<String>,
    #[serde(default)]
    pub appliances: Vec<ApplianceItem>,
    #[serde(default)]
    pub parts: Vec<PartItem>,
}

// --- RESPOSTA COMPLETA ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: Order,
    pub user: User,
    pub appliances: Vec<OrderAppliance>,
    pub parts: Vec<OrderPart>,

    // Totais derivados (domain::pricing); nunca armazenados.
    #[schema(example = "20.00")]
    pub parts_total: Decimal,
    #[schema(example = "50.00")]
    pub labor_total: Decimal,
    #[schema(example = "70.00")]
    pub total_value: Decimal,
}
