// src/domain/draft.rs
//
// Montador de rascunho de OS: valida completude e normaliza o payload
// do formulário de criação em um `NewOrder` pronto para persistir.
// Estados implícitos: rascunho vazio -> cliente escolhido -> aparelhos
// válidos -> pronto para envio.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::pricing::parse_discount;
use crate::models::order::{ApplianceType, CreateOrderPayload, OrderStatus, Voltage};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Selecione um cliente antes de salvar a ordem.")]
    MissingCustomer,

    #[error("A ordem precisa de ao menos um aparelho com tipo preenchido.")]
    NoValidAppliance,

    #[error("Tipo de aparelho desconhecido: '{0}'.")]
    UnknownApplianceType(String),

    #[error("Valor numérico inválido: '{0}'.")]
    InvalidNumber(String),

    #[error("Data inválida: '{0}' (esperado DD/MM/AAAA).")]
    InvalidDate(String),
}

/// Ordem normalizada, ainda sem ids. Sempre nasce como NAO_INICIADO,
/// independente de qualquer outro campo de entrada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub appliances: Vec<NewAppliance>,
    pub parts: Vec<NewPart>,
    pub discount: Decimal,
    pub received_at: NaiveDate,
    pub deadline: Option<NaiveDate>,
    pub warranty: Option<String>,
    pub service_description: Option<String>,
    pub notes: Option<String>,
    pub invoice_number: Option<String>,
    pub return_guarantee: bool,
    pub fabric_guarantee: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppliance {
    pub appliance_type: ApplianceType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub voltage: Option<Voltage>,
    pub serial_number: Option<String>,
    pub customer_note: Option<String>,
    pub labor_value: Option<Decimal>,
}

/// Linha de peça aceita no envio: componente escolhido + quantidade
/// positiva. Nome e preço são snapshotados do catálogo pelo serviço.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPart {
    pub component_id: Uuid,
    pub quantity: i32,
}

/// Monta a ordem a partir do formulário. `today` entra como parâmetro
/// porque a data de recebimento ausente assume "hoje" silenciosamente
/// (ao contrário do cliente/aparelho ausentes, que são erro).
pub fn build(payload: &CreateOrderPayload, today: NaiveDate) -> Result<NewOrder, DraftError> {
    let user_id = payload.user_id.ok_or(DraftError::MissingCustomer)?;

    // Aparelhos com tipo em branco são descartados do envio, não
    // sinalizados linha a linha.
    let mut appliances = Vec::new();
    for draft in &payload.appliances {
        let kind = match ApplianceType::from_label(&draft.appliance_type) {
            None => continue,
            Some(Err(raw)) => return Err(DraftError::UnknownApplianceType(raw)),
            Some(Ok(kind)) => kind,
        };

        appliances.push(NewAppliance {
            appliance_type: kind,
            brand: clean(&draft.brand),
            model: clean(&draft.model),
            voltage: draft.voltage,
            serial_number: clean(&draft.serial_number),
            customer_note: clean(&draft.customer_note),
            labor_value: parse_money(draft.labor_value.as_deref())?,
        });
    }

    if appliances.is_empty() {
        return Err(DraftError::NoValidAppliance);
    }

    // Peças são opcionais; a linha só entra com componente + quantidade.
    let mut parts = Vec::new();
    for draft in &payload.parts {
        let (Some(component_id), Some(raw_qty)) = (draft.component_id, draft.quantity.as_deref())
        else {
            continue;
        };
        let raw_qty = raw_qty.trim();
        if raw_qty.is_empty() {
            continue;
        }
        let quantity: i32 = raw_qty
            .parse()
            .map_err(|_| DraftError::InvalidNumber(raw_qty.to_string()))?;
        if quantity <= 0 {
            continue;
        }
        parts.push(NewPart {
            component_id,
            quantity,
        });
    }

    let received_at = match payload.received_at.as_deref().map(str::trim) {
        None | Some("") => today,
        Some(raw) => parse_br_date(raw)?,
    };

    let deadline = match payload.deadline.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_br_date(raw)?),
    };

    Ok(NewOrder {
        user_id,
        status: OrderStatus::NaoIniciado,
        appliances,
        parts,
        discount: parse_discount(payload.discount.as_deref()),
        received_at,
        deadline,
        warranty: clean(&payload.warranty),
        service_description: clean(&payload.service_description),
        notes: clean(&payload.notes),
        invoice_number: clean(&payload.invoice_number),
        return_guarantee: payload.return_guarantee,
        fabric_guarantee: payload.fabric_guarantee,
    })
}

fn clean(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Valor monetário opcional: em branco fica de fora do payload do
/// aparelho (não vira zero); ilegível é erro.
fn parse_money(raw: Option<&str>) -> Result<Option<Decimal>, DraftError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.replace(',', ".")
        .parse::<Decimal>()
        .map(Some)
        .map_err(|_| DraftError::InvalidNumber(raw.to_string()))
}

fn parse_br_date(raw: &str) -> Result<NaiveDate, DraftError> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").map_err(|_| DraftError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{ApplianceDraft, PartDraft};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn base_payload() -> CreateOrderPayload {
        CreateOrderPayload {
            user_id: Some(Uuid::new_v4()),
            appliances: vec![ApplianceDraft {
                appliance_type: "Geladeira".to_string(),
                ..Default::default()
            }],
            parts: Vec::new(),
            discount: None,
            received_at: None,
            deadline: None,
            warranty: None,
            service_description: None,
            notes: None,
            invoice_number: None,
            return_guarantee: false,
            fabric_guarantee: false,
        }
    }

    #[test]
    fn rejects_missing_customer() {
        let mut payload = base_payload();
        payload.user_id = None;
        assert_eq!(build(&payload, today()), Err(DraftError::MissingCustomer));
    }

    #[test]
    fn drops_blank_type_rows_from_submission() {
        let mut payload = base_payload();
        payload.appliances = vec![
            ApplianceDraft {
                appliance_type: "Geladeira".to_string(),
                ..Default::default()
            },
            ApplianceDraft {
                appliance_type: "".to_string(),
                brand: Some("Brastemp".to_string()),
                ..Default::default()
            },
        ];

        let order = build(&payload, today()).unwrap();
        assert_eq!(order.appliances.len(), 1);
        assert_eq!(order.appliances[0].appliance_type, ApplianceType::Geladeira);
    }

    #[test]
    fn rejects_order_with_no_valid_appliance() {
        let mut payload = base_payload();
        payload.appliances = vec![ApplianceDraft {
            appliance_type: "   ".to_string(),
            brand: Some("Arno".to_string()),
            ..Default::default()
        }];
        assert_eq!(build(&payload, today()), Err(DraftError::NoValidAppliance));
    }

    #[test]
    fn missing_received_at_silently_defaults_to_today() {
        let order = build(&base_payload(), today()).unwrap();
        assert_eq!(order.received_at, today());
    }

    #[test]
    fn parses_br_formatted_dates() {
        let mut payload = base_payload();
        payload.received_at = Some("01/02/2026".to_string());
        payload.deadline = Some("15/02/2026".to_string());

        let order = build(&payload, today()).unwrap();
        assert_eq!(order.received_at, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(order.deadline, NaiveDate::from_ymd_opt(2026, 2, 15));

        payload.received_at = Some("2026-02-01".to_string());
        assert!(matches!(build(&payload, today()), Err(DraftError::InvalidDate(_))));
    }

    #[test]
    fn part_lines_need_component_and_quantity() {
        let component_id = Uuid::new_v4();
        let mut payload = base_payload();
        payload.parts = vec![
            PartDraft {
                component_id: Some(component_id),
                quantity: Some("2".to_string()),
            },
            PartDraft {
                component_id: None,
                quantity: Some("3".to_string()),
            },
            PartDraft {
                component_id: Some(Uuid::new_v4()),
                quantity: Some("".to_string()),
            },
            PartDraft {
                component_id: Some(Uuid::new_v4()),
                quantity: None,
            },
        ];

        let order = build(&payload, today()).unwrap();
        assert_eq!(order.parts, vec![NewPart { component_id, quantity: 2 }]);
    }

    #[test]
    fn labor_is_parsed_when_present_and_omitted_when_blank() {
        let mut payload = base_payload();
        payload.appliances = vec![
            ApplianceDraft {
                appliance_type: "Micro-ondas".to_string(),
                labor_value: Some("50.00".to_string()),
                ..Default::default()
            },
            ApplianceDraft {
                appliance_type: "Fogão".to_string(),
                labor_value: Some("  ".to_string()),
                ..Default::default()
            },
        ];

        let order = build(&payload, today()).unwrap();
        assert_eq!(order.appliances[0].labor_value, Some(dec("50.00")));
        assert_eq!(order.appliances[1].labor_value, None);
    }

    #[test]
    fn new_orders_always_start_not_started() {
        let order = build(&base_payload(), today()).unwrap();
        assert_eq!(order.status, OrderStatus::NaoIniciado);
    }

    #[test]
    fn blank_discount_defaults_to_zero() {
        let mut payload = base_payload();
        payload.discount = Some("".to_string());
        assert_eq!(build(&payload, today()).unwrap().discount, Decimal::ZERO);

        payload.discount = Some("15,00".to_string());
        assert_eq!(build(&payload, today()).unwrap().discount, dec("15.00"));
    }
}
