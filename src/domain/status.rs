// src/domain/status.rs
//
// Máquina de estados da OS. O conjunto de estados é fechado, mas não há
// grafo de transição: qualquer status pode ser definido a partir de
// qualquer outro, porque na prática a oficina retrabalha ordens.
// Aqui ficam o rótulo de exibição, a cor do badge e o mapeamento
// bidirecional com o vocabulário legado em inglês.

use crate::models::order::OrderStatus;

/// Rótulo + cor usados de forma uniforme em listas, painéis e seletores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub label: &'static str,
    pub color: &'static str,
}

/// Tabela estática de exibição; não é computada.
pub fn display(status: OrderStatus) -> StatusDisplay {
    match status {
        OrderStatus::NaoIniciado => StatusDisplay { label: "Não iniciado", color: "#FbbF24" },
        OrderStatus::EmAndamento => StatusDisplay { label: "Em andamento", color: "#60A5FA" },
        OrderStatus::Finalizado => StatusDisplay { label: "Finalizado", color: "#34D399" },
        OrderStatus::Entregue => StatusDisplay { label: "Entregue", color: "#A78BFA" },
        OrderStatus::Cancelado => StatusDisplay { label: "Cancelado", color: "#F87171" },
    }
}

/// Vocabulário legado -> canônico. `CANCELADO` não tem equivalente
/// no conjunto em inglês observado.
pub fn from_legacy(raw: &str) -> Option<OrderStatus> {
    match raw {
        "PENDING" => Some(OrderStatus::NaoIniciado),
        "IN_ANALYSIS" => Some(OrderStatus::EmAndamento),
        "COMPLETED" => Some(OrderStatus::Finalizado),
        "DELIVERED" => Some(OrderStatus::Entregue),
        _ => None,
    }
}

/// Canônico -> legado, onde existir correspondência.
pub fn to_legacy(status: OrderStatus) -> Option<&'static str> {
    match status {
        OrderStatus::NaoIniciado => Some("PENDING"),
        OrderStatus::EmAndamento => Some("IN_ANALYSIS"),
        OrderStatus::Finalizado => Some("COMPLETED"),
        OrderStatus::Entregue => Some("DELIVERED"),
        OrderStatus::Cancelado => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::NaoIniciado,
        OrderStatus::EmAndamento,
        OrderStatus::Finalizado,
        OrderStatus::Entregue,
        OrderStatus::Cancelado,
    ];

    #[test]
    fn every_status_has_label_and_color() {
        for status in ALL {
            let d = display(status);
            assert!(!d.label.is_empty());
            assert!(d.color.starts_with('#'));
        }
    }

    #[test]
    fn legacy_mapping_round_trips() {
        for status in ALL {
            if let Some(legacy) = to_legacy(status) {
                assert_eq!(from_legacy(legacy), Some(status));
            }
        }
        assert_eq!(from_legacy("PENDING"), Some(OrderStatus::NaoIniciado));
        assert_eq!(from_legacy("DELIVERED"), Some(OrderStatus::Entregue));
        assert_eq!(from_legacy("qualquer coisa"), None);
        assert_eq!(to_legacy(OrderStatus::Cancelado), None);
    }

    #[test]
    fn serde_accepts_both_vocabularies() {
        let canonical: OrderStatus = serde_json::from_str("\"NAO_INICIADO\"").unwrap();
        let legacy: OrderStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(canonical, legacy);

        // A resposta sai sempre na forma canônica.
        assert_eq!(serde_json::to_string(&legacy).unwrap(), "\"NAO_INICIADO\"");
    }
}
