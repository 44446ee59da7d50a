// src/domain/pricing.rs
//
// Modelo de preço da OS: função pura, recalculada a cada leitura.
// Nenhum total é armazenado como fonte de verdade.

use rust_decimal::Decimal;

use crate::models::order::{ApplianceItem, PartItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub parts_total: Decimal,
    pub labor_total: Decimal,
    pub total_value: Decimal,
}

/// `parts_total = Σ(preço unitário × quantidade)` das peças não removidas;
/// `labor_total = Σ(mão de obra ou 0)` dos aparelhos;
/// `total_value = parts_total + labor_total - desconto`, travado em zero
/// (desconto maior que a soma não gera total negativo).
pub fn compute_totals(appliances: &[ApplianceItem], parts: &[PartItem], discount: Decimal) -> Totals {
    let parts_total: Decimal = parts
        .iter()
        .filter(|p| !p.removed)
        .map(|p| p.unit_price * Decimal::from(p.quantity))
        .sum();

    let labor_total: Decimal = appliances
        .iter()
        .map(|a| a.labor_value.unwrap_or(Decimal::ZERO))
        .sum();

    let total_value = (parts_total + labor_total - discount).max(Decimal::ZERO);

    Totals {
        parts_total,
        labor_total,
        total_value,
    }
}

/// Desconto vindo de formulário: em branco ou ilegível vale 0.
pub fn parse_discount(raw: Option<&str>) -> Decimal {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.replace(',', ".").parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn appliance(labor: Option<&str>) -> ApplianceItem {
        ApplianceItem {
            id: None,
            appliance_type: crate::models::order::ApplianceType::Geladeira,
            brand: None,
            model: None,
            voltage: None,
            serial_number: None,
            customer_note: None,
            labor_value: labor.map(dec),
        }
    }

    fn part(price: &str, quantity: i32, removed: bool) -> PartItem {
        PartItem {
            id: None,
            component_id: None,
            name: "peça".to_string(),
            unit_price: dec(price),
            quantity,
            removed,
        }
    }

    #[test]
    fn sums_parts_labor_and_applies_discount() {
        let appliances = vec![appliance(Some("50.00")), appliance(None)];
        let parts = vec![part("10.00", 2, false), part("5.50", 1, false)];

        let totals = compute_totals(&appliances, &parts, dec("5.50"));
        assert_eq!(totals.parts_total, dec("25.50"));
        assert_eq!(totals.labor_total, dec("50.00"));
        assert_eq!(totals.total_value, dec("70.00"));
    }

    #[test]
    fn invariant_holds_for_zero_discount() {
        let appliances = vec![appliance(Some("12.34"))];
        let parts = vec![part("3.21", 3, false)];

        let t = compute_totals(&appliances, &parts, Decimal::ZERO);
        assert_eq!(t.total_value, t.parts_total + t.labor_total);
    }

    #[test]
    fn removed_parts_do_not_count() {
        let parts = vec![part("10.00", 2, false), part("99.00", 5, true)];
        let t = compute_totals(&[], &parts, Decimal::ZERO);
        assert_eq!(t.parts_total, dec("20.00"));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let appliances = vec![appliance(Some("50.00"))];
        let parts = vec![part("10.00", 2, false)];

        let first = compute_totals(&appliances, &parts, dec("7.00"));
        let second = compute_totals(&appliances, &parts, dec("7.00"));
        assert_eq!(first, second);
    }

    #[test]
    fn oversized_discount_clamps_total_at_zero() {
        let parts = vec![part("10.00", 1, false)];
        let t = compute_totals(&[], &parts, dec("999.00"));
        assert_eq!(t.total_value, Decimal::ZERO);
    }

    #[test]
    fn blank_or_garbage_discount_defaults_to_zero() {
        assert_eq!(parse_discount(None), Decimal::ZERO);
        assert_eq!(parse_discount(Some("")), Decimal::ZERO);
        assert_eq!(parse_discount(Some("   ")), Decimal::ZERO);
        assert_eq!(parse_discount(Some("abc")), Decimal::ZERO);
        assert_eq!(parse_discount(Some("12,50")), dec("12.50"));
        assert_eq!(parse_discount(Some("12.50")), dec("12.50"));
    }
}
