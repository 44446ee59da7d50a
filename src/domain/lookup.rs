// src/domain/lookup.rs
//
// Busca aproximada usada na criação de OS e na gestão de clientes.
// Opera sobre a lista completa já carregada; a ordem dos resultados é a
// ordem da lista de origem.

use crate::domain::format::{digits_only, format_cpf};
use crate::models::auth::User;
use crate::models::component::Component;

/// Clientes: substring sem diferenciar maiúsculas no nome completo, e
/// comparação só-dígitos contra telefone e CPF (funciona com ou sem
/// máscara dos dois lados).
pub fn match_customers<'a>(query: &str, customers: &'a [User]) -> Vec<&'a User> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let lowered = trimmed.to_lowercase();
    let query_digits = digits_only(trimmed);

    customers
        .iter()
        .filter(|c| {
            if c.full_name().to_lowercase().contains(&lowered) {
                return true;
            }
            if query_digits.is_empty() {
                return false;
            }
            let phone_match = c
                .phone
                .as_deref()
                .map(|p| digits_only(p).contains(&query_digits))
                .unwrap_or(false);
            let cpf_match = c
                .cpf
                .as_deref()
                .map(|d| digits_only(d).contains(&query_digits))
                .unwrap_or(false);
            phone_match || cpf_match
        })
        .collect()
}

/// Texto que substitui o campo de busca quando uma sugestão é escolhida.
pub fn customer_suggestion_label(customer: &User) -> String {
    match customer.cpf.as_deref() {
        Some(cpf) if !cpf.is_empty() => {
            format!("{} - CPF: {}", customer.full_name(), format_cpf(cpf))
        }
        _ => customer.full_name(),
    }
}

/// Componentes: substring no nome, na descrição e no código (id).
pub fn match_components<'a>(query: &str, components: &'a [Component]) -> Vec<&'a Component> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let lowered = trimmed.to_lowercase();

    components
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&lowered)
                || c.description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&lowered))
                    .unwrap_or(false)
                || c.id.to_string().to_lowercase().contains(&lowered)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::auth::UserType;

    fn customer(name: &str, last_name: &str, phone: Option<&str>, cpf: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            last_name: last_name.to_string(),
            email: format!("{}@email.com", name.to_lowercase()),
            password_hash: String::new(),
            user_type: UserType::Customer,
            phone: phone.map(String::from),
            cpf: cpf.map(String::from),
            cep: None,
            address: None,
            address_number: None,
            complement: None,
            has_whatsapp: false,
            in_first_login: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn component(name: &str, description: Option<&str>) -> Component {
        Component {
            id: Uuid::new_v4(),
            name: name.to_string(),
            brand: None,
            category: None,
            quantity: 1,
            unit_price: Decimal::ZERO,
            supplier: None,
            description: description.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn matches_full_name_case_insensitive() {
        let list = vec![
            customer("Maria", "da Silva", None, None),
            customer("João", "Souza", None, None),
        ];
        let found = match_customers("maria da s", &list);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Maria");
    }

    #[test]
    fn matches_masked_and_unmasked_digits() {
        let list = vec![customer(
            "Maria",
            "da Silva",
            Some("(11) 98765-4321"),
            Some("111.444.777-35"),
        )];

        assert_eq!(match_customers("11987", &list).len(), 1);
        assert_eq!(match_customers("(11) 9876", &list).len(), 1);
        assert_eq!(match_customers("11144477735", &list).len(), 1);
        assert_eq!(match_customers("444.777", &list).len(), 1);
        assert_eq!(match_customers("999", &list).len(), 0);
    }

    #[test]
    fn blank_query_yields_nothing() {
        let list = vec![customer("Maria", "da Silva", None, None)];
        assert!(match_customers("", &list).is_empty());
        assert!(match_customers("   ", &list).is_empty());
    }

    #[test]
    fn suggestion_label_includes_formatted_cpf_when_present() {
        let with_cpf = customer("Maria", "da Silva", None, Some("11144477735"));
        assert_eq!(
            customer_suggestion_label(&with_cpf),
            "Maria da Silva - CPF: 111.444.777-35"
        );

        let without = customer("João", "Souza", None, None);
        assert_eq!(customer_suggestion_label(&without), "João Souza");
    }

    #[test]
    fn matches_component_name_description_and_code() {
        let list = vec![
            component("Compressor 1/4 HP", Some("para geladeira")),
            component("Resistência", None),
        ];

        assert_eq!(match_components("compressor", &list).len(), 1);
        assert_eq!(match_components("GELADEIRA", &list).len(), 1);

        let code = list[1].id.to_string();
        let by_code = match_components(&code[..8], &list);
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].name, "Resistência");
    }
}
