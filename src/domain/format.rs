// src/domain/format.rs
//
// Máscaras brasileiras (CPF, telefone, CEP) e formatação monetária.
// Tudo aqui é apresentação sobre valores já armazenados; nada altera
// o dado persistido.

use rust_decimal::Decimal;

/// Mantém apenas os dígitos, para comparação e armazenamento normalizado.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `12345678901` -> `123.456.789-01`. Entradas fora do padrão voltam como vieram.
pub fn format_cpf(raw: &str) -> String {
    let d = digits_only(raw);
    if d.len() != 11 {
        return raw.to_string();
    }
    format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..])
}

/// Telefone fixo (10 dígitos) ou celular (11 dígitos) com DDD.
pub fn format_phone(raw: &str) -> String {
    let d = digits_only(raw);
    match d.len() {
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        _ => raw.to_string(),
    }
}

/// `01310100` -> `01310-100`.
pub fn format_cep(raw: &str) -> String {
    let d = digits_only(raw);
    if d.len() != 8 {
        return raw.to_string();
    }
    format!("{}-{}", &d[..5], &d[5..])
}

/// Formata como `R$ 1.234,56`: vírgula decimal, ponto de milhar,
/// sempre duas casas.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let abs = rounded.abs();

    let text = format!("{:.2}", abs);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, int_grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn masks_cpf_and_leaves_odd_input_alone() {
        assert_eq!(format_cpf("11144477735"), "111.444.777-35");
        assert_eq!(format_cpf("111.444.777-35"), "111.444.777-35");
        assert_eq!(format_cpf("123"), "123");
    }

    #[test]
    fn masks_landline_and_mobile() {
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("55"), "55");
    }

    #[test]
    fn masks_cep() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("01310-100"), "01310-100");
    }

    #[test]
    fn formats_currency_with_comma_and_thousands_dot() {
        assert_eq!(format_currency(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_currency(dec("70")), "R$ 70,00");
        assert_eq!(format_currency(dec("1234.5")), "R$ 1.234,50");
        assert_eq!(format_currency(dec("1234567.89")), "R$ 1.234.567,89");
        assert_eq!(format_currency(dec("-12.3")), "-R$ 12,30");
    }

    #[test]
    fn strips_non_digits() {
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
        assert_eq!(digits_only("abc"), "");
    }
}
