// src/domain/cpf.rs

/// Validação de CPF pelo checksum módulo-11 em duas passadas.
/// Aceita o número com ou sem máscara; sequências de 11 dígitos
/// idênticos são inválidas por definição.
pub fn validate_cpf(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }

    // 111.111.111-11 e afins passam no checksum, mas não são CPFs.
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Uma passada do módulo-11: pesos decrescentes a partir de len+1.
fn check_digit(digits: &[u32]) -> u32 {
    let len = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (len + 1 - i as u32))
        .sum();

    let rest = (sum * 10) % 11;
    if rest == 10 { 0 } else { rest }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_valid_cpfs() {
        assert!(validate_cpf("111.444.777-35"));
        assert!(validate_cpf("11144477735"));
        assert!(validate_cpf("529.982.247-25"));
    }

    #[test]
    fn rejects_incremented_check_digit() {
        // Fixture válida com o último dígito somado em 1.
        assert!(validate_cpf("111.444.777-35"));
        assert!(!validate_cpf("111.444.777-36"));
    }

    #[test]
    fn rejects_all_identical_digits() {
        assert!(!validate_cpf("000.000.000-00"));
        assert!(!validate_cpf("11111111111"));
        assert!(!validate_cpf("99999999999"));
    }

    #[test]
    fn rejects_wrong_length_and_garbage() {
        assert!(!validate_cpf(""));
        assert!(!validate_cpf("123"));
        assert!(!validate_cpf("123456789012"));
        assert!(!validate_cpf("abc.def.ghi-jk"));
    }
}
