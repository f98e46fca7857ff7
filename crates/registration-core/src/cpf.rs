//! CPF (Brazilian national ID) check-digit verification.

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Check whether `digits` is an 11-digit CPF with correct check digits.
///
/// Sequences made of a single repeated digit pass the arithmetic but are
/// never issued, so they are rejected up front.
pub fn is_valid(digits: &str) -> bool {
    let Some(d) = parse_digits(digits) else {
        return false;
    };

    if d.iter().all(|&x| x == d[0]) {
        return false;
    }

    check_digit(&d[..9]) == d[9] && check_digit(&d[..10]) == d[10]
}

/// Compute both check digits for a 9-digit CPF body.
pub fn check_digits(body: &[u8; 9]) -> (u8, u8) {
    let first = check_digit(body);
    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(body);
    extended[9] = first;
    (first, check_digit(&extended))
}

/// Weighted mod-11 digit over `digits`, weights descending to 2.
fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(&d, w)| u32::from(d) * w)
        .sum();

    match 11 - sum % 11 {
        10 | 11 => 0,
        r => r as u8,
    }
}

fn parse_digits(s: &str) -> Option<[u8; CPF_LEN]> {
    let bytes = s.as_bytes();
    if bytes.len() != CPF_LEN {
        return None;
    }

    let mut out = [0u8; CPF_LEN];
    for (slot, &b) in out.iter_mut().zip(bytes) {
        if !b.is_ascii_digit() {
            return None;
        }
        *slot = b - b'0';
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(body: &str) -> String {
        let mut b = [0u8; 9];
        for (slot, c) in b.iter_mut().zip(body.bytes()) {
            *slot = c - b'0';
        }
        let (d1, d2) = check_digits(&b);
        format!("{}{}{}", body, d1, d2)
    }

    #[test]
    fn test_known_valid_cpfs() {
        for cpf in ["52998224725", "11144477735", "12345678909", "93541134780", "39053344705"] {
            assert!(is_valid(cpf), "expected {} to be valid", cpf);
        }
    }

    #[test]
    fn test_generated_cpfs_validate() {
        for body in ["529982247", "111444777", "000000001", "987654321", "100200300"] {
            let cpf = build(body);
            assert!(is_valid(&cpf), "generated {} should validate", cpf);
        }
    }

    #[test]
    fn test_repeated_digits_rejected() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!is_valid(&cpf), "{} should be rejected", cpf);
        }
    }

    #[test]
    fn test_wrong_length_or_non_digits_rejected() {
        assert!(!is_valid(""));
        assert!(!is_valid("5299822472"));
        assert!(!is_valid("529982247250"));
        assert!(!is_valid("529.982.247-25"));
        assert!(!is_valid("5299822472a"));
    }

    #[test]
    fn test_wrong_check_digits_rejected() {
        assert!(!is_valid("52998224724"));
        assert!(!is_valid("52998224735"));
    }

    #[test]
    fn test_single_digit_mutation_invalidates() {
        // None of these has a single-digit mutation that stays valid.
        for cpf in ["52998224725", "11144477735", "93541134780", "00000000191"] {
            for pos in 0..CPF_LEN {
                for replacement in b'0'..=b'9' {
                    let mut bytes = cpf.as_bytes().to_vec();
                    if bytes[pos] == replacement {
                        continue;
                    }
                    bytes[pos] = replacement;
                    let mutated = String::from_utf8(bytes).unwrap();
                    assert!(!is_valid(&mutated), "{} should be invalid", mutated);
                }
            }
        }
    }

    #[test]
    fn test_known_mutation_collisions() {
        // Weight collisions in the mod-11 rule: changing the first digit of
        // these keeps both check digits intact.
        assert!(is_valid("12345678909"));
        assert!(is_valid("22345678909"));
        assert!(is_valid("39053344705"));
        assert!(is_valid("49053344705"));
    }
}
