//! Presentation masks applied while the user types.
//!
//! Masks only reshape digits into their punctuated display form. They never
//! validate; that happens on blur.

use serde::{Deserialize, Serialize};

/// Display format applied to a field on every keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    /// `DD/MM/YYYY`
    Date,
    /// `DDD.DDD.DDD-DD`
    Cpf,
    /// `(DD) DDDDD-DDDD`
    Phone,
}

impl MaskKind {
    /// Longest string the mask can produce.
    pub fn max_len(self) -> usize {
        match self {
            MaskKind::Date => 10,
            MaskKind::Cpf => 14,
            MaskKind::Phone => 15,
        }
    }

    /// Strip non-digits from `raw` and reformat it for display.
    pub fn apply(self, raw: &str) -> String {
        let digits = digits_only(raw);
        let mut masked = match self {
            MaskKind::Date => mask_date(&digits),
            MaskKind::Cpf => mask_cpf(&digits),
            MaskKind::Phone => mask_phone(&digits),
        };
        masked.truncate(self.max_len());
        masked
    }
}

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

// All helpers below receive ASCII digits only, so byte slicing is safe.

fn mask_date(digits: &str) -> String {
    match digits.len() {
        0..=2 => digits.to_string(),
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

fn mask_cpf(digits: &str) -> String {
    match digits.len() {
        0..=3 => digits.to_string(),
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

fn mask_phone(digits: &str) -> String {
    let digits = &digits[..digits.len().min(11)];
    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({}", digits),
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("12a/3 4-5"), "12345");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn test_date_mask_progression() {
        assert_eq!(MaskKind::Date.apply(""), "");
        assert_eq!(MaskKind::Date.apply("1"), "1");
        assert_eq!(MaskKind::Date.apply("12"), "12");
        assert_eq!(MaskKind::Date.apply("123"), "12/3");
        assert_eq!(MaskKind::Date.apply("1203"), "12/03");
        assert_eq!(MaskKind::Date.apply("12031"), "12/03/1");
        assert_eq!(MaskKind::Date.apply("12031990"), "12/03/1990");
    }

    #[test]
    fn test_date_mask_truncates() {
        assert_eq!(MaskKind::Date.apply("1203199045"), "12/03/1990");
    }

    #[test]
    fn test_cpf_mask_progression() {
        assert_eq!(MaskKind::Cpf.apply("123"), "123");
        assert_eq!(MaskKind::Cpf.apply("1234"), "123.4");
        assert_eq!(MaskKind::Cpf.apply("123456"), "123.456");
        assert_eq!(MaskKind::Cpf.apply("1234567"), "123.456.7");
        assert_eq!(MaskKind::Cpf.apply("123456789"), "123.456.789");
        assert_eq!(MaskKind::Cpf.apply("1234567890"), "123.456.789-0");
        assert_eq!(MaskKind::Cpf.apply("12345678909"), "123.456.789-09");
        assert_eq!(MaskKind::Cpf.apply("1234567890999"), "123.456.789-09");
    }

    #[test]
    fn test_phone_mask_progression() {
        assert_eq!(MaskKind::Phone.apply(""), "");
        assert_eq!(MaskKind::Phone.apply("1"), "(1");
        assert_eq!(MaskKind::Phone.apply("11"), "(11");
        assert_eq!(MaskKind::Phone.apply("119"), "(11) 9");
        assert_eq!(MaskKind::Phone.apply("1198765"), "(11) 98765");
        assert_eq!(MaskKind::Phone.apply("11987654"), "(11) 98765-4");
        assert_eq!(MaskKind::Phone.apply("11987654321"), "(11) 98765-4321");
    }

    #[test]
    fn test_phone_mask_ignores_extra_digits() {
        assert_eq!(MaskKind::Phone.apply("1198765432199"), "(11) 98765-4321");
    }

    #[test]
    fn test_masks_strip_existing_punctuation() {
        assert_eq!(MaskKind::Cpf.apply("123.456.789-09"), "123.456.789-09");
        assert_eq!(MaskKind::Phone.apply("(11) 98765-4321"), "(11) 98765-4321");
        assert_eq!(MaskKind::Date.apply("01/02/2000"), "01/02/2000");
    }

    #[test]
    fn test_masks_are_idempotent() {
        let inputs = ["", "1", "12", "1234", "12345678", "123456789012345"];
        for kind in [MaskKind::Date, MaskKind::Cpf, MaskKind::Phone] {
            for input in inputs {
                let once = kind.apply(input);
                let twice = kind.apply(&once);
                assert_eq!(once, twice, "{:?} not idempotent for {:?}", kind, input);
            }
        }
    }
}
