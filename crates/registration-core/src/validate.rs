//! Per-field validation rules run when a field loses focus.

use crate::cpf;
use crate::error::FieldError;
use crate::mask::digits_only;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Number of digits in a CEP (postal code).
pub const CEP_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid date regex"));

pub fn email(value: &str) -> Result<(), FieldError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

pub fn password(value: &str) -> Result<(), FieldError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

pub fn password_confirmation(value: &str, password: &str) -> Result<(), FieldError> {
    if value != password {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}

/// Parse a masked `DD/MM/YYYY` birth date and reject dates after `today`.
pub fn birth_date(value: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let caps = DATE_RE.captures(value).ok_or(FieldError::DateFormat)?;

    // The regex guarantees fixed-width digit groups.
    let day: u32 = caps[1].parse().map_err(|_| FieldError::DateFormat)?;
    let month: u32 = caps[2].parse().map_err(|_| FieldError::DateFormat)?;
    let year: i32 = caps[3].parse().map_err(|_| FieldError::DateFormat)?;

    // Years below 100 are not accepted as written.
    if year < 100 {
        return Err(FieldError::InvalidDate);
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(FieldError::InvalidDate)?;

    if date > today {
        return Err(FieldError::FutureDate);
    }
    Ok(date)
}

/// Validate a (possibly masked) CPF, returning its bare digits.
pub fn cpf(value: &str) -> Result<String, FieldError> {
    let digits = digits_only(value);
    if digits.len() != cpf::CPF_LEN || !cpf::is_valid(&digits) {
        return Err(FieldError::InvalidCpf);
    }
    Ok(digits)
}

/// Validate a (possibly punctuated) CEP, returning its bare digits.
pub fn cep(value: &str) -> Result<String, FieldError> {
    let digits = digits_only(value);
    if digits.len() != CEP_LEN {
        return Err(FieldError::InvalidCep);
    }
    Ok(digits)
}

pub fn required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_email_accepts_simple_addresses() {
        assert!(email("user@example.com").is_ok());
        assert!(email("first.last+tag@mail.example.com.br").is_ok());
    }

    #[test]
    fn test_email_rejects_bad_shapes() {
        for bad in [
            "",
            "user",
            "user@",
            "@example.com",
            "user@example",
            "us er@example.com",
            "a@b@c.com",
        ] {
            assert_eq!(email(bad), Err(FieldError::InvalidEmail), "{:?}", bad);
        }
    }

    #[test]
    fn test_password_length() {
        assert_eq!(password("12345"), Err(FieldError::PasswordTooShort(6)));
        assert!(password("123456").is_ok());
        // Six characters, more than six bytes.
        assert!(password("ééééé1").is_ok());
    }

    #[test]
    fn test_password_confirmation() {
        assert!(password_confirmation("secret1", "secret1").is_ok());
        assert_eq!(
            password_confirmation("secret1", "secret2"),
            Err(FieldError::PasswordMismatch)
        );
    }

    #[test]
    fn test_birth_date_leap_years() {
        assert!(birth_date("29/02/2024", today()).is_ok());
        assert_eq!(birth_date("29/02/2023", today()), Err(FieldError::InvalidDate));
        assert_eq!(birth_date("31/04/2020", today()), Err(FieldError::InvalidDate));
    }

    #[test]
    fn test_birth_date_rejects_future() {
        assert!(birth_date("15/06/2025", today()).is_ok());
        assert_eq!(birth_date("16/06/2025", today()), Err(FieldError::FutureDate));
    }

    #[test]
    fn test_birth_date_format() {
        assert_eq!(birth_date("1/2/2000", today()), Err(FieldError::DateFormat));
        assert_eq!(birth_date("01/02/200", today()), Err(FieldError::DateFormat));
        assert_eq!(birth_date("01022000", today()), Err(FieldError::DateFormat));
        assert_eq!(birth_date("00/01/2000", today()), Err(FieldError::InvalidDate));
        assert_eq!(birth_date("10/13/2000", today()), Err(FieldError::InvalidDate));
    }

    #[test]
    fn test_birth_date_rejects_two_digit_years() {
        assert_eq!(birth_date("01/01/0000", today()), Err(FieldError::InvalidDate));
        assert_eq!(birth_date("15/06/0050", today()), Err(FieldError::InvalidDate));
        assert_eq!(birth_date("31/12/0099", today()), Err(FieldError::InvalidDate));
        assert!(birth_date("01/01/0100", today()).is_ok());
    }

    #[test]
    fn test_cpf_strips_mask() {
        assert_eq!(cpf("529.982.247-25"), Ok("52998224725".into()));
        assert_eq!(cpf("529.982.247-2"), Err(FieldError::InvalidCpf));
        assert_eq!(cpf("111.111.111-11"), Err(FieldError::InvalidCpf));
    }

    #[test]
    fn test_cep_length() {
        assert_eq!(cep("01001-000"), Ok("01001000".into()));
        assert_eq!(cep("0100100"), Err(FieldError::InvalidCep));
        assert_eq!(cep("010010001"), Err(FieldError::InvalidCep));
    }

    #[test]
    fn test_required() {
        assert!(required("x").is_ok());
        assert_eq!(required("   "), Err(FieldError::Required));
    }
}
