use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum digit count for a phone number with area code.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Field-level validation failures. `Display` is the message shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Informe seu nome")]
    MissingName,
    #[error("Informe seu e-mail")]
    MissingEmail,
    #[error("Digite um e-mail válido")]
    InvalidEmail,
    #[error("Informe seu telefone")]
    MissingPhone,
    #[error("Digite um telefone válido (com DDD)")]
    InvalidPhone,
    #[error("Digite sua mensagem")]
    MissingMessage,
    #[error("Confirme que você não é um robô")]
    MissingCaptcha,
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid hardcoded regex"));

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    Ok(())
}

/// Accepts `local@domain.tld` with no whitespace and a single `@`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Requires at least [`MIN_PHONE_DIGITS`] digits; any formatting characters are ignored.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if phone_digits(phone) < MIN_PHONE_DIGITS {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::MissingMessage);
    }
    Ok(())
}

/// `token` is `None` when the widget never loaded, which passes.
pub fn validate_captcha(token: Option<&str>) -> Result<(), ValidationError> {
    match token {
        Some(t) if t.is_empty() => Err(ValidationError::MissingCaptcha),
        _ => Ok(()),
    }
}

fn phone_digits(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}
