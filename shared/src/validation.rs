//! Validation utilities for notification settings

use validator::ValidationError;

/// Shortest destination number accepted for a send
pub const MIN_PHONE_LENGTH: usize = 8;

// ============================================================================
// Destination Numbers
// ============================================================================

/// Validate a destination phone number.
/// Accepts digits with optional `+`, spaces, dashes and parentheses, e.g.
/// 50212345678, +502 1234-5678
pub fn validate_phone_number(phone: &str) -> Result<(), &'static str> {
    let phone = phone.trim();
    if phone.chars().count() < MIN_PHONE_LENGTH {
        return Err("Phone number is too short");
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'))
    {
        return Err("Phone number contains invalid characters");
    }
    if phone.chars().skip(1).any(|c| c == '+') {
        return Err("Phone number may only start with +");
    }
    Ok(())
}

/// Digits-only form used in deep links (`+502 1234-5678` -> `50212345678`)
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

// ============================================================================
// Gateway Endpoints
// ============================================================================

/// Validate a gateway endpoint base URL (http or https, non-empty host)
pub fn validate_endpoint_url(url: &str) -> Result<(), &'static str> {
    let url = url.trim();
    if !validator::validate_url(url) {
        return Err("Endpoint is not a valid URL");
    }

    let scheme = url.split_once("://").map(|(scheme, _)| scheme.to_ascii_lowercase());
    match scheme.as_deref() {
        Some("http") | Some("https") => Ok(()),
        _ => Err("Endpoint must start with http:// or https://"),
    }
}

// ============================================================================
// validator adapters
// ============================================================================

fn to_validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// `#[validate(custom)]` hook for a list of destination numbers
pub fn validate_phone_list(phones: &[String]) -> Result<(), ValidationError> {
    phones
        .iter()
        .try_for_each(|p| validate_phone_number(p))
        .map_err(|message| to_validation_error("phone_number", message))
}

/// `#[validate(custom)]` hook for a list of gateway endpoints
pub fn validate_endpoint_list(endpoints: &[String]) -> Result<(), ValidationError> {
    endpoints
        .iter()
        .try_for_each(|e| validate_endpoint_url(e))
        .map_err(|message| to_validation_error("endpoint_url", message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_numbers() {
        assert!(validate_phone_number("50212345678").is_ok());
        assert!(validate_phone_number("+502 1234-5678").is_ok());
        assert!(validate_phone_number("(502) 12345678").is_ok());
        assert!(validate_phone_number("12345678").is_ok());

        assert!(validate_phone_number("1234567").is_err());
        assert!(validate_phone_number("   123   ").is_err());
        assert!(validate_phone_number("5021234abcd").is_err());
        assert!(validate_phone_number("502+12345678").is_err());
    }

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+502 1234-5678"), "50212345678");
    }

    #[test]
    fn test_endpoint_urls() {
        assert!(validate_endpoint_url("http://127.0.0.1:8082").is_ok());
        assert!(validate_endpoint_url("https://sms.example.gt/api").is_ok());

        assert!(validate_endpoint_url("ftp://relay").is_err());
        assert!(validate_endpoint_url("http://").is_err());
        assert!(validate_endpoint_url("relay:8082").is_err());
        assert!(validate_endpoint_url("http://bad host:8082").is_err());
        assert!(validate_endpoint_url("http://relay:99999").is_err());
        assert!(validate_endpoint_url("HTTPS://Relay.example.gt").is_ok());
    }

    #[test]
    fn test_list_adapters() {
        assert!(validate_phone_list(&[]).is_ok());
        let err =
            validate_phone_list(&["+50212345678".to_string(), "12".to_string()]).unwrap_err();
        assert_eq!(err.code, "phone_number");
        assert!(validate_endpoint_list(&["https://a.gt".to_string()]).is_ok());
        assert_eq!(
            validate_endpoint_list(&["a.gt".to_string()]).unwrap_err().code,
            "endpoint_url"
        );
    }
}
