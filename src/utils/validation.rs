use crate::utils::error::{Result, SyncError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(SyncError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<T>(field_name: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| SyncError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// 空白字串視同未提供；錯誤訊息不回顯原值，避免洩漏金鑰
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("mailchimp-base-url", "https://us6.api.mailchimp.com/2.0/").is_ok());
        assert!(validate_url("mailchimp-base-url", "http://127.0.0.1:8080/").is_ok());
        assert!(validate_url("mailchimp-base-url", "").is_err());
        assert!(validate_url("mailchimp-base-url", "invalid-url").is_err());
        assert!(validate_url("mailchimp-base-url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("batch-size", 500, 1).is_ok());
        assert!(validate_positive_number("batch-size", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        assert_eq!(
            validate_required_field("mailchimp-list-name", Some("abc123")).unwrap(),
            "abc123"
        );
        let err = validate_required_field::<String>("mailchimp-list-name", None).unwrap_err();
        assert!(matches!(err, SyncError::MissingConfigError { field } if field == "mailchimp-list-name"));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("mailchimp-api-key", "key-us6").is_ok());
        assert!(validate_non_empty_string("mailchimp-api-key", "   ").is_err());
    }
}
