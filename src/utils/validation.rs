use crate::utils::error::{DirectoryError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DirectoryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// An API prefix is either empty (routes at the root) or `/segment[/segment..]`
/// without a trailing slash.
pub fn validate_route_prefix(field_name: &str, prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Ok(());
    }

    let reason = if !prefix.starts_with('/') {
        Some("Prefix must start with '/'")
    } else if prefix.ends_with('/') {
        Some("Prefix must not end with '/'")
    } else if prefix.contains(char::is_whitespace) {
        Some("Prefix must not contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DirectoryError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("public_base_url", "https://example.com").is_ok());
        assert!(validate_url("public_base_url", "http://example.com").is_ok());
        assert!(validate_url("public_base_url", "").is_err());
        assert!(validate_url("public_base_url", "invalid-url").is_err());
        assert!(validate_url("public_base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("server.port", 3000, 1).is_ok());
        assert!(validate_positive_number("server.port", 0, 1).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data.path", "data/tools.csv").is_ok());
        assert!(validate_path("data.path", "").is_err());
        assert!(validate_path("data.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_route_prefix() {
        assert!(validate_route_prefix("http.api_prefix", "").is_ok());
        assert!(validate_route_prefix("http.api_prefix", "/api").is_ok());
        assert!(validate_route_prefix("http.api_prefix", "/api/v1").is_ok());
        assert!(validate_route_prefix("http.api_prefix", "api").is_err());
        assert!(validate_route_prefix("http.api_prefix", "/api/").is_err());
        assert!(validate_route_prefix("http.api_prefix", "/my api").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3000u16);
        let missing: Option<u16> = None;
        assert_eq!(*validate_required_field("server.port", &present).unwrap(), 3000);
        assert!(matches!(
            validate_required_field("server.port", &missing),
            Err(DirectoryError::MissingConfigError { .. })
        ));
    }
}
