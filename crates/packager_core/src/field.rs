use std::fmt;

use url::Url;

/// Input fields the packager form knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Url,
    AppName,
}

impl Field {
    /// Wire name, also used in the JSON request body.
    pub fn name(self) -> &'static str {
        match self {
            Field::Url => "url",
            Field::AppName => "appName",
        }
    }

    /// Lenient lookup used by the interactive front end.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "url" => Some(Field::Url),
            "appname" | "app_name" | "app-name" | "name" => Some(Field::AppName),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    InvalidFormat,
}

impl ValidationError {
    /// User-facing message for this error on `field`.
    pub fn message(self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Url, ValidationError::Required) => "URL is required",
            (Field::Url, ValidationError::InvalidFormat) => {
                "Please enter a valid URL (e.g., https://example.com)"
            }
            (Field::AppName, ValidationError::Required) => "App Name is required",
            (Field::AppName, ValidationError::InvalidFormat) => "Please enter a valid App Name",
        }
    }
}

/// A URL is valid when it parses as an absolute URL with both scheme and host.
pub fn validate_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required);
    }
    match Url::parse(value) {
        Ok(parsed) if parsed.has_host() => Ok(()),
        _ => Err(ValidationError::InvalidFormat),
    }
}

pub fn validate_app_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

pub fn validate(field: Field, value: &str) -> Result<(), ValidationError> {
    match field {
        Field::Url => validate_url(value),
        Field::AppName => validate_app_name(value),
    }
}
