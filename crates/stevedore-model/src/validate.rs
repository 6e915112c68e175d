//! Per-field rule table validation for store configuration.
//!
//! The rule set is an explicit table: an ordered list of field
//! declarations, each tagged required or optional, followed by an ordered
//! list of cross-field rules. Rules never short-circuit; every violation is
//! collected. Required-field errors come first, in declaration order, then
//! cross-field errors.

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;

/// Error message for an unpaired credential field.
pub const PAIRED_CREDENTIALS_MESSAGE: &str =
    "AWSAccessKey and AWSSecretAccessKey must be filled altogether, if required.";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Wire name of the offending field.
    pub key: String,
    /// Human-readable failure description.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    /// The required-field failure for `key`.
    pub fn blank(key: &str) -> Self {
        Self::new(key, format!("{key} must not be blank."))
    }
}

/// Ordered collection of validation failures. Empty = valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult(Vec<ValidationError>);

impl ValidationResult {
    /// Whether no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// The collected failures, in rule order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Serialize to the host's response shape: a JSON array of
    /// `{key, message}` objects.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<Vec<ValidationError>> for ValidationResult {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationResult {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Blank = missing, empty, or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// One entry of the store-config field table.
struct FieldRule {
    key: &'static str,
    required: bool,
}

/// Store configuration fields, in declaration order.
const STORE_CONFIG_FIELDS: &[FieldRule] = &[
    FieldRule {
        key: "S3Bucket",
        required: true,
    },
    FieldRule {
        key: "Region",
        required: false,
    },
    FieldRule {
        key: "AWSAccessKey",
        required: false,
    },
    FieldRule {
        key: "AWSSecretAccessKey",
        required: false,
    },
    FieldRule {
        key: "EndpointURL",
        required: false,
    },
    FieldRule {
        key: "PathStyleAccess",
        required: false,
    },
];

/// Cross-field rules, applied after all required-field checks.
const CROSS_FIELD_RULES: &[fn(&StoreConfig) -> Vec<ValidationError>] = &[paired_credentials];

/// Validate a full store configuration against the rule table.
///
/// # Returns
/// All violations, required-field errors first in field declaration order,
/// followed by cross-field errors. Empty result = valid.
pub fn validate(config: &StoreConfig) -> ValidationResult {
    let mut errors: Vec<ValidationError> = Vec::new();

    for rule in STORE_CONFIG_FIELDS {
        if !rule.required {
            continue;
        }
        let value: &str = field_value(config, rule.key).unwrap_or("");
        if is_blank(value) {
            errors.push(ValidationError::blank(rule.key));
        }
    }

    for rule in CROSS_FIELD_RULES {
        errors.extend(rule(config));
    }

    errors.into()
}

/// Validate a single named field, for the host's interactive
/// configuration UI.
///
/// Applies the required/blank rule for the named field; fields with no
/// declared constraint (including unknown fields) yield an empty result.
pub fn validate_field(key: &str, value: &str) -> ValidationResult {
    let required: bool = STORE_CONFIG_FIELDS
        .iter()
        .any(|rule| rule.key == key && rule.required);

    if required && is_blank(value) {
        vec![ValidationError::blank(key)].into()
    } else {
        ValidationResult::default()
    }
}

/// Credentials must be filled altogether or not at all; both blank means
/// the store relies on ambient/instance credentials and is valid.
fn paired_credentials(config: &StoreConfig) -> Vec<ValidationError> {
    let access_blank: bool = is_blank(&config.access_key);
    let secret_blank: bool = is_blank(&config.secret_key);

    if access_blank == secret_blank {
        return Vec::new();
    }

    vec![
        ValidationError::new("AWSAccessKey", PAIRED_CREDENTIALS_MESSAGE),
        ValidationError::new("AWSSecretAccessKey", PAIRED_CREDENTIALS_MESSAGE),
    ]
}

fn field_value<'a>(config: &'a StoreConfig, key: &str) -> Option<&'a str> {
    match key {
        "S3Bucket" => Some(&config.bucket),
        "Region" => Some(&config.region),
        "AWSAccessKey" => Some(&config.access_key),
        "AWSSecretAccessKey" => Some(&config.secret_key),
        "EndpointURL" => Some(&config.endpoint_url),
        _ => None,
    }
}
