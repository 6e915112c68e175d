//! Typed store configuration and artifact plan models.
//!
//! Wire names follow the host's configuration maps (`S3Bucket`, `Region`,
//! `AWSAccessKey`, ...). Deserialization is forgiving: unknown fields are
//! ignored and missing optional fields default to empty/false, so a partial
//! configuration map still parses and is rejected by validation rather than
//! by the codec.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::validate::is_blank;

/// Object store configuration for one artifact store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Target bucket. The only required field.
    #[serde(rename = "S3Bucket", default, skip_serializing_if = "String::is_empty")]
    pub bucket: String,

    /// Region for the regional endpoint. Empty = ambient region chain.
    #[serde(rename = "Region", default, skip_serializing_if = "String::is_empty")]
    pub region: String,

    /// Explicit access key. Must be paired with `secret_key`.
    #[serde(rename = "AWSAccessKey", default, skip_serializing_if = "String::is_empty")]
    pub access_key: String,

    /// Explicit secret key. Must be paired with `access_key`.
    #[serde(
        rename = "AWSSecretAccessKey",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub secret_key: String,

    /// Custom endpoint for S3-compatible third-party stores.
    /// Empty = default regional endpoint.
    #[serde(rename = "EndpointURL", default, skip_serializing_if = "String::is_empty")]
    pub endpoint_url: String,

    /// Force path-style addressing (`endpoint/bucket/key`) instead of
    /// virtual-hosted-style. Required by most non-AWS backends.
    #[serde(
        rename = "PathStyleAccess",
        default,
        deserialize_with = "bool_from_value",
        skip_serializing_if = "is_false"
    )]
    pub path_style_access: bool,
}

impl StoreConfig {
    /// Whether both credential fields are filled.
    ///
    /// False means the store relies on ambient/instance credentials.
    pub fn has_explicit_credentials(&self) -> bool {
        !is_blank(&self.access_key) && !is_blank(&self.secret_key)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            endpoint_url: String::new(),
            path_style_access: false,
        }
    }
}

// Credential values must never leak through error context or logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key", &redacted(&self.access_key))
            .field("secret_key", &redacted(&self.secret_key))
            .field("endpoint_url", &self.endpoint_url)
            .field("path_style_access", &self.path_style_access)
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Accept a JSON bool or the strings "true"/"false" (the host round-trips
/// configuration maps as strings).
fn bool_from_value<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(value) => Ok(value),
        BoolOrString::Text(text) => {
            let trimmed: &str = text.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("false") {
                Ok(false)
            } else if trimmed.eq_ignore_ascii_case("true") {
                Ok(true)
            } else {
                Err(serde::de::Error::invalid_value(
                    serde::de::Unexpected::Str(trimmed),
                    &"\"true\" or \"false\"",
                ))
            }
        }
    }
}

/// One artifact producer's request to publish files matching a source
/// pattern into an optional sub-folder of the artifact namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPlan {
    /// Plan identifier assigned by the host.
    pub id: String,

    /// Identifier of the store this plan publishes to.
    #[serde(rename = "storeId")]
    pub store_id: String,

    /// Plan-level configuration map.
    pub configuration: ArtifactPlanConfig,
}

/// Configuration map of an artifact plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPlanConfig {
    /// Path or glob relative to the agent working directory.
    #[serde(rename = "Source", default)]
    pub source: String,

    /// Sub-folder under the artifact namespace. Blank = bucket root.
    #[serde(rename = "Destination", default, skip_serializing_if = "String::is_empty")]
    pub destination: String,
}

impl ArtifactPlan {
    /// Source path or glob, relative to the agent working directory.
    pub fn source(&self) -> &str {
        &self.configuration.source
    }

    /// Destination folder, or `None` when the plan publishes to the
    /// bucket root.
    pub fn destination(&self) -> Option<&str> {
        if is_blank(&self.configuration.destination) {
            None
        } else {
            Some(self.configuration.destination.trim())
        }
    }
}

/// A store identifier with its resolved configuration, supplied anew on
/// every request. The host owns the store registry; the plugin keeps
/// nothing between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactStoreRef {
    /// Store identifier assigned by the host.
    pub id: String,

    /// Resolved store configuration.
    pub configuration: StoreConfig,
}

/// Metadata returned to the host on successful publish and handed back
/// verbatim on fetch. `destination` is the remote key prefix the artifact
/// was published under (possibly empty for the bucket root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// The source pattern the artifact was published from.
    #[serde(rename = "Source")]
    pub source: String,

    /// Remote key prefix of the published files.
    #[serde(rename = "Destination", default)]
    pub destination: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_round_trip() {
        let config = StoreConfig {
            bucket: "artifacts".into(),
            region: "us-west-1".into(),
            access_key: "AKIDEXAMPLE".into(),
            secret_key: "wJalrXUtnFEMI".into(),
            endpoint_url: "https://minio.internal:9000".into(),
            path_style_access: true,
        };

        let json: String = serde_json::to_string(&config).unwrap();
        let parsed: StoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_store_config_round_trip_minimal() {
        let config = StoreConfig {
            bucket: "artifacts".into(),
            ..Default::default()
        };

        let json: String = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"S3Bucket":"artifacts"}"#);

        let parsed: StoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_body_parses_as_all_absent() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"S3Bucket":"b","SomeFutureField":"x"}"#).unwrap();
        assert_eq!(config.bucket, "b");
    }

    #[test]
    fn test_path_style_access_from_bool() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"S3Bucket":"b","PathStyleAccess":true}"#).unwrap();
        assert!(config.path_style_access);
    }

    #[test]
    fn test_path_style_access_from_string() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"S3Bucket":"b","PathStyleAccess":"true"}"#).unwrap();
        assert!(config.path_style_access);

        let config: StoreConfig =
            serde_json::from_str(r#"{"S3Bucket":"b","PathStyleAccess":"false"}"#).unwrap();
        assert!(!config.path_style_access);

        let config: StoreConfig =
            serde_json::from_str(r#"{"S3Bucket":"b","PathStyleAccess":""}"#).unwrap();
        assert!(!config.path_style_access);
    }

    #[test]
    fn test_path_style_access_rejects_garbage() {
        let result: Result<StoreConfig, _> =
            serde_json::from_str(r#"{"S3Bucket":"b","PathStyleAccess":"maybe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = StoreConfig {
            bucket: "artifacts".into(),
            access_key: "AKIDEXAMPLE".into(),
            secret_key: "wJalrXUtnFEMI".into(),
            ..Default::default()
        };

        let rendered: String = format!("{config:?}");
        assert!(!rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("wJalrXUtnFEMI"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_has_explicit_credentials() {
        let mut config = StoreConfig {
            bucket: "b".into(),
            ..Default::default()
        };
        assert!(!config.has_explicit_credentials());

        config.access_key = "key".into();
        assert!(!config.has_explicit_credentials());

        config.secret_key = "secret".into();
        assert!(config.has_explicit_credentials());
    }

    #[test]
    fn test_plan_destination_blank_is_none() {
        let plan = ArtifactPlan {
            id: "installers".into(),
            store_id: "s3-store".into(),
            configuration: ArtifactPlanConfig {
                source: "build/*.zip".into(),
                destination: "   ".into(),
            },
        };
        assert_eq!(plan.destination(), None);
    }

    #[test]
    fn test_plan_destination_trimmed() {
        let plan = ArtifactPlan {
            id: "installers".into(),
            store_id: "s3-store".into(),
            configuration: ArtifactPlanConfig {
                source: "build/*.zip".into(),
                destination: " nightly ".into(),
            },
        };
        assert_eq!(plan.destination(), Some("nightly"));
    }

    #[test]
    fn test_metadata_wire_names() {
        let metadata = ArtifactMetadata {
            source: "build/*.zip".into(),
            destination: "nightly".into(),
        };

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"Source": "build/*.zip", "Destination": "nightly"})
        );
    }
}
