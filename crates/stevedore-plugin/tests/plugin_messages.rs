//! Host-protocol tests: one JSON body in, one JSON value out.

use serde_json::{json, Value};
use tempfile::TempDir;

use stevedore_plugin::{handle_request, PluginError};
use stevedore_storage::StorageError;

#[test]
fn test_empty_body_rejects_missing_bucket() {
    let response: Value = handle_request("validate-artifact-store-config", "{}").unwrap();
    assert_eq!(
        response,
        json!([{"key": "S3Bucket", "message": "S3Bucket must not be blank."}])
    );
}

#[test]
fn test_access_key_alone_rejected() {
    let body = json!({
        "S3Bucket": "http://localhost/index",
        "Region": "us-west-1",
        "AWSAccessKey": "chuck-norris"
    })
    .to_string();

    let response: Value = handle_request("validate-artifact-store-config", &body).unwrap();
    assert_eq!(
        response,
        json!([
            {
                "key": "AWSAccessKey",
                "message": "AWSAccessKey and AWSSecretAccessKey must be filled altogether, if required."
            },
            {
                "key": "AWSSecretAccessKey",
                "message": "AWSAccessKey and AWSSecretAccessKey must be filled altogether, if required."
            }
        ])
    );
}

#[test]
fn test_secret_key_alone_rejected() {
    let body = json!({
        "S3Bucket": "http://localhost/index",
        "Region": "us-west-1",
        "AWSSecretAccessKey": "chuck-norris-doesnt-need-passwords"
    })
    .to_string();

    let response: Value = handle_request("validate-artifact-store-config", &body).unwrap();
    let keys: Vec<&str> = response
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["AWSAccessKey", "AWSSecretAccessKey"]);
}

#[test]
fn test_full_config_accepted() {
    let body = json!({
        "S3Bucket": "http://localhost/index",
        "Region": "us-west-1",
        "AWSAccessKey": "chuck-norris",
        "AWSSecretAccessKey": "chuck-norris-doesnt-need-passwords",
        "EndpointURL": "https://s3.us-west-1.amazonaws.com",
        "PathStyleAccess": false
    })
    .to_string();

    let response: Value = handle_request("validate-artifact-store-config", &body).unwrap();
    assert_eq!(response, json!([]));
}

#[test]
fn test_validate_field_required() {
    let response: Value =
        handle_request("validate-field", r#"{"key": "S3Bucket", "value": ""}"#).unwrap();
    assert_eq!(
        response,
        json!([{"key": "S3Bucket", "message": "S3Bucket must not be blank."}])
    );
}

#[test]
fn test_validate_field_unconstrained() {
    let response: Value =
        handle_request("validate-field", r#"{"key": "Region", "value": ""}"#).unwrap();
    assert_eq!(response, json!([]));
}

#[test]
fn test_unknown_message_rejected() {
    let err: PluginError = handle_request("get-view", "{}").unwrap_err();
    assert!(matches!(err, PluginError::UnknownMessage { ref name } if name == "get-view"));
    assert_eq!(
        err.to_response(),
        json!({"message": "Unknown message: get-view"})
    );
}

#[test]
fn test_malformed_publish_body_is_decode_error() {
    let err: PluginError = handle_request("publish-artifact", "not json").unwrap_err();
    assert!(matches!(err, PluginError::Decode(_)));
}

#[test]
fn test_publish_with_no_matching_files() {
    let working: TempDir = tempfile::tempdir().unwrap();
    let body = json!({
        "artifact_plan": {
            "configuration": {"Source": "dist/*.tar.gz", "Destination": "nightly"},
            "id": "installers",
            "storeId": "s3-store"
        },
        "artifact_store": {
            "configuration": {
                "S3Bucket": "artifacts",
                "Region": "us-west-1",
                "AWSAccessKey": "AKIDEXAMPLE",
                "AWSSecretAccessKey": "wJalrXUtnFEMI",
                "EndpointURL": "http://localhost:9000",
                "PathStyleAccess": true
            },
            "id": "s3-store"
        },
        "agent_working_directory": working.path().display().to_string()
    })
    .to_string();

    let err: PluginError = handle_request("publish-artifact", &body).unwrap_err();
    match err {
        PluginError::Storage(StorageError::NoMatchingFiles { pattern }) => {
            assert_eq!(pattern, "dist/*.tar.gz");
        }
        other => panic!("expected NoMatchingFiles, got {other:?}"),
    }
}

#[test]
fn test_publish_without_bucket_is_invalid_config() {
    let working: TempDir = tempfile::tempdir().unwrap();
    let body = json!({
        "artifact_plan": {
            "configuration": {"Source": "a.bin"},
            "id": "installers",
            "storeId": "s3-store"
        },
        "artifact_store": {"configuration": {}, "id": "s3-store"},
        "agent_working_directory": working.path().display().to_string()
    })
    .to_string();

    let err: PluginError = handle_request("publish-artifact", &body).unwrap_err();
    assert!(matches!(
        err,
        PluginError::Storage(StorageError::InvalidConfig { .. })
    ));
}

#[test]
fn test_fetch_without_bucket_is_invalid_config() {
    let working: TempDir = tempfile::tempdir().unwrap();
    let body = json!({
        "artifact_metadata": {"Source": "a.bin", "Destination": "nightly"},
        "store_configuration": {},
        "agent_working_directory": working.path().display().to_string()
    })
    .to_string();

    let err: PluginError = handle_request("fetch-artifact", &body).unwrap_err();
    assert!(matches!(
        err,
        PluginError::Storage(StorageError::InvalidConfig { .. })
    ));
}
