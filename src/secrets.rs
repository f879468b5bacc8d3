use aws_sdk_secretsmanager::{
    config::http::HttpResponse,
    error::{ProvideErrorMetadata, SdkError},
    operation::get_secret_value::{GetSecretValueError, GetSecretValueOutput},
    Client as SecretsManagerClient,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Error as JsonError, Map, Value};
use std::{
    error::Error as StdError,
    fmt,
};
use tracing::{debug, warn};

use crate::{client, config::AwsConfig};

// Thin wrapper over AWS Secrets Manager. Every call is a single
// GetSecretValue round trip; nothing is cached between calls.
pub struct SecretsManager {
    client: SecretsManagerClient,
}

impl SecretsManager {
    pub fn new(client: SecretsManagerClient) -> Self {
        SecretsManager {
            client
        }
    }

    pub async fn from_config(config: &AwsConfig) -> Self {
        Self::new(client::secrets_manager_client(config).await)
    }

    // Fetches a secret and parses its payload as a JSON object. The secret
    // holds either a text payload or a base64-encoded binary payload, never
    // both.
    pub async fn get_secret(&self, secret_id: &str) -> Result<Map<String, Value>, SecretsError> {
        debug!("fetching secret {} from secrets manager", secret_id);
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|err| {
                match err.as_service_error().and_then(error_category) {
                    Some(category) => warn!("secrets manager returned {}: {}", category, err),
                    None => warn!("secrets manager returned an unclassified error: {}", err),
                }
                SecretsError::from(err)
            })?;
        decode_secret_payload(&response)
    }
}

// The service signals failures through a closed set of error shapes; anything
// outside the set still reaches the caller, it is just logged without a
// category name.
fn error_category(err: &GetSecretValueError) -> Option<&'static str> {
    if err.is_decryption_failure() {
        Some("DecryptionFailure")
    } else if err.is_internal_service_error() {
        Some("InternalServiceError")
    } else if err.is_invalid_parameter_exception() {
        Some("InvalidParameterException")
    } else if err.is_invalid_request_exception() {
        Some("InvalidRequestException")
    } else if err.is_resource_not_found_exception() {
        Some("ResourceNotFoundException")
    } else {
        None
    }
}

fn decode_secret_payload(response: &GetSecretValueOutput) -> Result<Map<String, Value>, SecretsError> {
    if let Some(text) = response.secret_string() {
        return serde_json::from_str(text).map_err(SecretsError::from);
    }
    if let Some(blob) = response.secret_binary() {
        let bytes = general_purpose::STANDARD.decode(blob.as_ref())?;
        return serde_json::from_slice(&bytes).map_err(SecretsError::from);
    }
    Err(SecretsError::MissingPayload)
}

#[derive(Debug)]
pub enum SecretsError {
    Provider(SdkError<GetSecretValueError, HttpResponse>),
    Base64(base64::DecodeError),
    Json(JsonError),
    MissingPayload,
}

impl SecretsError {
    // Raw provider error code, when the failure came back from the service.
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            SecretsError::Provider(SdkError::ServiceError(context)) => context.err().code(),
            _ => None,
        }
    }
}

impl fmt::Display for SecretsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretsError::Provider(err) => write!(f, "secrets manager request failed: {}", err),
            SecretsError::Base64(err) => write!(f, "secret binary is not valid base64: {}", err),
            SecretsError::Json(err) => write!(f, "secret payload is not valid JSON: {}", err),
            SecretsError::MissingPayload => {
                write!(f, "secret response has no string or binary value")
            }
        }
    }
}

impl StdError for SecretsError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SecretsError::Provider(err) => Some(err),
            SecretsError::Base64(err) => Some(err),
            SecretsError::Json(err) => Some(err),
            SecretsError::MissingPayload => None,
        }
    }
}

impl From<SdkError<GetSecretValueError, HttpResponse>> for SecretsError {
    fn from(err: SdkError<GetSecretValueError, HttpResponse>) -> Self {
        SecretsError::Provider(err)
    }
}

impl From<base64::DecodeError> for SecretsError {
    fn from(err: base64::DecodeError) -> Self {
        SecretsError::Base64(err)
    }
}

impl From<JsonError> for SecretsError {
    fn from(err: JsonError) -> Self {
        SecretsError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_secretsmanager::{
        config::{BehaviorVersion, Credentials, Region},
        primitives::Blob,
        types::error::{
            DecryptionFailure, InternalServiceError, InvalidParameterException,
            InvalidRequestException, ResourceNotFoundException,
        },
        Config,
    };

    fn output_with_string(text: &str) -> GetSecretValueOutput {
        GetSecretValueOutput::builder().secret_string(text).build()
    }

    #[test]
    fn test_text_payload_decodes_to_json_map() {
        let response = output_with_string(r#"{"username":"svc-tweets","port":5432}"#);
        let secret = decode_secret_payload(&response).unwrap();
        assert_eq!(secret["username"], "svc-tweets");
        assert_eq!(secret["port"], 5432);
    }

    #[test]
    fn test_binary_payload_is_base64_decoded_first() {
        let encoded = general_purpose::STANDARD.encode(r#"{"token":"abc123"}"#);
        let response = GetSecretValueOutput::builder()
            .secret_binary(Blob::new(encoded.into_bytes()))
            .build();
        let secret = decode_secret_payload(&response).unwrap();
        assert_eq!(secret["token"], "abc123");
    }

    #[test]
    fn test_malformed_payload_is_a_parse_error() {
        let response = output_with_string("definitely not json");
        match decode_secret_payload(&response) {
            Err(SecretsError::Json(_)) => {}
            other => panic!("expected a json error, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_payload_that_is_not_base64_fails() {
        let response = GetSecretValueOutput::builder()
            .secret_binary(Blob::new("!!not base64!!".as_bytes()))
            .build();
        match decode_secret_payload(&response) {
            Err(SecretsError::Base64(_)) => {}
            other => panic!("expected a base64 error, got {:?}", other),
        }
    }

    #[test]
    fn test_response_without_payload_is_an_error() {
        let response = GetSecretValueOutput::builder().build();
        assert!(matches!(
            decode_secret_payload(&response),
            Err(SecretsError::MissingPayload)
        ));
    }

    #[test]
    fn test_recognized_error_shapes_classify() {
        let cases = [
            (
                GetSecretValueError::DecryptionFailure(DecryptionFailure::builder().build()),
                "DecryptionFailure",
            ),
            (
                GetSecretValueError::InternalServiceError(InternalServiceError::builder().build()),
                "InternalServiceError",
            ),
            (
                GetSecretValueError::InvalidParameterException(
                    InvalidParameterException::builder().build(),
                ),
                "InvalidParameterException",
            ),
            (
                GetSecretValueError::InvalidRequestException(
                    InvalidRequestException::builder().build(),
                ),
                "InvalidRequestException",
            ),
            (
                GetSecretValueError::ResourceNotFoundException(
                    ResourceNotFoundException::builder().build(),
                ),
                "ResourceNotFoundException",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(error_category(&err), Some(expected));
        }
    }

    #[test]
    fn test_unrecognized_error_shapes_have_no_category() {
        let err = GetSecretValueError::unhandled("throttled");
        assert_eq!(error_category(&err), None);
    }

    #[tokio::test]
    async fn test_provider_errors_bubble_up_unchanged() {
        // Unroutable endpoint: the call must surface the SDK error rather
        // than panic or return a default value.
        let config = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-2"))
            .credentials_provider(Credentials::new("akid", "secret", None, None, "test"))
            .endpoint_url("http://127.0.0.1:9")
            .build();
        let store = SecretsManager::new(SecretsManagerClient::from_conf(config));
        match store.get_secret("prod/twitter/api").await {
            Err(SecretsError::Provider(_)) => {}
            other => panic!("expected a provider error, got {:?}", other),
        }
    }
}
