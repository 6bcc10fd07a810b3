//! Response envelope decoding.
//!
//! Every backend endpoint wraps its payload in the same envelope:
//! `{responseCode: 1, response: {...}}` on success, or
//! `{responseCode: <other>, message}` on an explicit failure. Decoding goes
//! through one tagged type here so a malformed body surfaces as
//! `ApiError::MalformedResponse` instead of a missing-field surprise deeper
//! in the call chain.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::Principal;

use super::ApiError;

/// The `responseCode` value the backend uses for success.
const SUCCESS_CODE: i64 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    response_code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    response: Option<serde_json::Value>,
}

/// A decoded envelope: either the typed payload or the backend's stated
/// failure. Transport and parse problems are not represented here - those
/// come back as `Err(ApiError)` from `decode`.
#[derive(Debug, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure { message: Option<String> },
}

pub fn decode<T: DeserializeOwned>(body: &str) -> Result<ApiOutcome<T>, ApiError> {
    let raw: RawEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

    if raw.response_code != SUCCESS_CODE {
        return Ok(ApiOutcome::Failure {
            message: raw.message,
        });
    }

    let payload = raw.response.ok_or_else(|| {
        ApiError::MalformedResponse("success envelope without a response payload".to_string())
    })?;
    let value =
        serde_json::from_value(payload).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
    Ok(ApiOutcome::Success(value))
}

// Wire payloads for the three auth endpoints

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub token: String,
    #[serde(default)]
    pub user: Option<Principal>,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPayload {
    pub is_valid: bool,
}
