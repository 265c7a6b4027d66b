use facematch_application::ApplicationError;
use facematch_domain::{FaceRecord, MatchHistoryEntry, Stats};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct FacesEnvelope {
    #[serde(default)]
    pub faces: Vec<FaceRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaceEnvelope {
    pub face: FaceRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatsEnvelope {
    pub stats: Stats,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryEnvelope {
    #[serde(default)]
    pub results: Vec<MatchHistoryEntry>,
}

/// Checks status and `success` flag, turning failures into typed errors.
pub(crate) fn check_envelope(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<Value, ApplicationError> {
    let value: Value = serde_json::from_str(body).map_err(|error| {
        ApplicationError::Transport(format!("invalid JSON from server (HTTP {status}): {error}"))
    })?;

    let succeeded = (200..300).contains(&status) && value.get("success") == Some(&Value::Bool(true));
    if succeeded {
        return Ok(value);
    }

    let message = match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(Value::Null | Value::String(_)) | None => fallback.to_string(),
        Some(other) => other.to_string(),
    };
    Err(ApplicationError::Server {
        status: Some(status),
        message,
    })
}

pub(crate) fn decode<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<T, ApplicationError> {
    let value = check_envelope(status, body, fallback)?;
    serde_json::from_value(value).map_err(|error| {
        ApplicationError::Transport(format!("unexpected response shape: {error}"))
    })
}
