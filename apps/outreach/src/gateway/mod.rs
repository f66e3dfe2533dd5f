//! AI Gateway: the only boundary between the session and the completion service.
//!
//! Both calls are fail-soft: every failure (service error, empty answer,
//! malformed JSON, wrong shape) is logged and converted into a safe value.
//! Callers receive an `Outcome`, never an `Err`.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::{strip_json_fences, CompletionBackend, CompletionRequest, LlmError};

pub mod discovery;
pub mod drafting;
pub mod prompts;

/// Why a gateway call fell back to its safe default.
#[derive(Debug, Error)]
pub enum GatewayFailure {
    #[error("AI service call failed: {0}")]
    Service(#[from] LlmError),

    #[error("AI response did not match the expected shape: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("AI response was empty")]
    Empty,
}

/// Result of a gateway call. Both variants carry a usable value; a fallback
/// additionally says why the real answer could not be used.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Fallback { value: T, reason: GatewayFailure },
}

impl<T> Outcome<T> {
    #[cfg(test)]
    pub fn value(&self) -> &T {
        match self {
            Outcome::Success(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Success(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn failure(&self) -> Option<&GatewayFailure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Fallback { reason, .. } => Some(reason),
        }
    }

    #[cfg(test)]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }
}

/// Stateless request/parse pair over a completion backend.
#[derive(Clone)]
pub struct AiGateway {
    backend: Arc<dyn CompletionBackend>,
    target_roles: Vec<String>,
    last_batch_stamp: Arc<AtomicI64>,
}

impl AiGateway {
    pub fn new(backend: Arc<dyn CompletionBackend>, target_roles: Vec<String>) -> Self {
        Self {
            backend,
            target_roles,
            last_batch_stamp: Arc::new(AtomicI64::new(0)),
        }
    }

    pub fn target_roles(&self) -> &[String] {
        &self.target_roles
    }

    /// Millisecond stamp for a new discovery batch, strictly greater than any
    /// stamp handed out before. Job ids from different batches never collide.
    pub(crate) fn next_batch_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_batch_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayFailure> {
        Ok(self.backend.complete(request).await?)
    }
}

/// Strips code fences and decodes the remaining text as a JSON value.
pub(crate) fn parse_structured(raw: &str) -> Result<Value, GatewayFailure> {
    let text = strip_json_fences(raw);
    if text.is_empty() {
        return Err(GatewayFailure::Empty);
    }
    Ok(serde_json::from_str(text)?)
}

/// Decodes `value` as `T`, accepting only a JSON object. Derived structs would
/// otherwise also accept a positional array.
pub(crate) fn decode_object<T: DeserializeOwned>(value: Value) -> Result<T, GatewayFailure> {
    if !value.is_object() {
        return Err(shape_error("an object", &value));
    }
    Ok(serde_json::from_value(value)?)
}

/// Decodes `value` as a list of `T`, one JSON object per element.
pub(crate) fn decode_object_list<T: DeserializeOwned>(
    value: Value,
) -> Result<Vec<T>, GatewayFailure> {
    match value {
        Value::Array(items) => items.into_iter().map(decode_object).collect(),
        other => Err(shape_error("an array", &other)),
    }
}

fn shape_error(expected: &str, found: &Value) -> GatewayFailure {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    GatewayFailure::Malformed(serde::de::Error::custom(format!(
        "expected {expected}, found {found}"
    )))
}
