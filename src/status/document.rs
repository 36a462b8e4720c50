//! Status document decoding.
//!
//! The upstream schema belongs to the status-page vendor, so decoding is
//! deliberately forgiving below the top level: a field with the wrong type is
//! treated as absent and a component without a usable name is dropped. Only a
//! body that is not a JSON object, or an object that carries no status
//! information at all, is rejected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Errors raised when a response body cannot be read as a status document.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, got {0}")]
    NotAnObject(&'static str),

    #[error("document has neither a status nor a components list")]
    Unrecognized,
}

/// Parsed status page summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusDocument {
    /// Service name reported by the page, if any.
    pub service: Option<String>,
    /// Overall status token, as reported (never recomputed).
    pub overall: Option<String>,
    /// Components in document order.
    pub components: Vec<ComponentEntry>,
}

/// One named component and its raw status token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEntry {
    pub name: String,
    pub status: Option<String>,
}

impl ComponentEntry {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Some(status.into()),
        }
    }
}

#[derive(Deserialize)]
struct RawSummary {
    #[serde(default, deserialize_with = "lenient")]
    page: Option<RawPage>,
    #[serde(default, deserialize_with = "lenient")]
    status: Option<RawStatus>,
    #[serde(default, deserialize_with = "lenient")]
    overall: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    components: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct RawPage {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
}

/// `status` is an object carrying an `indicator` on statuspage.io, but some
/// pages report a bare token instead.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Token(String),
    Object {
        #[serde(default, deserialize_with = "lenient")]
        indicator: Option<String>,
    },
}

#[derive(Deserialize)]
struct RawComponent {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    status: Option<String>,
}

/// Deserialize a field, mapping a type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl StatusDocument {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let object = value
            .as_object()
            .ok_or_else(|| DecodeError::NotAnObject(kind_of(&value)))?;
        if !["status", "overall", "components"]
            .iter()
            .any(|key| object.contains_key(*key))
        {
            return Err(DecodeError::Unrecognized);
        }

        let raw: RawSummary = serde_json::from_value(value)?;

        let overall = match raw.status {
            Some(RawStatus::Token(token)) => Some(token),
            Some(RawStatus::Object { indicator }) => indicator,
            None => None,
        }
        .or(raw.overall);

        let components = raw
            .components
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<RawComponent>(entry).ok())
            .filter_map(|entry| match entry.name {
                Some(name) if !name.trim().is_empty() => Some(ComponentEntry {
                    name,
                    status: entry.status,
                }),
                _ => {
                    tracing::debug!("Skipping component entry without a name");
                    None
                }
            })
            .collect();

        Ok(Self {
            service: raw.page.and_then(|page| page.name).filter(|n| !n.is_empty()),
            overall,
            components,
        })
    }
}
