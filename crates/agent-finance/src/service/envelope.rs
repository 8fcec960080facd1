//! Uniform success/failure envelope returned by every service operation

use crate::error::{FinanceError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome class of a service operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Failed,
    NotFound,
}

/// `{...payload, status, error?}`
///
/// The payload fields sit at the top level next to `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Successful envelope carrying the fields of `payload`
    pub fn success<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => Self {
                payload: fields,
                status: Status::Success,
                error: None,
            },
            Ok(other) => {
                let mut fields = Map::new();
                fields.insert("result".to_string(), other);
                Self {
                    payload: fields,
                    status: Status::Success,
                    error: None,
                }
            }
            Err(e) => Self::failure(&FinanceError::from(e)),
        }
    }

    /// Failed or not-found envelope describing `err`
    pub fn failure(err: &FinanceError) -> Self {
        Self::with_status(err.status(), err.to_string())
    }

    pub(crate) fn with_status(status: Status, error: impl Into<String>) -> Self {
        Self {
            payload: Map::new(),
            status,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Decode the payload into a typed value
    ///
    /// A non-success envelope decodes to an error carrying its message.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T> {
        match self.status {
            Status::Success => Ok(serde_json::from_value(Value::Object(self.payload.clone()))?),
            Status::NotFound | Status::Failed => Err(FinanceError::Upstream(
                self.error.clone().unwrap_or_else(|| "operation failed".to_string()),
            )),
        }
    }

    /// Wire form as a JSON value
    pub fn into_value(self) -> Value {
        let mut fields = self.payload;
        fields.insert(
            "status".to_string(),
            serde_json::to_value(self.status).unwrap_or(Value::Null),
        );
        if let Some(error) = self.error {
            fields.insert("error".to_string(), Value::String(error));
        }
        Value::Object(fields)
    }
}

impl TryFrom<Value> for Envelope {
    type Error = FinanceError;

    fn try_from(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
