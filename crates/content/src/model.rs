use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// Response envelope of the content API: `{ "code": 200, "result": ... }`.
///
/// Only `result` is required; `code` is kept as whatever JSON the API sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentEnvelope {
    #[serde(default)]
    pub code: Option<Value>,
    pub result: Value,
}

impl ContentEnvelope {
    /// Extracts the envelope from a parsed response body. A body without `result` is rejected.
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        serde_json::from_value(value).map_err(|err| FetchError::ResponseParsing(err.to_string()))
    }
}

/// Content attached to a request once both the page and the menu were fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentData {
    pub page: Value,
    pub menu: Value,
}
