use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An API operation. Everything but `responses` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,
}

/// A response keyed by status code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}
