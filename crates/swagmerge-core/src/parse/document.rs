use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::Operation;

/// Top-level Swagger 2.0 document as generated into `docs.go`.
///
/// Only `paths` and `definitions` are modelled; every other key is carried
/// through untouched, in its original position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SwaggerDoc {
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub definitions: IndexMap<String, serde_json::Value>,
}

/// A path item. Only `post` is rewritten, so it is the only verb given a type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl SwaggerDoc {
    pub fn has_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }
}
