use serde::{Deserialize, Serialize};

/// Dynamic property value. Tuples travel as fixed-length arrays.
pub type Value = serde_json::Value;

/// Language-neutral form of a model instance handed to the rendering runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedModel {
    pub r#type: String,
    pub attributes: serde_json::Map<String, Value>,
}
