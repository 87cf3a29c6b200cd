/// Read-only view over an Appwrite document body
use serde_json::{Map, Value};

/// Field holding the Appwrite document id
pub const DOCUMENT_ID_FIELD: &str = "$id";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPayload {
    fields: Map<String, Value>,
}

impl DocumentPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a payload from a JSON value; only objects are accepted
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    /// Document id, if present and non-blank
    pub fn document_id(&self) -> Option<String> {
        self.text(DOCUMENT_ID_FIELD)
            .filter(|id| !id.trim().is_empty())
    }

    /// Read a scalar field as text
    ///
    /// Strings are returned as is, numbers and booleans in their JSON text
    /// form. Null, arrays, objects and absent fields read as `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
