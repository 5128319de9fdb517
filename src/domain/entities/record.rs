//! Opaque backend records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a backend record. Integer ids and UUIDs are both in use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric primary key.
    Int(i64),
    /// Textual key such as a UUID, kept verbatim.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl RecordId {
    /// Returns the id as a single escaped URL path segment.
    ///
    /// `None` for ids that would not stay one segment (empty, `.` or `..`).
    #[must_use]
    pub fn path_segment(&self) -> Option<String> {
        match self {
            Self::Int(id) => Some(id.to_string()),
            Self::Text(id) if id.is_empty() || id == "." || id == ".." => None,
            Self::Text(id) => Some(
                url::form_urlencoded::byte_serialize(id.as_bytes())
                    .collect::<String>()
                    .replace('+', "%20"),
            ),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Backend entity (filament, spool, file, ...) carried without schema checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(Map<String, Value>);

impl EntityRecord {
    /// Creates empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Sets a field, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the record id, if the server sent one.
    #[must_use]
    pub fn id(&self) -> Option<RecordId> {
        match self.0.get("id")? {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Consumes the record into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for EntityRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl From<EntityRecord> for Value {
    fn from(record: EntityRecord) -> Self {
        record.into_value()
    }
}

impl TryFrom<Value> for EntityRecord {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}
