//! Resource descriptors: one per managed collection.
//!
//! A [`Resource`] carries everything the generic handlers and stores need:
//! table name, allow-listed attribute columns, the unique column, and an explicit
//! setter table used by PATCH. Attributes are all text.

mod exec;
mod student;
mod teacher;

pub use exec::Exec;
pub use student::Student;
pub use teacher::Teacher;

use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Table name; also the URL collection segment.
    const TABLE: &'static str;
    /// Singular display name used in messages ("Teacher not found").
    const NAME: &'static str;
    /// Attribute columns in storage order, excluding `id`. Doubles as the filter/sort allow-list.
    const FIELDS: &'static [&'static str];
    /// Column whose value must be unique across the collection.
    const UNIQUE_FIELD: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Attribute values in `FIELDS` order.
    fn values(&self) -> Vec<&str>;

    /// Build a record from an id and attribute values in `FIELDS` order.
    fn from_parts(id: String, values: Vec<String>) -> Self;

    /// Assign one attribute by column name. Returns false for unknown names.
    fn set_field(&mut self, field: &str, value: String) -> bool;

    fn field(&self, name: &str) -> Option<&str> {
        let idx = Self::FIELDS.iter().position(|f| *f == name)?;
        self.values().get(idx).copied()
    }

    fn unique_value(&self) -> &str {
        self.field(Self::UNIQUE_FIELD).unwrap_or_default()
    }

    fn is_field(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }
}

/// Message used when the unique column collides, e.g. "Email already exists".
pub fn conflict_message<R: Resource>() -> String {
    let mut chars = R::UNIQUE_FIELD.chars();
    let label: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    };
    format!("{} already exists", label)
}

pub fn not_found_message<R: Resource>() -> String {
    format!("{} not found", R::NAME)
}

/// Merge a PATCH body into `record`. Unknown keys are ignored; a known key with a
/// non-string value fails the whole patch without touching the record.
pub fn apply_patch<R: Resource>(record: &mut R, updates: &Map<String, Value>) -> Result<(), AppError> {
    let mut staged = Vec::new();
    for (key, value) in updates {
        if key == "id" || !R::is_field(key) {
            continue;
        }
        match value {
            Value::String(s) => staged.push((key.as_str(), s.clone())),
            _ => {
                return Err(AppError::BadRequest(format!("{} must be a string", key)));
            }
        }
    }
    for (key, value) in staged {
        record.set_field(key, value);
    }
    Ok(())
}
