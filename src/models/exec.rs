//! Exec (school staff account) records.

use super::Resource;
use serde::{Deserialize, Serialize};

/// School executive (staff account holder). Credentials are not part of this API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub role: String,
}

impl Resource for Exec {
    const TABLE: &'static str = "execs";
    const NAME: &'static str = "Exec";
    const FIELDS: &'static [&'static str] = &["first_name", "last_name", "email", "username", "role"];
    const UNIQUE_FIELD: &'static str = "email";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn values(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str(), self.username.as_str(), self.role.as_str()]
    }

    fn from_parts(id: String, values: Vec<String>) -> Self {
        let mut it = values.into_iter();
        Exec {
            id,
            first_name: it.next().unwrap_or_default(),
            last_name: it.next().unwrap_or_default(),
            email: it.next().unwrap_or_default(),
            username: it.next().unwrap_or_default(),
            role: it.next().unwrap_or_default(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        match field {
            "first_name" => self.first_name = value,
            "last_name" => self.last_name = value,
            "email" => self.email = value,
            "username" => self.username = value,
            "role" => self.role = value,
            _ => return false,
        }
        true
    }
}
