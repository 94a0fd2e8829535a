//! Teacher records: name, contact, homeroom class and subject.

use super::Resource;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Teacher {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class: String,
    pub subject: String,
}

impl Resource for Teacher {
    const TABLE: &'static str = "teachers";
    const NAME: &'static str = "Teacher";
    const FIELDS: &'static [&'static str] = &["first_name", "last_name", "email", "class", "subject"];
    const UNIQUE_FIELD: &'static str = "email";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn values(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str(), self.class.as_str(), self.subject.as_str()]
    }

    fn from_parts(id: String, values: Vec<String>) -> Self {
        let mut it = values.into_iter();
        Teacher {
            id,
            first_name: it.next().unwrap_or_default(),
            last_name: it.next().unwrap_or_default(),
            email: it.next().unwrap_or_default(),
            class: it.next().unwrap_or_default(),
            subject: it.next().unwrap_or_default(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        match field {
            "first_name" => self.first_name = value,
            "last_name" => self.last_name = value,
            "email" => self.email = value,
            "class" => self.class = value,
            "subject" => self.subject = value,
            _ => return false,
        }
        true
    }
}
