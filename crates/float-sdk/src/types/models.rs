/*
[INPUT]:  Users API schema
[OUTPUT]: User records kept verbatim, with typed accessors
[POS]:    Data layer - response models
[UPDATE]: When the users API adds or renames fields
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A Float user record
///
/// Only the identifier is typed; every other field is kept exactly as the
/// server sent it, explicit nulls included. Equality is structural over the
/// whole record. Numeric identifiers are normalized to strings.
///
/// ```json
/// {
///   "id": "177f2006-bd93-4b42-b630-d0ff7d797cb0",
///   "email": "person@place.com",
///   "first_name": "First",
///   "verified": { "email": false, "phone": true, "address": false, "birthDate": false },
///   "createdAt": "2015-10-17T02:54:36.097Z",
///   "deletedAt": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl User {
    /// Minimal record carrying only an identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Same identity, regardless of the other fields
    pub fn same_identity(&self, other: &User) -> bool {
        self.id == other.id
    }

    /// Raw value of a field; `Some(Value::Null)` when the server sent null
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String value of a field, `None` when absent, null or not a string
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    pub fn phone(&self) -> Option<&str> {
        self.str_field("phone")
    }

    pub fn first_name(&self) -> Option<&str> {
        self.str_field("first_name")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.str_field("last_name")
    }

    /// Verification flags, when present and well formed
    pub fn verified(&self) -> Option<Verification> {
        self.field("verified")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("createdAt")
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("updatedAt")
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("deletedAt")
    }

    fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        let raw = self.str_field(name)?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|time| time.with_timezone(&Utc))
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "user id must be a string or number, got {other}"
        ))),
    }
}

/// Verification flags of a user's contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verification {
    pub email: bool,
    pub phone: bool,
    pub address: bool,
    #[serde(rename = "birthDate")]
    pub birth_date: bool,
}
