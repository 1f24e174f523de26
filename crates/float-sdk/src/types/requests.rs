/*
[INPUT]:  Caller-supplied request parameters
[OUTPUT]: Typed request structs with serialization support
[POS]:    Data layer - request payloads
[UPDATE]: When API request bodies change
*/

use serde::{Deserialize, Serialize};

/// Which user `Users::get` should resolve
///
/// No id resolves the logged-in user. `force` skips the session cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserQuery {
    pub id: Option<String>,
    pub force: bool,
}

impl UserQuery {
    /// The logged-in user, served from cache when possible
    pub fn session() -> Self {
        Self::default()
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            force: false,
        }
    }

    /// Always hit the network
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }
}

impl From<&str> for UserQuery {
    fn from(id: &str) -> Self {
        Self::id(id)
    }
}

impl From<String> for UserQuery {
    fn from(id: String) -> Self {
        Self::id(id)
    }
}

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

impl Credentials {
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone: None,
            password: password.into(),
        }
    }

    pub fn phone(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: None,
            phone: Some(phone.into()),
            password: password.into(),
        }
    }
}

/// Body of `POST /password_reset_request` (at least one of email or phone)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `POST /password_reset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
}
