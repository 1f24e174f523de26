/*
[INPUT]:  Event name and payload from a resource operation
[OUTPUT]: Named events whose payload is shared across relays
[POS]:    Events layer - event records
[UPDATE]: When resource clients emit new payload shapes
*/

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::types::User;

/// Payload attached to an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    /// `login` / `logout`
    User { user: User },
    /// `updated`
    Updated { old: User, user: User },
    /// Request/response pair of a resource call
    Request { options: Value, result: Value },
}

/// A named event
///
/// Cloning or namespacing an event shares the payload; relayed events carry
/// the very same payload object as the original.
#[derive(Debug, Clone)]
pub struct Event {
    pub name: String,
    pub payload: Arc<EventPayload>,
}

impl Event {
    pub fn new(name: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            name: name.into(),
            payload: Arc::new(payload),
        }
    }

    /// `{ user }` event
    pub fn user(name: impl Into<String>, user: User) -> Self {
        Self::new(name, EventPayload::User { user })
    }

    /// `{ options, result }` event
    pub fn request(name: impl Into<String>, options: Value, result: Value) -> Self {
        Self::new(name, EventPayload::Request { options, result })
    }

    /// Same event renamed to `<namespace>.<name>`
    pub fn namespaced(&self, namespace: &str) -> Self {
        Self {
            name: format!("{namespace}.{}", self.name),
            payload: Arc::clone(&self.payload),
        }
    }

    /// User carried by a `{ user }` or `{ old, user }` payload
    pub fn user_payload(&self) -> Option<&User> {
        match self.payload.as_ref() {
            EventPayload::User { user } | EventPayload::Updated { user, .. } => Some(user),
            _ => None,
        }
    }
}
