/*
[INPUT]:  Shared transport and per-module configuration overlays
[OUTPUT]: Resource clients for users, passwords, scoring, accounts, cards
[POS]:    Resources layer - one client per remote resource group
[UPDATE]: When adding resource groups or operations
*/

pub mod accounts;
pub mod args;
pub mod cards;
pub mod client;
pub mod passwords;
pub mod scoring;
pub mod users;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::events::EventEmitter;
use crate::http::{FloatError, Result};

pub use accounts::Accounts;
pub use args::Args;
pub use cards::Cards;
pub use client::ResourceClient;
pub use passwords::Passwords;
pub use scoring::Scoring;
pub use users::Users;

/// A resource client whose operations can be invoked by name
///
/// `operations` lists every name `invoke` accepts; alias bindings are
/// validated against it before any call is made.
pub trait Resource: Send + Sync + std::fmt::Debug {
    /// Namespace used for nested aliases and relayed event names
    fn namespace(&self) -> &'static str;

    /// Names of the operations `invoke` dispatches
    fn operations(&self) -> &'static [&'static str];

    /// Emitter carrying this client's domain events
    fn events(&self) -> &EventEmitter;

    /// Run `method` with positional JSON arguments
    fn invoke<'a>(&'a self, method: &'a str, args: Args) -> BoxFuture<'a, Result<Value>>;
}

pub(crate) fn unknown_operation(namespace: &str, method: &str) -> FloatError {
    FloatError::Binding(format!("Invalid method on target ({namespace}): {method}"))
}
