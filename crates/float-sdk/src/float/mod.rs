/*
[INPUT]:  FloatConfig and resource clients
[OUTPUT]: Facade exposing aliased operations and namespaced events
[POS]:    Facade layer - multiplexes resource clients behind one object
[UPDATE]: When adding resource clients or facade accessors
*/

pub mod binding;
pub mod builder;

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::FloatConfig;
use crate::events::{Event, EventEmitter};
use crate::http::{FloatError, Result};
use crate::resources::{Accounts, Args, Cards, Passwords, Scoring, Users};

pub use binding::{BindingTable, BoundOperation, MethodBinding};
pub use builder::FloatBuilder;

/// Float SDK facade
///
/// Owns one client per resource group. Aliased operations are reached through
/// [`Float::call`]; every resource event is re-emitted on [`Float::events`] as
/// `<namespace>.<event>` (for example `users.login`).
#[derive(Debug)]
pub struct Float {
    users: Arc<Users>,
    passwords: Arc<Passwords>,
    scoring: Arc<Scoring>,
    accounts: Arc<Accounts>,
    cards: Arc<Cards>,
    events: EventEmitter,
    bindings: BindingTable,
}

impl Float {
    /// Build with default aliases and an HTTP transport
    pub fn new(config: FloatConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: FloatConfig) -> FloatBuilder {
        FloatBuilder::new(config)
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub fn passwords(&self) -> &Passwords {
        &self.passwords
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn cards(&self) -> &Cards {
        &self.cards
    }

    /// Aggregated, namespaced events
    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    /// Subscribe to a namespaced event
    pub fn on<F>(&self, name: impl Into<String>, handler: F) -> &Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.events.on(name, handler);
        self
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Invoke an aliased operation, e.g. `getUser` or `accounts.addBank`
    pub async fn call(&self, name: &str, args: Args) -> Result<Value> {
        let operation = self
            .bindings
            .get(name)
            .ok_or_else(|| FloatError::Binding(format!("no operation bound as {name}")))?;
        debug!(
            alias = name,
            namespace = operation.namespace(),
            method = operation.method(),
            "invoking bound operation"
        );
        operation.call(args).await
    }
}
