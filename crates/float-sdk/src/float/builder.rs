/*
[INPUT]:  FloatConfig, optional transport, extra alias bindings
[OUTPUT]: Fully wired Float facade or a construction error
[POS]:    Facade layer - construction and validation
[UPDATE]: When default bindings or construction steps change
*/

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::FloatConfig;
use crate::events::EventEmitter;
use crate::http::{FloatError, HttpTransport, Result, Transport};
use crate::resources::{Accounts, Cards, Passwords, Resource, Scoring, Users};

use super::binding::{BindingTable, MethodBinding};
use super::Float;

/// `(target namespace, [(method, alias)], nested namespace)`
type BindingSpec = (&'static str, &'static [(&'static str, &'static str)], Option<&'static str>);

const DEFAULT_BINDINGS: &[BindingSpec] = &[
    (
        "users",
        &[
            ("get", "getUser"),
            ("login", "login"),
            ("logout", "logout"),
            ("create", "createUser"),
            ("update", "updateUser"),
            ("del", "delUser"),
        ],
        None,
    ),
    (
        "passwords",
        &[
            ("requestReset", "requestPasswordReset"),
            ("reset", "resetPassword"),
        ],
        None,
    ),
    (
        "scoring",
        &[
            ("addBank", "addBankAccount"),
            ("getBankAccount", "getBankAccount"),
            ("getScore", "getScore"),
        ],
        None,
    ),
    (
        "accounts",
        &[
            ("addBank", "addBank"),
            ("getBankAccount", "getBankAccount"),
            ("deleteBankAccount", "deleteBankAccount"),
        ],
        Some("accounts"),
    ),
    (
        "cards",
        &[("createCard", "createCard"), ("getCard", "getCard")],
        None,
    ),
];

#[derive(Debug)]
struct ExtraBinding {
    target: String,
    methods: Vec<MethodBinding>,
    namespace: Option<String>,
}

/// Builder for `Float`
#[derive(Debug, Default)]
pub struct FloatBuilder {
    config: FloatConfig,
    transport: Option<Arc<dyn Transport>>,
    extra: Vec<ExtraBinding>,
}

impl FloatBuilder {
    pub fn new(config: FloatConfig) -> Self {
        Self {
            config,
            transport: None,
            extra: Vec::new(),
        }
    }

    /// Use `transport` instead of an `HttpTransport` built from the config
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Register extra aliases for the resource named `target`
    ///
    /// Validated in `build`, together with the default aliases.
    pub fn bind<I, M>(mut self, target: &str, methods: I, namespace: Option<&str>) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MethodBinding>,
    {
        self.extra.push(ExtraBinding {
            target: target.to_string(),
            methods: methods.into_iter().map(Into::into).collect(),
            namespace: namespace.map(str::to_string),
        });
        self
    }

    pub fn build(self) -> Result<Float> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_config(self.config.timeouts.clone())?),
        };

        let users = Arc::new(Users::new(transport.clone()));
        users.init(&self.config.users);
        let passwords = Arc::new(Passwords::new(transport.clone()));
        passwords.init(&self.config.passwords);
        let scoring = Arc::new(Scoring::new(transport.clone()));
        scoring.init(&self.config.scoring);
        let accounts = Arc::new(Accounts::new(transport.clone()));
        accounts.init(&self.config.accounts);
        let cards = Arc::new(Cards::new(transport));
        cards.init(&self.config.cards);

        let resources: [Arc<dyn Resource>; 5] = [
            users.clone(),
            passwords.clone(),
            scoring.clone(),
            accounts.clone(),
            cards.clone(),
        ];
        let find = |name: &str| {
            resources
                .iter()
                .find(|resource| resource.namespace() == name)
                .ok_or_else(|| FloatError::Binding(format!("unknown bind target: {name}")))
        };

        let mut bindings = BindingTable::new();
        for (target, pairs, namespace) in DEFAULT_BINDINGS {
            let methods: Vec<MethodBinding> = pairs
                .iter()
                .map(|(method, alias)| MethodBinding::aliased(*method, *alias))
                .collect();
            bindings.bind(find(target)?, &methods, *namespace)?;
        }
        for extra in &self.extra {
            bindings.bind(find(&extra.target)?, &extra.methods, extra.namespace.as_deref())?;
        }

        let events = EventEmitter::new();
        for resource in &resources {
            relay_events(resource.as_ref(), &events);
        }

        debug!(aliases = bindings.len(), "float facade constructed");

        Ok(Float {
            users,
            passwords,
            scoring,
            accounts,
            cards,
            events,
            bindings,
        })
    }
}

/// Re-emit every event of `source` on `sink` as `<namespace>.<name>`
///
/// The relay is a forward, so every handler registered on the resource runs
/// first, even ones added after construction. An `error` listener is always installed on the resource so error events
/// are logged even when the caller subscribes to none.
fn relay_events(source: &dyn Resource, sink: &EventEmitter) {
    let namespace = source.namespace();

    source.events().on("error", move |event| {
        error!(namespace = %namespace, payload = ?event.payload, "resource error event");
    });

    let sink = sink.clone();
    source.events().forward(move |event| {
        sink.emit(event.namespaced(namespace));
    });
}
