/*
[INPUT]:  Handler registrations and emitted events
[OUTPUT]: Synchronous dispatch to named and catch-all handlers
[POS]:    Events layer - thread-safe emitter
[UPDATE]: When changing dispatch order or subscription kinds
*/

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use super::event::Event;

/// Event handler
pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    named: HashMap<String, Vec<Handler>>,
    any: Vec<Handler>,
    forwards: Vec<Handler>,
}

/// Thread-safe event emitter
///
/// Handlers run synchronously inside `emit`: first those registered for the
/// event's name (in registration order), then catch-all handlers, then
/// forwards. A forward therefore runs after every local handler, including
/// ones registered after it. No lock is held while handlers run, so a handler
/// may register handlers or emit.
#[derive(Clone, Default)]
pub struct EventEmitter {
    listeners: Arc<RwLock<Listeners>>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("EventEmitter")
            .field("events", &guard.named.keys().collect::<Vec<_>>())
            .field("catch_all", &guard.any.len())
            .field("forwards", &guard.forwards.len())
            .finish()
    }
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one event name
    pub fn on<F>(&self, name: impl Into<String>, handler: F) -> &Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let mut guard = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        guard
            .named
            .entry(name.into())
            .or_default()
            .push(Arc::new(handler));
        self
    }

    /// Subscribe to every event
    pub fn on_any<F>(&self, handler: F) -> &Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let mut guard = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        guard.any.push(Arc::new(handler));
        self
    }

    /// Forward every event elsewhere once all local handlers have run
    pub fn forward<F>(&self, handler: F) -> &Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let mut guard = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        guard.forwards.push(Arc::new(handler));
        self
    }

    /// Number of handlers registered for `name` (catch-all handlers excluded)
    pub fn listener_count(&self, name: &str) -> usize {
        let guard = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        guard.named.get(name).map_or(0, Vec::len)
    }

    /// Dispatch an event; returns whether any handler observed it
    pub fn emit(&self, event: Event) -> bool {
        let (named, any, forwards) = {
            let guard = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
            let named = guard.named.get(&event.name).cloned().unwrap_or_default();
            (named, guard.any.clone(), guard.forwards.clone())
        };

        if event.name == "error" && named.is_empty() {
            warn!(payload = ?event.payload, "error event emitted without an error listener");
        }

        for handler in named.iter().chain(any.iter()).chain(forwards.iter()) {
            handler(&event);
        }

        !(named.is_empty() && any.is_empty() && forwards.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;
    use std::sync::Mutex;

    #[test]
    fn test_named_handlers_run_before_catch_all() {
        let emitter = EventEmitter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = seen.clone();
        emitter.on_any(move |event| log.lock().unwrap().push(format!("any:{}", event.name)));
        let log = seen.clone();
        emitter.on("login", move |event| log.lock().unwrap().push(format!("named:{}", event.name)));

        assert!(emitter.emit(Event::user("login", User::with_id("u1"))));
        assert_eq!(*seen.lock().unwrap(), vec!["named:login", "any:login"]);
    }

    #[test]
    fn test_forward_runs_after_later_handlers() {
        let emitter = EventEmitter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = seen.clone();
        emitter.forward(move |event| log.lock().unwrap().push(format!("forward:{}", event.name)));
        let log = seen.clone();
        emitter.on_any(move |event| log.lock().unwrap().push(format!("any:{}", event.name)));
        let log = seen.clone();
        emitter.on("login", move |event| log.lock().unwrap().push(format!("named:{}", event.name)));

        assert!(emitter.emit(Event::user("login", User::with_id("u1"))));
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["named:login", "any:login", "forward:login"]
        );
    }

    #[test]
    fn test_emit_without_listeners() {
        let emitter = EventEmitter::new();
        assert!(!emitter.emit(Event::user("logout", User::with_id("u1"))));
        assert_eq!(emitter.listener_count("logout"), 0);
    }

    #[test]
    fn test_handler_may_reenter_emitter() {
        let emitter = EventEmitter::new();
        let inner = emitter.clone();
        let count = Arc::new(Mutex::new(0));
        let seen = count.clone();
        emitter.on("second", move |_| *seen.lock().unwrap() += 1);
        emitter.on("first", move |event| {
            inner.emit(Event::new("second", event.payload.as_ref().clone()));
        });

        emitter.emit(Event::user("first", User::with_id("u1")));
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(emitter.listener_count("first"), 1);
    }
}
