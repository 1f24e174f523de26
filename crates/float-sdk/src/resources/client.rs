/*
[INPUT]:  Module defaults, overlays, shared transport
[OUTPUT]: Configured per-module request helper with its own event emitter
[POS]:    Resources layer - common core of every resource client
[UPDATE]: When changing how resource clients build or send requests
*/

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::Method;
use serde_json::Value;

use crate::config::{ModuleConfig, ModuleOverlay};
use crate::events::{Event, EventEmitter};
use crate::http::{ApiRequest, Result, Transport};

/// Configuration, transport and events of one resource client
#[derive(Debug)]
pub struct ResourceClient {
    defaults: ModuleConfig,
    config: RwLock<ModuleConfig>,
    transport: Arc<dyn Transport>,
    events: EventEmitter,
}

impl ResourceClient {
    pub fn new(defaults: ModuleConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: RwLock::new(defaults.clone()),
            defaults,
            transport,
            events: EventEmitter::new(),
        }
    }

    /// Replace the configuration with `overlay` merged onto the built-in defaults
    pub fn init(&self, overlay: &ModuleOverlay) {
        let merged = self.defaults.merged(overlay);
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *guard = merged;
    }

    pub fn config(&self) -> ModuleConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    pub fn emit(&self, event: Event) {
        self.events.emit(event);
    }

    /// Send one request to `path` on the configured host
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let config = self.config();
        let mut request =
            ApiRequest::new(method, config.endpoint(path)?).with_credentials(config.with_credentials);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.transport.send(request).await
    }

    /// Send one request and, on success, emit `{ options, result }` under `event`
    pub async fn send_and_emit(
        &self,
        method: Method,
        path: &str,
        options: Value,
        body: Option<Value>,
        event: &str,
    ) -> Result<Value> {
        let result = self.send(method, path, body).await?;
        self.emit(Event::request(event, options, result.clone()));
        Ok(result)
    }
}
