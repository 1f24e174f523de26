/*
[INPUT]:  Session credentials
[OUTPUT]: Issued card details, card_created events
[POS]:    Resources layer - cards API
[UPDATE]: When cards endpoints change
*/

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Method;
use serde_json::{json, Value};

use crate::config::{ModuleConfig, ModuleOverlay};
use crate::events::EventEmitter;
use crate::http::{Result, Transport};
use crate::resources::{unknown_operation, Args, Resource, ResourceClient};

pub const DEFAULT_HOST: &str = "api-cards.hellofloat.com";
pub const NAMESPACE: &str = "cards";

const OPERATIONS: &[&str] = &["createCard", "getCard"];

/// Cards API client
#[derive(Debug)]
pub struct Cards {
    client: ResourceClient,
}

impl Cards {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            client: ResourceClient::new(ModuleConfig::new(DEFAULT_HOST, true), transport),
        }
    }

    pub fn init(&self, overlay: &ModuleOverlay) -> &Self {
        self.client.init(overlay);
        self
    }

    pub fn config(&self) -> ModuleConfig {
        self.client.config()
    }

    pub fn events(&self) -> &EventEmitter {
        self.client.events()
    }

    /// Issue a card for the session user
    ///
    /// POST /card
    pub async fn create_card(&self) -> Result<Value> {
        self.client
            .send_and_emit(Method::POST, "/card", json!({}), Some(json!({})), "card_created")
            .await
    }

    /// GET /card
    pub async fn get_card(&self) -> Result<Value> {
        self.client.send(Method::GET, "/card", None).await
    }
}

impl Resource for Cards {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn operations(&self) -> &'static [&'static str] {
        OPERATIONS
    }

    fn events(&self) -> &EventEmitter {
        self.client.events()
    }

    fn invoke<'a>(&'a self, method: &'a str, _args: Args) -> BoxFuture<'a, Result<Value>> {
        async move {
            match method {
                "createCard" => self.create_card().await,
                "getCard" => self.get_card().await,
                other => Err(unknown_operation(NAMESPACE, other)),
            }
        }
        .boxed()
    }
}
