/*
[INPUT]:  Bank account details
[OUTPUT]: Linked bank accounts and credit score
[POS]:    Resources layer - scoring API
[UPDATE]: When scoring endpoints change
*/

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::config::{ModuleConfig, ModuleOverlay};
use crate::events::EventEmitter;
use crate::http::{Result, Transport};
use crate::resources::{unknown_operation, Args, Resource, ResourceClient};

pub const DEFAULT_HOST: &str = "api-scoring.hellofloat.com";
pub const NAMESPACE: &str = "scoring";

const OPERATIONS: &[&str] = &["addBank", "getBankAccount", "getScore"];

/// Scoring API client
#[derive(Debug)]
pub struct Scoring {
    client: ResourceClient,
}

impl Scoring {
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

    /// Link a bank account as a scoring source
    ///
    /// POST /source/bankaccount
    pub async fn add_bank<T: Serialize + ?Sized>(&self, overlay: &T) -> Result<Value> {
        let overlay = serde_json::to_value(overlay)?;
        self.client
            .send_and_emit(
                Method::POST,
                "/source/bankaccount",
                overlay.clone(),
                Some(overlay),
                "bank_added",
            )
            .await
    }

    /// GET /accounts
    pub async fn get_bank_account(&self) -> Result<Value> {
        self.client.send(Method::GET, "/accounts", None).await
    }

    /// GET /score
    pub async fn get_score(&self) -> Result<Value> {
        self.client.send(Method::GET, "/score", None).await
    }
}

impl Resource for Scoring {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn operations(&self) -> &'static [&'static str] {
        OPERATIONS
    }

    fn events(&self) -> &EventEmitter {
        self.client.events()
    }

    fn invoke<'a>(&'a self, method: &'a str, args: Args) -> BoxFuture<'a, Result<Value>> {
        async move {
            match method {
                "addBank" => self.add_bank(&args.body(0)).await,
                "getBankAccount" => self.get_bank_account().await,
                "getScore" => self.get_score().await,
                other => Err(unknown_operation(NAMESPACE, other)),
            }
        }
        .boxed()
    }
}
