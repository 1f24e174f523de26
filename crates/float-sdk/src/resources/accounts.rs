/*
[INPUT]:  Bank account details and account identifiers
[OUTPUT]: Linked bank accounts, bank_added/bank_deleted events
[POS]:    Resources layer - accounts API
[UPDATE]: When accounts endpoints change
*/

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{ModuleConfig, ModuleOverlay};
use crate::events::EventEmitter;
use crate::http::{Result, Transport};
use crate::resources::{unknown_operation, Args, Resource, ResourceClient};

pub const DEFAULT_HOST: &str = "accounts.float.systems";
pub const NAMESPACE: &str = "accounts";

const OPERATIONS: &[&str] = &["addBank", "getBankAccount", "deleteBankAccount"];

/// Accounts API client
#[derive(Debug)]
pub struct Accounts {
    client: ResourceClient,
}

impl Accounts {
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

    /// POST /account/bank
    pub async fn add_bank<T: Serialize + ?Sized>(&self, overlay: &T) -> Result<Value> {
        let overlay = serde_json::to_value(overlay)?;
        self.client
            .send_and_emit(
                Method::POST,
                "/account/bank",
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

    /// DELETE /account/bank/{id}
    pub async fn delete_bank_account(&self, account_id: &str) -> Result<Value> {
        let path = format!("/account/bank/{account_id}");
        self.client
            .send_and_emit(
                Method::DELETE,
                &path,
                json!({ "id": account_id }),
                None,
                "bank_deleted",
            )
            .await
    }
}

impl Resource for Accounts {
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
                "deleteBankAccount" => {
                    let account_id = args.id(0, "account")?;
                    self.delete_bank_account(&account_id).await
                }
                other => Err(unknown_operation(NAMESPACE, other)),
            }
        }
        .boxed()
    }
}
