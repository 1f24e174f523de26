/*
[INPUT]:  Password reset requests (email/phone) and reset tokens
[OUTPUT]: Reset results and password_reset_request/password_reset events
[POS]:    Resources layer - passwords API
[UPDATE]: When password endpoints change
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

pub const DEFAULT_HOST: &str = "api-auth.hellofloat.com";
pub const NAMESPACE: &str = "passwords";

const OPERATIONS: &[&str] = &["requestReset", "reset"];

/// Passwords API client
#[derive(Debug)]
pub struct Passwords {
    client: ResourceClient,
}

impl Passwords {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            client: ResourceClient::new(ModuleConfig::new(DEFAULT_HOST, false), transport),
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

    /// Ask for a password reset token to be sent
    ///
    /// POST /password_reset_request
    pub async fn request_reset<T: Serialize + ?Sized>(&self, options: &T) -> Result<Value> {
        let options = serde_json::to_value(options)?;
        self.client
            .send_and_emit(
                Method::POST,
                "/password_reset_request",
                options.clone(),
                Some(options),
                "password_reset_request",
            )
            .await
    }

    /// Set a new password using a reset token
    ///
    /// POST /password_reset
    pub async fn reset<T: Serialize + ?Sized>(&self, options: &T) -> Result<Value> {
        let options = serde_json::to_value(options)?;
        self.client
            .send_and_emit(
                Method::POST,
                "/password_reset",
                options.clone(),
                Some(options),
                "password_reset",
            )
            .await
    }
}

impl Resource for Passwords {
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
                "requestReset" => self.request_reset(&args.body(0)).await,
                "reset" => self.reset(&args.body(0)).await,
                other => Err(unknown_operation(NAMESPACE, other)),
            }
        }
        .boxed()
    }
}
