/*
[INPUT]:  User queries, credentials, profile overlays
[OUTPUT]: User records, cached session user, login/logout/updated events
[POS]:    Resources layer - users API and session state machine
[UPDATE]: When users endpoints or session transitions change
*/

use std::sync::{Arc, PoisonError, RwLock};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::{ModuleConfig, ModuleOverlay};
use crate::events::{Event, EventEmitter, EventPayload};
use crate::http::{FloatError, Result, Transport};
use crate::resources::{unknown_operation, Args, Resource, ResourceClient};
use crate::types::{User, UserQuery};

pub const DEFAULT_HOST: &str = "api-auth.hellofloat.com";
pub const NAMESPACE: &str = "users";

const OPERATIONS: &[&str] = &["get", "login", "logout", "create", "update", "del"];

/// Users API client holding the session user
///
/// Operations that read or change the session are serialized per instance, so
/// the cached user always reflects calls in the order they were issued.
#[derive(Debug)]
pub struct Users {
    client: ResourceClient,
    session: RwLock<Option<User>>,
    op_lock: Mutex<()>,
}

impl Users {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            client: ResourceClient::new(ModuleConfig::new(DEFAULT_HOST, true), transport),
            session: RwLock::new(None),
            op_lock: Mutex::new(()),
        }
    }

    /// Re-initialize configuration from the defaults plus `overlay`
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

    /// Cached session user, if any
    pub fn current_user(&self) -> Option<User> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_session(&self, user: Option<User>) -> Option<User> {
        let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, user)
    }

    /// Fetch a user
    ///
    /// GET /user or GET /user/{id}
    ///
    /// Resolves the session user when no id is given, when nothing is cached,
    /// or when the id is the cached user's; such a query is served from cache
    /// unless `force` is set. A 400 answer means there is no such user.
    pub async fn get(&self, query: impl Into<UserQuery>) -> Result<Option<User>> {
        let query = query.into();
        let _guard = self.op_lock.lock().await;

        let cached = self.current_user();
        let resolving_session = match (&query.id, &cached) {
            (None, _) | (_, None) => true,
            (Some(id), Some(user)) => user.id == *id,
        };

        if resolving_session && !query.force {
            if let Some(user) = &cached {
                debug!(user_id = %user.id, "serving session user from cache");
                return Ok(Some(user.clone()));
            }
        }

        let path = match &query.id {
            Some(id) => format!("/user/{id}"),
            None => "/user".to_string(),
        };
        let user = match self.client.send(Method::GET, &path, None).await {
            Ok(body) => decode_optional_user(body)?,
            Err(err) if err.status() == Some(400) => None,
            Err(err) => return Err(err),
        };

        if resolving_session {
            self.set_session(user.clone());
        }

        match (&user, cached) {
            (None, Some(old)) if resolving_session => {
                info!(user_id = %old.id, "session ended on server");
                self.client.emit(Event::user("logout", old));
            }
            (Some(new), Some(old)) if old.same_identity(new) && old != *new => {
                info!(user_id = %new.id, "user changed on server");
                self.client.emit(Event::new(
                    "updated",
                    EventPayload::Updated {
                        old,
                        user: new.clone(),
                    },
                ));
            }
            (Some(new), None) => {
                info!(user_id = %new.id, "session user resolved");
                self.client.emit(Event::user("login", new.clone()));
            }
            _ => {}
        }

        Ok(user)
    }

    /// Create a user and make it the session user
    ///
    /// POST /user
    pub async fn create<T: Serialize + ?Sized>(&self, overlay: &T) -> Result<User> {
        let body = serde_json::to_value(overlay)?;
        let _guard = self.op_lock.lock().await;

        let user = decode_user(self.client.send(Method::POST, "/user", Some(body)).await?)?;
        self.start_session(user.clone());
        Ok(user)
    }

    /// Update a user; the session user is replaced only when it is the target
    ///
    /// PUT /user/{id}
    pub async fn update<T: Serialize + ?Sized>(&self, user_id: &str, overlay: &T) -> Result<User> {
        let body = serde_json::to_value(overlay)?;
        let _guard = self.op_lock.lock().await;

        let path = format!("/user/{user_id}");
        let user = decode_user(self.client.send(Method::PUT, &path, Some(body)).await?)?;

        if self.is_session_user(user_id) {
            if let Some(old) = self.set_session(Some(user.clone())) {
                info!(user_id = %user_id, "session user updated");
                self.client.emit(Event::new(
                    "updated",
                    EventPayload::Updated {
                        old,
                        user: user.clone(),
                    },
                ));
            }
        }

        Ok(user)
    }

    /// Delete a user; deleting the session user ends the session
    ///
    /// DELETE /user/{id}
    pub async fn del(&self, user_id: &str) -> Result<()> {
        let _guard = self.op_lock.lock().await;

        let path = format!("/user/{user_id}");
        self.client.send(Method::DELETE, &path, None).await?;

        if self.is_session_user(user_id) {
            if let Some(old) = self.set_session(None) {
                info!(user_id = %user_id, "session user deleted");
                self.client.emit(Event::user("logout", old));
            }
        }

        Ok(())
    }

    /// Log in, replacing any current session
    ///
    /// POST /login
    pub async fn login<T: Serialize + ?Sized>(&self, credentials: &T) -> Result<User> {
        let body = serde_json::to_value(credentials)?;
        let _guard = self.op_lock.lock().await;

        let user = decode_user(self.client.send(Method::POST, "/login", Some(body)).await?)?;
        self.start_session(user.clone());
        Ok(user)
    }

    /// Log out; a no-op without a session
    ///
    /// POST /logout
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.op_lock.lock().await;

        let Some(existing) = self.current_user() else {
            debug!("logout without session");
            return Ok(());
        };

        self.client.send(Method::POST, "/logout", None).await?;

        self.set_session(None);
        info!(user_id = %existing.id, "logged out");
        self.client.emit(Event::user("logout", existing));
        Ok(())
    }

    fn start_session(&self, user: User) {
        if let Some(old) = self.set_session(None) {
            info!(user_id = %old.id, "replacing session user");
            self.client.emit(Event::user("logout", old));
        }
        self.set_session(Some(user.clone()));
        info!(user_id = %user.id, "logged in");
        self.client.emit(Event::user("login", user));
    }

    fn is_session_user(&self, user_id: &str) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|user| user.id == user_id)
    }
}

impl Resource for Users {
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
                "get" => {
                    let query = match args.get(0) {
                        None => UserQuery::session(),
                        Some(Value::String(id)) => UserQuery::id(id.clone()),
                        Some(_) => args.decode(0, "query")?,
                    };
                    Ok(serde_json::to_value(self.get(query).await?)?)
                }
                "login" => {
                    let user = self.login(args.required(0, "credentials")?).await?;
                    Ok(serde_json::to_value(user)?)
                }
                "logout" => {
                    self.logout().await?;
                    Ok(Value::Null)
                }
                "create" => Ok(serde_json::to_value(self.create(&args.body(0)).await?)?),
                "update" => {
                    let user_id = args.id(0, "user")?;
                    let user = self.update(&user_id, &args.body(1)).await?;
                    Ok(serde_json::to_value(user)?)
                }
                "del" => {
                    self.del(&args.id(0, "user")?).await?;
                    Ok(Value::Null)
                }
                other => Err(unknown_operation(NAMESPACE, other)),
            }
        }
        .boxed()
    }
}

fn decode_user(body: Value) -> Result<User> {
    decode_optional_user(body)?
        .ok_or_else(|| FloatError::InvalidResponse("expected a user record".to_string()))
}

fn decode_optional_user(body: Value) -> Result<Option<User>> {
    match body {
        Value::Null => Ok(None),
        body => Ok(Some(serde_json::from_value(body)?)),
    }
}
