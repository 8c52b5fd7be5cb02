//! Session credentials, read through to the cookie store on every access.
//!
//! Nothing here is cached: the transport may refresh cookies between calls.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cookies::CookieSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedParams {
    #[serde(rename = "_csrftoken")]
    pub csrf_token: Option<String>,
    #[serde(rename = "_uuid")]
    pub uuid:       String,
    #[serde(rename = "_uid")]
    pub user_id:    Option<String>,
}

impl AuthenticatedParams {
    /// As request fields. Absent values become JSON `null`.
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("_csrftoken".to_string(), self.csrf_token.clone().into());
        params.insert("_uuid".to_string(), self.uuid.clone().into());
        params.insert("_uid".to_string(), self.user_id.clone().into());
        params
    }
}

#[derive(Clone)]
pub struct SessionState {
    cookies: Arc<dyn CookieSource>,
    uuid:    String,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("uuid", &self.uuid)
            .field("authenticated_user_id", &self.authenticated_user_id())
            .finish()
    }
}

impl SessionState {
    pub fn new(cookies: Arc<dyn CookieSource>, uuid: impl Into<String>) -> Self {
        Self {
            cookies,
            uuid: uuid.into(),
        }
    }

    pub fn uuid(&self) -> &str { &self.uuid }

    pub fn csrf_token(&self) -> Option<String> { self.cookies.cookie_value("csrftoken") }

    pub fn authenticated_user_id(&self) -> Option<String> { self.cookies.cookie_value("ds_user_id") }

    pub fn authenticated_user_name(&self) -> Option<String> { self.cookies.cookie_value("ds_user") }

    pub fn is_authenticated(&self) -> bool { self.authenticated_user_id().is_some() }

    /// `{user_id}_{uuid}`, or `None` before login.
    pub fn rank_token(&self) -> Option<String> {
        self.authenticated_user_id()
            .map(|user_id| format!("{user_id}_{}", self.uuid))
    }

    pub fn authenticated_params(&self) -> AuthenticatedParams {
        AuthenticatedParams {
            csrf_token: self.csrf_token(),
            uuid:       self.uuid.clone(),
            user_id:    self.authenticated_user_id(),
        }
    }
}
