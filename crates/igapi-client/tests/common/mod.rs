#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use igapi_client::{
    Client, ClientBuilder, ClientConfig, CookieJar, HttpRequest, HttpResponse, Settings,
    StoredCookie, Transport,
};
use parking_lot::Mutex;

pub const TEST_KEY: &str = "test-signing-key";

/// HMAC-SHA256 of `{}` under [`TEST_KEY`].
pub const EMPTY_OBJECT_SIGNATURE: &str =
    "ef5f174d2d504f15a8116d18ba7dc8eaea6fa2635fea50790a1d5603af4261a6";

pub struct Reply {
    pub status:      u16,
    pub body:        String,
    pub set_cookies: Vec<StoredCookie>,
}

impl Reply {
    pub fn ok(body: &str) -> Self { Self::status(200, body) }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            set_cookies: Vec::new(),
        }
    }

    pub fn cookie(mut self, name: &str, value: &str) -> Self {
        self.set_cookies.push(StoredCookie::new(name, value, "instagram.com"));
        self
    }
}

/// Replies queued by the test, requests recorded by the transport.
#[derive(Default)]
pub struct Script {
    replies:  Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Script {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn reply(&self, reply: Reply) { self.replies.lock().push_back(reply); }

    pub fn requests(&self) -> Vec<HttpRequest> { self.requests.lock().clone() }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().last().cloned().expect("no request was sent")
    }

    pub fn transport(
        self: &Arc<Self>,
    ) -> impl FnOnce(&ClientConfig, Arc<CookieJar>) -> igapi_client::Result<ScriptedTransport> {
        let script = Arc::clone(self);
        move |_config, cookies| Ok(ScriptedTransport { script, cookies })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("no scripted reply left")]
pub struct ScriptExhausted;

pub struct ScriptedTransport {
    script:  Arc<Script>,
    cookies: Arc<CookieJar>,
}

impl Transport for ScriptedTransport {
    type Error = ScriptExhausted;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        self.script.requests.lock().push(request);
        let reply = self.script.replies.lock().pop_front().ok_or(ScriptExhausted)?;
        for cookie in reply.set_cookies {
            self.cookies.insert(cookie);
        }
        Ok(HttpResponse::new(reply.status, reply.body))
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        signature_key: TEST_KEY.to_string(),
        ..ClientConfig::default()
    }
}

/// Settings of an established session for user 123 / alice.
pub fn logged_in_settings() -> Settings {
    let jar = CookieJar::new();
    jar.insert(StoredCookie::new("csrftoken", "csrf-1", "instagram.com"));
    jar.insert(StoredCookie::new("ds_user_id", "123", "instagram.com").expires(4_000_000_000));
    jar.insert(StoredCookie::new("ds_user", "alice", "instagram.com").expires(4_000_000_000));
    Settings {
        uuid: Some("6384e2b2-184b-cbf5-8ecc-f10ca7a6563c".to_string()),
        device_id: Some("android-0123456789abcdef".to_string()),
        ad_id: Some("8705ed5e-351f-3807-9346-9949e0aada43".to_string()),
        session_id: Some("00000000-0000-0000-0000-000000000001".to_string()),
        cookie: Some(jar.dump().unwrap()),
        created_ts: Some(1_700_000_000),
    }
}

pub fn logged_in_client(script: &Arc<Script>) -> Client<ScriptedTransport> {
    ClientBuilder::new(test_config())
        .settings(logged_in_settings())
        .build(script.transport())
        .unwrap()
}

pub fn anonymous_client(script: &Arc<Script>) -> Client<ScriptedTransport> {
    ClientBuilder::new(test_config()).build(script.transport()).unwrap()
}
