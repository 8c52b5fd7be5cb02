//! The signing and dispatch core.
//!
//! [`Client`] owns the device identity and signing key for its whole
//! lifetime. Session values are read from the shared cookie jar on every
//! access, so nothing here needs locking.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use igapi_identity::{
    DeviceIdentity, DeviceProfile, generate_ad_id, generate_device_id, generate_uuid,
};
use igapi_sign::SigningKey;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::classify::{FailedResponse, classify};
use crate::config::{ClientConfig, Credentials};
use crate::cookies::{CookieJar, CookieSource};
use crate::endpoints::accounts;
use crate::error::{Error, ErrorResponse, Result};
use crate::headers::DefaultHeaders;
use crate::session::{AuthenticatedParams, SessionState};
use crate::settings::{Settings, non_empty};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Called with the fresh settings after every successful login.
pub type LoginCallback = Box<dyn Fn(&Settings) + Send + Sync>;

/// Request payload of a [`Call`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No payload: the call is a GET.
    #[default]
    None,
    /// POST with an empty body.
    Empty,
    /// POST fields. An empty map is sent as a GET.
    Fields(Map<String, Value>),
}

/// One API call, before it is resolved into an [`HttpRequest`].
///
/// # Examples
///
/// ```
/// use igapi_client::Call;
/// use serde_json::{Map, json};
///
/// let mut params = Map::new();
/// params.insert("disabled".to_string(), json!("1"));
///
/// let call = Call::post("accounts/set_presence_disabled/", params)
///     .query("edit", "true")
///     .version("v2");
/// assert_eq!(call.endpoint(), "accounts/set_presence_disabled/");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    endpoint: String,
    body:     Body,
    query:    Vec<(String, String)>,
    unsigned: bool,
    version:  String,
}

impl Call {
    fn new(endpoint: impl Into<String>, body: Body) -> Self {
        Self {
            endpoint: endpoint.into(),
            body,
            query: Vec::new(),
            unsigned: false,
            version: "v1".to_string(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self { Self::new(endpoint, Body::None) }

    pub fn post(endpoint: impl Into<String>, params: Map<String, Value>) -> Self {
        Self::new(endpoint, Body::Fields(params))
    }

    pub fn post_empty(endpoint: impl Into<String>) -> Self { Self::new(endpoint, Body::Empty) }

    /// Append a URL query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Send the fields as-is instead of inside a signed envelope.
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// API version segment of the URL. Default: `v1`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }
}

// Literal POST values: strings unquoted, null empty, everything else as JSON text.
fn field_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn restored(value: &Option<String>, generate: impl FnOnce() -> String) -> String {
    non_empty(value).map(str::to_string).unwrap_or_else(generate)
}

/// Assembles a [`Client`] from configuration, persisted settings and
/// optional credentials.
pub struct ClientBuilder {
    config:      ClientConfig,
    credentials: Option<Credentials>,
    settings:    Settings,
    on_login:    Option<LoginCallback>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("settings", &self.settings)
            .field("on_login", &self.on_login.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            credentials: None,
            settings: Settings::default(),
            on_login: None,
        }
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Restore identifiers and cookies from a previous session.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn on_login(mut self, callback: impl Fn(&Settings) + Send + Sync + 'static) -> Self {
        self.on_login = Some(Box::new(callback));
        self
    }

    /// Construct the client without any network I/O.
    ///
    /// Fails with [`Error::CookieExpired`] when the restored auth cookies are
    /// already past their expiry.
    pub fn build<T, F>(self, make_transport: F) -> Result<Client<T>>
    where
        T: Transport,
        F: FnOnce(&ClientConfig, Arc<CookieJar>) -> Result<T>,
    {
        self.config.validate()?;
        let device = self.config.resolved_device()?;

        let cookies = Arc::new(match non_empty(&self.settings.cookie) {
            Some(dump) => CookieJar::load(dump)?,
            None => CookieJar::new(),
        });

        if let Some(expires) = cookies.auth_expires() {
            if expires < Utc::now().timestamp() {
                return Err(Error::CookieExpired(ErrorResponse::new(format!(
                    "Cookie expired at {expires}"
                ))));
            }
        }

        let ad_seed = cookies
            .cookie_value("ds_user")
            .or_else(|| self.credentials.as_ref().map(|c| c.username.clone()));
        let identity = DeviceIdentity {
            uuid:       restored(&self.settings.uuid, || generate_uuid(false, None)),
            device_id:  restored(&self.settings.device_id, || generate_device_id(None)),
            ad_id:      restored(&self.settings.ad_id, || generate_ad_id(ad_seed.as_deref())),
            session_id: restored(&self.settings.session_id, || generate_uuid(false, None)),
        };

        let transport = make_transport(&self.config, Arc::clone(&cookies))?;
        let session = SessionState::new(cookies.clone(), identity.uuid.clone());
        let client = Client {
            transport,
            signing_key: self.config.signing_key(),
            headers: DefaultHeaders::new(),
            config: self.config,
            identity,
            device,
            cookies,
            session,
            credentials: self.credentials,
            on_login: self.on_login,
        };
        debug!("USERAGENT: {}", client.user_agent());
        Ok(client)
    }

    /// Construct the client and make sure it holds a session.
    ///
    /// Without restored cookies the client logs in with the configured
    /// credentials, or fails with [`Error::LoginRequired`] when there are none.
    pub async fn connect<T, F>(self, make_transport: F) -> Result<Client<T>>
    where
        T: Transport,
        F: FnOnce(&ClientConfig, Arc<CookieJar>) -> Result<T>,
    {
        let client = self.build(make_transport)?;
        client.ensure_session().await?;
        Ok(client)
    }

    #[cfg(feature = "reqwest")]
    pub async fn connect_reqwest(self) -> Result<Client<crate::transport::ReqwestTransport>> {
        self.connect(crate::transport::ReqwestTransport::new).await
    }
}

pub struct Client<T: Transport> {
    transport:   T,
    config:      ClientConfig,
    identity:    DeviceIdentity,
    signing_key: SigningKey,
    device:      DeviceProfile,
    cookies:     Arc<CookieJar>,
    session:     SessionState,
    headers:     DefaultHeaders,
    credentials: Option<Credentials>,
    on_login:    Option<LoginCallback>,
}

impl<T: Transport> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("identity", &self.identity)
            .field("device", &self.device)
            .field("session", &self.session)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Client<T> {
    pub fn builder(config: ClientConfig) -> ClientBuilder { ClientBuilder::new(config) }

    async fn ensure_session(&self) -> Result<()> {
        if !self.cookies.is_empty() {
            return Ok(());
        }
        if self.credentials.is_none() {
            return Err(Error::LoginRequired(ErrorResponse::new("login_required").code(400)));
        }
        accounts::login(self).await
    }

    /// Call the API and return the parsed JSON object.
    ///
    /// A 2xx response still fails when the body says `login_required` or
    /// carries neither `status: ok` nor an oEmbed `provider_url`.
    pub async fn call_api(&self, call: Call) -> Result<Map<String, Value>> {
        let response = self.dispatch(call).await?;
        let status = response.status;
        let body = response.body;

        let json = match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(json)) => json,
            Ok(_) => {
                return Err(Error::Client(
                    ErrorResponse::new("Unexpected response shape").code(status).body(body),
                ));
            }
            Err(e) => {
                return Err(Error::Client(
                    ErrorResponse::new(format!("Invalid JSON response: {e}")).code(status).body(body),
                ));
            }
        };

        let message = json.get("message").and_then(Value::as_str);
        if message == Some("login_required") {
            return Err(Error::LoginRequired(
                ErrorResponse::new("login_required").code(status).body(body),
            ));
        }

        let from_oembed = json
            .get("provider_url")
            .and_then(Value::as_str)
            .is_some_and(|url| !url.is_empty());
        let ok = json.get("status").and_then(Value::as_str) == Some("ok");
        if !from_oembed && !ok {
            let message = message.unwrap_or("Unknown error").to_string();
            return Err(Error::Client(ErrorResponse::new(message).code(status).body(body)));
        }

        Ok(json)
    }

    /// Call the API and return the body text without any envelope checks.
    pub async fn call_api_raw(&self, call: Call) -> Result<String> {
        Ok(self.dispatch(call).await?.body)
    }

    /// The request `call` resolves to, exactly as it would be sent.
    pub fn resolve(&self, call: Call) -> Result<HttpRequest> {
        let url = format!("{}{}", self.config.base_url(&call.version), call.endpoint);
        let (method, form) = match call.body {
            Body::Fields(params) if !params.is_empty() => {
                let form = if call.unsigned {
                    params.iter().map(|(k, v)| (k.clone(), field_value(v))).collect()
                } else {
                    self.signing_key.envelope(&params)?.form_fields()
                };
                (Method::Post, Some(form))
            }
            Body::Empty => (Method::Post, None),
            Body::None | Body::Fields(_) => (Method::Get, None),
        };

        Ok(HttpRequest {
            method,
            url,
            query: call.query,
            form,
            headers: self.default_headers(),
        })
    }

    async fn dispatch(&self, call: Call) -> Result<HttpResponse> {
        let request = self.resolve(call)?;
        debug!(method = %request.method, "REQUEST: {}", request.url);
        debug!(
            "DATA: query={:?} fields={:?}",
            request.query,
            request.form.as_ref().map(|f| f.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>())
        );

        let auth_cookie_present = self.session.is_authenticated();
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Error::Connection(ErrorResponse::new(e.to_string())))?;
        debug!(status = response.status, "RESPONSE: {}", response.body);

        if !response.is_success() {
            let err = classify(&FailedResponse {
                status: response.status,
                reason: &response.reason,
                body: &response.body,
                auth_cookie_present,
            });
            warn!(kind = ?err.kind(), status = response.status, "{err}");
            return Err(err);
        }
        Ok(response)
    }

    /// State worth persisting to resume this session later.
    pub fn settings(&self) -> Result<Settings> {
        Ok(Settings {
            uuid:       Some(self.identity.uuid.clone()),
            device_id:  Some(self.identity.device_id.clone()),
            ad_id:      Some(self.identity.ad_id.clone()),
            session_id: Some(self.identity.session_id.clone()),
            cookie:     Some(self.cookies.dump()?),
            created_ts: Some(Utc::now().timestamp()),
        })
    }

    pub(crate) fn notify_login(&self) -> Result<()> {
        if let Some(callback) = &self.on_login {
            callback(&self.settings()?);
        }
        Ok(())
    }

    pub fn user_agent(&self) -> String { self.device.user_agent() }

    /// Replace the device profile with the one encoded in `user_agent`.
    pub fn set_user_agent(&mut self, user_agent: &str) -> Result<()> {
        self.device = DeviceProfile::parse(user_agent)?;
        Ok(())
    }

    pub fn device(&self) -> &DeviceProfile { &self.device }

    pub fn identity(&self) -> &DeviceIdentity { &self.identity }

    pub fn uuid(&self) -> &str { &self.identity.uuid }

    pub fn device_id(&self) -> &str { &self.identity.device_id }

    pub fn ad_id(&self) -> &str { &self.identity.ad_id }

    /// Derived from the device id on every call.
    pub fn phone_id(&self) -> String { self.identity.phone_id() }

    /// Local offset from UTC in seconds.
    pub fn timezone_offset(&self) -> i32 { chrono::Local::now().offset().local_minus_utc() }

    pub fn radio_type(&self) -> &'static str { "wifi-none" }

    pub fn username(&self) -> Option<&str> { self.credentials.as_ref().map(|c| c.username.as_str()) }

    pub(crate) fn credentials(&self) -> Option<&Credentials> { self.credentials.as_ref() }

    pub fn csrftoken(&self) -> Option<String> { self.session.csrf_token() }

    #[deprecated(note = "use `csrftoken`")]
    pub fn token(&self) -> Option<String> {
        if self.config.report_deprecations {
            warn!("Client::token is deprecated, use Client::csrftoken");
        }
        self.csrftoken()
    }

    pub fn authenticated_user_id(&self) -> Option<String> { self.session.authenticated_user_id() }

    pub fn authenticated_user_name(&self) -> Option<String> { self.session.authenticated_user_name() }

    pub fn authenticated_params(&self) -> AuthenticatedParams { self.session.authenticated_params() }

    pub fn rank_token(&self) -> Option<String> { self.session.rank_token() }

    pub fn session(&self) -> &SessionState { &self.session }

    pub fn cookie_jar(&self) -> &Arc<CookieJar> { &self.cookies }

    pub fn config(&self) -> &ClientConfig { &self.config }

    pub fn signing_key(&self) -> &SigningKey { &self.signing_key }

    pub fn generate_uuid(&self, hex: bool, seed: Option<&str>) -> String { generate_uuid(hex, seed) }

    pub fn generate_device_id(&self, seed: Option<&str>) -> String { generate_device_id(seed) }

    /// Advertising id seeded by `seed`, else the logged in user name, else
    /// the configured username.
    pub fn generate_ad_id(&self, seed: Option<&str>) -> String {
        let seed = seed
            .map(str::to_string)
            .or_else(|| self.authenticated_user_name())
            .or_else(|| self.username().map(str::to_string));
        generate_ad_id(seed.as_deref())
    }

    pub fn default_headers(&self) -> Vec<(String, String)> {
        self.headers.render(&self.config, &self.user_agent())
    }
}
