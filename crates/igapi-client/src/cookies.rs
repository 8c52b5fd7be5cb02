//! Cookie storage shared between the transport and the session view.
//!
//! The transport upserts cookies from every response; everything else only
//! reads. The jar serializes to JSON for the persisted settings blob.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Domain the session cookies live under.
pub const COOKIE_DOMAIN: &str = "instagram.com";

const AUTH_COOKIES: [&str; 2] = ["ds_user_id", "ds_user"];

/// Read access to cookie values, the only capability the session view needs.
pub trait CookieSource: Send + Sync {
    fn cookie_value(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name:    String,
    pub value:   String,
    /// Without a leading dot.
    pub domain:  String,
    #[serde(default = "root_path")]
    pub path:    String,
    /// Unix seconds. `None` for session cookies.
    #[serde(default)]
    pub expires: Option<i64>,
}

fn root_path() -> String { "/".to_string() }

impl StoredCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, domain: &str) -> Self {
        Self {
            name:    name.into(),
            value:   value.into(),
            domain:  normalize_domain(domain),
            path:    root_path(),
            expires: None,
        }
    }

    pub fn expires(mut self, unix_secs: i64) -> Self {
        self.expires = Some(unix_secs);
        self
    }

    pub fn is_expired(&self, now: i64) -> bool { self.expires.is_some_and(|at| at <= now) }

    /// Whether the cookie would be sent to `host`.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = normalize_domain(host);
        host == self.domain || host.ends_with(&format!(".{}", self.domain))
    }

    /// Parse a `Set-Cookie` header value received from `host`.
    pub fn parse_set_cookie(header: &str, host: &str, now: i64) -> Option<Self> {
        let parsed = cookie::Cookie::parse(header.to_string()).ok()?;
        let expires = match parsed.max_age() {
            Some(max_age) => Some(now.saturating_add(max_age.whole_seconds())),
            None => parsed.expires_datetime().map(|at| at.unix_timestamp()),
        };

        Some(Self {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain: normalize_domain(parsed.domain().unwrap_or(host)),
            path: parsed.path().unwrap_or("/").to_string(),
            expires,
        })
    }
}

fn normalize_domain(domain: &str) -> String { domain.trim_start_matches('.').to_ascii_lowercase() }

fn now_unix() -> i64 { chrono::Utc::now().timestamp() }

type CookieKey = (String, String, String);

#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: RwLock<BTreeMap<CookieKey, StoredCookie>>,
}

impl CookieJar {
    pub fn new() -> Self { Self::default() }

    /// Restore a jar produced by [`CookieJar::dump`].
    pub fn load(dump: &str) -> Result<Self> {
        let jar = Self::new();
        if dump.trim().is_empty() {
            return Ok(jar);
        }
        let cookies: Vec<StoredCookie> = serde_json::from_str(dump)?;
        for cookie in cookies {
            jar.store(cookie);
        }
        Ok(jar)
    }

    pub fn dump(&self) -> Result<String> {
        let cookies: Vec<StoredCookie> = self.cookies.read().values().cloned().collect();
        Ok(serde_json::to_string(&cookies)?)
    }

    /// Insert or replace a cookie. An already expired cookie removes its
    /// stored counterpart instead.
    pub fn insert(&self, cookie: StoredCookie) {
        if cookie.is_expired(now_unix()) {
            let key = (cookie.domain, cookie.path, cookie.name);
            self.cookies.write().remove(&key);
        } else {
            self.store(cookie);
        }
    }

    fn store(&self, cookie: StoredCookie) {
        let key = (cookie.domain.clone(), cookie.path.clone(), cookie.name.clone());
        self.cookies.write().insert(key, cookie);
    }

    /// Value of an unexpired cookie visible to `domain`.
    pub fn value(&self, domain: &str, name: &str) -> Option<String> {
        let now = now_unix();
        self.cookies
            .read()
            .values()
            .filter(|c| c.name == name && c.matches_host(domain) && !c.is_expired(now))
            .max_by_key(|c| c.domain.len())
            .map(|c| c.value.clone())
    }

    /// `Cookie` header value for a request to `host`.
    pub fn header_for(&self, host: &str) -> Option<String> {
        let now = now_unix();
        let pairs: Vec<String> = self
            .cookies
            .read()
            .values()
            .filter(|c| c.matches_host(host) && !c.is_expired(now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        (!pairs.is_empty()).then(|| pairs.join("; "))
    }

    /// Earliest expiry among the auth cookies that carry one.
    pub fn auth_expires(&self) -> Option<i64> {
        self.cookies
            .read()
            .values()
            .filter(|c| AUTH_COOKIES.contains(&c.name.as_str()))
            .filter_map(|c| c.expires)
            .min()
    }

    pub fn len(&self) -> usize { self.cookies.read().len() }

    pub fn is_empty(&self) -> bool { self.cookies.read().is_empty() }

    pub fn clear(&self) { self.cookies.write().clear(); }
}

impl CookieSource for CookieJar {
    fn cookie_value(&self, name: &str) -> Option<String> { self.value(COOKIE_DOMAIN, name) }
}

#[cfg(feature = "reqwest")]
impl reqwest::cookie::CookieStore for CookieJar {
    fn set_cookies(
        &self,
        cookie_headers: &mut dyn Iterator<Item = &reqwest::header::HeaderValue>,
        url: &reqwest::Url,
    ) {
        let Some(host) = url.host_str() else {
            return;
        };
        let now = now_unix();
        for header in cookie_headers {
            let Ok(raw) = header.to_str() else {
                continue;
            };
            if let Some(cookie) = StoredCookie::parse_set_cookie(raw, host, now) {
                self.insert(cookie);
            }
        }
    }

    fn cookies(&self, url: &reqwest::Url) -> Option<reqwest::header::HeaderValue> {
        let header = self.header_for(url.host_str()?)?;
        reqwest::header::HeaderValue::from_str(&header).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_matches_subdomains() {
        let jar = CookieJar::new();
        jar.insert(StoredCookie::new("csrftoken", "abc", ".instagram.com"));
        assert_eq!(jar.value("i.instagram.com", "csrftoken").as_deref(), Some("abc"));
        assert_eq!(jar.cookie_value("csrftoken").as_deref(), Some("abc"));
        assert_eq!(jar.value("example.com", "csrftoken"), None);
        assert_eq!(jar.cookie_value("ds_user_id"), None);
    }

    #[test]
    fn insert_replaces() {
        let jar = CookieJar::new();
        jar.insert(StoredCookie::new("csrftoken", "one", "instagram.com"));
        jar.insert(StoredCookie::new("csrftoken", "two", ".instagram.com"));
        assert_eq!(jar.len(), 1);
        assert_eq!(jar.cookie_value("csrftoken").as_deref(), Some("two"));
    }

    #[test]
    fn expired_cookie_deletes() {
        let jar = CookieJar::new();
        jar.insert(StoredCookie::new("sessionid", "s", "instagram.com"));
        jar.insert(StoredCookie::new("sessionid", "", "instagram.com").expires(0));
        assert!(jar.is_empty());
    }

    #[test]
    fn parse_set_cookie_attributes() {
        let now = 1_700_000_000;
        let cookie = StoredCookie::parse_set_cookie(
            "ds_user_id=123; Domain=.instagram.com; Path=/; Max-Age=7776000; Secure",
            "i.instagram.com",
            now,
        )
        .unwrap();
        assert_eq!(cookie.name, "ds_user_id");
        assert_eq!(cookie.value, "123");
        assert_eq!(cookie.domain, "instagram.com");
        assert_eq!(cookie.expires, Some(now + 7_776_000));

        let host_only = StoredCookie::parse_set_cookie("mid=xyz", "i.instagram.com", now).unwrap();
        assert_eq!(host_only.domain, "i.instagram.com");
        assert_eq!(host_only.expires, None);
    }

    #[test]
    fn dump_and_load() {
        let jar = CookieJar::new();
        jar.insert(StoredCookie::new("csrftoken", "abc", "instagram.com"));
        jar.insert(StoredCookie::new("ds_user_id", "123", "instagram.com").expires(4_000_000_000));

        let restored = CookieJar::load(&jar.dump().unwrap()).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.cookie_value("csrftoken").as_deref(), Some("abc"));
        assert_eq!(restored.auth_expires(), Some(4_000_000_000));
        assert!(CookieJar::load("").unwrap().is_empty());
        assert!(CookieJar::load("not json").is_err());
    }

    #[test]
    fn auth_expires_takes_earliest() {
        let jar = CookieJar::new();
        jar.store(StoredCookie::new("ds_user", "alice", "instagram.com"));
        jar.store(StoredCookie::new("ds_user_id", "123", "instagram.com").expires(1_000));
        assert_eq!(jar.auth_expires(), Some(1_000));

        jar.store(StoredCookie::new("ds_user", "alice", "instagram.com").expires(500));
        assert_eq!(jar.auth_expires(), Some(500));

        jar.store(StoredCookie::new("csrftoken", "abc", "instagram.com").expires(10));
        assert_eq!(jar.auth_expires(), Some(500));
    }

    #[test]
    fn header_for_host() {
        let jar = CookieJar::new();
        assert_eq!(jar.header_for("i.instagram.com"), None);
        jar.insert(StoredCookie::new("a", "1", "instagram.com"));
        jar.insert(StoredCookie::new("b", "2", "instagram.com"));
        jar.insert(StoredCookie::new("c", "3", "facebook.com"));
        assert_eq!(jar.header_for("i.instagram.com").as_deref(), Some("a=1; b=2"));
    }
}
