mod common;

use std::sync::Arc;

use common::{Reply, Script, anonymous_client, logged_in_client, logged_in_settings, test_config};
use igapi_client::sign::SignedEnvelope;
use igapi_client::{
    AuthenticatedParams, ClientBuilder, ErrorKind, Settings, StoredCookie,
};
use parking_lot::Mutex;
use serde_json::Value;

#[test]
fn authenticated_params_follow_the_cookie_jar() {
    let script = Script::new();
    let client = anonymous_client(&script);

    let params = client.authenticated_params();
    assert_eq!(
        params,
        AuthenticatedParams {
            csrf_token: None,
            uuid:       client.uuid().to_string(),
            user_id:    None,
        }
    );
    assert_eq!(client.rank_token(), None);

    client.cookie_jar().insert(StoredCookie::new("csrftoken", "tok", ".instagram.com"));
    client.cookie_jar().insert(StoredCookie::new("ds_user_id", "123", ".instagram.com"));

    let params = client.authenticated_params();
    assert_eq!(params.csrf_token.as_deref(), Some("tok"));
    assert_eq!(params.user_id.as_deref(), Some("123"));
    assert_eq!(client.rank_token(), Some(format!("123_{}", client.uuid())));
}

#[tokio::test]
async fn connect_without_session_or_credentials() {
    let script = Script::new();
    let err = ClientBuilder::new(test_config())
        .connect(script.transport())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LoginRequired);
    assert_eq!(err.code(), Some(400));
    assert!(script.requests().is_empty());
}

#[tokio::test]
async fn connect_with_restored_session_sends_nothing() {
    let script = Script::new();
    let client = ClientBuilder::new(test_config())
        .settings(logged_in_settings())
        .connect(script.transport())
        .await
        .unwrap();

    assert!(script.requests().is_empty());
    assert_eq!(client.authenticated_user_name().as_deref(), Some("alice"));
}

#[test]
fn stale_restored_cookies_are_rejected() {
    let cookies = vec![
        StoredCookie::new("csrftoken", "tok", "instagram.com"),
        StoredCookie::new("ds_user_id", "123", "instagram.com").expires(1_000),
    ];
    let dump = serde_json::to_string(&cookies).unwrap();
    let settings = Settings {
        cookie: Some(dump),
        ..Settings::default()
    };

    let script = Script::new();
    let err = ClientBuilder::new(test_config())
        .settings(settings)
        .build(script.transport())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CookieExpired);
}

#[test]
fn stale_user_id_cookie_is_rejected_beside_session_cookie() {
    let cookies = vec![
        StoredCookie::new("ds_user", "alice", "instagram.com"),
        StoredCookie::new("ds_user_id", "123", "instagram.com").expires(1_000),
    ];
    let settings = Settings {
        cookie: Some(serde_json::to_string(&cookies).unwrap()),
        ..Settings::default()
    };

    let script = Script::new();
    let err = ClientBuilder::new(test_config())
        .settings(settings)
        .build(script.transport())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CookieExpired);
}

#[test]
fn restored_settings_reproduce_identity() {
    let script = Script::new();
    let settings = logged_in_settings();
    let client = logged_in_client(&script);

    assert_eq!(client.uuid(), settings.uuid.as_deref().unwrap());
    assert_eq!(client.device_id(), "android-0123456789abcdef");
    assert_eq!(client.phone_id(), "cc1e95c6-5ad6-dde5-900c-a27bd5787c1a");

    let saved = client.settings().unwrap();
    assert_eq!(saved.uuid, settings.uuid);
    assert_eq!(saved.device_id, settings.device_id);
    assert_eq!(saved.ad_id, settings.ad_id);
    assert_eq!(saved.session_id, settings.session_id);

    let again = ClientBuilder::new(test_config())
        .settings(saved)
        .build(script.transport())
        .unwrap();
    assert_eq!(again.identity(), client.identity());
    assert_eq!(again.csrftoken().as_deref(), Some("csrf-1"));
}

#[test]
fn fresh_identity_seeds_ad_id_with_username() {
    let script = Script::new();
    let client = ClientBuilder::new(test_config())
        .credentials("alice", "secret")
        .build(script.transport())
        .unwrap();

    assert_eq!(client.ad_id(), "8705ed5e-351f-3807-9346-9949e0aada43");
    assert_eq!(client.generate_ad_id(None), client.ad_id());
    assert!(client.device_id().starts_with("android-"));
    assert_ne!(client.uuid(), client.identity().session_id);
}

#[test]
fn user_agent_override() {
    let script = Script::new();
    let mut client = anonymous_client(&script);
    let ua = "Instagram 10.0.0.1 Android (29/10; 420dpi; 1080x1920; Google; Pixel; sailfish; qcom; en_US; 12345)";

    client.set_user_agent(ua).unwrap();
    assert_eq!(client.user_agent(), ua);
    assert_eq!(client.device().model, "Pixel");
    assert!(client.set_user_agent("Mozilla/5.0").is_err());
    assert_eq!(client.user_agent(), ua);
}

fn signed_payload(body: &str) -> Value {
    let envelope = SignedEnvelope::parse(body, 4).unwrap();
    serde_json::from_str(&envelope.json_body).unwrap()
}

#[tokio::test]
async fn login_sequence() {
    let script = Script::new();
    script.reply(Reply::ok("").cookie("csrftoken", "pre"));
    script.reply(
        Reply::ok(r#"{"logged_in_user":{"pk":123,"username":"alice"},"status":"ok"}"#)
            .cookie("csrftoken", "post")
            .cookie("ds_user_id", "123")
            .cookie("ds_user", "alice"),
    );

    let saved: Arc<Mutex<Option<Settings>>> = Arc::default();
    let sink = Arc::clone(&saved);
    let client = ClientBuilder::new(test_config())
        .credentials("alice", "secret")
        .on_login(move |settings| *sink.lock() = Some(settings.clone()))
        .connect(script.transport())
        .await
        .unwrap();

    let requests = script.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.ends_with("/si/fetch_headers/"));
    let prelogin = signed_payload(requests[0].form_field("signed_body").unwrap());
    assert_eq!(prelogin["challenge_type"], "signup");
    assert_eq!(prelogin["guid"].as_str().unwrap().len(), 32);

    assert!(requests[1].url.ends_with("/accounts/login/"));
    let login = signed_payload(requests[1].form_field("signed_body").unwrap());
    assert_eq!(login["username"], "alice");
    assert_eq!(login["password"], "secret");
    assert_eq!(login["_csrftoken"], "pre");
    assert_eq!(login["device_id"], client.device_id());
    assert_eq!(login["guid"], client.uuid());
    assert_eq!(login["adid"], client.ad_id());
    assert_eq!(login["phone_id"], client.phone_id());
    assert_eq!(login["login_attempt_count"], "0");

    assert_eq!(client.csrftoken().as_deref(), Some("post"));
    assert_eq!(client.rank_token(), Some(format!("123_{}", client.uuid())));

    let saved = saved.lock().clone().expect("on_login was not called");
    assert_eq!(saved.uuid.as_deref(), Some(client.uuid()));
    assert!(saved.cookie.unwrap().contains("ds_user_id"));
}

#[tokio::test]
async fn login_without_csrf() {
    let script = Script::new();
    script.reply(Reply::ok("no cookies here"));

    let err = ClientBuilder::new(test_config())
        .credentials("alice", "secret")
        .connect(script.transport())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Client);
    assert_eq!(err.response().unwrap().message, "Unable to get csrf from prelogin.");
    assert_eq!(err.error_response(), Some("no cookies here"));
}

#[tokio::test]
async fn login_bad_password() {
    let script = Script::new();
    script.reply(Reply::ok("").cookie("csrftoken", "pre"));
    script.reply(Reply::status(
        400,
        r#"{"message":"The password you entered is incorrect.","error_type":"bad_password","status":"fail"}"#,
    ));

    let err = ClientBuilder::new(test_config())
        .credentials("alice", "wrong")
        .connect(script.transport())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LoginFailed);
}

#[tokio::test]
async fn login_without_user_payload() {
    let script = Script::new();
    script.reply(Reply::ok("").cookie("csrftoken", "pre"));
    script.reply(Reply::ok(r#"{"status":"ok"}"#));

    let err = ClientBuilder::new(test_config())
        .credentials("alice", "secret")
        .connect(script.transport())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LoginFailed);
    assert_eq!(err.response().unwrap().message, "Unable to login.");
}

#[tokio::test]
async fn login_with_html_reply_keeps_body() {
    let page = "<html>Oops, an error occurred.</html>";
    let script = Script::new();
    script.reply(Reply::ok("").cookie("csrftoken", "pre"));
    script.reply(Reply::ok(page));

    let err = ClientBuilder::new(test_config())
        .credentials("alice", "secret")
        .connect(script.transport())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LoginFailed);
    let response = err.response().unwrap();
    assert_eq!(response.message, "Unable to login.");
    assert_eq!(response.body.as_deref(), Some(page));
}
