//! `accounts/` endpoints, including the login sequence.

use serde_json::{Value, json};
use tracing::info;

use super::{Response, fields, with_auth};
use crate::client::{Call, Client};
use crate::error::{Error, ErrorResponse, Result};
use crate::transport::Transport;

/// Log in with the client's credentials.
///
/// Fetches the pre-login headers to obtain a csrf cookie, posts the
/// credentials, and requires `logged_in_user.pk` in the reply. The
/// `on_login` callback runs once the session is established.
pub async fn login<T: Transport>(client: &Client<T>) -> Result<()> {
    let credentials = client
        .credentials()
        .ok_or_else(|| Error::LoginRequired(ErrorResponse::new("login_required").code(400)))?;

    let prelogin = fields(json!({
        "challenge_type": "signup",
        "guid": client.generate_uuid(true, None),
    }));
    let prelogin = client.call_api_raw(Call::post("si/fetch_headers/", prelogin)).await?;

    let Some(csrf_token) = client.csrftoken() else {
        return Err(Error::Client(
            ErrorResponse::new("Unable to get csrf from prelogin.").body(prelogin),
        ));
    };

    let params = fields(json!({
        "device_id": client.device_id(),
        "guid": client.uuid(),
        "adid": client.ad_id(),
        "phone_id": client.phone_id(),
        "_csrftoken": csrf_token,
        "username": credentials.username,
        "password": credentials.password,
        "login_attempt_count": "0",
    }));
    let response = client.call_api_raw(Call::post("accounts/login/", params)).await?;

    if client.csrftoken().is_none() {
        return Err(Error::Client(
            ErrorResponse::new("Unable to get csrf from login.").body(response),
        ));
    }

    let json = serde_json::from_str::<Value>(&response).unwrap_or(Value::Null);
    let pk = json.pointer("/logged_in_user/pk").filter(|pk| !pk.is_null());
    let Some(pk) = pk else {
        return Err(Error::LoginFailed(ErrorResponse::new("Unable to login.").body(response)));
    };

    info!(user = %credentials.username, pk = %pk, "logged in");
    client.notify_login()
}

/// Log out. The server rejects a signed body here.
pub async fn logout<T: Transport>(client: &Client<T>) -> Result<Response> {
    let params = fields(json!({
        "phone_id": client.phone_id(),
        "_csrftoken": client.csrftoken(),
        "guid": client.uuid(),
        "device_id": client.device_id(),
        "_uuid": client.uuid(),
    }));
    client.call_api(Call::post("accounts/logout/", params).unsigned()).await
}

pub async fn current_user<T: Transport>(client: &Client<T>) -> Result<Response> {
    let params = client.authenticated_params().to_params();
    client
        .call_api(Call::post("accounts/current_user/", params).query("edit", "true"))
        .await
}

/// Fields for [`edit_profile`]. `email` is required by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    pub first_name:   Option<String>,
    pub biography:    Option<String>,
    pub external_url: Option<String>,
    pub email:        String,
    pub phone_number: Option<String>,
    /// 1 male, 2 female, 3 unspecified.
    pub gender:       u8,
}

pub async fn edit_profile<T: Transport>(client: &Client<T>, profile: &ProfileEdit) -> Result<Response> {
    if !(1..=3).contains(&profile.gender) {
        return Err(Error::InvalidArgument(format!("Invalid gender: {}", profile.gender)));
    }
    if profile.email.is_empty() {
        return Err(Error::InvalidArgument("Email is required.".to_string()));
    }

    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let params = fields(json!({
        "username": client.authenticated_user_name(),
        "gender": profile.gender,
        "phone_number": text(&profile.phone_number),
        "first_name": text(&profile.first_name),
        "biography": text(&profile.biography),
        "external_url": text(&profile.external_url),
        "email": profile.email,
    }));
    let params = with_auth(params, client.authenticated_params().to_params());
    client.call_api(Call::post("accounts/edit_profile/", params)).await
}

pub async fn remove_profile_picture<T: Transport>(client: &Client<T>) -> Result<Response> {
    let params = client.authenticated_params().to_params();
    client.call_api(Call::post("accounts/remove_profile_picture/", params)).await
}

pub async fn change_profile_picture<T: Transport>(_client: &Client<T>, _photo: &[u8]) -> Result<Response> {
    Err(Error::NotImplemented("Changing profile pictures is not supported yet."))
}

pub async fn set_account_private<T: Transport>(client: &Client<T>) -> Result<Response> {
    let params = client.authenticated_params().to_params();
    client.call_api(Call::post("accounts/set_private/", params)).await
}

pub async fn set_account_public<T: Transport>(client: &Client<T>) -> Result<Response> {
    let params = client.authenticated_params().to_params();
    client.call_api(Call::post("accounts/set_public/", params)).await
}

/// Presence status setting. This GET carries a signed empty object in its query.
pub async fn presence_status<T: Transport>(client: &Client<T>) -> Result<Response> {
    let envelope = client.signing_key().envelope(&json!({}))?;
    let call = Call::get("accounts/get_presence_disabled/")
        .query(igapi_sign::KEY_VERSION_FIELD, envelope.key_version)
        .query(igapi_sign::SIGNED_BODY_FIELD, envelope.signed_body());
    client.call_api(call).await
}

pub async fn set_presence_status<T: Transport>(client: &Client<T>, disabled: bool) -> Result<Response> {
    let params = fields(json!({ "disabled": if disabled { "1" } else { "0" } }));
    let params = with_auth(params, client.authenticated_params().to_params());
    client.call_api(Call::post("accounts/set_presence_disabled/", params)).await
}

pub async fn enable_presence_status<T: Transport>(client: &Client<T>) -> Result<Response> {
    set_presence_status(client, false).await
}

pub async fn disable_presence_status<T: Transport>(client: &Client<T>) -> Result<Response> {
    set_presence_status(client, true).await
}
