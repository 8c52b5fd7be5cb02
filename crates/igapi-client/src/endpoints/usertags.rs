//! `usertags/` endpoints.

use super::Response;
use crate::client::{Call, Client};
use crate::error::{Error, ErrorResponse, Result};
use crate::transport::Transport;

/// Media the user is tagged in. Needs a logged in session for the rank token.
pub async fn usertag_feed<T: Transport>(
    client: &Client<T>,
    user_id: &str,
    max_id: Option<&str>,
) -> Result<Response> {
    let rank_token = client
        .rank_token()
        .ok_or_else(|| Error::LoginRequired(ErrorResponse::new("login_required")))?;

    let mut call = Call::get(format!("usertags/{user_id}/feed/"))
        .query("rank_token", rank_token)
        .query("ranked_content", "true");
    if let Some(max_id) = max_id {
        call = call.query("max_id", max_id);
    }
    client.call_api(call).await
}

/// Remove your own tag from a media post.
pub async fn usertag_self_remove<T: Transport>(client: &Client<T>, media_id: &str) -> Result<Response> {
    let params = client.authenticated_params().to_params();
    client
        .call_api(Call::post(format!("usertags/{media_id}/remove/"), params))
        .await
}
