//! `tags/` endpoints.

use igapi_identity::validate_rank_token;
use serde_json::json;

pub use super::SectionPage;
use super::{Response, fields};
use crate::client::{Call, Client};
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Tabs accepted by [`tag_section`].
pub const SECTION_TABS: [&str; 3] = ["top", "recent", "places"];

pub async fn tag_info<T: Transport>(client: &Client<T>, tag: &str) -> Result<Response> {
    client.call_api(Call::get(format!("tags/{tag}/info/"))).await
}

pub async fn tag_related<T: Transport>(client: &Client<T>, tag: &str) -> Result<Response> {
    let visited = json!([{ "id": tag, "type": "hashtag" }]);
    let call = Call::get(format!("tags/{tag}/related/"))
        .query("visited", visited)
        .query("related_types", r#"["hashtag","location"]"#);
    client.call_api(call).await
}

/// Search tags.
///
/// `rank_token` is a caller-generated UUID kept constant while paging one
/// result set. `exclude_list` holds numeric tag ids to leave out.
pub async fn tag_search<T: Transport>(
    client: &Client<T>,
    text: &str,
    rank_token: &str,
    exclude_list: &[u64],
    max_id: Option<&str>,
) -> Result<Response> {
    validate_rank_token(Some(rank_token), true)?;

    let mut call = Call::get("tags/search/")
        .query("q", text)
        .query("timezone_offset", client.timezone_offset())
        .query("count", 30)
        .query("exclude_list", json!(exclude_list))
        .query("rank_token", rank_token);
    if let Some(max_id) = max_id {
        call = call.query("max_id", max_id);
    }
    client.call_api(call).await
}

pub async fn tags_user_following<T: Transport>(client: &Client<T>, user_id: &str) -> Result<Response> {
    client
        .call_api(Call::get(format!("users/{user_id}/following_tags_info/")))
        .await
}

pub async fn tag_follow_suggestions<T: Transport>(client: &Client<T>) -> Result<Response> {
    client.call_api(Call::get("tags/suggested/")).await
}

pub async fn tag_follow<T: Transport>(client: &Client<T>, tag: &str) -> Result<Response> {
    let params = client.authenticated_params().to_params();
    client.call_api(Call::post(format!("tags/follow/{tag}/"), params)).await
}

pub async fn tag_unfollow<T: Transport>(client: &Client<T>, tag: &str) -> Result<Response> {
    let params = client.authenticated_params().to_params();
    client.call_api(Call::post(format!("tags/unfollow/{tag}/"), params)).await
}

/// One section of a tag feed. `tab` is one of [`SECTION_TABS`].
pub async fn tag_section<T: Transport>(
    client: &Client<T>,
    tag: &str,
    tab: &str,
    page: &SectionPage,
) -> Result<Response> {
    if !SECTION_TABS.contains(&tab) {
        return Err(Error::InvalidArgument(format!("Invalid tab: {tab}")));
    }

    let mut params = fields(json!({
        "supported_tabs": json!(SECTION_TABS).to_string(),
        "tab": tab,
        "include_persistent": true,
    }));
    page.apply(&mut params);

    client
        .call_api(Call::post(format!("tags/{tag}/sections/"), params).unsigned())
        .await
}
