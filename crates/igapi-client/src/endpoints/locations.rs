//! `locations/` endpoints.

use igapi_identity::validate_rank_token;
use serde_json::json;

use super::{Response, SectionPage, fields};
use crate::client::{Call, Client};
use crate::error::{Error, ErrorResponse, Result};
use crate::transport::Transport;

/// Tabs accepted by [`location_section`].
pub const SECTION_TABS: [&str; 2] = ["ranked", "recent"];

pub async fn location_info<T: Transport>(client: &Client<T>, location_id: &str) -> Result<Response> {
    client
        .call_api(Call::get(format!("locations/{location_id}/info/")))
        .await
}

pub async fn location_related<T: Transport>(client: &Client<T>, location_id: &str) -> Result<Response> {
    let visited = json!([{ "id": location_id, "type": "location" }]);
    let call = Call::get(format!("locations/{location_id}/related/"))
        .query("visited", visited)
        .query("related_types", r#"["location"]"#);
    client.call_api(call).await
}

/// Places near a coordinate, optionally narrowed by `query`. Uses the
/// session's rank token.
pub async fn location_search<T: Transport>(
    client: &Client<T>,
    latitude: f64,
    longitude: f64,
    query: Option<&str>,
) -> Result<Response> {
    let rank_token = client
        .rank_token()
        .ok_or_else(|| Error::LoginRequired(ErrorResponse::new("login_required")))?;

    let mut call = Call::get("location_search/")
        .query("rank_token", rank_token)
        .query("latitude", latitude)
        .query("longitude", longitude)
        .query("timestamp", chrono::Utc::now().timestamp());
    if let Some(query) = query {
        call = call.query("search_query", query);
    }
    client.call_api(call).await
}

/// Search places by text. `exclude_list` holds numeric location ids.
pub async fn location_fb_search<T: Transport>(
    client: &Client<T>,
    query: &str,
    rank_token: &str,
    exclude_list: &[u64],
    max_id: Option<&str>,
) -> Result<Response> {
    validate_rank_token(Some(rank_token), true)?;

    let mut call = Call::get("fbsearch/places/")
        .query("query", query)
        .query("timezone_offset", client.timezone_offset())
        .query("count", 30)
        .query("exclude_list", json!(exclude_list))
        .query("rank_token", rank_token);
    if let Some(max_id) = max_id {
        call = call.query("max_id", max_id);
    }
    client.call_api(call).await
}

/// One section of a location feed. Keep `rank_token` constant while paging.
pub async fn location_section<T: Transport>(
    client: &Client<T>,
    location_id: &str,
    rank_token: &str,
    tab: &str,
    page: &SectionPage,
) -> Result<Response> {
    validate_rank_token(Some(rank_token), true)?;
    if !SECTION_TABS.contains(&tab) {
        return Err(Error::InvalidArgument(format!("Invalid tab: {tab}")));
    }

    let mut params = fields(json!({
        "rank_token": rank_token,
        "tab": tab,
        "session_id": client.identity().session_id,
    }));
    page.apply(&mut params);

    client
        .call_api(Call::post(format!("locations/{location_id}/sections/"), params).unsigned())
        .await
}

pub async fn location_stories<T: Transport>(client: &Client<T>, location_id: &str) -> Result<Response> {
    client
        .call_api(Call::get(format!("locations/{location_id}/story/")))
        .await
}
