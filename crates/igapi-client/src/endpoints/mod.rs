//! Endpoint groups.
//!
//! Each group is a set of free functions taking the [`Client`](crate::Client)
//! as an explicit dependency. They only build parameters and hand them to
//! [`Client::call_api`](crate::Client::call_api).

pub mod accounts;
pub mod locations;
pub mod tags;
pub mod usertags;

use serde_json::{Map, Value, json};

/// A parsed API response object.
pub type Response = Map<String, Value>;

// `json!` object literal into request fields.
pub(crate) fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub(crate) fn with_auth(mut params: Map<String, Value>, auth: Map<String, Value>) -> Map<String, Value> {
    params.extend(auth);
    params
}

/// Paging state for tag and location sections. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPage {
    pub max_id:         Option<String>,
    pub page:           Option<u32>,
    pub next_media_ids: Vec<u64>,
}

impl SectionPage {
    pub fn max_id(mut self, max_id: impl Into<String>) -> Self {
        self.max_id = Some(max_id.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn next_media_ids(mut self, ids: impl Into<Vec<u64>>) -> Self {
        self.next_media_ids = ids.into();
        self
    }

    pub(crate) fn apply(&self, params: &mut Map<String, Value>) {
        if let Some(max_id) = &self.max_id {
            params.insert("max_id".to_string(), json!(max_id));
        }
        if let Some(page) = self.page {
            params.insert("page".to_string(), json!(page));
        }
        if !self.next_media_ids.is_empty() {
            params.insert("next_media_ids".to_string(), json!(self.next_media_ids).to_string().into());
        }
    }
}
