//! Request and response bodies for the tracker REST API.

use serde_json::Value;

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchRequest<'a> {
    pub(super) jql: &'a str,
    pub(super) start_at: usize,
    pub(super) max_results: usize,
    pub(super) fields: &'a [String],
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<Value>,

    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct LabelUpdateRequest {
    pub(super) update: LabelUpdate,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct LabelUpdate {
    pub(super) labels: Vec<serde_json::Map<String, Value>>,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct CommentRequest {
    pub(super) body: String,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct EditRequest {
    pub(super) fields: serde_json::Map<String, Value>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Myself {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,
}
