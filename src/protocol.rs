use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One request line from the host player. Unknown fields are ignored;
/// missing fields default so the handlers can report their own errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub action: String,
    pub music_source: Option<String>,
    pub query: Option<String>,
    pub limit: Option<usize>,
    pub video_id: Option<String>,
    pub browse_id: Option<String>,
    pub playlist_id: Option<String>,
    pub params: Option<String>,
    pub country: Option<String>,
}

/// One response line. Exactly one of `data`/`error` is present; the
/// other is omitted from the serialized object entirely.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
