//! Wire types exchanged with the Signal content API.
//!
//! Field names follow the collaborator's JSON exactly: posts and the config
//! snapshot use camelCase, subscribers and newsletter reports use snake_case.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A post as returned by `GET /posts`, `GET /posts/search` and `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    /// Timezone-naive ISO-8601 timestamp, e.g. `2025-03-14T09:26:53.589793`.
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of `POST /posts`. The collaborator rejects unknown fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreateRequest {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of `GET /config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub api_key_available: bool,
    #[serde(default)]
    pub api_key_length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriberResponse {
    pub email: String,
    pub subscribed_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscribeResponse {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsletterRequest {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsletterResponse {
    pub message: String,
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub total_subscribers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned on non-2xx responses.
///
/// `detail` is usually a string, but request validation failures carry a list
/// of objects, so it is kept loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Parse an error body, yielding the default when the payload is not JSON.
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// Human-readable detail, if the server supplied one.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_uses_camel_case_fields() {
        let json = r#"{"id":"a1","title":"T","content":"<p>x</p>","author":"Ann","createdAt":"2025-01-02T03:04:05","imageUrl":null}"#;
        let post: PostResponse = serde_json::from_str(json).expect("post");
        assert_eq!(post.created_at, "2025-01-02T03:04:05");
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn create_request_omits_missing_image() {
        let body = PostCreateRequest {
            title: "T".into(),
            content: "C".into(),
            author: "A".into(),
            image_url: None,
        };
        let value = serde_json::to_value(&body).expect("json");
        assert!(value.get("imageUrl").is_none());
        assert_eq!(value["title"], "T");
    }

    #[test]
    fn config_tolerates_missing_length() {
        let config: ConfigResponse =
            serde_json::from_str(r#"{"apiKeyAvailable":true}"#).expect("config");
        assert!(config.api_key_available);
        assert_eq!(config.api_key_length, 0);
    }

    #[test]
    fn error_detail_handles_string_and_list() {
        let plain = ErrorBody::from_slice(br#"{"detail":"Invalid API key."}"#);
        assert_eq!(plain.detail_text().as_deref(), Some("Invalid API key."));

        let list = ErrorBody::from_slice(
            br#"{"detail":[{"msg":"field required"},{"msg":"value is not a valid email"}]}"#,
        );
        assert_eq!(
            list.detail_text().as_deref(),
            Some("field required; value is not a valid email")
        );

        let garbage = ErrorBody::from_slice(b"<html>oops</html>");
        assert_eq!(garbage.detail_text(), None);
    }
}
