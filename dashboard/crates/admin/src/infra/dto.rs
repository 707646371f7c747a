//! Wire DTOs
//!
//! Request and response bodies of the non-list endpoints.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::BlockRequest;

#[derive(Debug, Serialize)]
pub struct SendCodeRequest<'a> {
    pub phone: &'a str,
}

/// Development backends echo the code back
#[derive(Debug, Default, Deserialize)]
pub struct SendCodeResponse {
    #[serde(default)]
    pub smscode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmCodeRequest<'a> {
    pub phone: &'a str,
    pub smscode: &'a str,
}

#[derive(Deserialize)]
pub struct ConfirmCodeResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserBody<'a> {
    pub user_id: &'a UserId,
    pub reason: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_until: Option<DateTime<Utc>>,
}

impl<'a> From<&'a BlockRequest> for BlockUserBody<'a> {
    fn from(request: &'a BlockRequest) -> Self {
        Self {
            user_id: &request.user_id,
            reason: request.reason.trim(),
            blocked_until: request.blocked_until,
        }
    }
}

/// Acknowledgement of a block/unblock/check-unblock command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Error body; `message` is a string or a list of validation messages
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorBody {
    /// Backend-provided message, if the body carries a non-empty one
    pub fn extract(body: &[u8]) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        let message = match parsed.message? {
            ErrorMessage::One(message) => message,
            ErrorMessage::Many(messages) => messages.join("; "),
        };
        let message = message.trim();
        (!message.is_empty()).then(|| message.to_string())
    }
}
