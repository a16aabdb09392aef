//! Uniform response envelope.

use crate::model::{now_utc, Timestamp};
use serde::{Deserialize, Serialize};

/// Status code carried by successful envelopes.
pub const STATUS_OK: u16 = 200;
/// Status code carried by failed envelopes.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Response wrapper returned by every public client operation.
///
/// Serialized as `{success, data, message, timestamp, status}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
    #[serde(with = "crate::model::timestamp")]
    pub timestamp: Timestamp,
    pub status: u16,
}

impl<T> ApiResponse<T> {
    /// Wraps `data`; the status code follows `success`.
    pub fn wrap(data: T, success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            data,
            message: message.into(),
            timestamp: now_utc(),
            status: if success { STATUS_OK } else { STATUS_BAD_REQUEST },
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::wrap(data, true, message)
    }

    pub fn fail(data: T, message: impl Into<String>) -> Self {
        Self::wrap(data, false, message)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiResponse, STATUS_BAD_REQUEST, STATUS_OK};

    #[test]
    fn status_follows_success_flag() {
        assert_eq!(ApiResponse::ok(1, "fine").status, STATUS_OK);
        assert_eq!(ApiResponse::fail((), "nope").status, STATUS_BAD_REQUEST);
    }

    #[test]
    fn unit_payload_serializes_as_null() {
        let json = serde_json::to_value(ApiResponse::ok((), "cleared")).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], 200);
        assert!(json["timestamp"].is_string());
    }
}
