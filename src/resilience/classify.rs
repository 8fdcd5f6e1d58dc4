use serde::Serialize;
use serde_json::Value;

/// Shown when nothing more specific can be extracted from an error
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// The part of a failed request the classifier looks at
#[derive(Debug, Clone, Copy)]
pub struct FailedResponse<'a> {
    pub status: u16,
    /// Parsed response body
    pub data: Option<&'a Value>,
}

/// Anything the classifier can inspect.
///
/// `Display` is the last textual fallback before the generic message.
pub trait RequestFailure: std::fmt::Display {
    /// The server's response, or `None` when the request never got one
    fn response(&self) -> Option<FailedResponse<'_>>;

    /// The error's own message, if it carries one
    fn message(&self) -> Option<String> {
        None
    }

    /// A response arrived but its body could not be decoded
    fn is_decode_failure(&self) -> bool {
        false
    }
}

/// Error objects of unknown shape, e.g. `{"response": {"status": 404,
/// "data": {"detail": "..."}}, "message": "..."}`
impl RequestFailure for Value {
    fn response(&self) -> Option<FailedResponse<'_>> {
        let response = self.get("response")?;
        if response.is_null() {
            return None;
        }
        let status = response
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
            .unwrap_or(0);
        Some(FailedResponse {
            status,
            data: response.get("data"),
        })
    }

    fn message(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            _ => self.get("message").and_then(Value::as_str).map(str::to_string),
        }
    }
}

/// Coarse failure class used by the fallback policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// No response at all, or a 5xx
    Network,
    /// 4xx
    Client,
}

/// User-displayable summary of a failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDescriptor {
    pub message: String,
    pub is_network_error: bool,
    pub http_status: Option<u16>,
}

impl ErrorDescriptor {
    /// Descriptor for a failure that never involved the network
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_network_error: false,
            http_status: None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        if self.is_network_error {
            FailureKind::Network
        } else {
            FailureKind::Client
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.http_status == Some(404)
    }
}

/// Classify a failed request. Never panics.
///
/// The message is taken from `response.data.detail`, then
/// `response.data.message`, then the error's own message, then its
/// `Display` text, then [`GENERIC_ERROR_MESSAGE`].
pub fn classify<E: RequestFailure + ?Sized>(error: &E) -> ErrorDescriptor {
    let response = error.response();

    let from_body = |key: &str| {
        response
            .and_then(|r| r.data)
            .and_then(|data| data.get(key))
            .and_then(text_of)
    };

    let message = from_body("detail")
        .or_else(|| from_body("message"))
        .or_else(|| error.message().filter(|m| !m.trim().is_empty()))
        .or_else(|| Some(error.to_string()).filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

    let http_status = response.map(|r| r.status).filter(|s| *s != 0);
    let is_network_error = match response {
        None => true,
        Some(r) => r.status >= 500,
    };

    ErrorDescriptor {
        message,
        is_network_error,
        http_status,
    }
}

// FastAPI-style validation details arrive as a list of {msg} objects
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str).or_else(|| item.as_str()))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}

/// Whether a failed read should be answered with demo data instead of a
/// hard error screen.
///
/// Undecodable success bodies never qualify.
pub fn should_use_mock_data<E: RequestFailure + ?Sized>(error: &E) -> bool {
    if error.is_decode_failure() {
        return false;
    }
    let descriptor = classify(error);
    if descriptor.is_network_error || descriptor.is_not_found() {
        return true;
    }
    let text = error.message().unwrap_or_else(|| error.to_string());
    text.contains("Network Error") || text.contains("ECONNREFUSED")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_response_is_a_network_error() {
        let d = classify(&json!({ "message": "Network Error" }));
        assert!(d.is_network_error);
        assert_eq!(d.http_status, None);
        assert_eq!(d.message, "Network Error");
        assert_eq!(d.kind(), FailureKind::Network);
    }

    #[test]
    fn server_errors_count_as_network_errors() {
        for status in [500, 502, 503, 599] {
            let d = classify(&json!({ "response": { "status": status, "data": {} } }));
            assert!(d.is_network_error, "status {}", status);
            assert_eq!(d.http_status, Some(status));
        }
        for status in [400, 401, 404, 422, 499] {
            let d = classify(&json!({ "response": { "status": status, "data": {} } }));
            assert!(!d.is_network_error, "status {}", status);
            assert_eq!(d.kind(), FailureKind::Client);
        }
    }

    #[test]
    fn detail_wins_over_everything_else() {
        let err = json!({
            "message": "Request failed with status code 400",
            "response": {
                "status": 400,
                "data": { "detail": "X", "message": "Y" }
            }
        });
        assert_eq!(classify(&err).message, "X");
    }

    #[test]
    fn message_priority_falls_through() {
        let body_message = json!({ "response": { "status": 409, "data": { "message": "Y" } }, "message": "Z" });
        assert_eq!(classify(&body_message).message, "Y");

        let own_message = json!({ "response": { "status": 409, "data": null }, "message": "Z" });
        assert_eq!(classify(&own_message).message, "Z");

        let bare_string = json!("plain failure");
        assert_eq!(classify(&bare_string).message, "plain failure");
    }

    #[test]
    fn stringified_error_then_generic_fallback() {
        struct Opaque(&'static str);
        impl std::fmt::Display for Opaque {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.0)
            }
        }
        impl RequestFailure for Opaque {
            fn response(&self) -> Option<FailedResponse<'_>> {
                None
            }
        }

        assert_eq!(classify(&Opaque("socket hang up")).message, "socket hang up");
        assert_eq!(classify(&Opaque("")).message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn validation_detail_lists_are_joined() {
        let err = json!({ "response": { "status": 422, "data": { "detail": [
            { "msg": "field required" }, { "msg": "value is not a valid email" }
        ] } } });
        assert_eq!(classify(&err).message, "field required; value is not a valid email");
    }

    #[test]
    fn mock_data_policy() {
        assert!(should_use_mock_data(&json!({ "message": "timeout" })));
        assert!(should_use_mock_data(&json!({ "response": { "status": 404 } })));
        assert!(should_use_mock_data(&json!({ "response": { "status": 503 } })));
        assert!(should_use_mock_data(&json!({
            "response": { "status": 400 }, "message": "connect ECONNREFUSED 127.0.0.1:8000"
        })));
        assert!(!should_use_mock_data(&json!({ "response": { "status": 403 }, "message": "Forbidden" })));
    }
}
