/// Errors surfaced by the HTTP client and the typed operations on it.
///
/// The client never retries and never swallows: every failure reaches the
/// caller, isolated to its own operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 from the service. The body is a human-readable validation
    /// message and is surfaced verbatim.
    #[error("{0}")]
    BadRequest(String),

    /// Any other non-success status. No body parsing attempted.
    #[error("API Error: {status} {status_text}")]
    Request { status: u16, status_text: String },

    /// Network-level failure (connect, DNS, ...), propagated unchanged.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but a body that does not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Request { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::BadRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_message_is_verbatim() {
        let err = ApiError::BadRequest("CPF já cadastrado".into());
        assert_eq!(err.to_string(), "CPF já cadastrado");
        assert!(err.is_validation());
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn request_error_carries_status_and_text() {
        let err = ApiError::Request {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_validation());
    }

    #[test]
    fn decode_error_has_no_status() {
        let err = ApiError::Decode("expected array".into());
        assert_eq!(err.status(), None);
    }
}
