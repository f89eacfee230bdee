use thiserror::Error;

/// Any failure talking to the scanning service.
///
/// Connection failures, timeouts, non-2xx statuses and undecodable bodies all
/// surface as this one error. No caller in this crate recovers from it.
#[derive(Error, Debug)]
#[error("llm-guard API error at {url}: {cause}")]
pub struct TransportError {
    pub url: String,
    #[source]
    pub cause: TransportCause,
}

#[derive(Error, Debug)]
pub enum TransportCause {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response is not a JSON object: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn new(url: impl Into<String>, cause: impl Into<TransportCause>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(&self.cause, TransportCause::Request(e) if e.is_timeout())
    }

    pub fn is_connect(&self) -> bool {
        matches!(&self.cause, TransportCause::Request(e) if e.is_connect())
    }

    /// HTTP status when the service answered with a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match &self.cause {
            TransportCause::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_carries_url() {
        let err = TransportError::new(
            "http://localhost:9999/scan/prompt",
            TransportCause::Status {
                status: 401,
                body: "Unauthorized".to_string(),
            },
        );
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_timeout());
        assert_eq!(
            err.to_string(),
            "llm-guard API error at http://localhost:9999/scan/prompt: HTTP 401: Unauthorized"
        );
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let err = TransportError::new("http://x/scan/output", TransportCause::Decode("[]".into()));
        assert_eq!(err.status(), None);
        assert!(!err.is_connect());
    }
}
