//! Error types for image editing.

use std::path::PathBuf;

/// Errors that can occur while building, sending or decoding an image edit.
#[derive(Debug, thiserror::Error)]
pub enum AzEditError {
    /// Invalid request parameters (missing image, bad size string, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// No credential source could produce a token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// An input image could not be opened or read.
    #[error("reading image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A multipart field could not be built.
    #[error("building field {field}: {source}")]
    FormField {
        field: String,
        #[source]
        source: reqwest::Error,
    },

    /// Network or HTTP error (connection failure, timeout, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API reported a structured error. Fields are passed through verbatim.
    #[error("image edit failed: {message} (type={error_type}, code={code})")]
    Api {
        message: String,
        error_type: String,
        code: String,
    },

    /// The API answered without an error but also without an image.
    #[error("image edit failed: no image data in response")]
    NoImageData,

    /// The response body was not the expected JSON envelope.
    #[error("unexpected response (HTTP {status}): {message}\nRaw (first 500 bytes): {raw}")]
    UnexpectedResponse {
        status: u16,
        message: String,
        raw: String,
    },

    /// The returned base64 payload is corrupt.
    #[error("failed to decode base64 image: {0}")]
    Decode(String),

    /// I/O error (e.g., saving the output file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AzEditError {
    /// Returns true if the failure was reported by the remote service rather
    /// than raised locally.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::NoImageData)
    }

    /// Returns true if the failure happened before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_)
                | Self::Config(_)
                | Self::ImageRead { .. }
                | Self::FormField { .. }
        )
    }
}

/// Result type alias for image editing operations.
pub type Result<T> = std::result::Result<T, AzEditError>;

/// Returns at most `max` bytes of `text`, cut on a char boundary, with an
/// ellipsis when something was dropped.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(AzEditError::NoImageData.is_remote());
        assert!(AzEditError::Api {
            message: "bad".into(),
            error_type: "invalid_request_error".into(),
            code: "400".into(),
        }
        .is_remote());

        assert!(!AzEditError::Auth("no credential".into()).is_remote());
        assert!(!AzEditError::Decode("bad base64".into()).is_remote());
        assert!(!AzEditError::Config("missing".into()).is_remote());
    }

    #[test]
    fn test_is_local() {
        assert!(AzEditError::InvalidRequest("no image".into()).is_local());
        assert!(AzEditError::Config("missing".into()).is_local());
        assert!(!AzEditError::NoImageData.is_local());
        assert!(!AzEditError::Decode("bad".into()).is_local());
    }

    #[test]
    fn test_error_display() {
        let err = AzEditError::Api {
            message: "Your request was rejected".into(),
            error_type: "invalid_request_error".into(),
            code: "content_policy_violation".into(),
        };
        assert_eq!(
            err.to_string(),
            "image edit failed: Your request was rejected (type=invalid_request_error, code=content_policy_violation)"
        );

        assert_eq!(
            AzEditError::NoImageData.to_string(),
            "image edit failed: no image data in response"
        );

        let err = AzEditError::ImageRead {
            path: PathBuf::from("assets/missing.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "reading image assets/missing.png: not found");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 500), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        // 'é' is two bytes; cutting at 2 would split it
        assert_eq!(truncate("aéb", 2), "a...");
    }
}
