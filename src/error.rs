use thiserror::Error;

pub const GENERIC_FETCH_MESSAGE: &str = "Failed to get video information";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no URL provided")]
    Empty,
    #[error("URL must start with http:// or https://")]
    MissingScheme,
}

/// Failure of a single call to the info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("server rejected request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl AttemptError {
    /// The text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FETCH_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("handoff storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("handoff record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Localization keys of hints shown under a fetch error.
pub fn suggestion_keys(message: &str) -> &'static [&'static str] {
    let message = message.to_lowercase();
    if message.contains("403") || message.contains("forbidden") {
        &["hint-protected", "hint-lower-quality", "hint-copy-again"]
    } else if message.contains("404") || message.contains("not found") {
        &["hint-expired", "hint-paste-again"]
    } else if message.contains("timeout") || message.contains("timed out") {
        &["hint-slow", "hint-lower-quality", "hint-check-connection"]
    } else {
        &["hint-other-format", "hint-valid-url", "hint-retry"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_match_error_text() {
        assert_eq!(suggestion_keys("HTTP Error 403: Forbidden")[0], "hint-protected");
        assert_eq!(suggestion_keys("Video not found")[0], "hint-expired");
        assert_eq!(suggestion_keys("Read timeout")[0], "hint-slow");
        assert_eq!(suggestion_keys("Unsupported URL")[0], "hint-other-format");
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = AttemptError::Server {
            status: 400,
            message: Some("Unsupported URL".into()),
        };
        assert_eq!(err.user_message(), "Unsupported URL");
    }

    #[test]
    fn user_message_falls_back_to_generic() {
        let blank = AttemptError::Server {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message(), GENERIC_FETCH_MESSAGE);
        assert_eq!(
            AttemptError::Transport("connection refused".into()).user_message(),
            GENERIC_FETCH_MESSAGE
        );
    }
}
