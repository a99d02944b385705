//! Client-side errors and the messages shown to readers.

use blogify_shared::ErrorResponse;

/// Shown when the server gave nothing more specific.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status. `body` is `None` when it
    /// was not an RFC 7807 document.
    #[error("API error {status}")]
    Api {
        status: u16,
        body: Option<ErrorResponse>,
    },

    /// The request never produced a readable response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Text fit for display: the server's detail or title, else a generic retry hint.
    pub fn user_message(&self) -> &str {
        match self {
            ClientError::Api {
                body: Some(body), ..
            } => body.message(),
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    /// Transport faults and server-side failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Api { status, .. } => *status >= 500,
            ClientError::Transport(_) => true,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, body: Option<ErrorResponse>) -> ClientError {
        ClientError::Api { status, body }
    }

    #[test]
    fn test_user_message_prefers_detail_then_title() {
        let detailed = api(404, Some(ErrorResponse::not_found("Post not found")));
        let titled = api(401, Some(ErrorResponse::unauthorized()));
        let bare = api(502, None);

        assert_eq!(detailed.user_message(), "Post not found");
        assert_eq!(titled.user_message(), "Unauthorized");
        assert_eq!(bare.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_only_server_failures_are_retryable() {
        assert!(api(500, Some(ErrorResponse::internal_error())).is_retryable());
        assert!(api(503, None).is_retryable());
        assert!(!api(400, None).is_retryable());
        assert!(!api(409, Some(ErrorResponse::conflict("Email already registered"))).is_retryable());
    }

    #[test]
    fn test_status_is_exposed() {
        assert_eq!(api(403, None).status(), Some(403));
    }
}
