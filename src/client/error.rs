//! Client error taxonomy.

use std::time::Duration;
use thiserror::Error;

/// Message shown for timeouts and transport failures.
///
/// Kept distinct from server-reported messages so a user can tell an
/// unreachable server from a rejected request.
pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to reach the task server. Check your connection and try again.";

/// Errors raised by [`super::TaskApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server could not be reached.
    #[error("could not reach the task server: {0}")]
    Connectivity(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server rejected the request ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the response body.
        message: String,
    },

    /// A success response carried a body that could not be decoded.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The configured base URL is not an absolute HTTP URL.
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Returns `true` when the server explicitly refused the operation.
    ///
    /// Only rejections roll back optimistic view changes; a timeout says
    /// nothing about whether the server applied the write.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Returns the message to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Timeout(_) | Self::Connectivity(_) => CONNECTIVITY_MESSAGE.to_owned(),
            Self::Decode(_) => "Unexpected response from the task server.".to_owned(),
            Self::InvalidBaseUrl(_) => self.to_string(),
        }
    }
}
