//! Trip query error types.

/// Maximum number of body characters kept in error messages.
pub(crate) const BODY_EXCERPT_CHARS: usize = 500;

/// Why a trip query failed.
///
/// Every variant ends up as `QueryState::Failed`; none of them is raised to
/// the caller as an unhandled error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The request could not be sent or no response arrived
    #[error("could not reach the trip service: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("trip service returned status {status}: {message}")]
    Server { status: u16, message: String },

    /// The body is not JSON, not an array, or has a malformed trip record
    #[error("malformed trip response: {message}")]
    MalformedResponse {
        message: String,
        body: Option<String>,
    },
}

impl QueryError {
    /// Build a `MalformedResponse` keeping a short excerpt of the body.
    pub fn malformed(message: impl Into<String>, body: &str) -> Self {
        QueryError::MalformedResponse {
            message: message.into(),
            body: Some(excerpt(body)),
        }
    }

    /// Short label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Transport(_) => "transport",
            QueryError::Server { .. } => "server",
            QueryError::MalformedResponse { .. } => "malformed",
        }
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Transport(err.to_string())
    }
}

pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
