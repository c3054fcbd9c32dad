use thiserror::Error;

/// Failures while obtaining or holding a session token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("signin rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("no token field in signin response")]
    MissingToken,
    #[error("signin response is not a token: {0}")]
    MalformedToken(String),
    #[error("no session token, login first")]
    NoToken,
    #[error("token store: {0}")]
    Store(String),
    #[error("signin request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failures while executing a GraphQL query or applying its result.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Only the first server-side error message is carried; the rest of the
    /// `errors` array is discarded.
    #[error("graphql error: {0}")]
    Server(String),
    #[error("graphql request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed graphql response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no user record in response")]
    NoUser,
    #[error("session changed while the fetch was in flight")]
    SessionInvalidated,
}
