use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot start a session for an unauthenticated principal")]
    NotAuthenticated,

    #[error("account is inactive")]
    Inactive,

    #[error("principal has no identifier")]
    MissingId,

    #[error("session expiry {0} is outside the token range")]
    ExpiryOutOfRange(i64),

    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("user lookup failed")]
    Loader(#[source] anyhow::Error),
}
