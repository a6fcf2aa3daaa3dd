use thiserror::Error;

use crate::user::UserId;

/// What the session layer needs from a principal.
///
/// The defaults describe a regular, logged-in account; no suspended or guest
/// states are modeled for stored users.
pub trait AuthUser {
    /// Text form of the unique identifier, as kept in a session.
    fn get_id(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        true
    }

    fn is_active(&self) -> bool {
        true
    }

    fn is_anonymous(&self) -> bool {
        false
    }
}

/// Stand-in principal for requests without a resolvable session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymousUser;

impl AuthUser for AnonymousUser {
    fn get_id(&self) -> Option<String> {
        None
    }

    fn is_authenticated(&self) -> bool {
        false
    }

    fn is_active(&self) -> bool {
        false
    }

    fn is_anonymous(&self) -> bool {
        true
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid user id: {0:?}")]
pub struct InvalidUserId(pub String);

/// Parse a user id supplied as text (e.g. from a session) into the key type.
pub fn parse_user_id(raw: &str) -> Result<UserId, InvalidUserId> {
    raw.trim()
        .parse()
        .map_err(|_| InvalidUserId(raw.to_string()))
}

/// Resolves a session-stored identifier to a principal.
///
/// Returns `Ok(None)` when no such record exists.
pub trait UserLoader {
    type User: AuthUser;

    fn load_user(&self, id: &str) -> anyhow::Result<Option<Self::User>>;
}

impl<F, U> UserLoader for F
where
    F: Fn(&str) -> anyhow::Result<Option<U>>,
    U: AuthUser,
{
    type User = U;

    fn load_user(&self, id: &str) -> anyhow::Result<Option<U>> {
        self(id)
    }
}
