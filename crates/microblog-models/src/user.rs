use std::fmt;

use serde::Serialize;

use crate::identity::AuthUser;
use crate::password::{self, PasswordError};

pub type UserId = i64;

/// A stored account. Values come from the storage layer, which assigns `id`.
///
/// `password_hash` is private: the only way to change it is `set_password`.
#[derive(Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    password_hash: String,
}

impl User {
    /// Rebuild a user from a stored row.
    ///
    /// For the storage layer only: `password_hash` must be a value previously
    /// produced by `set_password`. Everything else changes the hash through
    /// `set_password`.
    #[doc(hidden)]
    pub fn from_stored(id: UserId, username: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
        }
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Replace the stored hash with a salted hash of `plaintext`.
    /// No strength policy is applied.
    pub fn set_password(&mut self, plaintext: &str) -> Result<(), PasswordError> {
        self.password_hash = password::hash_password(plaintext)?;
        Ok(())
    }

    pub fn check_password(&self, plaintext: &str) -> bool {
        password::verify_password(&self.password_hash, plaintext)
    }
}

impl AuthUser for User {
    fn get_id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User {}>", self.username)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// An account that has not been persisted yet.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    password_hash: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: String::new(),
        }
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn set_password(&mut self, plaintext: &str) -> Result<(), PasswordError> {
        self.password_hash = password::hash_password(plaintext)?;
        Ok(())
    }

    pub fn check_password(&self, plaintext: &str) -> bool {
        password::verify_password(&self.password_hash, plaintext)
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::from_stored(1, "alice".into(), "alice@example.com".into(), String::new())
    }

    #[test]
    fn test_set_then_check() {
        let mut user = alice();
        user.set_password("correct horse").unwrap();
        assert!(user.check_password("correct horse"));
        assert!(!user.check_password("correct horse "));
        assert!(!user.check_password("Correct horse"));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let mut user = alice();
        user.set_password("s3cret").unwrap();
        assert_ne!(user.password_hash(), "s3cret");
        assert!(!user.password_hash().contains("s3cret"));
    }

    #[test]
    fn test_same_password_is_salted() {
        let mut a = alice();
        let mut b = alice();
        a.set_password("same").unwrap();
        b.set_password("same").unwrap();
        assert_ne!(a.password_hash(), b.password_hash());
        assert!(a.check_password("same"));
        assert!(b.check_password("same"));
    }

    #[test]
    fn test_set_password_overwrites() {
        let mut user = alice();
        user.set_password("old").unwrap();
        user.set_password("new").unwrap();
        assert!(user.check_password("new"));
        assert!(!user.check_password("old"));
    }

    #[test]
    fn test_unset_password_never_matches() {
        let user = alice();
        assert!(!user.check_password(""));
        assert!(!NewUser::new("bob", "bob@example.com").check_password(""));
    }

    #[test]
    fn test_stored_hash_round_trips_and_set_password_replaces_it() {
        let mut original = alice();
        original.set_password("pw").unwrap();

        let mut rebuilt = User::from_stored(
            original.id,
            original.username.clone(),
            original.email.clone(),
            original.password_hash().to_string(),
        );
        assert!(rebuilt.check_password("pw"));

        rebuilt.set_password("other").unwrap();
        assert_ne!(rebuilt.password_hash(), original.password_hash());
        assert!(!rebuilt.check_password("pw"));
    }

    #[test]
    fn test_new_user_password() {
        let mut new = NewUser::new("bob", "bob@example.com");
        new.set_password("pw").unwrap();
        assert!(new.check_password("pw"));
        assert!(!new.check_password("wp"));
    }

    #[test]
    fn test_display_and_debug_hide_hash() {
        let mut user = alice();
        user.set_password("pw").unwrap();
        assert_eq!(user.to_string(), "<User alice>");

        let debug = format!("{:?}", user);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("argon2"));
    }

    #[test]
    fn test_serialize_skips_hash() {
        let mut user = alice();
        user.set_password("pw").unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "alice");
        assert!(json.get("password_hash").is_none());
    }
}
