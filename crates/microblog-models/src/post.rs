use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::{User, UserId};

pub type PostId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    /// Author. Always resolves to a stored user.
    pub user_id: UserId,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Post {}>", self.body)
    }
}

/// A post about to be inserted. A missing timestamp means "now, in UTC".
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub body: String,
    pub user_id: UserId,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn new(user_id: UserId, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            user_id,
            timestamp: None,
        }
    }

    pub fn by(author: &User, body: impl Into<String>) -> Self {
        Self::new(author.id, body)
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn timestamp_or_now(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_default_timestamp_is_now() {
        let new = NewPost::new(1, "hello");
        let before = Utc::now();
        let ts = new.timestamp_or_now();
        let after = Utc::now();
        assert!(ts >= before && ts <= after);
        assert!(after - ts < Duration::seconds(1));
    }

    #[test]
    fn test_explicit_timestamp_kept() {
        let when = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let new = NewPost::new(1, "hello").at(when);
        assert_eq!(new.timestamp_or_now(), when);
    }

    #[test]
    fn test_by_author() {
        let author = User::from_stored(9, "carol".into(), "carol@example.com".into(), String::new());
        let new = NewPost::by(&author, "hi");
        assert_eq!(new.user_id, 9);
        assert_eq!(new.body, "hi");
        assert!(new.timestamp.is_none());
    }

    #[test]
    fn test_display() {
        let post = Post {
            id: 1,
            body: "my first post".into(),
            timestamp: Utc::now(),
            user_id: 1,
        };
        assert_eq!(post.to_string(), "<Post my first post>");
    }

    #[test]
    fn test_deserialize_without_timestamp() {
        let new: NewPost = serde_json::from_str(r#"{"body":"x","user_id":3}"#).unwrap();
        assert_eq!(new.user_id, 3);
        assert!(new.timestamp.is_none());
    }
}
