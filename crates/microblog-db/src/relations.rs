use anyhow::Result;
use microblog_models::{Post, User, UserId};

use crate::Database;
use crate::models::PostRow;

/// A user's posts, fetched only when asked for.
///
/// Holding a `UserPosts` costs nothing; every method runs its own query, so
/// the results always reflect what is currently stored.
pub struct UserPosts<'a> {
    db: &'a Database,
    user_id: UserId,
}

impl Database {
    pub fn user_posts(&self, user: &User) -> UserPosts<'_> {
        UserPosts {
            db: self,
            user_id: user.id,
        }
    }
}

impl UserPosts<'_> {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Every post by this user, oldest first.
    pub fn all(&self) -> Result<Vec<Post>> {
        self.query("ORDER BY timestamp ASC, id ASC", None)
    }

    /// Up to `limit` posts, newest first.
    pub fn latest(&self, limit: u32) -> Result<Vec<Post>> {
        self.query("ORDER BY timestamp DESC, id DESC LIMIT ?2", Some(limit))
    }

    pub fn count(&self) -> Result<i64> {
        self.db.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM posts WHERE user_id = ?1",
                [self.user_id],
                |r| r.get(0),
            )?)
        })
    }

    fn query(&self, tail: &str, limit: Option<u32>) -> Result<Vec<Post>> {
        self.db.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM posts WHERE user_id = ?1 {}",
                PostRow::COLUMNS,
                tail
            );
            let mut stmt = conn.prepare(&sql)?;

            let rows = match limit {
                Some(limit) => stmt
                    .query_map(rusqlite::params![self.user_id, limit], PostRow::from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?,
                None => stmt
                    .query_map([self.user_id], PostRow::from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            };

            Ok(rows.into_iter().map(Post::from).collect())
        })
    }
}
