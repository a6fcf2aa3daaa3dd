use crate::Database;
use crate::models::{PostRow, UserRow};
use anyhow::Result;
use microblog_models::{NewPost, NewUser, Post, User, UserId, UserLoader, parse_user_id};
use rusqlite::Connection;
use tracing::debug;

impl Database {
    // -- Users --

    /// Insert a user. Duplicate usernames or emails are rejected by SQLite.
    pub fn create_user(&self, new: &NewUser) -> Result<User> {
        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, email, password_hash) VALUES (?1, ?2, ?3)",
                (&new.username, &new.email, new.password_hash()),
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        debug!("Created user {} ({})", id, new.username);
        Ok(User::from_stored(
            id,
            new.username.clone(),
            new.email.clone(),
            new.password_hash().to_string(),
        ))
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, "id", &id))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, "username", &username))
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, "email", &email))
    }

    /// Persist the hash produced by `User::set_password`.
    pub fn update_password(&self, user: &User) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET password_hash = ?1 WHERE id = ?2",
                (user.password_hash(), user.id),
            )?;
            Ok(changed > 0)
        })
    }

    /// Delete a user. Posts are not cascaded: a user who still has posts
    /// fails the foreign key.
    pub fn delete_user(&self, id: UserId) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }

    // -- Posts --

    pub fn create_post(&self, new: NewPost) -> Result<Post> {
        let timestamp = new.timestamp_or_now();

        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (body, timestamp, user_id) VALUES (?1, ?2, ?3)",
                (&new.body, timestamp, new.user_id),
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        debug!("Created post {} by user {}", id, new.user_id);
        Ok(Post {
            id,
            body: new.body,
            timestamp,
            user_id: new.user_id,
        })
    }

    pub fn get_post(&self, id: i64) -> Result<Option<Post>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM posts WHERE id = ?1", PostRow::COLUMNS);
            let row = conn
                .query_row(&sql, [id], PostRow::from_row)
                .optional()?;
            Ok(row.map(Post::from))
        })
    }

    pub fn delete_post(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }

    /// The author a post points at.
    pub fn post_author(&self, post: &Post) -> Result<Option<User>> {
        self.get_user(post.user_id)
    }
}

impl UserLoader for Database {
    type User = User;

    /// Resolve a session-stored id. The id arrives as text and is converted
    /// to the integer key before a single point lookup.
    fn load_user(&self, id: &str) -> Result<Option<User>> {
        let id = parse_user_id(id)?;
        self.get_user(id)
    }
}

fn query_user(
    conn: &Connection,
    column: &str,
    value: &dyn rusqlite::types::ToSql,
) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE {} = ?1", UserRow::COLUMNS, column);
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt.query_row([value], UserRow::from_row).optional()?;

    Ok(row.map(User::from))
}

/// Extension trait for optional query results
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
