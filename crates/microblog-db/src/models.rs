//! Database row types. These map directly to SQLite rows and are converted
//! into the plain records from `microblog-models` at the query boundary.

use chrono::{DateTime, Utc};
use microblog_models::{Post, User};
use rusqlite::Row;

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserRow {
    pub const COLUMNS: &'static str = "id, username, email, password_hash";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
        })
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_stored(row.id, row.username, row.email, row.password_hash)
    }
}

pub struct PostRow {
    pub id: i64,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: i64,
}

impl PostRow {
    pub const COLUMNS: &'static str = "id, body, timestamp, user_id";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            body: row.get(1)?,
            timestamp: row.get(2)?,
            user_id: row.get(3)?,
        })
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            body: row.body,
            timestamp: row.timestamp,
            user_id: row.user_id,
        }
    }
}
