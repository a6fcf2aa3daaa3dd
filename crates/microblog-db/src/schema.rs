use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub const SCHEMA_VERSION: i64 = 2;

// AUTOINCREMENT keeps ids of deleted rows from being handed out again.
const TABLES: &str = "
    CREATE TABLE users (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        username        TEXT NOT NULL CHECK (length(username) <= 64),
        email           TEXT NOT NULL CHECK (length(email) <= 120),
        password_hash   TEXT NOT NULL DEFAULT '' CHECK (length(password_hash) <= 128)
    );

    CREATE UNIQUE INDEX ix_users_username ON users(username);
    CREATE UNIQUE INDEX ix_users_email ON users(email);

    CREATE TABLE posts (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        body        TEXT NOT NULL CHECK (length(body) <= 140),
        timestamp   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f+00:00', 'now')),
        user_id     INTEGER NOT NULL REFERENCES users(id)
    );

    CREATE INDEX ix_posts_timestamp ON posts(timestamp);
    CREATE INDEX ix_posts_user_id ON posts(user_id);
";

/// Create or upgrade the tables the models map onto. Safe to call on every open.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    match version {
        v if v >= SCHEMA_VERSION => return Ok(()),
        0 => {
            conn.execute_batch(&format!("BEGIN; {} COMMIT;", TABLES))?;
            info!("Database schema v{} created", SCHEMA_VERSION);
        }
        _ => {
            rebuild_with_autoincrement(conn)?;
            info!("Database schema upgraded v{} -> v{}", version, SCHEMA_VERSION);
        }
    }

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [SCHEMA_VERSION])?;
    Ok(())
}

/// v1 tables used plain rowid keys. Copy them into AUTOINCREMENT tables,
/// keeping every id.
fn rebuild_with_autoincrement(conn: &Connection) -> Result<()> {
    // foreign_keys cannot change inside a transaction
    conn.pragma_update(None, "foreign_keys", "OFF")?;

    let rebuilt = conn.execute_batch(&format!(
        "
        BEGIN;
        DROP INDEX IF EXISTS ix_users_username;
        DROP INDEX IF EXISTS ix_users_email;
        DROP INDEX IF EXISTS ix_posts_timestamp;
        DROP INDEX IF EXISTS ix_posts_user_id;
        ALTER TABLE posts RENAME TO posts_v1;
        ALTER TABLE users RENAME TO users_v1;
        {}
        INSERT INTO users (id, username, email, password_hash)
            SELECT id, username, email, password_hash FROM users_v1;
        INSERT INTO posts (id, body, timestamp, user_id)
            SELECT id, body, timestamp, user_id FROM posts_v1;
        DROP TABLE posts_v1;
        DROP TABLE users_v1;
        COMMIT;
        ",
        TABLES
    ));

    if rebuilt.is_err() {
        let _ = conn.execute_batch("ROLLBACK;");
    }
    conn.pragma_update(None, "foreign_keys", "ON")?;
    rebuilt?;
    Ok(())
}
