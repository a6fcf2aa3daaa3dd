use anyhow::Result;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "MICROBLOG_DB_PATH";
const DEFAULT_DB_PATH: &str = "microblog.db";

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

impl DbConfig {
    /// Load from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(DB_PATH_VAR).unwrap_or_else(|| DEFAULT_DB_PATH.into());
        if path.trim().is_empty() {
            anyhow::bail!("{} is set but empty", DB_PATH_VAR);
        }

        Ok(Self {
            path: PathBuf::from(path),
        })
    }
}
