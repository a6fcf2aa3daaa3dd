use anyhow::{Context, Result};
use std::fmt;

pub const SECRET_KEY_VAR: &str = "MICROBLOG_SECRET_KEY";
pub const SESSION_TTL_DAYS_VAR: &str = "MICROBLOG_SESSION_TTL_DAYS";

const DEFAULT_SECRET_KEY: &str = "dev-secret-change-me";
const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

#[derive(Clone)]
pub struct SessionConfig {
    pub secret_key: String,
    pub session_ttl: chrono::Duration,
}

impl SessionConfig {
    pub fn new(secret_key: impl Into<String>, session_ttl: chrono::Duration) -> Self {
        Self {
            secret_key: secret_key.into(),
            session_ttl,
        }
    }

    /// Load from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup(SECRET_KEY_VAR).unwrap_or_else(|| DEFAULT_SECRET_KEY.into());
        if secret_key.is_empty() {
            anyhow::bail!("{} is set but empty", SECRET_KEY_VAR);
        }

        let days: i64 = match lookup(SESSION_TTL_DAYS_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {:?}", SESSION_TTL_DAYS_VAR, raw))?,
            None => DEFAULT_SESSION_TTL_DAYS,
        };
        if days <= 0 {
            anyhow::bail!("{} must be positive, got {}", SESSION_TTL_DAYS_VAR, days);
        }

        Ok(Self::new(secret_key, chrono::Duration::days(days)))
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret_key", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}
