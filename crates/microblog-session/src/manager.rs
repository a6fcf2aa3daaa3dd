use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use microblog_models::{AuthUser, UserLoader};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SessionConfig;
use crate::current::CurrentUser;
use crate::error::SessionError;

/// Session token payload. `sub` is the text form of the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub struct LoginManager<L> {
    loader: L,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: chrono::Duration,
}

impl<L: UserLoader> LoginManager<L> {
    pub fn new(loader: L, config: &SessionConfig) -> Self {
        Self {
            loader,
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            session_ttl: config.session_ttl,
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Start a session for `user`, returning the signed token to hand back to
    /// the client.
    pub fn login_user<U: AuthUser + ?Sized>(&self, user: &U) -> Result<String, SessionError> {
        if user.is_anonymous() || !user.is_authenticated() {
            return Err(SessionError::NotAuthenticated);
        }
        if !user.is_active() {
            return Err(SessionError::Inactive);
        }

        let sub = user.get_id().ok_or(SessionError::MissingId)?;
        let expires_at = (Utc::now() + self.session_ttl).timestamp();
        let claims = Claims {
            exp: usize::try_from(expires_at).map_err(|_| SessionError::ExpiryOutOfRange(expires_at))?,
            sub,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        debug!("Session started for user {}", claims.sub);
        Ok(token)
    }

    /// Resolve the principal for a request.
    ///
    /// A missing, invalid or expired token, an id that no longer resolves, and
    /// an inactive account all come back as `Anonymous`. Only a failing
    /// loader is an error. The loader runs at most once.
    pub fn current_user(
        &self,
        token: Option<&str>,
    ) -> Result<CurrentUser<L::User>, SessionError> {
        let Some(token) = token else {
            return Ok(CurrentUser::Anonymous);
        };

        let claims = match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!("Rejected session token: {}", e);
                return Ok(CurrentUser::Anonymous);
            }
        };

        match self.loader.load_user(&claims.sub).map_err(SessionError::Loader)? {
            Some(user) if user.is_active() => Ok(CurrentUser::Authenticated(user)),
            Some(_) => {
                debug!("Session user {} is inactive", claims.sub);
                Ok(CurrentUser::Anonymous)
            }
            None => {
                debug!("Session user {} no longer exists", claims.sub);
                Ok(CurrentUser::Anonymous)
            }
        }
    }
}
