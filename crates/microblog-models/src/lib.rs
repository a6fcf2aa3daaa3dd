//! Plain records for the microblog: users, their posts, and the capability
//! traits the session layer needs from a principal.
//!
//! Nothing here knows about storage. The schema lives in `microblog-db`.

pub mod identity;
pub mod password;
pub mod post;
pub mod user;

pub use identity::{AnonymousUser, AuthUser, InvalidUserId, UserLoader, parse_user_id};
pub use password::PasswordError;
pub use post::{NewPost, Post, PostId};
pub use user::{NewUser, User, UserId};
