//! Session layer: turns a logged-in principal into a signed token and back.
//!
//! The user lookup is injected into [`LoginManager::new`]; nothing is
//! registered globally.

pub mod config;
pub mod current;
pub mod error;
pub mod manager;

pub use config::SessionConfig;
pub use current::CurrentUser;
pub use error::SessionError;
pub use manager::{Claims, LoginManager};
