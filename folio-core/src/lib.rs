//! Folio Core Library
//!
//! Local persistence for the Folio portfolio site:
//! - Accounts register, log in and reset their credentials
//! - One current-user session is mirrored to storage and restored on load
//! - Blog posts are published, listed newest first, and deleted by admins
//! - Page visit counters and the theme preference live beside them

pub mod accounts;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
pub mod theme;
pub mod visits;

pub use accounts::AccountStore;
pub use auth::AuthContext;
pub use blog::{BlogStore, DEFAULT_RECENT_POSTS};
pub use contact::ContactMessage;
pub use error::{Error, ErrorKind};
pub use models::{Account, BlogPost, Role, Theme, ANONYMOUS_AUTHOR};
pub use session::SessionHolder;
pub use storage::{
    Corruption, InMemoryStorage, Loaded, SqliteStorage, Storage, StoreResult,
};
pub use theme::ThemePreference;
pub use visits::VisitCounter;
