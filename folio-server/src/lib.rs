//! Folio Server
//!
//! HTTP backend for the Folio portfolio site. Serves the built front-end and
//! exposes accounts, the current session, blog posts, visit counters, the
//! theme preference and the contact relay as a JSON API.

pub mod config;
pub mod error;
pub mod relay;
pub mod routes;
pub mod state;

pub use config::{Config, RelayConfig};
pub use error::ApiError;
pub use relay::{
    ConsoleRelay, ContactRelay, EmailJsConfig, EmailJsRelay, SmtpConfig, SmtpRelay,
};
pub use state::AppState;
