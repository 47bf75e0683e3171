//! Server configuration

use std::path::PathBuf;

use crate::relay::{EmailJsConfig, SmtpConfig};

/// How contact form submissions are delivered
#[derive(Debug, Clone)]
pub enum RelayConfig {
    EmailJs(EmailJsConfig),
    Smtp(SmtpConfig),
    /// Print submissions to the console
    Console,
}

impl RelayConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            RelayConfig::EmailJs(_) => "emailjs",
            RelayConfig::Smtp(_) => "smtp",
            RelayConfig::Console => "console",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// SQLite file backing local storage; in-memory storage when unset
    pub db_path: Option<PathBuf>,

    /// Directory holding the built front-end
    pub static_dir: PathBuf,

    pub relay: RelayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            db_path: None,
            static_dir: PathBuf::from("static"),
            relay: RelayConfig::Console,
        }
    }
}

impl Config {
    /// Create config from environment variables
    ///
    /// - FOLIO_PORT (default: 3000)
    /// - FOLIO_DB_PATH (default: in-memory storage)
    /// - FOLIO_STATIC_DIR (default: "static")
    /// - EMAILJS_* selects the EmailJS relay, otherwise SMTP_* selects SMTP,
    ///   otherwise messages go to the console
    pub fn from_env() -> Self {
        fn get_env(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.is_empty())
        }

        let defaults = Self::default();

        let relay = if let Some(emailjs) = EmailJsConfig::from_env() {
            RelayConfig::EmailJs(emailjs)
        } else if let Some(smtp) = SmtpConfig::from_env() {
            RelayConfig::Smtp(smtp)
        } else {
            RelayConfig::Console
        };

        Self {
            port: get_env("FOLIO_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            db_path: get_env("FOLIO_DB_PATH").map(PathBuf::from),
            static_dir: get_env("FOLIO_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            relay,
        }
    }
}
