//! EmailJS transactional email relay

use std::time::Duration;

use folio_core::ContactMessage;
use reqwest::blocking::Client;
use serde::Serialize;

use super::ContactRelay;

/// Default EmailJS REST endpoint
pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Credentials identifying an EmailJS service and template
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    /// The account's public key, sent as `user_id`
    pub public_key: String,
    pub endpoint: String,
}

impl EmailJsConfig {
    /// Create config from environment variables
    ///
    /// Required:
    /// - EMAILJS_SERVICE_ID
    /// - EMAILJS_TEMPLATE_ID
    /// - EMAILJS_PUBLIC_KEY
    ///
    /// Optional:
    /// - EMAILJS_ENDPOINT (default: the public EmailJS API)
    pub fn from_env() -> Option<Self> {
        fn get_env(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.is_empty())
        }

        Some(Self {
            service_id: get_env("EMAILJS_SERVICE_ID")?,
            template_id: get_env("EMAILJS_TEMPLATE_ID")?,
            public_key: get_env("EMAILJS_PUBLIC_KEY")?,
            endpoint: get_env("EMAILJS_ENDPOINT").unwrap_or_else(|| EMAILJS_ENDPOINT.to_string()),
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactMessage,
}

/// Relay that posts the form fields to EmailJS.
///
/// Uses the blocking reqwest client, so `send` must run off the async
/// runtime (e.g. in `spawn_blocking`).
pub struct EmailJsRelay {
    config: EmailJsConfig,
}

impl EmailJsRelay {
    pub fn new(config: EmailJsConfig) -> Self {
        Self { config }
    }

    fn client() -> Result<Client, String> {
        Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))
    }
}

impl ContactRelay for EmailJsRelay {
    fn is_configured(&self) -> bool {
        [
            &self.config.service_id,
            &self.config.template_id,
            &self.config.public_key,
        ]
        .iter()
        .all(|v| !v.trim().is_empty())
    }

    fn send(&self, message: &ContactMessage) -> Result<(), String> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: message,
        };

        let response = Self::client()?
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(if text.is_empty() {
                status.to_string()
            } else {
                text
            });
        }

        tracing::info!(from = %message.email, "Contact message relayed via EmailJS");
        Ok(())
    }
}
