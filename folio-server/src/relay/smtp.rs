//! SMTP-based relay for production

use folio_core::ContactMessage;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use super::ContactRelay;

/// Configuration for SMTP delivery
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server host (e.g., "smtp.resend.com")
    pub host: String,
    /// SMTP server port (typically 465 for TLS, 587 for STARTTLS)
    pub port: u16,
    pub username: String,
    /// SMTP password (or API key for services like Resend)
    pub password: String,
    pub from_email: String,
    pub from_name: Option<String>,
    /// Mailbox that receives contact messages
    pub to_email: String,
}

impl SmtpConfig {
    /// Create config from environment variables
    ///
    /// Required:
    /// - SMTP_HOST
    /// - SMTP_USERNAME
    /// - SMTP_PASSWORD
    /// - SMTP_FROM_EMAIL
    /// - SMTP_TO_EMAIL
    ///
    /// Optional:
    /// - SMTP_PORT (default: 465)
    /// - SMTP_FROM_NAME
    pub fn from_env() -> Option<Self> {
        fn get_env(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.is_empty())
        }

        let host = get_env("SMTP_HOST")?;
        let username = get_env("SMTP_USERNAME")?;
        let password = get_env("SMTP_PASSWORD")?;
        let from_email = get_env("SMTP_FROM_EMAIL")?;
        let to_email = get_env("SMTP_TO_EMAIL")?;

        let port = get_env("SMTP_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(465);

        Some(Self {
            host,
            port,
            username,
            password,
            from_email,
            from_name: get_env("SMTP_FROM_NAME"),
            to_email,
        })
    }
}

/// Relay that mails contact messages to the site owner
pub struct SmtpRelay {
    transport: SmtpTransport,
    from_email: String,
    from_name: Option<String>,
    to_email: String,
}

impl SmtpRelay {
    pub fn new(config: SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.username, config.password);

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
            .port(config.port)
            .credentials(creds)
            .build();

        transport
            .test_connection()
            .map_err(|e| format!("SMTP connection test failed: {}", e))?;

        tracing::info!(host = %config.host, port = config.port, "SMTP connection established");

        Ok(Self {
            transport,
            from_email: config.from_email,
            from_name: config.from_name,
            to_email: config.to_email,
        })
    }

    fn from_address(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_email),
            None => self.from_email.clone(),
        }
    }
}

impl ContactRelay for SmtpRelay {
    fn send(&self, message: &ContactMessage) -> Result<(), String> {
        let from: Mailbox = self
            .from_address()
            .parse()
            .map_err(|e| format!("Invalid from address: {}", e))?;
        let to: Mailbox = self
            .to_email
            .parse()
            .map_err(|e| format!("Invalid to address: {}", e))?;
        let reply_to: Mailbox = message
            .email
            .parse()
            .map_err(|e| format!("Invalid reply address: {}", e))?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .reply_to(reply_to)
            .subject(format!("Portfolio contact from {}", message.name))
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "From: {} <{}>\n\n{}",
                message.name, message.email, message.message
            ))
            .map_err(|e| format!("Failed to build email: {}", e))?;

        self.transport
            .send(&email)
            .map_err(|e| format!("Failed to send email: {}", e))?;

        tracing::info!(from = %message.email, "Contact message relayed via SMTP");
        Ok(())
    }
}
