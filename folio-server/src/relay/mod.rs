//! Contact form relays

pub mod console;
pub mod emailjs;
pub mod smtp;

pub use console::ConsoleRelay;
pub use emailjs::{EmailJsConfig, EmailJsRelay};
pub use smtp::{SmtpConfig, SmtpRelay};

use folio_core::ContactMessage;

/// Trait for delivering contact form submissions to the site owner
pub trait ContactRelay: Send + Sync {
    /// Whether the relay has the credentials it needs to attempt delivery
    fn is_configured(&self) -> bool {
        true
    }

    /// Deliver a message, returning the relay's reason on failure
    fn send(&self, message: &ContactMessage) -> Result<(), String>;
}

/// Allow using Box<dyn ContactRelay> as a ContactRelay
impl ContactRelay for Box<dyn ContactRelay> {
    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    fn send(&self, message: &ContactMessage) -> Result<(), String> {
        (**self).send(message)
    }
}
