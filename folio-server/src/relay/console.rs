//! Console-based relay for development

use folio_core::ContactMessage;

use super::ContactRelay;

/// Relay that prints messages to the console instead of delivering them
pub struct ConsoleRelay;

impl ConsoleRelay {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactRelay for ConsoleRelay {
    fn send(&self, message: &ContactMessage) -> Result<(), String> {
        println!();
        println!("========================================");
        println!("  CONTACT MESSAGE FROM: {} <{}>", message.name, message.email);
        println!("----------------------------------------");
        println!("{}", message.message);
        println!("========================================");
        println!();

        tracing::info!(from = %message.email, "Contact message logged");

        Ok(())
    }
}
