//! Contact form submissions

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::storage::StoreResult;

/// Status reported after a relay accepted the message
pub const SENT_STATUS: &str = "Message sent successfully!";
/// Status reported when the relay has no credentials configured
pub const MISCONFIGURED_STATUS: &str = "Configuration error: Please contact the administrator.";

/// Status reported when the relay rejected the message
pub fn failure_status(reason: &str) -> String {
    format!("Failed to send message: {reason}")
}

/// A validated contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(name: &str, email: &str, message: &str) -> StoreResult<Self> {
        if [name, email, message].iter().any(|f| f.trim().is_empty()) {
            return Err(Error::Validation("Name, email and message are required"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.to_string(),
        })
    }
}
