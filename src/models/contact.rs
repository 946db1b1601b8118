use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Incoming contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    /// Hidden field; any value here means a bot filled the form.
    #[serde(default)]
    pub honeypot: Option<String>,
}

/// One line of the outbox file.
#[derive(Debug, Serialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub received_at: String,
}

impl ContactForm {
    /// Validate the submission. Returns the first problem found.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required");
        }
        if !self.email.contains('@') || self.email.trim().len() < 3 {
            return Err("A valid email is required");
        }
        if self.message.trim().is_empty() {
            return Err("Message is required");
        }
        if self.message.len() > 10_000 {
            return Err("Message is too long");
        }
        Ok(())
    }

    pub fn is_honeypot(&self) -> bool {
        self.honeypot
            .as_deref()
            .map(|h| !h.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn into_message(self) -> ContactMessage {
        ContactMessage {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            received_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
