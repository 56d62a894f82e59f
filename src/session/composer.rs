use chrono::{SecondsFormat, Utc};

use crate::common::ChatEvent;

/// Staged outbound message: text and/or one attached image, held until the
/// session submits or replaces it.
#[derive(Debug, Default)]
pub struct Draft {
    text: String,
    image: Option<String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn attach_image(&mut self, data_uri: impl Into<String>) {
        self.image = Some(data_uri.into());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.image.is_none()
    }

    /// Build the wire event for the staged content, stamped with the current
    /// instant at millisecond precision. `None` when there is nothing to send.
    pub fn compose(&self, user_id: &str, username: &str) -> Option<ChatEvent> {
        if self.is_empty() {
            return None;
        }
        Some(ChatEvent {
            user_id: user_id.to_string(),
            username: username.to_string(),
            content: self.text.clone(),
            image: self.image.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.image = None;
    }
}
