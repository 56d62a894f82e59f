use uuid::Uuid;

/// Who this client is for the lifetime of one session.
///
/// The id is generated once at construction and survives reconnects; the
/// display name is set by the user exactly once.
#[derive(Debug, Clone)]
pub struct Identity {
    user_id: String,
    username: Option<String>,
}

impl Identity {
    pub fn generate() -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            username: None,
        }
    }

    /// Accept the display name. Rejects empty or all-whitespace input and
    /// any submission after one has already succeeded.
    pub fn set_username(&mut self, name: &str) -> bool {
        if self.username.is_some() {
            return false;
        }
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.username = Some(name.to_string());
        true
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}
