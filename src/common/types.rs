use serde::{Deserialize, Serialize};

/// Discriminator value the relay puts on presence frames.
pub const ACTIVE_USERS_MARKER: &str = "activeUsers";

/// One chat message as it travels over the wire and appears in the transcript.
///
/// `timestamp` doubles as the event's identity: the relay re-broadcasts every
/// message to all clients including the sender, and receivers drop frames
/// whose timestamp they have already seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub timestamp: String,
}

/// Control frame carrying the relay's active-participant count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresenceUpdate {
    #[serde(rename = "type")]
    pub marker: String,
    pub count: u32,
}

/// An inbound relay frame after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFrame {
    Chat(ChatEvent),
    Presence(PresenceUpdate),
}

/// Classify one inbound text frame.
///
/// Frames carrying the presence marker must parse as [`PresenceUpdate`];
/// everything else must parse as [`ChatEvent`]. Returns `None` for malformed
/// frames (non-JSON, or missing required fields for both variants), which the
/// caller drops without touching the connection.
pub fn classify_frame(text: &str) -> Option<RelayFrame> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    if value.get("type").and_then(serde_json::Value::as_str) == Some(ACTIVE_USERS_MARKER) {
        return serde_json::from_value(value).ok().map(RelayFrame::Presence);
    }
    serde_json::from_value(value).ok().map(RelayFrame::Chat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_json() -> String {
        r#"{"userID":"u-1","username":"alice","content":"hi","timestamp":"2026-08-07T12:00:00.000Z"}"#
            .to_string()
    }

    #[test]
    fn chat_frame_classifies_as_chat() {
        match classify_frame(&chat_json()) {
            Some(RelayFrame::Chat(event)) => {
                assert_eq!(event.user_id, "u-1");
                assert_eq!(event.username, "alice");
                assert_eq!(event.content, "hi");
                assert_eq!(event.image, None);
            }
            other => panic!("expected chat frame, got {other:?}"),
        }
    }

    #[test]
    fn presence_frame_classifies_as_presence() {
        let frame = classify_frame(r#"{"type":"activeUsers","count":5}"#);
        assert_eq!(
            frame,
            Some(RelayFrame::Presence(PresenceUpdate {
                marker: ACTIVE_USERS_MARKER.to_string(),
                count: 5,
            }))
        );
    }

    #[test]
    fn malformed_frames_are_dropped() {
        assert_eq!(classify_frame("not json"), None);
        assert_eq!(classify_frame(r#"{"unrelated":true}"#), None);
        // Presence marker without a count is malformed, not a chat event.
        assert_eq!(classify_frame(r#"{"type":"activeUsers"}"#), None);
    }

    #[test]
    fn unknown_type_value_still_parses_as_chat() {
        let text = r#"{"type":"banner","userID":"u-2","username":"bob","content":"x","timestamp":"t"}"#;
        assert!(matches!(classify_frame(text), Some(RelayFrame::Chat(_))));
    }

    #[test]
    fn serialization_uses_wire_field_names() {
        let event = ChatEvent {
            user_id: "u-1".to_string(),
            username: "alice".to_string(),
            content: "hi".to_string(),
            image: None,
            timestamp: "2026-08-07T12:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["userID"], "u-1");
        // An absent image is omitted entirely, matching the relay protocol.
        assert!(json.get("image").is_none());
    }

    #[test]
    fn image_round_trips_when_present() {
        let text = r#"{"userID":"u-1","username":"alice","content":"","image":"data:image/png;base64,AAAA","timestamp":"t"}"#;
        let Some(RelayFrame::Chat(event)) = classify_frame(text) else {
            panic!("expected chat frame");
        };
        assert_eq!(event.image.as_deref(), Some("data:image/png;base64,AAAA"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["image"], "data:image/png;base64,AAAA");
    }
}
