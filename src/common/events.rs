use crate::common::types::ChatEvent;

/// Events published by the network task for the session to fold in.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    ConnectionOpened,
    ConnectionClosed,
    MessageReceived(ChatEvent),
    PresenceChanged(u32),
}
