use crate::common::types::ChatEvent;

/// Commands the session sends down to the network task.
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Dial the relay. Emitted once, on the first successful identity
    /// submission; redundant requests while a socket is live are ignored.
    Connect,
    SendMessage(ChatEvent),
}
