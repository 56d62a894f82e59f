pub mod commands;
pub mod events;
pub mod types;

pub use commands::NetworkCommand;
pub use events::NetworkEvent;
pub use types::{ACTIVE_USERS_MARKER, ChatEvent, PresenceUpdate, RelayFrame, classify_frame};
