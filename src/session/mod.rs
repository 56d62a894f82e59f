pub mod composer;
pub mod identity;
pub mod presence;
pub mod transcript;

use tokio::sync::mpsc;

use crate::common::{ChatEvent, NetworkCommand, NetworkEvent};

use composer::Draft;
use identity::Identity;
use presence::PresenceTracker;
use transcript::Transcript;

/// One client's participation in the chat, from identity submission to
/// connection teardown. Owns the transcript, presence state, and draft, and
/// is the only surface the presentation layer talks to.
///
/// All mutation happens on the owning thread: user input calls the write
/// entry points, and drained [`NetworkEvent`]s are folded in via
/// [`Session::apply`].
pub struct Session {
    identity: Identity,
    transcript: Transcript,
    presence: PresenceTracker,
    draft: Draft,
    connected: bool,
    connect_requested: bool,
    command_sender: mpsc::Sender<NetworkCommand>,
}

impl Session {
    pub fn new(command_sender: mpsc::Sender<NetworkCommand>) -> Self {
        Self {
            identity: Identity::generate(),
            transcript: Transcript::new(),
            presence: PresenceTracker::new(),
            draft: Draft::new(),
            connected: false,
            connect_requested: false,
            command_sender,
        }
    }

    /// Submit the display name. On the first success this also requests the
    /// relay connection; at most one `Connect` is ever emitted per session.
    pub fn submit_username(&mut self, name: &str) -> bool {
        if !self.identity.set_username(name) {
            return false;
        }
        if !self.connect_requested {
            self.connect_requested = true;
            self.send_command(NetworkCommand::Connect);
        }
        true
    }

    pub fn compose_text(&mut self, text: impl Into<String>) {
        self.draft.set_text(text);
    }

    pub fn attach_image(&mut self, data_uri: impl Into<String>) {
        self.draft.attach_image(data_uri);
    }

    /// Submit the staged draft. Valid only while connected, with an identity
    /// set and a non-empty draft; anything else is a silent no-op. On success
    /// the event goes to the network task and is optimistically appended to
    /// the transcript with the same timestamp, then the draft is cleared.
    pub fn send(&mut self) -> bool {
        if !self.connected {
            return false;
        }
        let Some(username) = self.identity.username() else {
            return false;
        };
        let Some(event) = self.draft.compose(self.identity.user_id(), username) else {
            return false;
        };
        self.send_command(NetworkCommand::SendMessage(event.clone()));
        self.transcript.append_local(event);
        self.draft.clear();
        true
    }

    /// Fold one network event into session state.
    pub fn apply(&mut self, event: NetworkEvent) {
        match event {
            NetworkEvent::ConnectionOpened => self.connected = true,
            NetworkEvent::ConnectionClosed => self.connected = false,
            NetworkEvent::MessageReceived(event) => {
                self.transcript.ingest(event);
            }
            NetworkEvent::PresenceChanged(count) => self.presence.update(count),
        }
    }

    pub fn events(&self) -> &[ChatEvent] {
        self.transcript.events()
    }

    pub fn active_users(&self) -> Option<u32> {
        self.presence.active()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn user_id(&self) -> &str {
        self.identity.user_id()
    }

    pub fn username(&self) -> Option<&str> {
        self.identity.username()
    }

    pub fn draft_image(&self) -> Option<&str> {
        self.draft.image()
    }

    fn send_command(&mut self, command: NetworkCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to network: {err}");
        }
    }
}
