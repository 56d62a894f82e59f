use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::common::{ChatEvent, NetworkCommand, NetworkEvent, RelayFrame, classify_frame};

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Connection lifecycle. `Closed` is terminal for an instance; reconnecting
/// means constructing a fresh [`RelayClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    Idle,
    Connecting,
    Open,
    Closed,
}

/// Why [`RelayClient::run`] returned.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The socket is gone; the caller may retry with a new instance.
    /// `reached_open` reports whether the handshake ever completed.
    Retry { reached_open: bool },
    /// The command channel closed; the session is gone, stop entirely.
    Shutdown,
}

/// One socket attempt against the relay: dials, pumps commands out and frames
/// in, and publishes lifecycle transitions as [`NetworkEvent`]s.
pub struct RelayClient {
    relay_url: String,
    event_sender: mpsc::Sender<NetworkEvent>,
    state: ConnState,
}

impl RelayClient {
    pub fn new(relay_url: String, event_sender: mpsc::Sender<NetworkEvent>) -> Self {
        Self {
            relay_url,
            event_sender,
            state: ConnState::Idle,
        }
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    /// Drive this attempt to completion. `pending` holds outbound events that
    /// previous attempts failed to put on the wire; they are replayed first
    /// once the socket opens, and events stranded by this attempt are pushed
    /// back for the next one.
    pub async fn run(
        mut self,
        commands: &mut mpsc::Receiver<NetworkCommand>,
        pending: &mut Vec<ChatEvent>,
    ) -> RunOutcome {
        self.state = ConnState::Connecting;
        log::info!("Connecting to relay at {}", self.relay_url);

        let ws_stream = match connect_async(&self.relay_url).await {
            Ok((stream, _response)) => stream,
            Err(err) => {
                log::error!("Relay connection failed: {err}");
                self.close().await;
                return RunOutcome::Retry {
                    reached_open: false,
                };
            }
        };

        self.state = ConnState::Open;
        log::info!("Relay connection established");
        if self
            .event_sender
            .send(NetworkEvent::ConnectionOpened)
            .await
            .is_err()
        {
            return RunOutcome::Shutdown;
        }

        let (mut writer, mut reader) = ws_stream.split();

        if !self.flush_pending(&mut writer, pending).await {
            self.close().await;
            return RunOutcome::Retry { reached_open: true };
        }

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    None => {
                        let _ = writer.close().await;
                        return RunOutcome::Shutdown;
                    }
                    Some(NetworkCommand::Connect) => {
                        // Already live; at most one socket per session.
                        log::debug!("Ignoring connect request while socket is live");
                    }
                    Some(NetworkCommand::SendMessage(event)) => {
                        if !self.send_event(&mut writer, &event).await {
                            pending.push(event);
                            break;
                        }
                    }
                },
                frame = reader.next() => {
                    if !self.handle_frame(frame).await {
                        break;
                    }
                }
            }
        }

        self.close().await;
        RunOutcome::Retry { reached_open: true }
    }

    /// Serialize and transmit one event. Only valid while `Open`; anywhere
    /// else the event is dropped silently. Returns `false` when the transport
    /// rejected the write.
    async fn send_event(&mut self, writer: &mut WsWriter, event: &ChatEvent) -> bool {
        if self.state != ConnState::Open {
            log::debug!("Dropping outbound message while not connected");
            return true;
        }
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to serialize outbound message: {err}");
                return true;
            }
        };
        if let Err(err) = writer.send(Message::Text(json)).await {
            log::error!("Relay send failed: {err}");
            return false;
        }
        true
    }

    async fn flush_pending(&mut self, writer: &mut WsWriter, pending: &mut Vec<ChatEvent>) -> bool {
        while !pending.is_empty() {
            let event = pending.remove(0);
            log::info!("Replaying queued message from {}", event.timestamp);
            if !self.send_event(writer, &event).await {
                pending.insert(0, event);
                return false;
            }
        }
        true
    }

    /// Process one inbound transport item. Returns `false` when the
    /// connection is finished.
    async fn handle_frame(
        &mut self,
        frame: Option<Result<Message, tokio_tungstenite::tungstenite::Error>>,
    ) -> bool {
        match frame {
            Some(Ok(Message::Text(text))) => {
                match classify_frame(&text) {
                    Some(RelayFrame::Presence(update)) => {
                        let _ = self
                            .event_sender
                            .send(NetworkEvent::PresenceChanged(update.count))
                            .await;
                    }
                    Some(RelayFrame::Chat(event)) => {
                        let _ = self
                            .event_sender
                            .send(NetworkEvent::MessageReceived(event))
                            .await;
                    }
                    // A bad frame costs only itself, never the connection.
                    None => log::warn!("Dropping malformed relay frame"),
                }
                true
            }
            Some(Ok(Message::Close(_))) | None => {
                log::info!("Relay closed the connection");
                false
            }
            Some(Ok(_)) => true,
            Some(Err(err)) => {
                log::error!("Relay receive failed: {err}");
                false
            }
        }
    }

    async fn close(&mut self) {
        self.state = ConnState::Closed;
        let _ = self.event_sender.send(NetworkEvent::ConnectionClosed).await;
    }
}
