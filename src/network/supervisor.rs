use std::time::Duration;

use tokio::sync::mpsc;

use crate::common::{ChatEvent, NetworkCommand, NetworkEvent};

use super::client::{RelayClient, RunOutcome};

const RECONNECT_BASE_DELAY_MS: u64 = 500;
const RECONNECT_MAX_DELAY_MS: u64 = 30_000;

/// Retry policy around [`RelayClient`]. The state machine itself treats
/// closure as terminal; this loop constructs a fresh instance per attempt,
/// backs off exponentially between failures, and carries undelivered
/// outbound events across attempts.
///
/// This is also the only code path that dials, and it runs attempts strictly
/// sequentially, so at most one socket is ever live per session.
pub async fn run(
    relay_url: String,
    event_sender: mpsc::Sender<NetworkEvent>,
    mut command_receiver: mpsc::Receiver<NetworkCommand>,
) {
    // The connection is opened lazily: nothing is dialed until the session
    // submits an identity and requests it.
    loop {
        match command_receiver.recv().await {
            Some(NetworkCommand::Connect) => break,
            Some(NetworkCommand::SendMessage(_)) => {
                log::debug!("Dropping outbound message before connect");
            }
            None => return,
        }
    }

    let mut pending: Vec<ChatEvent> = Vec::new();
    let mut attempt: u32 = 0;

    loop {
        let client = RelayClient::new(relay_url.clone(), event_sender.clone());
        match client.run(&mut command_receiver, &mut pending).await {
            RunOutcome::Shutdown => {
                log::info!("Session gone; network task stopping");
                return;
            }
            RunOutcome::Retry { reached_open } => {
                if reached_open {
                    attempt = 0;
                }
                attempt = attempt.saturating_add(1);
                let delay = reconnect_delay_ms(attempt);
                log::info!("Reconnecting to relay in {delay} ms (attempt {attempt})");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }
    }
}

fn reconnect_delay_ms(attempt: u32) -> u64 {
    let multiplier = 2_u64.saturating_pow(attempt.saturating_sub(1).min(6));
    (RECONNECT_BASE_DELAY_MS * multiplier).min(RECONNECT_MAX_DELAY_MS)
}
