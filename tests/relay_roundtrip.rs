//! End-to-end exercise of the network task against an in-process relay.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use chatify::common::{ChatEvent, NetworkCommand, NetworkEvent};
use chatify::network::supervisor;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimal stand-in for the relay: greets each client with a presence frame,
/// then echoes every chat frame back, exactly like the production relay
/// re-broadcasts to all clients including the sender.
async fn spawn_relay() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind relay");
    let addr = listener.local_addr().expect("relay addr");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut ws = match accept_async(stream).await {
                    Ok(ws) => ws,
                    Err(_) => return,
                };
                let presence = serde_json::json!({ "type": "activeUsers", "count": 3 });
                if ws.send(Message::Text(presence.to_string())).await.is_err() {
                    return;
                }
                // One garbage frame up front; clients must survive it.
                if ws
                    .send(Message::Text("this is not json".to_string()))
                    .await
                    .is_err()
                {
                    return;
                }
                while let Some(Ok(frame)) = ws.next().await {
                    match frame {
                        Message::Text(text) => {
                            if ws.send(Message::Text(text)).await.is_err() {
                                break;
                            }
                        }
                        Message::Close(_) => break,
                        _ => {}
                    }
                }
            });
        }
    });

    format!("ws://{addr}")
}

fn outbound_event(timestamp: &str) -> ChatEvent {
    ChatEvent {
        user_id: "u-alice".to_string(),
        username: "alice".to_string(),
        content: "hi".to_string(),
        image: None,
        timestamp: timestamp.to_string(),
    }
}

async fn next_event(rx: &mut mpsc::Receiver<NetworkEvent>) -> NetworkEvent {
    timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for network event")
        .expect("event channel closed")
}

#[tokio::test]
async fn connect_send_echo_and_presence() {
    let relay_url = spawn_relay().await;

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, mut event_rx) = mpsc::channel(16);
    let task = tokio::spawn(supervisor::run(relay_url, event_tx, cmd_rx));

    cmd_tx
        .send(NetworkCommand::Connect)
        .await
        .expect("send connect");

    assert!(matches!(
        next_event(&mut event_rx).await,
        NetworkEvent::ConnectionOpened
    ));

    // The presence greeting routes to presence, never to the transcript; the
    // malformed frame that follows it is silently dropped.
    match next_event(&mut event_rx).await {
        NetworkEvent::PresenceChanged(count) => assert_eq!(count, 3),
        other => panic!("expected presence frame first, got {other:?}"),
    }

    let sent = outbound_event("2026-08-07T12:00:00.000Z");
    cmd_tx
        .send(NetworkCommand::SendMessage(sent.clone()))
        .await
        .expect("send message");

    match next_event(&mut event_rx).await {
        NetworkEvent::MessageReceived(echo) => assert_eq!(echo, sent),
        other => panic!("expected echoed chat event, got {other:?}"),
    }

    // A redundant connect while the socket is live must not disturb it.
    cmd_tx
        .send(NetworkCommand::Connect)
        .await
        .expect("send redundant connect");
    let second = outbound_event("2026-08-07T12:00:01.000Z");
    cmd_tx
        .send(NetworkCommand::SendMessage(second.clone()))
        .await
        .expect("send second message");
    match next_event(&mut event_rx).await {
        NetworkEvent::MessageReceived(echo) => assert_eq!(echo, second),
        other => panic!("expected echoed chat event, got {other:?}"),
    }

    // Dropping the session side shuts the network task down.
    drop(cmd_tx);
    timeout(RECV_TIMEOUT, task)
        .await
        .expect("supervisor did not stop")
        .expect("supervisor panicked");
}

#[tokio::test]
async fn messages_sent_before_connect_are_dropped() {
    let relay_url = spawn_relay().await;

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, mut event_rx) = mpsc::channel(16);
    let task = tokio::spawn(supervisor::run(relay_url, event_tx, cmd_rx));

    // Best-effort semantics: nothing is queued before the session connects.
    cmd_tx
        .send(NetworkCommand::SendMessage(outbound_event(
            "2026-08-07T11:59:59.000Z",
        )))
        .await
        .expect("send early message");
    cmd_tx
        .send(NetworkCommand::Connect)
        .await
        .expect("send connect");

    assert!(matches!(
        next_event(&mut event_rx).await,
        NetworkEvent::ConnectionOpened
    ));
    match next_event(&mut event_rx).await {
        NetworkEvent::PresenceChanged(count) => assert_eq!(count, 3),
        other => panic!("expected presence frame, got {other:?}"),
    }

    // The early message never reached the wire, so nothing comes back.
    assert!(
        timeout(Duration::from_millis(300), event_rx.recv())
            .await
            .is_err()
    );

    drop(cmd_tx);
    timeout(RECV_TIMEOUT, task)
        .await
        .expect("supervisor did not stop")
        .expect("supervisor panicked");
}
