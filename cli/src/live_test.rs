use frames::{Blueprint, BlueprintKey};
use futures_util::{SinkExt, StreamExt};
use realtime::TransportKind;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;

use super::*;

const OPEN: &str = r#"0{"sid":"s-1","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

async fn local_endpoints() -> (TcpListener, Endpoints) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let endpoints = Endpoints {
        api_base: format!("http://{addr}"),
        io_base: format!("http://{addr}"),
        stomp_path: "/ws-blueprints".to_owned(),
    };
    (listener, endpoints)
}

fn command_of(frame: &str) -> String {
    frame.lines().next().unwrap_or_default().to_owned()
}

#[test]
fn update_event_renders_as_json_line() {
    let event = LinkEvent::BlueprintUpdated(Blueprint {
        author: "juan".to_owned(),
        name: "plano-1".to_owned(),
        points: vec![Point::new(10, 20), Point::new(30, 40)],
    });
    let line = event_line(&event).expect("printed");
    assert_eq!(
        line,
        json!({
            "event": "blueprint-update",
            "author": "juan",
            "name": "plano-1",
            "points": [{"x": 10, "y": 20}, {"x": 30, "y": 40}],
        })
    );
}

#[test]
fn list_event_renders_author() {
    let line = event_line(&LinkEvent::ListChanged { author: "juan".to_owned() }).expect("printed");
    assert_eq!(line["event"], "blueprints-list-update");
    assert_eq!(line["author"], "juan");
}

#[test]
fn status_events_are_not_printed() {
    assert!(event_line(&LinkEvent::StatusChanged(ConnectionStatus::Connected)).is_none());
}

#[tokio::test]
async fn draw_over_topic_publishes_then_tears_down() {
    let (listener, endpoints) = local_endpoints().await;
    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(tcp).await.expect("handshake");
        let mut received = Vec::new();
        while let Some(Ok(message)) = ws.next().await {
            let Message::Text(text) = message else {
                continue;
            };
            let text = text.as_str().to_owned();
            if command_of(&text) == "CONNECT" {
                ws.send(Message::Text("CONNECTED\nversion:1.2\n\n\0".into())).await.expect("reply");
            }
            received.push(text);
        }
        received
    });

    let config = LinkConfig::new(TransportKind::Topic, "juan", "plano-1", None).expect("config");
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tx.send(Point::new(3, 4)).expect("queue");
    tx.send(Point::new(5, 6)).expect("queue");
    drop(tx);

    let summary = drive(endpoints, config, Some(rx), |_| {}).await.expect("drive");
    assert_eq!(summary, Summary { sent: 2, connected: true });

    let received = server.await.expect("server");
    let commands: Vec<String> = received.iter().map(|f| command_of(f)).collect();
    assert_eq!(commands, ["CONNECT", "SUBSCRIBE", "SEND", "SEND", "UNSUBSCRIBE", "DISCONNECT"]);
    assert!(received[1].contains("destination:/topic/blueprints.juan.plano-1"));
    assert!(received[2].contains(r#"{"author":"juan","name":"plano-1","point":{"x":3,"y":4}}"#));
}

#[tokio::test]
async fn watch_over_room_reports_updates_until_server_closes() {
    let (listener, endpoints) = local_endpoints().await;
    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(tcp).await.expect("handshake");
        ws.send(Message::Text(OPEN.into())).await.expect("open");
        let mut received = Vec::new();
        while let Some(Ok(message)) = ws.next().await {
            let Message::Text(text) = message else {
                continue;
            };
            let text = text.as_str().to_owned();
            if text == "40" {
                ws.send(Message::Text(r#"40{"sid":"n-1"}"#.into())).await.expect("ack");
            } else if text.starts_with(r#"42["join-room""#) {
                let push = r#"42["blueprint-update",{"author":"juan","name":"plano-1","points":[{"x":10,"y":20},{"x":30,"y":40}]}]"#;
                ws.send(Message::Text(push.into())).await.expect("push");
                ws.close(None).await.expect("close");
            }
            received.push(text);
        }
        received
    });

    let config = LinkConfig::new(TransportKind::Room, "juan", "plano-1", None).expect("config");
    let mut events = Vec::new();
    let summary = drive(endpoints, config, None, |event| events.push(event.clone())).await.expect("drive");
    assert!(summary.connected);
    assert_eq!(summary.sent, 0);

    let key = BlueprintKey::new("juan", "plano-1").expect("key");
    let updates: Vec<&Blueprint> = events
        .iter()
        .filter_map(|event| match event {
            LinkEvent::BlueprintUpdated(bp) => Some(bp),
            _ => None,
        })
        .collect();
    assert_eq!(updates.len(), 1);
    assert_eq!((updates[0].author.as_str(), updates[0].name.as_str()), (key.author.as_str(), key.name.as_str()));
    assert_eq!(updates[0].points, vec![Point::new(10, 20), Point::new(30, 40)]);
    assert_eq!(events.last(), Some(&LinkEvent::StatusChanged(ConnectionStatus::Disconnected)));

    let received = server.await.expect("server");
    assert_eq!(received[0], "40");
    assert_eq!(received[1], r#"42["join-room","blueprints.juan.plano-1"]"#);
}

#[tokio::test]
async fn refused_room_connect_is_link_failure() {
    let (listener, endpoints) = local_endpoints().await;
    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(tcp).await.expect("handshake");
        ws.send(Message::Text(OPEN.into())).await.expect("open");
        while let Some(Ok(message)) = ws.next().await {
            if matches!(&message, Message::Text(text) if text.as_str() == "40") {
                let refusal = r#"44{"message":"invalid token"}"#;
                let _ = ws.send(Message::Text(refusal.into())).await;
            }
        }
    });

    let config = LinkConfig::new(TransportKind::Room, "juan", "plano-1", None).expect("config");
    let err = drive(endpoints, config, None, |_| {}).await.expect_err("refused");
    assert!(matches!(err, CliError::LinkFailed(ref reason) if reason == "invalid token"));
}
