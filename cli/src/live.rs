//! Native realtime driver: runs `realtime::Realtime` over tokio-tungstenite.
//!
//! One loop `select!`s over socket reads, frames queued by the link, and an
//! optional queue of points to publish. When the point queue runs dry the
//! link is torn down, the queued teardown frames are flushed, and the socket
//! is closed.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use std::time::Duration;

use frames::Point;
use futures_util::{SinkExt, StreamExt};
use realtime::{ChannelSink, ConnectionStatus, Endpoints, LinkConfig, LinkEvent, Realtime, SocketEvent};
use serde_json::{Value, json};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::CliError;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON line printed by `watch` for an observable event.
pub(crate) fn event_line(event: &LinkEvent) -> Option<Value> {
    match event {
        LinkEvent::BlueprintUpdated(blueprint) => Some(json!({
            "event": "blueprint-update",
            "author": blueprint.author,
            "name": blueprint.name,
            "points": blueprint.points,
        })),
        LinkEvent::ListChanged { author } => Some(json!({
            "event": "blueprints-list-update",
            "author": author,
        })),
        LinkEvent::StatusChanged(_) => None,
    }
}

async fn next_point(points: &mut Option<UnboundedReceiver<Point>>) -> Option<Point> {
    match points {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Outcome of a driven link.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) sent: usize,
    pub(crate) connected: bool,
}

/// Bring a link up and drive it until the socket ends.
///
/// With `points`, each queued point is published once connected and the link
/// is closed when the queue ends. Every drained event is passed to
/// `on_event`.
pub(crate) async fn drive(
    endpoints: Endpoints,
    config: LinkConfig,
    mut points: Option<UnboundedReceiver<Point>>,
    mut on_event: impl FnMut(&LinkEvent),
) -> Result<Summary, CliError> {
    let mut manager = Realtime::<ChannelSink>::new(endpoints);
    let ticket = manager.connect(config);
    let epoch = ticket.epoch;
    tracing::info!(url = %ticket.url, "opening websocket");

    let (stream, _) = match tokio::time::timeout(HANDSHAKE_TIMEOUT, connect_async(ticket.url.as_str())).await {
        Ok(Ok(pair)) => pair,
        Ok(Err(error)) => return Err(CliError::WsConnect(Box::new(error))),
        Err(_) => return Err(CliError::Timeout),
    };
    let (mut ws_write, mut ws_read) = stream.split();
    let (sink, mut outbound) = ChannelSink::channel();
    manager.handle(SocketEvent::opened(epoch, sink));

    let deadline = tokio::time::sleep(HANDSHAKE_TIMEOUT);
    tokio::pin!(deadline);
    let mut summary = Summary::default();
    let mut done = false;

    loop {
        let connected = manager.status().is_connected();
        tokio::select! {
            message = ws_read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    manager.handle(SocketEvent::text(epoch, text.as_str().to_owned()));
                }
                Some(Ok(Message::Close(_))) | None => {
                    manager.handle(SocketEvent::closed(epoch));
                    done = true;
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => manager.handle(SocketEvent::failed(epoch, error.to_string())),
            },
            frame = outbound.next() => match frame {
                Some(text) => {
                    if let Err(error) = ws_write.send(Message::Text(text.into())).await {
                        manager.handle(SocketEvent::failed(epoch, error.to_string()));
                    }
                }
                // The link closed its sink: every queued frame has been written.
                None => {
                    let _ = ws_write.close().await;
                    manager.handle(SocketEvent::closed(epoch));
                    done = true;
                }
            },
            point = next_point(&mut points), if connected => match point {
                Some(point) => {
                    if manager.send(point) {
                        summary.sent += 1;
                    }
                }
                None => {
                    points = None;
                    manager.disconnect();
                }
            },
            () = &mut deadline, if !connected && !summary.connected => {
                manager.disconnect();
                return Err(CliError::Timeout);
            }
        }

        for event in manager.drain_events() {
            if let LinkEvent::StatusChanged(status) = &event {
                tracing::info!(%status, "link status");
                match status {
                    ConnectionStatus::Connected => summary.connected = true,
                    ConnectionStatus::Error => {
                        let reason = manager.last_error().unwrap_or("handshake failed").to_owned();
                        return Err(CliError::LinkFailed(reason));
                    }
                    ConnectionStatus::Connecting | ConnectionStatus::Disconnected => {}
                }
            }
            on_event(&event);
        }

        if done {
            return Ok(summary);
        }
    }
}
