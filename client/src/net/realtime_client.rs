//! Browser driver for the `realtime` link manager.
//!
//! One long-lived local task owns the [`Realtime`] manager. UI code talks to
//! it through [`RealtimeSender`]; each WebSocket gets its own task that only
//! forwards traffic tagged with its epoch. Manager events are folded into
//! [`BoardState`] and list refreshes after every input.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "csr")]` since it
//! requires a browser environment.
//!
//! ERROR HANDLING
//! ==============
//! Socket failures become status changes; there is no reconnect loop. A new
//! connection is made only when the view asks for one.

#[cfg(test)]
#[path = "realtime_client_test.rs"]
mod realtime_client_test;

use frames::Point;
use futures::channel::mpsc::UnboundedSender;
use log::debug;
use realtime::{ConnectionStatus, LOG_TARGET, LinkConfig, LinkEvent};

use crate::state::board::BoardState;

/// Request from the UI to the realtime task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RealtimeCommand {
    Connect(LinkConfig),
    Send(Point),
    Disconnect,
}

/// Handle to the realtime task, shared through context.
///
/// The default handle is detached and drops every command.
#[derive(Clone, Debug, Default)]
pub struct RealtimeSender {
    tx: Option<UnboundedSender<RealtimeCommand>>,
}

impl RealtimeSender {
    pub fn new(tx: UnboundedSender<RealtimeCommand>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn connect(&self, config: LinkConfig) -> bool {
        self.dispatch(RealtimeCommand::Connect(config))
    }

    pub fn send_point(&self, point: Point) -> bool {
        self.dispatch(RealtimeCommand::Send(point))
    }

    pub fn disconnect(&self) -> bool {
        self.dispatch(RealtimeCommand::Disconnect)
    }

    fn dispatch(&self, command: RealtimeCommand) -> bool {
        self.tx.as_ref().is_some_and(|tx| tx.unbounded_send(command).is_ok())
    }
}

/// Fold drained manager events into board state.
///
/// Returns `true` when the author's blueprint list should be fetched again.
pub(crate) fn absorb(board: &mut BoardState, events: Vec<LinkEvent>, last_error: Option<&str>) -> bool {
    let mut reload = false;
    for event in events {
        match event {
            LinkEvent::StatusChanged(status) => {
                board.connection_status = status;
                board.realtime_error = match status {
                    ConnectionStatus::Error => last_error.map(str::to_owned),
                    _ => None,
                };
            }
            LinkEvent::BlueprintUpdated(update) => {
                let count = update.points.len();
                if board.apply_update(update) {
                    debug!(target: LOG_TARGET, "applied remote update ({count} points)");
                } else {
                    debug!(target: LOG_TARGET, "remote update for another blueprint ignored");
                }
            }
            LinkEvent::ListChanged { author } => {
                debug!(target: LOG_TARGET, "blueprint list changed for {author}");
                reload = true;
            }
        }
    }
    reload
}

/// Spawn the realtime task and return its command handle.
#[cfg(feature = "csr")]
pub fn spawn_realtime_client(
    endpoints: realtime::Endpoints,
    board: leptos::prelude::RwSignal<BoardState>,
    refresh: leptos::prelude::RwSignal<crate::state::blueprints::ListRefresh>,
) -> RealtimeSender {
    let (tx, rx) = futures::channel::mpsc::unbounded::<RealtimeCommand>();
    leptos::task::spawn_local(realtime_loop(endpoints, board, refresh, rx));
    RealtimeSender::new(tx)
}

/// Native builds have no sockets; the handle is detached.
#[cfg(not(feature = "csr"))]
pub fn spawn_realtime_client(
    endpoints: realtime::Endpoints,
    board: leptos::prelude::RwSignal<BoardState>,
    refresh: leptos::prelude::RwSignal<crate::state::blueprints::ListRefresh>,
) -> RealtimeSender {
    let _ = (endpoints, board, refresh);
    RealtimeSender::default()
}

#[cfg(feature = "csr")]
enum Input {
    Command(RealtimeCommand),
    Socket(realtime::SocketEvent<realtime::ChannelSink>),
}

/// Serialize UI commands and socket events through one manager.
#[cfg(feature = "csr")]
async fn realtime_loop(
    endpoints: realtime::Endpoints,
    board: leptos::prelude::RwSignal<BoardState>,
    refresh: leptos::prelude::RwSignal<crate::state::blueprints::ListRefresh>,
    commands: futures::channel::mpsc::UnboundedReceiver<RealtimeCommand>,
) {
    use futures::StreamExt;
    use leptos::prelude::Update;
    use realtime::{ChannelSink, Realtime, SocketEvent};

    let (socket_tx, socket_rx) = futures::channel::mpsc::unbounded::<SocketEvent<ChannelSink>>();
    let mut inputs = futures::stream::select(commands.map(Input::Command), socket_rx.map(Input::Socket));
    let mut manager = Realtime::<ChannelSink>::new(endpoints);

    while let Some(input) = inputs.next().await {
        match input {
            Input::Command(RealtimeCommand::Connect(config)) => {
                let ticket = manager.connect(config);
                spawn_socket(ticket, socket_tx.clone());
            }
            Input::Command(RealtimeCommand::Send(point)) => {
                manager.send(point);
            }
            Input::Command(RealtimeCommand::Disconnect) => manager.disconnect(),
            Input::Socket(event) => manager.handle(event),
        }

        let events = manager.drain_events();
        if events.is_empty() {
            continue;
        }
        let last_error = manager.last_error().map(str::to_owned);
        let mut reload = false;
        board.update(|b| reload = absorb(b, events, last_error.as_deref()));
        if reload {
            refresh.update(crate::state::blueprints::ListRefresh::bump);
        }
    }
}

/// Open one WebSocket and forward its traffic until either side ends.
#[cfg(feature = "csr")]
fn spawn_socket(ticket: realtime::Ticket, events: UnboundedSender<realtime::SocketEvent<realtime::ChannelSink>>) {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;
    use realtime::{ChannelSink, SocketEvent};

    leptos::task::spawn_local(async move {
        let epoch = ticket.epoch;
        let ws = match WebSocket::open(&ticket.url) {
            Ok(ws) => ws,
            Err(e) => {
                let _ = events.unbounded_send(SocketEvent::failed(epoch, e.to_string()));
                return;
            }
        };
        let (mut ws_write, mut ws_read) = ws.split();
        let (sink, mut out_rx) = ChannelSink::channel();
        if events.unbounded_send(SocketEvent::opened(epoch, sink)).is_err() {
            return;
        }

        // Outbound frames queued by the link; a closed channel means teardown.
        let send_task = async {
            while let Some(text) = out_rx.next().await {
                if ws_write.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            let _ = ws_write.close().await;
        };

        let recv_task = async {
            while let Some(msg) = ws_read.next().await {
                match msg {
                    Ok(Message::Text(text)) => {
                        if events.unbounded_send(SocketEvent::text(epoch, text)).is_err() {
                            break;
                        }
                    }
                    Ok(Message::Bytes(_)) => {
                        debug!(target: LOG_TARGET, "binary message ignored (epoch {epoch})");
                    }
                    Err(e) => {
                        let _ = events.unbounded_send(SocketEvent::failed(epoch, e.to_string()));
                        break;
                    }
                }
            }
        };

        futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;
        let _ = events.unbounded_send(SocketEvent::closed(epoch));
    });
}
