//! Link lifecycle and the single-link [`Realtime`] manager.
//!
//! ARCHITECTURE
//! ============
//! ```text
//!   caller ── connect ──▶ Realtime ── Ticket{epoch,url} ──▶ driver opens socket
//!   driver ── SocketEvent{epoch, Opened(sink) | Text | Failed | Closed} ──▶ Realtime::handle
//!   Realtime ── Link ── Protocol::{Topic, Room} ── frames ──▶ FrameSink
//!   caller ◀── drain_events: StatusChanged | BlueprintUpdated | ListChanged
//! ```
//!
//! Status transitions: `disconnected → connecting → {connected | error}`,
//! `connected → disconnected` on teardown or remote drop. A socket that
//! closes while still connecting is a handshake failure.

#[cfg(test)]
#[path = "link_test.rs"]
mod link_test;

use frames::{Blueprint, Point};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use log::{debug, info, warn};

use crate::config::{Endpoints, LinkConfig, TransportKind};
use crate::socketio::SocketIoSession;
use crate::status::ConnectionStatus;
use crate::stomp::StompSession;
use crate::{LOG_TARGET, LinkError};

/// Outbound half of an open WebSocket, owned by the live link.
pub trait FrameSink {
    /// Queue one text message. Returns `false` if the socket is gone.
    fn send_text(&mut self, text: String) -> bool;
    /// Ask the driver to close the socket.
    fn close(&mut self);
}

/// [`FrameSink`] over an unbounded channel drained by the socket driver.
/// Closing the channel tells the driver to close the socket.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: UnboundedSender<String>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(tx: UnboundedSender<String>) -> Self {
        Self { tx }
    }

    /// A sink plus the receiver its driver writes to the socket.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded();
        (Self::new(tx), rx)
    }
}

impl FrameSink for ChannelSink {
    fn send_text(&mut self, text: String) -> bool {
        self.tx.unbounded_send(text).is_ok()
    }

    fn close(&mut self) {
        self.tx.close_channel();
    }
}

/// What the driver must do to bring a link up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub epoch: u64,
    pub url: String,
}

/// Socket activity reported by a driver, tagged with its ticket's epoch.
#[derive(Debug)]
pub struct SocketEvent<S> {
    pub epoch: u64,
    pub kind: SocketEventKind<S>,
}

#[derive(Debug)]
pub enum SocketEventKind<S> {
    /// The socket opened; `S` carries outbound frames from now on.
    Opened(S),
    /// The socket could not be opened or failed mid-stream.
    Failed(String),
    Text(String),
    Closed,
}

impl<S> SocketEvent<S> {
    #[must_use]
    pub fn opened(epoch: u64, sink: S) -> Self {
        Self { epoch, kind: SocketEventKind::Opened(sink) }
    }

    #[must_use]
    pub fn text(epoch: u64, text: String) -> Self {
        Self { epoch, kind: SocketEventKind::Text(text) }
    }

    #[must_use]
    pub fn failed(epoch: u64, reason: String) -> Self {
        Self { epoch, kind: SocketEventKind::Failed(reason) }
    }

    #[must_use]
    pub fn closed(epoch: u64) -> Self {
        Self { epoch, kind: SocketEventKind::Closed }
    }
}

/// Observable outcome of driving the link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    StatusChanged(ConnectionStatus),
    /// Full replacement point sequence for the active blueprint.
    BlueprintUpdated(Blueprint),
    /// The active author's blueprint list changed on the server.
    ListChanged { author: String },
}

/// Protocol step result, applied by the owning [`Link`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    Send(String),
    Connected,
    Failed(String),
    Dropped,
    Updated(Blueprint),
    ListChanged(String),
}

#[derive(Debug)]
enum Protocol {
    Topic(StompSession),
    Room(SocketIoSession),
}

impl Protocol {
    fn on_open(&mut self) -> Vec<Effect> {
        match self {
            Self::Topic(session) => session.on_open(),
            Self::Room(session) => session.on_open(),
        }
    }

    fn on_text(&mut self, text: &str) -> Vec<Effect> {
        match self {
            Self::Topic(session) => session.on_text(text),
            Self::Room(session) => session.on_text(text),
        }
    }

    fn publish(&self, point: Point) -> Result<String, LinkError> {
        match self {
            Self::Topic(session) => session.publish(point),
            Self::Room(session) => session.publish(point),
        }
    }

    fn teardown(&mut self) -> Vec<String> {
        match self {
            Self::Topic(session) => session.teardown(),
            Self::Room(session) => session.teardown(),
        }
    }
}

/// One connection attempt: protocol session, sink, and status.
#[derive(Debug)]
pub struct Link<S> {
    config: LinkConfig,
    epoch: u64,
    protocol: Protocol,
    sink: Option<S>,
    status: ConnectionStatus,
}

impl<S: FrameSink> Link<S> {
    fn new(config: LinkConfig, epoch: u64, endpoints: &Endpoints) -> Self {
        let protocol = match config.kind {
            TransportKind::Topic => Protocol::Topic(StompSession::new(config.key.clone(), endpoints.stomp_host())),
            TransportKind::Room => Protocol::Room(SocketIoSession::new(config.key.clone(), config.token.clone())),
        };
        Self { config, epoch, protocol, sink: None, status: ConnectionStatus::Connecting }
    }

    #[must_use]
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    fn transmit(&mut self, text: String) -> bool {
        match self.sink.as_mut() {
            Some(sink) => sink.send_text(text),
            None => false,
        }
    }

    fn close_sink(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            sink.close();
        }
    }

    /// Graceful close: protocol goodbye frames, then the socket.
    fn shutdown(&mut self) {
        if self.sink.is_some() {
            for frame in self.protocol.teardown() {
                self.transmit(frame);
            }
        }
        self.close_sink();
        self.status = ConnectionStatus::Disconnected;
    }
}

/// Owner of the single live link.
#[derive(Debug)]
pub struct Realtime<S> {
    endpoints: Endpoints,
    link: Option<Link<S>>,
    next_epoch: u64,
    last_error: Option<String>,
    events: Vec<LinkEvent>,
}

impl<S: FrameSink> Realtime<S> {
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints, link: None, next_epoch: 1, last_error: None, events: Vec::new() }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn set_endpoints(&mut self, endpoints: Endpoints) {
        self.endpoints = endpoints;
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.link.as_ref().map_or(ConnectionStatus::Disconnected, Link::status)
    }

    /// Message of the most recent handshake failure, cleared on `connect`.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn link(&self) -> Option<&Link<S>> {
        self.link.as_ref()
    }

    /// Whether `epoch` belongs to the live link.
    #[must_use]
    pub fn is_current(&self, epoch: u64) -> bool {
        self.link.as_ref().is_some_and(|link| link.epoch == epoch)
    }

    /// Take the events produced since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<LinkEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tear down any previous link and start a new one.
    ///
    /// The caller opens a WebSocket at the returned URL and reports its
    /// activity through [`Realtime::handle`] with the returned epoch.
    pub fn connect(&mut self, config: LinkConfig) -> Ticket {
        self.disconnect();

        let epoch = self.next_epoch;
        self.next_epoch += 1;
        let url = self.endpoints.socket_url(config.kind);
        info!(
            target: LOG_TARGET,
            "connecting {} link for {} (epoch {epoch}) to {url}",
            config.kind,
            config.key
        );

        self.last_error = None;
        self.link = Some(Link::new(config, epoch, &self.endpoints));
        self.events.push(LinkEvent::StatusChanged(ConnectionStatus::Connecting));
        Ticket { epoch, url }
    }

    /// Idempotent teardown of the live link, if any.
    pub fn disconnect(&mut self) {
        let Some(mut link) = self.link.take() else {
            return;
        };
        let before = link.status;
        link.shutdown();
        debug!(target: LOG_TARGET, "link epoch {} torn down", link.epoch);
        if before != ConnectionStatus::Disconnected {
            self.events.push(LinkEvent::StatusChanged(ConnectionStatus::Disconnected));
        }
    }

    /// Send one point on the live link.
    ///
    /// Returns `false` without sending anything unless the link is connected.
    pub fn send(&mut self, point: Point) -> bool {
        let Some(link) = self.link.as_mut().filter(|link| link.status.is_connected()) else {
            debug!(target: LOG_TARGET, "not connected; point {point} not sent");
            return false;
        };
        match link.protocol.publish(point) {
            Ok(text) => link.transmit(text),
            Err(err) => {
                warn!(target: LOG_TARGET, "failed to encode draw event: {err}");
                false
            }
        }
    }

    /// Feed one socket event from a driver.
    pub fn handle(&mut self, event: SocketEvent<S>) {
        if !self.is_current(event.epoch) {
            debug!(target: LOG_TARGET, "dropping event from stale epoch {}", event.epoch);
            if let SocketEventKind::Opened(mut sink) = event.kind {
                sink.close();
            }
            return;
        }
        let Some(link) = self.link.as_mut() else {
            return;
        };

        let effects = match event.kind {
            SocketEventKind::Opened(sink) => {
                debug!(target: LOG_TARGET, "socket open (epoch {})", link.epoch);
                link.sink = Some(sink);
                link.protocol.on_open()
            }
            SocketEventKind::Text(text) => link.protocol.on_text(&text),
            SocketEventKind::Failed(reason) => {
                link.close_sink();
                vec![Effect::Failed(reason)]
            }
            SocketEventKind::Closed => {
                link.sink = None;
                match link.status {
                    ConnectionStatus::Connecting => {
                        vec![Effect::Failed("connection closed during handshake".to_owned())]
                    }
                    ConnectionStatus::Connected => vec![Effect::Dropped],
                    ConnectionStatus::Disconnected | ConnectionStatus::Error => Vec::new(),
                }
            }
        };

        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        let Some(link) = self.link.as_mut() else {
            return;
        };
        match effect {
            Effect::Send(text) => {
                if !link.transmit(text) {
                    debug!(target: LOG_TARGET, "socket gone; frame dropped");
                }
            }
            Effect::Connected => {
                if link.status == ConnectionStatus::Connecting {
                    link.status = ConnectionStatus::Connected;
                    info!(target: LOG_TARGET, "{} link connected for {}", link.config.kind, link.config.key);
                    self.events.push(LinkEvent::StatusChanged(ConnectionStatus::Connected));
                }
            }
            Effect::Failed(message) => match link.status {
                ConnectionStatus::Connecting => {
                    warn!(target: LOG_TARGET, "{} handshake failed: {message}", link.config.kind);
                    link.status = ConnectionStatus::Error;
                    link.close_sink();
                    self.last_error = Some(message);
                    self.events.push(LinkEvent::StatusChanged(ConnectionStatus::Error));
                }
                ConnectionStatus::Connected => {
                    warn!(target: LOG_TARGET, "{} link error: {message}", link.config.kind);
                    if link.sink.is_none() {
                        link.status = ConnectionStatus::Disconnected;
                        self.events.push(LinkEvent::StatusChanged(ConnectionStatus::Disconnected));
                    }
                }
                ConnectionStatus::Disconnected | ConnectionStatus::Error => {
                    debug!(target: LOG_TARGET, "late failure ignored: {message}");
                }
            },
            Effect::Dropped => {
                link.close_sink();
                if link.status != ConnectionStatus::Disconnected {
                    info!(target: LOG_TARGET, "{} link dropped by remote", link.config.kind);
                    link.status = ConnectionStatus::Disconnected;
                    self.events.push(LinkEvent::StatusChanged(ConnectionStatus::Disconnected));
                }
            }
            Effect::Updated(blueprint) => {
                if link.status.is_connected() {
                    self.events.push(LinkEvent::BlueprintUpdated(blueprint));
                }
            }
            Effect::ListChanged(author) => {
                if link.status.is_connected() {
                    self.events.push(LinkEvent::ListChanged { author });
                }
            }
        }
    }
}
