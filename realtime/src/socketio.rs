//! Room-based session: Socket.IO v5 over an Engine.IO v4 WebSocket.
//!
//! Handshake is Engine.IO `open` from the server, our Socket.IO `CONNECT`
//! carrying `{token}`, the server's `CONNECT` acknowledgement, and then a
//! `join-room` emit for the blueprint's room.

use frames::socketio::{EnginePacket, SocketPacket, connect_error_message};
use frames::{BlueprintKey, BlueprintUpdate, ListUpdate, Point, RoomDrawEvent};
use log::{debug, info, warn};
use serde_json::{Value, json};

use crate::link::Effect;
use crate::{LOG_TARGET, LinkError};

pub const JOIN_ROOM: &str = "join-room";
pub const DRAW_EVENT: &str = "draw-event";
pub const BLUEPRINT_UPDATE: &str = "blueprint-update";
pub const LIST_UPDATE: &str = "blueprints-list-update";

#[derive(Debug)]
pub(crate) struct SocketIoSession {
    key: BlueprintKey,
    token: Option<String>,
    joined: bool,
}

impl SocketIoSession {
    pub(crate) fn new(key: BlueprintKey, token: Option<String>) -> Self {
        Self { key, token, joined: false }
    }

    /// The server speaks first on Engine.IO; nothing to send yet.
    pub(crate) fn on_open(&mut self) -> Vec<Effect> {
        Vec::new()
    }

    pub(crate) fn on_text(&mut self, text: &str) -> Vec<Effect> {
        let packet = match EnginePacket::decode(text) {
            Ok(packet) => packet,
            Err(err) => {
                warn!(target: LOG_TARGET, "dropping malformed Engine.IO packet: {err}");
                return Vec::new();
            }
        };

        match packet {
            EnginePacket::Open(handshake) => {
                debug!(target: LOG_TARGET, "Engine.IO open (sid {})", handshake.sid);
                let auth = self.token.as_ref().map(|token| json!({ "token": token }));
                encode(&SocketPacket::connect(auth)).map(Effect::Send).into_iter().collect()
            }
            EnginePacket::Ping(data) => encode_engine(&EnginePacket::Pong(data))
                .map(Effect::Send)
                .into_iter()
                .collect(),
            EnginePacket::Close => {
                info!(target: LOG_TARGET, "Engine.IO close from server");
                vec![Effect::Dropped]
            }
            EnginePacket::Message(payload) => self.on_packet(&payload),
            EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => Vec::new(),
        }
    }

    fn on_packet(&mut self, payload: &str) -> Vec<Effect> {
        let packet = match SocketPacket::decode(payload) {
            Ok(packet) => packet,
            Err(err) => {
                warn!(target: LOG_TARGET, "dropping malformed Socket.IO packet: {err}");
                return Vec::new();
            }
        };

        match packet {
            SocketPacket::Connect { .. } => {
                let room = self.key.room();
                info!(target: LOG_TARGET, "Socket.IO connected; joining room {room}");
                self.joined = true;
                let mut effects = vec![Effect::Connected];
                effects.extend(encode(&SocketPacket::event(JOIN_ROOM, Value::String(room))).map(Effect::Send));
                effects
            }
            SocketPacket::ConnectError { data, .. } => vec![Effect::Failed(connect_error_message(data.as_ref()))],
            SocketPacket::Disconnect { .. } => {
                info!(target: LOG_TARGET, "Socket.IO disconnected by server");
                self.joined = false;
                vec![Effect::Dropped]
            }
            SocketPacket::Event { name, mut args, .. } => {
                let payload = if args.is_empty() { Value::Null } else { args.swap_remove(0) };
                self.on_event(&name, payload).into_iter().collect()
            }
            SocketPacket::Ack { .. } => Vec::new(),
        }
    }

    fn on_event(&self, name: &str, payload: Value) -> Option<Effect> {
        match name {
            BLUEPRINT_UPDATE => match serde_json::from_value::<BlueprintUpdate>(payload) {
                Ok(update) => {
                    let blueprint = update.into_blueprint(&self.key);
                    debug!(
                        target: LOG_TARGET,
                        "received blueprint-update for {}/{} ({} points)",
                        blueprint.author,
                        blueprint.name,
                        blueprint.points.len()
                    );
                    Some(Effect::Updated(blueprint))
                }
                Err(err) => {
                    warn!(target: LOG_TARGET, "dropping undecodable blueprint-update: {err}");
                    None
                }
            },
            LIST_UPDATE => match serde_json::from_value::<ListUpdate>(payload) {
                Ok(update) if update.author == self.key.author => {
                    debug!(target: LOG_TARGET, "received blueprints-list-update for {}", update.author);
                    Some(Effect::ListChanged(update.author))
                }
                Ok(update) => {
                    debug!(target: LOG_TARGET, "ignoring list update for other author {}", update.author);
                    None
                }
                Err(err) => {
                    warn!(target: LOG_TARGET, "dropping undecodable list update: {err}");
                    None
                }
            },
            other => {
                debug!(target: LOG_TARGET, "ignoring Socket.IO event {other}");
                None
            }
        }
    }

    pub(crate) fn publish(&self, point: Point) -> Result<String, LinkError> {
        let payload = serde_json::to_value(RoomDrawEvent {
            room: self.key.room(),
            author: self.key.author.clone(),
            name: self.key.name.clone(),
            point,
        })?;
        Ok(SocketPacket::event(DRAW_EVENT, payload).to_engine_text()?)
    }

    pub(crate) fn teardown(&mut self) -> Vec<String> {
        if !std::mem::take(&mut self.joined) {
            return Vec::new();
        }
        encode(&SocketPacket::disconnect()).into_iter().collect()
    }
}

fn encode(packet: &SocketPacket) -> Option<String> {
    packet
        .to_engine_text()
        .map_err(|err| warn!(target: LOG_TARGET, "failed to encode Socket.IO packet: {err}"))
        .ok()
}

fn encode_engine(packet: &EnginePacket) -> Option<String> {
    packet
        .encode()
        .map_err(|err| warn!(target: LOG_TARGET, "failed to encode Engine.IO packet: {err}"))
        .ok()
}
