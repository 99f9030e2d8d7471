//! Topic-based session: STOMP 1.2 over a WebSocket.
//!
//! Handshake is `CONNECT` on socket open, then `SUBSCRIBE` to the blueprint's
//! topic once `CONNECTED` arrives. Each `MESSAGE` on that subscription
//! carries the full replacement point sequence.

use frames::stomp::{self as wire, Command, StompFrame};
use frames::{BlueprintKey, BlueprintUpdate, DrawEvent, Point};
use log::{debug, info, warn};

use crate::link::Effect;
use crate::{LOG_TARGET, LinkError};

pub const DRAW_DESTINATION: &str = "/app/draw";
pub const SUBSCRIPTION_ID: &str = "sub-0";

#[derive(Debug)]
pub(crate) struct StompSession {
    key: BlueprintKey,
    host: String,
    subscribed: bool,
}

impl StompSession {
    pub(crate) fn new(key: BlueprintKey, host: String) -> Self {
        Self { key, host, subscribed: false }
    }

    pub(crate) fn on_open(&mut self) -> Vec<Effect> {
        vec![Effect::Send(StompFrame::connect(&self.host).encode())]
    }

    pub(crate) fn on_text(&mut self, text: &str) -> Vec<Effect> {
        let frame = match wire::decode(text) {
            Ok(Some(frame)) => frame,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(target: LOG_TARGET, "dropping malformed STOMP frame: {err}");
                return Vec::new();
            }
        };

        match frame.command {
            Command::Connected => {
                info!(target: LOG_TARGET, "STOMP connected; subscribing to {}", self.key.topic());
                self.subscribed = true;
                vec![
                    Effect::Connected,
                    Effect::Send(StompFrame::subscribe(SUBSCRIPTION_ID, &self.key.topic()).encode()),
                ]
            }
            Command::Message => self.on_message(&frame).into_iter().collect(),
            Command::Error => {
                let message = frame
                    .get("message")
                    .map_or_else(|| frame.body.trim().to_owned(), str::to_owned);
                vec![Effect::Failed(message)]
            }
            other => {
                debug!(target: LOG_TARGET, "ignoring STOMP {}", other.as_str());
                Vec::new()
            }
        }
    }

    fn on_message(&self, frame: &StompFrame) -> Option<Effect> {
        if frame.get("subscription") != Some(SUBSCRIPTION_ID) {
            debug!(target: LOG_TARGET, "ignoring MESSAGE for foreign subscription");
            return None;
        }
        match serde_json::from_str::<BlueprintUpdate>(&frame.body) {
            Ok(update) => {
                let blueprint = update.into_blueprint(&self.key);
                debug!(target: LOG_TARGET, "received blueprint update via STOMP ({} points)", blueprint.points.len());
                Some(Effect::Updated(blueprint))
            }
            Err(err) => {
                warn!(target: LOG_TARGET, "dropping undecodable STOMP update: {err}");
                None
            }
        }
    }

    pub(crate) fn publish(&self, point: Point) -> Result<String, LinkError> {
        let body = serde_json::to_string(&DrawEvent {
            author: self.key.author.clone(),
            name: self.key.name.clone(),
            point,
        })?;
        Ok(StompFrame::send_json(DRAW_DESTINATION, body).encode())
    }

    pub(crate) fn teardown(&mut self) -> Vec<String> {
        let mut frames = Vec::with_capacity(2);
        if std::mem::take(&mut self.subscribed) {
            frames.push(StompFrame::unsubscribe(SUBSCRIPTION_ID).encode());
        }
        frames.push(StompFrame::disconnect().encode());
        frames
    }
}
