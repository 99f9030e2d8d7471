//! Active-blueprint state for the drawing surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds the local projection of the blueprint being edited. Local clicks
//! append points; realtime pushes replace the whole sequence, so the last
//! push received wins.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use frames::{Blueprint, BlueprintKey, Point};
use realtime::ConnectionStatus;

/// Board-level state: which blueprint is open, its points, and link status.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    /// Blueprint currently shown on the surface.
    pub blueprint: Option<Blueprint>,
    /// True while the REST fetch for the open blueprint is in flight.
    pub loading: bool,
    /// Last REST failure for the open blueprint.
    pub error: Option<String>,
    /// Current realtime connection lifecycle state.
    pub connection_status: ConnectionStatus,
    /// Reason for the last realtime handshake failure.
    pub realtime_error: Option<String>,
}

impl BoardState {
    /// Points of the open blueprint, empty when none is open.
    pub fn points(&self) -> &[Point] {
        self.blueprint.as_ref().map_or(&[], |bp| bp.points.as_slice())
    }

    pub fn is_open(&self, key: &BlueprintKey) -> bool {
        self.blueprint
            .as_ref()
            .is_some_and(|bp| bp.author == key.author && bp.name == key.name)
    }

    /// Switch to `key` with an empty sequence while its fetch runs.
    pub fn open(&mut self, key: &BlueprintKey) {
        self.blueprint = Some(Blueprint::empty(key));
        self.loading = true;
        self.error = None;
    }

    /// Install a fetched blueprint if it is still the open one.
    pub fn replace(&mut self, blueprint: Blueprint) -> bool {
        let matches = self
            .blueprint
            .as_ref()
            .is_some_and(|bp| bp.author == blueprint.author && bp.name == blueprint.name);
        if matches {
            self.blueprint = Some(blueprint);
            self.loading = false;
            self.error = None;
        }
        matches
    }

    /// Record a fetch failure; the open blueprint stays empty.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Append a locally drawn point. Returns `false` when nothing is open.
    pub fn add_point(&mut self, point: Point) -> bool {
        match self.blueprint.as_mut() {
            Some(bp) => {
                bp.points.push(point);
                true
            }
            None => false,
        }
    }

    /// Replace the open blueprint's points with a realtime push.
    ///
    /// Pushes for another (author, name) are ignored.
    pub fn apply_update(&mut self, update: Blueprint) -> bool {
        match self.blueprint.as_mut() {
            Some(bp) if bp.author == update.author && bp.name == update.name => {
                bp.points = update.points;
                true
            }
            _ => false,
        }
    }

    /// Close the blueprint and forget link state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
