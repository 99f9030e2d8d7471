//! Selected transport, author and blueprint for the workspace page.
//!
//! DESIGN
//! ======
//! Every selection change bumps a generation counter. REST requests capture
//! a [`ViewTag`] when issued and their results are dropped if the tag no
//! longer matches, so a slow response for an old author or blueprint never
//! overwrites the current view.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use frames::{BlueprintKey, KeyError};
use realtime::{Endpoints, TransportKind};

use super::blueprints::FALLBACK_NAME;

pub const DEFAULT_AUTHOR: &str = "juan";

#[derive(Clone, Debug)]
pub struct WorkspaceState {
    pub transport: TransportKind,
    pub author: String,
    pub name: String,
    /// Bumped on any change to transport, author, or name.
    pub generation: u64,
    /// Bumped only when the listed author's inventory source changes.
    pub list_generation: u64,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            author: DEFAULT_AUTHOR.to_owned(),
            name: FALLBACK_NAME.to_owned(),
            generation: 0,
            list_generation: 0,
        }
    }
}

/// Snapshot of the view a request was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTag {
    generation: u64,
    list_generation: u64,
}

impl WorkspaceState {
    pub fn tag(&self) -> ViewTag {
        ViewTag { generation: self.generation, list_generation: self.list_generation }
    }

    /// Whether a blueprint fetched under `tag` still belongs on screen.
    pub fn accepts_blueprint(&self, tag: ViewTag) -> bool {
        tag.generation == self.generation
    }

    /// Whether a list fetched under `tag` still belongs on screen.
    pub fn accepts_list(&self, tag: ViewTag) -> bool {
        tag.list_generation == self.list_generation
    }

    /// Key of the selected blueprint.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] while the author field is blank.
    pub fn key(&self) -> Result<BlueprintKey, KeyError> {
        BlueprintKey::new(&self.author, &self.name)
    }

    pub fn rest_base<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        endpoints.rest_base(self.transport)
    }

    pub fn set_transport(&mut self, transport: TransportKind) -> bool {
        if self.transport == transport {
            return false;
        }
        self.transport = transport;
        self.bump_all();
        true
    }

    pub fn set_author(&mut self, author: &str) -> bool {
        if self.author == author {
            return false;
        }
        author.clone_into(&mut self.author);
        self.bump_all();
        true
    }

    pub fn select(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        name.clone_into(&mut self.name);
        self.generation += 1;
        true
    }

    /// Move off a blueprint that was just deleted.
    ///
    /// When `next` is the deleted name itself (the fallback after deleting
    /// the last blueprint), the selection is reopened anyway so the board and
    /// link drop the stale points.
    pub fn select_after_delete(&mut self, deleted: &str, next: &str) -> bool {
        if self.select(next) {
            return true;
        }
        if self.name != deleted {
            return false;
        }
        self.generation += 1;
        true
    }

    fn bump_all(&mut self) {
        self.generation += 1;
        self.list_generation += 1;
    }
}
