//! Ordered record of per-iteration snapshots.
//!
//! Index 0 holds the initial state; index `i` holds the state after
//! iteration `i`. A completed run of `I` iterations therefore records
//! `I + 1` snapshots. Recording only appends, so earlier entries never
//! change once written.

use biome_types::{RenderFeed, Snapshot};

/// Append-only list of snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Create an empty history with room for `capacity` snapshots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity),
        }
    }

    /// Append a snapshot; returns the index it was stored at.
    pub fn record(&mut self, snapshot: Snapshot) -> usize {
        let index = self.snapshots.len();
        self.snapshots.push(snapshot);
        index
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot at `index`, if recorded.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// The initial state.
    pub fn initial(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    /// The most recent state.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Snapshots in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Copy the history into the render feed consumed by the animation page.
    pub fn to_render_feed(&self, cells: u32) -> RenderFeed {
        RenderFeed {
            life: self.snapshots.clone(),
            cells,
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use biome_types::{OrganismView, Species};

    use super::*;

    fn snapshot_with(x: u32, y: u32) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert(OrganismView {
            x,
            y,
            species: Species::new(1).unwrap(),
            color: "yellow".to_owned(),
        });
        snapshot
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.initial().is_none());
        assert!(history.latest().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = History::new();
        assert_eq!(history.record(snapshot_with(0, 0)), 0);
        assert_eq!(history.record(Snapshot::new()), 1);
        assert_eq!(history.record(snapshot_with(2, 3)), 2);

        assert_eq!(history.len(), 3);
        assert_eq!(history.initial(), Some(&snapshot_with(0, 0)));
        assert_eq!(history.get(1).map(Snapshot::population), Some(0));
        assert_eq!(history.latest(), Some(&snapshot_with(2, 3)));
        assert_eq!((&history).into_iter().count(), 3);
    }

    #[test]
    fn render_feed_carries_every_snapshot() {
        let mut history = History::with_capacity(2);
        history.record(snapshot_with(1, 1));
        history.record(Snapshot::new());

        let feed = history.to_render_feed(4);
        assert_eq!(feed.cells, 4);
        assert_eq!(feed.life.len(), 2);
        assert_eq!(feed.life.first(), Some(&snapshot_with(1, 1)));
    }
}
