// Sample store: immutable, ascending sequence of snapshots for one session.
// Built once when processing completes; replaced wholesale on the next upload.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::EngineError;
use crate::types::{PlayerId, Snapshot};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleStore {
    snapshots: Vec<Snapshot>,
}

impl SampleStore {
    /// Build a store, checking ordering and roster invariants.
    pub fn new(snapshots: Vec<Snapshot>) -> Result<Self, EngineError> {
        let roster = snapshots.first().map(roster_of);

        for (i, snapshot) in snapshots.iter().enumerate() {
            if !snapshot.timestamp.is_finite() {
                return Err(EngineError::InvalidStore(format!(
                    "snapshot {} has non-finite timestamp",
                    i
                )));
            }

            if i > 0 && snapshot.timestamp <= snapshots[i - 1].timestamp {
                return Err(EngineError::InvalidStore(format!(
                    "timestamps must be strictly ascending: snapshot {} at {}s follows {}s",
                    i,
                    snapshot.timestamp,
                    snapshots[i - 1].timestamp
                )));
            }

            let ids = roster_of(snapshot);
            if ids.len() != snapshot.players.len() {
                return Err(EngineError::InvalidStore(format!(
                    "snapshot {} contains duplicate player ids",
                    i
                )));
            }
            if roster.as_ref().is_some_and(|r| *r != ids) {
                return Err(EngineError::InvalidStore(format!(
                    "snapshot {} has a different player set than snapshot 0",
                    i
                )));
            }
        }

        Ok(SampleStore { snapshots })
    }

    /// Store with no samples. Resolution against it yields `NotReady`.
    pub fn empty() -> Self {
        SampleStore::default()
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let snapshots: Vec<Snapshot> = serde_json::from_str(json)?;
        SampleStore::new(snapshots)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Timestamp of the last sample, or 0 for an empty store.
    pub fn duration(&self) -> f64 {
        self.snapshots.last().map(|s| s.timestamp).unwrap_or(0.0)
    }
}

fn roster_of(snapshot: &Snapshot) -> BTreeSet<PlayerId> {
    snapshot.players.iter().map(|p| p.id).collect()
}
