// Bounded per-player position history for the trails overlay.

use std::collections::{BTreeMap, VecDeque};

use crate::types::{CourtPoint, PlayerId, Snapshot};

#[derive(Debug, Clone)]
pub struct TrailBuffers {
    capacity: usize,
    trails: BTreeMap<PlayerId, VecDeque<CourtPoint>>,
}

impl TrailBuffers {
    pub fn new(capacity: usize) -> Self {
        TrailBuffers {
            capacity,
            trails: BTreeMap::new(),
        }
    }

    /// Append one position; the oldest entry is dropped once capacity is exceeded.
    pub fn push(&mut self, id: PlayerId, position: CourtPoint) {
        let capacity = self.capacity;
        let trail = self
            .trails
            .entry(id)
            .or_insert_with(|| VecDeque::with_capacity(capacity));
        trail.push_back(position);
        while trail.len() > capacity {
            trail.pop_front();
        }
    }

    /// Append every player's current position.
    pub fn record(&mut self, snapshot: &Snapshot) {
        for player in &snapshot.players {
            self.push(player.id, player.position);
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<&VecDeque<CourtPoint>> {
        self.trails.get(&id)
    }

    pub fn clear(&mut self) {
        self.trails.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}
