// Playback-time to snapshot synchronization.
// Maps the video clock onto the nearest precomputed position sample.

use crate::error::EngineError;
use crate::store::SampleStore;
use crate::types::Snapshot;

/// Index of the snapshot whose timestamp is closest to `time`.
///
/// Linear scan with a strict comparison, so on an exact tie the earlier sample keeps the slot.
/// Queries outside the sampled range clamp to the first or last sample, infinities included.
/// NaN has no nearest sample and is rejected.
pub fn nearest_index(store: &SampleStore, time: f64) -> Result<usize, EngineError> {
    let snapshots = store.snapshots();
    if time.is_nan() {
        return Err(EngineError::InvalidTime(time));
    }
    if snapshots.is_empty() {
        return Err(EngineError::NotReady);
    }
    if time == f64::INFINITY {
        return Ok(snapshots.len() - 1);
    }

    let mut best = 0;
    let mut best_distance = (snapshots[0].timestamp - time).abs();
    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        let distance = (snapshot.timestamp - time).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }

    Ok(best)
}

/// Snapshot whose timestamp is closest to `time`, or `NotReady` for an empty store.
pub fn resolve_nearest(store: &SampleStore, time: f64) -> Result<&Snapshot, EngineError> {
    let index = nearest_index(store, time)?;
    store.get(index).ok_or(EngineError::NotReady)
}

/// Outcome of a clock update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'s> {
    pub snapshot: &'s Snapshot,
    /// False when the update landed on the same sample as the previous one.
    pub changed: bool,
}

/// Video clock state fed by the media element's events.
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    current_time: f64,
    is_playing: bool,
    current_index: Option<usize>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        PlaybackClock::default()
    }

    /// Record a new playback time and re-resolve against the store.
    /// A NaN time is rejected and leaves the clock untouched.
    pub fn handle_time_update<'s>(
        &mut self,
        store: &'s SampleStore,
        time: f64,
    ) -> Result<Resolved<'s>, EngineError> {
        if time.is_nan() {
            return Err(EngineError::InvalidTime(time));
        }

        self.current_time = time;
        let resolved = nearest_index(store, time);
        let previous = self.current_index;
        self.current_index = resolved.as_ref().ok().copied();
        let index = resolved?;

        let changed = previous != Some(index);
        tracing::trace!(time, index, changed, "resolved snapshot");
        let snapshot = store.get(index).ok_or(EngineError::NotReady)?;
        Ok(Resolved { snapshot, changed })
    }

    pub fn seek_to<'s>(
        &mut self,
        store: &'s SampleStore,
        time: f64,
    ) -> Result<Resolved<'s>, EngineError> {
        self.handle_time_update(store, time)
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn reset(&mut self) {
        *self = PlaybackClock::default();
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Snapshot resolved at the last time update.
    pub fn current<'s>(&self, store: &'s SampleStore) -> Option<&'s Snapshot> {
        self.current_index.and_then(|i| store.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::*;
    use proptest::prelude::*;

    fn store(timestamps: &[f64]) -> SampleStore {
        SampleStore::new(timeline(timestamps)).unwrap()
    }

    #[test]
    fn picks_closest_sample() {
        let store = store(&[0.0, 0.5]);
        assert_eq!(resolve_nearest(&store, 0.24).unwrap().timestamp, 0.0);
        assert_eq!(resolve_nearest(&store, 0.26).unwrap().timestamp, 0.5);
    }

    #[test]
    fn exact_tie_goes_to_earlier_sample() {
        let store = store(&[0.0, 0.5]);
        assert_eq!(resolve_nearest(&store, 0.25).unwrap().timestamp, 0.0);
    }

    #[test]
    fn clamps_outside_sampled_range() {
        let timestamps: Vec<f64> = (0..=120).map(|i| i as f64 * 0.5).collect();
        let store = store(&timestamps);
        assert_eq!(resolve_nearest(&store, -5.0).unwrap().timestamp, 0.0);
        assert_eq!(resolve_nearest(&store, 1000.0).unwrap().timestamp, 60.0);
    }

    #[test]
    fn empty_store_is_not_ready() {
        let store = SampleStore::empty();
        assert_eq!(resolve_nearest(&store, 3.0), Err(EngineError::NotReady));
    }

    #[test]
    fn clock_tracks_play_state_and_time() {
        let store = store(&[0.0, 0.5, 1.0]);
        let mut clock = PlaybackClock::new();
        assert!(clock.current(&store).is_none());

        clock.play();
        let resolved = clock.handle_time_update(&store, 0.9).unwrap();
        assert_eq!(resolved.snapshot.timestamp, 1.0);
        assert!(clock.is_playing());
        assert_eq!(clock.current_time(), 0.9);

        clock.pause();
        clock.seek_to(&store, 0.1).unwrap();
        assert!(!clock.is_playing());
        assert_eq!(clock.current(&store).unwrap().timestamp, 0.0);
    }

    #[test]
    fn clock_against_empty_store_keeps_time_but_no_snapshot() {
        let store = SampleStore::empty();
        let mut clock = PlaybackClock::new();
        assert!(clock.handle_time_update(&store, 4.0).is_err());
        assert_eq!(clock.current_time(), 4.0);
        assert!(clock.current(&store).is_none());
    }

    #[test]
    fn infinite_times_clamp_to_the_ends() {
        let store = store(&[0.0, 0.5, 1.0]);
        assert_eq!(resolve_nearest(&store, f64::INFINITY).unwrap().timestamp, 1.0);
        assert_eq!(resolve_nearest(&store, f64::NEG_INFINITY).unwrap().timestamp, 0.0);
    }

    #[test]
    fn nan_time_is_rejected() {
        let store = store(&[0.0, 0.5]);
        assert!(matches!(
            resolve_nearest(&store, f64::NAN),
            Err(EngineError::InvalidTime(_))
        ));
    }

    #[test]
    fn nan_time_leaves_clock_untouched() {
        let store = store(&[0.0, 0.5]);
        let mut clock = PlaybackClock::new();
        clock.handle_time_update(&store, 0.5).unwrap();

        assert!(clock.handle_time_update(&store, f64::NAN).is_err());
        assert_eq!(clock.current_time(), 0.5);
        assert_eq!(clock.current(&store).unwrap().timestamp, 0.5);
    }

    #[test]
    fn changed_only_when_sample_moves() {
        let store = store(&[0.0, 0.5, 1.0]);
        let mut clock = PlaybackClock::new();

        let changes: Vec<bool> = [0.0, 0.1, 0.2, 0.3, 0.5, 0.6, 0.1]
            .iter()
            .map(|&t| clock.handle_time_update(&store, t).unwrap().changed)
            .collect();
        assert_eq!(changes, [true, false, false, true, false, false, true]);

        clock.reset();
        assert!(clock.handle_time_update(&store, 0.1).unwrap().changed);
    }

    fn sorted_timestamps() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::btree_set(0u32..10_000, 1..50)
            .prop_map(|set| set.into_iter().map(|ms| ms as f64 / 100.0).collect())
    }

    proptest! {
        /// The resolved sample minimizes |timestamp - t|, and no earlier sample is equally close.
        #[test]
        fn resolution_is_nearest_and_earliest(
            timestamps in sorted_timestamps(),
            time in -10.0f64..110.0
        ) {
            let store = store(&timestamps);
            let index = nearest_index(&store, time).unwrap();
            let best = (timestamps[index] - time).abs();

            for (i, ts) in timestamps.iter().enumerate() {
                let d = (ts - time).abs();
                prop_assert!(d >= best, "sample {} at {} is closer than {}", i, ts, timestamps[index]);
                if i < index {
                    prop_assert!(d > best, "earlier sample {} ties but lost", i);
                }
            }
        }
    }
}
