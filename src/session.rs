// Session: owns the store, clock, view state, trails, and court image for one uploaded clip.
// Events are handled synchronously, one at a time, in arrival order.

use serde::Serialize;

use crate::error::EngineError;
use crate::export::{export_file, ExportFile};
use crate::generator::{MockMotionGenerator, SampleSource};
use crate::geometry::{hit_test, PointerQuery};
use crate::render::{CourtImage, CourtRenderer, Frame, RenderInputs};
use crate::store::SampleStore;
use crate::sync::PlaybackClock;
use crate::trails::TrailBuffers;
use crate::types::*;
use crate::view::{Selection, ViewMode, ViewState};

/// Figures shown under the court map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub home_players: usize,
    pub away_players: usize,
    pub game_time: f64,
    pub selected_players: usize,
    pub snapshot_time: Option<f64>,
    pub is_playing: bool,
    pub view_mode: ViewMode,
}

pub struct Session {
    config: EngineConfig,
    store: SampleStore,
    clock: PlaybackClock,
    view: ViewState,
    trails: TrailBuffers,
    image: CourtImage,
    renderer: CourtRenderer,
}

impl Session {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Session {
            trails: TrailBuffers::new(config.trail_capacity),
            renderer: CourtRenderer::new(config.clone()),
            store: SampleStore::empty(),
            clock: PlaybackClock::new(),
            view: ViewState::new(),
            image: CourtImage::default(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the sample store wholesale (new upload processed).
    pub fn load_store(&mut self, store: SampleStore) {
        tracing::info!(
            samples = store.len(),
            duration = store.duration(),
            "sample store loaded"
        );
        self.store = store;
        self.clock.reset();
        self.trails.clear();
        self.view.clear_selection();
    }

    /// Build and load a store from any sample source.
    pub fn load_from(&mut self, source: &dyn SampleSource, duration: f64) -> Result<(), EngineError> {
        let store = source.build(duration)?;
        self.load_store(store);
        Ok(())
    }

    /// Load mock motion for the configured default clip length.
    pub fn load_mock(&mut self) -> Result<(), EngineError> {
        let generator = MockMotionGenerator::from_config(&self.config);
        self.load_from(&generator, self.config.default_duration)
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Playback time changed: resolve the nearest snapshot and, in trails mode, extend trails.
    /// Trails grow once per newly resolved sample, not once per tick.
    pub fn on_time_update(&mut self, time: f64) -> Result<&Snapshot, EngineError> {
        let resolved = self.clock.handle_time_update(&self.store, time)?;
        if self.view.mode() == ViewMode::Trails && resolved.changed {
            self.trails.record(resolved.snapshot);
        }
        Ok(resolved.snapshot)
    }

    pub fn seek_to(&mut self, time: f64) -> Result<&Snapshot, EngineError> {
        self.on_time_update(time)
    }

    pub fn play(&mut self) {
        self.clock.play();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.clock.current(&self.store)
    }

    /// Pointer click on the court. Hits toggle the selection; misses leave it untouched.
    pub fn on_pointer_click(&mut self, query: PointerQuery) -> Result<Selection, EngineError> {
        let Some(snapshot) = self.clock.current(&self.store) else {
            return Ok(self.view.selection());
        };

        match hit_test(&self.config, snapshot, query)? {
            Some(id) => Ok(self.view.toggle_selection(id)),
            None => Ok(self.view.selection()),
        }
    }

    pub fn selection(&self) -> Selection {
        self.view.selection()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.mode()
    }

    /// Entering trails mode applies the trail policy, then seeds the trails with the current snapshot.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if !self.view.set_mode(mode) {
            return;
        }
        if self.config.trail_policy == TrailPolicy::ResetOnEntry {
            self.trails.clear();
        }
        if let Some(snapshot) = self.clock.current(&self.store) {
            self.trails.record(snapshot);
        }
    }

    /// Unknown ids fall back to live view.
    pub fn set_view_mode_id(&mut self, id: &str) -> ViewMode {
        let mode = ViewMode::from_id(id);
        self.set_view_mode(mode);
        mode
    }

    pub fn trails(&self) -> &TrailBuffers {
        &self.trails
    }

    pub fn court_image_loaded(&mut self, width: u32, height: u32) {
        self.image.mark_ready(width, height);
    }

    pub fn frame(&self, surface: SurfaceSize) -> Result<Frame, EngineError> {
        self.renderer.redraw(&RenderInputs {
            image: &self.image,
            snapshot: self.current_snapshot(),
            mode: self.view.mode(),
            selection: self.view.selection(),
            trails: &self.trails,
            surface,
        })
    }

    pub fn export(&self, now_millis: u64) -> Result<ExportFile, EngineError> {
        let snapshot = self.current_snapshot().ok_or(EngineError::NotReady)?;
        export_file(snapshot, self.view.mode(), now_millis)
    }

    pub fn summary(&self) -> SessionSummary {
        let snapshot = self.current_snapshot();
        SessionSummary {
            home_players: snapshot.map_or(0, |s| s.team_count(Team::Home)),
            away_players: snapshot.map_or(0, |s| s.team_count(Team::Away)),
            game_time: self.clock.current_time(),
            selected_players: usize::from(self.view.selection().selected().is_some()),
            snapshot_time: snapshot.map(|s| s.timestamp),
            is_playing: self.clock.is_playing(),
            view_mode: self.view.mode(),
        }
    }
}
