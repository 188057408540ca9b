// courtcast_engine: Rust/WASM engine for the CourtCast court map.
// Playback sync, hit-testing, trails, and draw lists live here; JS is plumbing.

mod error;
mod export;
mod generator;
mod geometry;
mod render;
mod session;
mod store;
mod sync;
mod trails;
mod types;
mod view;

use wasm_bindgen::prelude::*;

pub use error::EngineError;
pub use export::{export_filename, ExportFile, ExportRecord};
pub use generator::{MockMotionGenerator, SampleSource};
pub use geometry::{display_to_surface, hit_test, marker_radius, CourtScale, HitTester, PointerQuery};
pub use render::{CourtImage, CourtRenderer, DrawCommand, Frame, RenderInputs};
pub use session::{Session, SessionSummary};
pub use store::SampleStore;
pub use sync::{nearest_index, resolve_nearest, PlaybackClock, Resolved};
pub use trails::TrailBuffers;
pub use types::*;
pub use view::{Selection, ViewMode, ViewState};

/// Initialize panic hook and logging for the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Session interface exposed to JavaScript.
/// One call per UI event; structured data crosses the boundary as JSON.
#[wasm_bindgen]
pub struct WasmSession {
    inner: Session,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session from a JSON `EngineConfig`. Missing fields take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmSession, JsValue> {
        let config = EngineConfig::from_json(config_json).map_err(to_js)?;
        let inner = Session::new(config).map_err(to_js)?;
        Ok(WasmSession { inner })
    }

    /// Generate mock positions for a processed clip. Returns the sample count.
    pub fn generate_mock(&mut self, duration: f64) -> Result<usize, JsValue> {
        let generator = MockMotionGenerator::from_config(self.inner.config());
        self.inner.load_from(&generator, duration).map_err(to_js)?;
        Ok(self.inner.store().len())
    }

    /// Load snapshots produced elsewhere (JSON array of snapshots). Returns the sample count.
    pub fn load_snapshots(&mut self, snapshots_json: &str) -> Result<usize, JsValue> {
        let store = SampleStore::from_json(snapshots_json).map_err(to_js)?;
        let len = store.len();
        self.inner.load_store(store);
        Ok(len)
    }

    /// Media element `timeupdate`. Returns the resolved snapshot timestamp, or undefined when not ready.
    pub fn time_update(&mut self, time: f64) -> Option<f64> {
        self.inner.on_time_update(time).ok().map(|s| s.timestamp)
    }

    pub fn seek_to(&mut self, time: f64) -> Option<f64> {
        self.inner.seek_to(time).ok().map(|s| s.timestamp)
    }

    pub fn play(&mut self) {
        self.inner.play();
    }

    pub fn pause(&mut self) {
        self.inner.pause();
    }

    /// Canvas click. Offsets are relative to the element's top-left corner.
    /// Returns the selected player id after the click, or undefined for no selection.
    pub fn click(
        &mut self,
        offset_x: f64,
        offset_y: f64,
        surface_width: f64,
        surface_height: f64,
        displayed_width: f64,
        displayed_height: f64,
    ) -> Result<Option<u32>, JsValue> {
        let selection = self
            .inner
            .on_pointer_click(PointerQuery {
                pointer: SurfacePoint::new(offset_x, offset_y),
                surface: SurfaceSize::new(surface_width, surface_height),
                displayed: SurfaceSize::new(displayed_width, displayed_height),
            })
            .map_err(to_js)?;

        Ok(selection.selected().map(|id| id.as_u32()))
    }

    /// Switch overlay by id ("live", "heatmap", "trails"). Returns the id actually applied.
    pub fn set_view_mode(&mut self, id: &str) -> String {
        self.inner.set_view_mode_id(id).id().to_string()
    }

    /// Available view modes as JSON `[{id, name, description}]`.
    pub fn view_modes_json() -> Result<String, JsValue> {
        let modes: Vec<serde_json::Value> = ViewMode::ALL
            .iter()
            .map(|m| {
                serde_json::json!({
                    "id": m.id(),
                    "name": m.name(),
                    "description": m.description(),
                })
            })
            .collect();

        serde_json::to_string(&modes)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn court_image_loaded(&mut self, width: u32, height: u32) {
        self.inner.court_image_loaded(width, height);
    }

    /// Draw list for the current state, as JSON.
    pub fn frame_json(&self, surface_width: f64, surface_height: f64) -> Result<String, JsValue> {
        let frame = self
            .inner
            .frame(SurfaceSize::new(surface_width, surface_height))
            .map_err(to_js)?;

        serde_json::to_string(&frame)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Export file (`{filename, contents}`) stamped with the browser clock.
    pub fn export_json(&self) -> Result<String, JsValue> {
        let file = self
            .inner
            .export(js_sys::Date::now() as u64)
            .map_err(to_js)?;

        serde_json::to_string(&file)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn summary_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.summary())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
