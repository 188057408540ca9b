// JSON export of the current court state, one file per export action.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{Player, Snapshot};
use crate::view::ViewMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub timestamp: f64,
    pub players: Vec<Player>,
    pub view_mode: ViewMode,
}

impl ExportRecord {
    pub fn new(snapshot: &Snapshot, view_mode: ViewMode) -> Self {
        ExportRecord {
            timestamp: snapshot.timestamp,
            players: snapshot.players.clone(),
            view_mode,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A ready-to-download export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

/// `court-data-<unix millis>.json`
pub fn export_filename(now_millis: u64) -> String {
    format!("court-data-{}.json", now_millis)
}

pub fn export_file(
    snapshot: &Snapshot,
    view_mode: ViewMode,
    now_millis: u64,
) -> Result<ExportFile, EngineError> {
    Ok(ExportFile {
        filename: export_filename(now_millis),
        contents: ExportRecord::new(snapshot, view_mode).to_json_pretty()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::*;

    #[test]
    fn record_uses_client_field_names() {
        let snap = snapshot(12.5, vec![player(3, 188.0, 250.0)]);
        let file = export_file(&snap, ViewMode::Heatmap, 1_700_000_000_123).unwrap();

        assert_eq!(file.filename, "court-data-1700000000123.json");
        let value: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(value["timestamp"], 12.5);
        assert_eq!(value["viewMode"], "heatmap");
        assert_eq!(value["players"][0]["id"], 3);
        assert_eq!(value["players"][0]["team"], "home");
    }

    #[test]
    fn contents_are_pretty_printed() {
        let snap = snapshot(0.0, vec![player(1, 0.0, 0.0)]);
        let file = export_file(&snap, ViewMode::Live, 1).unwrap();
        assert!(file.contents.contains("\n  \"timestamp\""));
    }
}
