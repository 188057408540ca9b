// View mode and selection state. Mode and selection are orthogonal.

use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

/// Mutually exclusive court overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Live,
    Heatmap,
    Trails,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Live, ViewMode::Heatmap, ViewMode::Trails];

    pub fn id(&self) -> &'static str {
        match self {
            ViewMode::Live => "live",
            ViewMode::Heatmap => "heatmap",
            ViewMode::Trails => "trails",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Live => "Live View",
            ViewMode::Heatmap => "Heat Map",
            ViewMode::Trails => "Movement Trails",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ViewMode::Live => "Real-time player positions",
            ViewMode::Heatmap => "Player movement density",
            ViewMode::Trails => "Player path visualization",
        }
    }

    /// Look up a mode by id. Unknown ids fall back to the first mode.
    pub fn from_id(id: &str) -> ViewMode {
        match ViewMode::ALL.iter().find(|mode| mode.id() == id) {
            Some(mode) => *mode,
            None => {
                tracing::warn!(id, "unknown view mode, falling back to live");
                ViewMode::ALL[0]
            }
        }
    }
}

/// At most one selected player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Player(PlayerId),
}

impl Selection {
    /// Selecting the selected player clears; anything else replaces.
    pub fn toggle(&mut self, id: PlayerId) {
        *self = match *self {
            Selection::Player(current) if current == id => Selection::None,
            _ => Selection::Player(id),
        };
    }

    pub fn selected(&self) -> Option<PlayerId> {
        match self {
            Selection::None => None,
            Selection::Player(id) => Some(*id),
        }
    }

    pub fn is_selected(&self, id: PlayerId) -> bool {
        self.selected() == Some(id)
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewState {
    mode: ViewMode,
    selection: Selection,
}

impl ViewState {
    pub fn new() -> Self {
        ViewState::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Switch modes. Returns true when trails mode was just entered.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        let entered_trails = mode == ViewMode::Trails && self.mode != ViewMode::Trails;
        if mode != self.mode {
            tracing::debug!(from = self.mode.id(), to = mode.id(), "view mode changed");
        }
        self.mode = mode;
        entered_trails
    }

    pub fn toggle_selection(&mut self, id: PlayerId) -> Selection {
        self.selection.toggle(id);
        tracing::debug!(selection = ?self.selection, "selection changed");
        self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}
