// Court rendering as a serializable draw list. JS replays it onto a 2D canvas.
// All inputs are explicit; the court image is an owned resource with a ready state.

use serde::Serialize;

use crate::error::EngineError;
use crate::geometry::{marker_radius, CourtScale};
use crate::trails::TrailBuffers;
use crate::types::*;
use crate::view::{Selection, ViewMode};

pub const HOME_COLOR: &str = "#3B82F6";
pub const AWAY_COLOR: &str = "#EF4444";
const SELECTED_STROKE: &str = "#FFFFFF";
const LABEL_COLOR: &str = "white";
const NUMBER_FONT: &str = "bold 10px Arial";
const NAME_FONT: &str = "12px Arial";
const NAME_OFFSET: f64 = 10.0;
const TRAIL_ALPHA: f64 = 0.5;
const TRAIL_WIDTH: f64 = 2.0;

pub fn team_color(team: Team) -> &'static str {
    match team {
        Team::Home => HOME_COLOR,
        Team::Away => AWAY_COLOR,
    }
}

/// Background court image. Nothing but a clear is drawn until it has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CourtImage {
    #[default]
    Loading,
    Ready { width: u32, height: u32 },
}

impl CourtImage {
    pub fn mark_ready(&mut self, width: u32, height: u32) {
        *self = CourtImage::Ready { width, height };
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CourtImage::Ready { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: &'static str,
}

/// One canvas operation, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Background {
        width: f64,
        height: f64,
    },
    Polyline {
        points: Vec<SurfacePoint>,
        stroke: &'static str,
        line_width: f64,
        alpha: f64,
    },
    Disc {
        center: SurfacePoint,
        radius: f64,
        fill: &'static str,
        stroke: &'static str,
        line_width: f64,
    },
    Label {
        at: SurfacePoint,
        text: String,
        font: &'static str,
        color: &'static str,
    },
    RadialGradient {
        center: SurfacePoint,
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

/// Everything a redraw depends on.
pub struct RenderInputs<'a> {
    pub image: &'a CourtImage,
    pub snapshot: Option<&'a Snapshot>,
    pub mode: ViewMode,
    pub selection: Selection,
    pub trails: &'a TrailBuffers,
    pub surface: SurfaceSize,
}

pub struct CourtRenderer {
    config: EngineConfig,
}

impl CourtRenderer {
    pub fn new(config: EngineConfig) -> Self {
        CourtRenderer { config }
    }

    pub fn redraw(&self, inputs: &RenderInputs<'_>) -> Result<Frame, EngineError> {
        let scale = CourtScale::new(self.config.court, inputs.surface)?;
        let mut commands = vec![DrawCommand::Clear {
            width: inputs.surface.width,
            height: inputs.surface.height,
        }];

        if !inputs.image.is_ready() {
            return Ok(Frame { commands });
        }

        commands.push(DrawCommand::Background {
            width: inputs.surface.width,
            height: inputs.surface.height,
        });

        let Some(snapshot) = inputs.snapshot else {
            return Ok(Frame { commands });
        };

        for player in &snapshot.players {
            let selected = inputs.selection.is_selected(player.id);
            let color = team_color(player.team);

            if inputs.mode == ViewMode::Trails {
                if let Some(trail) = inputs.trails.get(player.id) {
                    commands.push(DrawCommand::Polyline {
                        points: trail.iter().map(|p| scale.to_surface(*p)).collect(),
                        stroke: color,
                        line_width: TRAIL_WIDTH,
                        alpha: TRAIL_ALPHA,
                    });
                }
            }

            let center = scale.to_surface(player.position);
            let radius = marker_radius(&self.config, selected);
            commands.push(DrawCommand::Disc {
                center,
                radius,
                fill: color,
                stroke: if selected { SELECTED_STROKE } else { color },
                line_width: if selected { 3.0 } else { 2.0 },
            });
            commands.push(DrawCommand::Label {
                at: center,
                text: player.number.to_string(),
                font: NUMBER_FONT,
                color: LABEL_COLOR,
            });

            if selected {
                commands.push(DrawCommand::Label {
                    at: SurfacePoint::new(center.x, center.y - radius - NAME_OFFSET),
                    text: player.name.clone(),
                    font: NAME_FONT,
                    color: LABEL_COLOR,
                });
            }
        }

        // Heat blobs paint over the markers.
        if inputs.mode == ViewMode::Heatmap {
            for player in &snapshot.players {
                commands.push(DrawCommand::RadialGradient {
                    center: scale.to_surface(player.position),
                    radius: self.config.heatmap_radius,
                    stops: heat_stops(),
                });
            }
        }

        Ok(Frame { commands })
    }
}

fn heat_stops() -> Vec<GradientStop> {
    vec![
        GradientStop {
            offset: 0.0,
            color: "rgba(249, 115, 22, 0.8)",
        },
        GradientStop {
            offset: 0.5,
            color: "rgba(234, 179, 8, 0.4)",
        },
        GradientStop {
            offset: 1.0,
            color: "rgba(34, 197, 94, 0.1)",
        },
    ]
}
