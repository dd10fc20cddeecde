//! Read-only view of the simulation for the renderer and HUD
//!
//! The host draws whatever the snapshot says; nothing here feeds back into
//! the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState, Rect, RunStats};

/// Whole meters climbed and whole seconds played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HudStats {
    pub height_m: u32,
    pub time_s: u32,
}

impl From<&RunStats> for HudStats {
    fn from(stats: &RunStats) -> Self {
        Self {
            height_m: stats.max_height.max(0.0).floor() as u32,
            time_s: stats.elapsed.max(0.0).floor() as u32,
        }
    }
}

/// Everything the renderer needs to draw the player
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub hammer_angle: f32,
    pub hammer_length: f32,
    pub hammer_width: f32,
    pub hammer_tip: Vec2,
    pub mode: &'static str,
    pub hook: Option<Vec2>,
    pub grounded: bool,
    pub dragging: bool,
    /// Outward normal of the edge the hammer is scraping
    pub drag_normal: Option<Vec2>,
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub player: PlayerView,
    pub obstacles: Vec<Rect>,
    pub hud: HudStats,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            phase: state.phase,
            width: state.width,
            height: state.height,
            player: PlayerView {
                pos: player.pos,
                radius: player.radius,
                hammer_angle: player.hammer.angle,
                hammer_length: player.hammer.length,
                hammer_width: player.hammer.width,
                hammer_tip: player.hammer_tip(),
                mode: player.mode.name(),
                hook: player.mode.hook_point(),
                grounded: player.grounded,
                dragging: player.is_dragging(),
                drag_normal: player.drag.map(|d| d.normal),
            },
            obstacles: state.terrain.obstacles.clone(),
            hud: HudStats::from(&state.stats),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl GameState {
    /// Capture the current frame for drawing
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }

    pub fn hud(&self) -> HudStats {
        HudStats::from(&self.stats)
    }
}
