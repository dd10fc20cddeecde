//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::RectEdge;
use super::terrain::{self, Terrain};
use crate::consts::*;
use crate::direction;
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu shown, simulation idle
    Menu,
    /// Active climbing
    Playing,
    /// Fell off the bottom of the screen; only a restart leaves this phase
    GameOver,
}

/// Which side of the player the grabbed wall is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    /// Wall on the player's left (an obstacle's right edge)
    Left,
    /// Wall on the player's right (an obstacle's left edge)
    Right,
}

/// Locomotion mode. Exactly one governs velocity integration each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Locomotion {
    /// Standing or falling under gravity
    Free,
    /// Clinging to the side of an obstacle
    WallGrab { side: WallSide },
    /// Hammer hooked into terrain, swinging around `hook`
    HookedSwinging { hook: Vec2 },
    /// Hanging from `hook` near the hammer tip
    Dangling { hook: Vec2 },
}

impl Locomotion {
    /// Hook point while hooked or dangling
    pub fn hook_point(&self) -> Option<Vec2> {
        match *self {
            Locomotion::HookedSwinging { hook } | Locomotion::Dangling { hook } => Some(hook),
            _ => None,
        }
    }

    /// True while the hammer is anchored (hooked or dangling)
    pub fn is_anchored(&self) -> bool {
        self.hook_point().is_some()
    }

    pub fn is_hooked(&self) -> bool {
        matches!(self, Locomotion::HookedSwinging { .. })
    }

    pub fn is_dangling(&self) -> bool {
        matches!(self, Locomotion::Dangling { .. })
    }

    pub fn is_wall_grab(&self) -> bool {
        matches!(self, Locomotion::WallGrab { .. })
    }

    /// Short name for the render snapshot
    pub fn name(&self) -> &'static str {
        match self {
            Locomotion::Free => "free",
            Locomotion::WallGrab { .. } => "wall_grab",
            Locomotion::HookedSwinging { .. } => "hooked",
            Locomotion::Dangling { .. } => "dangling",
        }
    }
}

/// The hammer: a segment anchored at the player's centre
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hammer {
    pub length: f32,
    /// Radians, screen coordinates (0 = right, π/2 = down)
    pub angle: f32,
    pub width: f32,
}

/// Terrain contact of an anchored hammer, refreshed every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainDrag {
    /// Outward normal of the struck edge
    pub normal: Vec2,
    pub edge: RectEdge,
}

/// The climber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hammer: Hammer,
    pub mode: Locomotion,
    pub grounded: bool,
    pub can_jump: bool,
    /// Set while an anchored hammer is scraping terrain
    pub drag: Option<TerrainDrag>,
    /// Last pointer position seen by the input layer
    pub last_pointer: Vec2,
}

impl Player {
    pub fn new(pos: Vec2, settings: &Settings) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: settings.player_radius,
            hammer: Hammer {
                length: settings.hammer_length,
                angle: 0.0,
                width: settings.hammer_width,
            },
            mode: Locomotion::Free,
            grounded: false,
            can_jump: true,
            drag: None,
            last_pointer: Vec2::ZERO,
        }
    }

    /// Far end of the hammer
    #[inline]
    pub fn hammer_tip(&self) -> Vec2 {
        self.pos + direction(self.hammer.angle) * self.hammer.length
    }

    /// Hammer segment (base, tip)
    #[inline]
    pub fn hammer_segment(&self) -> (Vec2, Vec2) {
        (self.pos, self.hammer_tip())
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Bottom of the body
    #[inline]
    pub fn lower_edge(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Per-run statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Highest point reached, measured up from the canvas bottom
    pub max_height: f32,
    /// Seconds of simulated play
    pub elapsed: f32,
}

/// Notable transitions, drained by the host after each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Hooked { at: Vec2 },
    Dangled { at: Vec2 },
    Released,
    Jumped,
    GameOver { height: f32 },
    Restarted { run: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Game seed; each run derives its terrain seed from this
    pub seed: u64,
    /// Number of restarts so far
    pub run: u32,
    /// Canvas size in pixels
    pub width: f32,
    pub height: f32,
    pub settings: Settings,
    pub phase: GamePhase,
    pub player: Player,
    pub terrain: Terrain,
    pub stats: RunStats,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl GameState {
    /// Create a new game sitting at the menu with freshly generated terrain
    pub fn new(seed: u64, width: f32, height: f32, settings: Settings) -> Self {
        let player = Player::new(spawn_point(height), &settings);
        let mut state = Self {
            seed,
            run: 0,
            width,
            height,
            settings,
            phase: GamePhase::Menu,
            player,
            terrain: Terrain::default(),
            stats: RunStats::default(),
            time_ticks: 0,
            events: Vec::new(),
        };
        state.regenerate_terrain();
        state
    }

    /// Terrain seed for the current run
    fn run_seed(&self) -> u64 {
        (self.run as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed)
    }

    fn regenerate_terrain(&mut self) {
        let mut rng = Pcg32::seed_from_u64(self.run_seed());
        self.terrain = terrain::generate(self.width, self.height, &mut rng);
    }

    /// Begin a run on a fresh layout: respawn the player and reset run stats
    pub fn start(&mut self) {
        self.run = self.run.wrapping_add(1);
        self.regenerate_terrain();
        self.phase = GamePhase::Playing;
        self.player = Player::new(spawn_point(self.height), &self.settings);
        self.stats = RunStats::default();
        self.time_ticks = 0;
        log::info!("Run {} started", self.run);
    }

    /// Start again after a game over
    pub fn restart(&mut self) {
        self.start();
        self.events.push(SimEvent::Restarted { run: self.run });
    }

    /// Return to the title menu
    pub fn show_menu(&mut self) {
        self.phase = GamePhase::Menu;
    }

    /// Canvas resized; terrain keeps its layout
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// y of the starting platform's top face
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height - FLOOR_OFFSET
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

fn spawn_point(height: f32) -> Vec2 {
    Vec2::new(SPAWN_X, height - SPAWN_HEIGHT)
}
