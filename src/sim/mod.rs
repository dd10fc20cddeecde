//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Input applied only at tick boundaries
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod state;
pub mod terrain;
pub mod tick;

pub use clock::FixedStep;
pub use collision::{
    HammerCast, body_touches, cast_hammer, probe_terrain_drag, probe_wall_grab,
    resolve_body, resolve_collisions, strike_impulse,
};
pub use geometry::{
    EdgeHit, Rect, RectEdge, segment_intersection, segment_intersects_rect,
    segment_rect_first_hit, segment_rect_first_intersection,
};
pub use input::{InputEvent, InputQueue, apply_event};
pub use state::{
    GamePhase, GameState, Hammer, Locomotion, Player, RunStats, SimEvent, TerrainDrag, WallSide,
};
pub use terrain::{Terrain, generate};
pub use tick::tick;
