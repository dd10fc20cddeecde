//! Pot Climb - A hammer-swinging climbing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, terrain, player modes, collisions)
//! - `snapshot`: Read-only view of the simulation for rendering and the HUD
//! - `settings`: Data-driven physics tuning

pub mod settings;
pub mod sim;
pub mod snapshot;

pub use settings::Settings;
pub use snapshot::{HudStats, RenderSnapshot};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per 60 Hz animation frame)
    pub const TICKS_PER_SECOND: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player spawn offset: x from the left, y above the bottom of the canvas
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_HEIGHT: f32 = 150.0;

    /// Distance of the floor plane (starting platform top) above the canvas bottom
    pub const FLOOR_OFFSET: f32 = 100.0;
}

/// Unit vector pointing along `angle` (radians, screen coordinates)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of `v` in radians, in (-π, π]
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_direction_and_angle_agree() {
        let d = direction(FRAC_PI_2);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
        assert!((angle_of(d) - FRAC_PI_2).abs() < 1e-6);
    }
}
