//! Fixed timestep simulation tick
//!
//! One call advances the run by exactly one frame-sized step. The order of the
//! stages matters: each reads what the previous one wrote.

use glam::Vec2;

use super::collision::{probe_terrain_drag, probe_wall_grab, resolve_collisions};
use super::input::{InputEvent, apply_event};
use super::state::{GamePhase, GameState, Locomotion, Player, SimEvent};
use crate::consts::TICKS_PER_SECOND;
use crate::settings::Settings;
use crate::{angle_of, direction};

/// Apply this tick's input events, then advance physics by one step
pub fn tick(state: &mut GameState, events: &[InputEvent]) {
    for &event in events {
        apply_event(state, event);
    }

    // Menu and game over are frozen
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    step_physics(state);
}

fn step_physics(state: &mut GameState) {
    let canvas_height = state.height;
    let floor_y = state.floor_y();
    let GameState {
        player,
        terrain,
        settings,
        ..
    } = state;
    let obstacles = &terrain.obstacles;

    // Wall grab: the snap always applies, but an anchored hammer keeps priority
    let wall = probe_wall_grab(player, obstacles);
    match (player.mode, wall) {
        (Locomotion::Free | Locomotion::WallGrab { .. }, Some(side)) => {
            player.mode = Locomotion::WallGrab { side };
        }
        (Locomotion::WallGrab { .. }, None) => player.mode = Locomotion::Free,
        _ => {}
    }

    player.drag = if player.mode.is_anchored() {
        probe_terrain_drag(player, obstacles)
    } else {
        None
    };
    let dragging = player.is_dragging();

    match player.mode {
        Locomotion::HookedSwinging { hook } => {
            if !dragging {
                pull_onto_swing_circle(player, hook, settings);
            }
        }
        Locomotion::Dangling { hook } => {
            if !dragging {
                player.vel.y += settings.gravity;
                constrain_dangle(player, hook, settings);
            }
        }
        Locomotion::WallGrab { .. } => {
            player.vel.y = 0.0;
            player.can_jump = true;
        }
        Locomotion::Free => {
            player.vel.y += settings.gravity;
            // Soft push back up when sinking below the floor plane
            let penetration = player.lower_edge() - floor_y;
            if penetration > 0.0 {
                player.vel.y -= penetration * settings.buoyancy_factor;
            }
        }
    }

    if !player.mode.is_anchored() {
        resolve_collisions(player, obstacles, settings);
    }

    let previous = player.pos;
    player.pos += player.vel;
    player.vel *= friction(player.mode, dragging, settings);

    if !player.pos.is_finite() || !player.vel.is_finite() {
        log::warn!(
            "Rejected non-finite player state pos={:?} vel={:?}",
            player.pos,
            player.vel
        );
        player.pos = previous;
        player.vel = Vec2::ZERO;
    }

    if player.lower_edge() > canvas_height {
        state.phase = GamePhase::GameOver;
        let height = state.stats.max_height;
        state.events.push(SimEvent::GameOver { height });
        log::info!(
            "Game over: climbed {}m in {}s",
            height.floor(),
            state.stats.elapsed.floor()
        );
        return;
    }

    state.stats.max_height = state.stats.max_height.max(canvas_height - state.player.pos.y);
    state.stats.elapsed = state.time_ticks as f32 / TICKS_PER_SECOND;
}

/// Horizontal spring toward the point on the swing circle nearest the player
///
/// Only x is corrected; vertical swing comes from pointer drag impulses.
fn pull_onto_swing_circle(player: &mut Player, hook: Vec2, settings: &Settings) {
    let angle = angle_of(player.pos - hook);
    let target = hook + direction(angle) * player.hammer.length;
    player.vel.x += (target.x - player.pos.x) * settings.swing_spring;
}

/// Hard rope limit while dangling: clamp onto the circle and drop the radial
/// part of the velocity
fn constrain_dangle(player: &mut Player, hook: Vec2, settings: &Settings) {
    let max_distance = player.hammer.length + settings.dangle_slack;
    let offset = player.pos - hook;
    let distance = offset.length();

    if distance > max_distance {
        let radial = offset / distance;
        player.pos = hook + radial * max_distance;
        let tangent = radial.perp();
        player.vel = tangent * player.vel.dot(tangent);
    }
}

/// Velocity damping per tick for the current mode
fn friction(mode: Locomotion, dragging: bool, settings: &Settings) -> f32 {
    match mode {
        Locomotion::HookedSwinging { .. } | Locomotion::Dangling { .. } if dragging => {
            settings.drag_friction
        }
        Locomotion::HookedSwinging { .. } => settings.swing_friction,
        Locomotion::Dangling { .. } => settings.dangle_friction,
        Locomotion::WallGrab { .. } => 1.0,
        Locomotion::Free => settings.air_friction,
    }
}
