//! Collision detection and response between the climber and terrain
//!
//! Body collisions are plain AABB tests against each obstacle. The hammer is a
//! line segment tested edge by edge; when it strikes terrain outside of the
//! anchored modes it kicks the player with an impulse shaped by a couple of
//! hand-tuned heuristics.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::geometry::{EdgeHit, Rect, segment_intersects_rect, segment_rect_first_hit};
use super::state::{Player, TerrainDrag, WallSide};
use crate::direction;
use crate::settings::Settings;

/// Side-sweep heuristic: a down-right swing catching the left half of a ledge
/// flings the player to the right.
pub const SIDE_SWEEP_ANGLE: f32 = 0.0;
pub const SIDE_SWEEP_IMPULSE: f32 = 8.0;

/// Downward-strike heuristic: hammering terrain below the player pops the
/// player straight up.
pub const DOWN_STRIKE_ANGLE: f32 = -FRAC_PI_2;
pub const DOWN_STRIKE_IMPULSE: f32 = 3.0;

/// Where the hammer caught terrain when cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HammerCast {
    /// Index of the obstacle that was hit
    pub obstacle: usize,
    pub hit: EdgeHit,
    /// Distance from the hit to the hammer tip
    pub tip_distance: f32,
}

/// Cast the hammer against obstacles in order; the first obstacle hit wins
pub fn cast_hammer(player: &Player, obstacles: &[Rect]) -> Option<HammerCast> {
    let (base, tip) = player.hammer_segment();
    obstacles.iter().enumerate().find_map(|(i, rect)| {
        segment_rect_first_hit(base, tip, rect).map(|hit| HammerCast {
            obstacle: i,
            hit,
            tip_distance: tip.distance(hit.point),
        })
    })
}

/// Find a wall within one radius of the player and snap flush against it
///
/// Checks each obstacle's right edge, then its left edge; the first match
/// snaps the player, zeroes horizontal velocity and ends the scan.
pub fn probe_wall_grab(player: &mut Player, obstacles: &[Rect]) -> Option<WallSide> {
    let r = player.radius;

    for rect in obstacles {
        let overlaps_vertically = player.pos.y + r > rect.top() && player.pos.y - r < rect.bottom();
        if !overlaps_vertically {
            continue;
        }

        if (player.pos.x - rect.right()).abs() < r {
            player.vel.x = 0.0;
            player.pos.x = rect.right() + r;
            return Some(WallSide::Left);
        }

        if (player.pos.x - rect.left()).abs() < r {
            player.vel.x = 0.0;
            player.pos.x = rect.left() - r;
            return Some(WallSide::Right);
        }
    }

    None
}

/// Whether the anchored hammer is currently scraping terrain, and on which edge
pub fn probe_terrain_drag(player: &Player, obstacles: &[Rect]) -> Option<TerrainDrag> {
    let (base, tip) = player.hammer_segment();
    obstacles.iter().find_map(|rect| {
        segment_rect_first_hit(base, tip, rect).map(|hit| TerrainDrag {
            normal: hit.edge.outward_normal(),
            edge: hit.edge,
        })
    })
}

/// Does the player's bounding square overlap `rect`?
///
/// Resting exactly on the top face counts as contact so a standing player
/// stays grounded from tick to tick, unless the body is already moving up.
pub fn body_touches(player: &Player, rect: &Rect) -> bool {
    let r = player.radius;
    let lower = player.pos.y + r;
    let reaches_top = if player.vel.y < 0.0 {
        lower > rect.top()
    } else {
        lower >= rect.top()
    };
    player.pos.x - r < rect.right()
        && player.pos.x + r > rect.left()
        && player.pos.y - r < rect.bottom()
        && reaches_top
}

/// Push the body out of `rect` vertically: onto the top face, or back below
/// the underside.
pub fn resolve_body(player: &mut Player, rect: &Rect) {
    let r = player.radius;

    if player.pos.y + r >= rect.top() && player.pos.y - r < rect.top() {
        // Landed on top
        player.pos.y = rect.top() - r;
        player.vel.y = 0.0;
        player.grounded = true;
        player.can_jump = true;
    } else if player.pos.y - r < rect.bottom() && player.pos.y + r > rect.bottom() {
        // Bumped the underside
        player.pos.y = rect.bottom() + r;
        player.vel.y = 0.0;
    }
}

/// Impulse (direction angle, magnitude) for a hammer striking `rect`
///
/// Default: pushed away from the hammer with the base strike impulse. The two
/// heuristics below are game-feel tuning, not physics.
pub fn strike_impulse(player: &Player, tip: Vec2, rect: &Rect, settings: &Settings) -> (f32, f32) {
    let angle = player.hammer.angle;

    let (dir, magnitude) = if tip.x < rect.center().x && angle > 0.0 && angle < FRAC_PI_2 {
        (SIDE_SWEEP_ANGLE, SIDE_SWEEP_IMPULSE)
    } else if angle > 0.0 && angle < PI && rect.bottom() > player.pos.y {
        (DOWN_STRIKE_ANGLE, DOWN_STRIKE_IMPULSE)
    } else {
        (angle + PI, settings.strike_impulse)
    };

    (dir, magnitude + player.vel.length() * settings.strike_speed_bonus)
}

/// Body and hammer collisions for the free-moving modes
///
/// Clears `grounded`, then for each obstacle resolves the body and applies a
/// hammer strike impulse if the hammer crosses it. Every struck obstacle adds
/// its own impulse. The hammer segment is taken once, before any snapping.
pub fn resolve_collisions(player: &mut Player, obstacles: &[Rect], settings: &Settings) {
    player.grounded = false;

    let (base, tip) = player.hammer_segment();

    for rect in obstacles {
        if body_touches(player, rect) {
            resolve_body(player, rect);
        }

        if segment_intersects_rect(base, tip, rect) {
            let (angle, magnitude) = strike_impulse(player, tip, rect, settings);
            player.vel += direction(angle) * magnitude;
        }
    }
}
