//! Input events and the per-tick input queue
//!
//! Host callbacks only push events; the simulation drains the queue once at
//! the start of a tick so input timing never interleaves with physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::cast_hammer;
use super::state::{GamePhase, GameState, Locomotion, SimEvent};
use crate::angle_of;

/// A single input event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer moved: aims the hammer, and drags the player while hooked
    PointerMove { x: f32, y: f32 },
    /// Pointer pressed: try to hook the terrain under the hammer
    PointerDown { x: f32, y: f32 },
    /// Pointer released: let go of the terrain
    PointerUp,
    /// Jump key (restarts the run after a game over)
    Jump,
}

/// FIFO of events waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every queued event, leaving the queue empty
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Apply one event to the game
pub fn apply_event(state: &mut GameState, event: InputEvent) {
    match state.phase {
        GamePhase::Menu => {}
        GamePhase::GameOver => {
            if event == InputEvent::Jump {
                state.restart();
            }
        }
        GamePhase::Playing => match event {
            InputEvent::PointerMove { x, y } => pointer_move(state, Vec2::new(x, y)),
            InputEvent::PointerDown { x, y } => pointer_down(state, Vec2::new(x, y)),
            InputEvent::PointerUp => pointer_up(state),
            InputEvent::Jump => jump(state),
        },
    }
}

fn pointer_move(state: &mut GameState, pointer: Vec2) {
    let drag_factor = state.settings.pointer_drag_factor;
    let player = &mut state.player;

    player.hammer.angle = angle_of(pointer - player.pos);

    // Hooked: pointer movement drags the player along
    if player.mode.is_hooked() {
        let delta = pointer - player.last_pointer;
        player.vel += delta * drag_factor;
    }

    player.last_pointer = pointer;
}

fn pointer_down(state: &mut GameState, pointer: Vec2) {
    let Some(cast) = cast_hammer(&state.player, &state.terrain.obstacles) else {
        return;
    };

    let hook = cast.hit.point;
    let player = &mut state.player;

    if cast.tip_distance < state.settings.dangle_threshold {
        player.mode = Locomotion::Dangling { hook };
        state.events.push(SimEvent::Dangled { at: hook });
        log::debug!("Dangling from ({:.1}, {:.1})", hook.x, hook.y);
    } else {
        player.mode = Locomotion::HookedSwinging { hook };
        state.events.push(SimEvent::Hooked { at: hook });
        log::debug!("Hooked at ({:.1}, {:.1})", hook.x, hook.y);
    }

    player.vel = Vec2::ZERO;
    player.last_pointer = pointer;
}

fn pointer_up(state: &mut GameState) {
    if state.player.mode.is_anchored() {
        state.player.mode = Locomotion::Free;
        state.player.drag = None;
        state.events.push(SimEvent::Released);
    }
}

fn jump(state: &mut GameState) {
    let settings = &state.settings;
    let player = &mut state.player;

    let dangling = player.mode.is_dangling();
    if !((player.grounded && player.can_jump) || dangling) {
        return;
    }

    player.vel.y = settings.jump_force;
    player.can_jump = false;
    player.grounded = false;
    if dangling {
        player.mode = Locomotion::Free;
        player.drag = None;
    }
    state.events.push(SimEvent::Jumped);
    log::debug!("Jump");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::geometry::Rect;
    use crate::sim::terrain::Terrain;

    fn playing_state(obstacles: Vec<Rect>) -> GameState {
        let mut state = GameState::new(1, 800.0, 600.0, Settings::default());
        state.start();
        state.terrain = Terrain::from_obstacles(obstacles);
        state.player.pos = Vec2::ZERO;
        state
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Jump);
        queue.push(InputEvent::PointerUp);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec![InputEvent::Jump, InputEvent::PointerUp]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pointer_move_aims_hammer() {
        let mut state = playing_state(vec![]);
        apply_event(&mut state, InputEvent::PointerMove { x: 0.0, y: 50.0 });
        assert!((state.player.hammer.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(state.player.last_pointer, Vec2::new(0.0, 50.0));
        // Not hooked: no drag impulse
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_move_drags_while_hooked() {
        let mut state = playing_state(vec![]);
        state.player.mode = Locomotion::HookedSwinging { hook: Vec2::new(0.0, -100.0) };
        state.player.last_pointer = Vec2::new(10.0, 10.0);

        apply_event(&mut state, InputEvent::PointerMove { x: 30.0, y: 0.0 });
        assert_eq!(state.player.vel, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_hit_near_tip_dangles() {
        // Left edge at x = 75 is 25 from the tip at x = 100
        let mut state = playing_state(vec![Rect::new(75.0, -10.0, 50.0, 20.0)]);
        state.player.vel = Vec2::new(3.0, 3.0);

        apply_event(&mut state, InputEvent::PointerDown { x: 100.0, y: 0.0 });
        match state.player.mode {
            Locomotion::Dangling { hook } => assert!((hook - Vec2::new(75.0, 0.0)).length() < 1e-3),
            other => panic!("expected dangling, got {:?}", other),
        }
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_hit_at_threshold_hooks() {
        // Exactly 30 from the tip: hooked, not dangling
        let mut state = playing_state(vec![Rect::new(70.0, -10.0, 50.0, 20.0)]);

        apply_event(&mut state, InputEvent::PointerDown { x: 100.0, y: 0.0 });
        assert!(state.player.mode.is_hooked());
        assert_eq!(state.drain_events().len(), 1);
    }

    #[test]
    fn test_hit_far_from_tip_hooks() {
        // Right edge comes first in scan order, 40 from the tip
        let mut state = playing_state(vec![Rect::new(40.0, -10.0, 20.0, 20.0)]);
        apply_event(&mut state, InputEvent::PointerDown { x: 100.0, y: 0.0 });
        assert_eq!(
            state.player.mode.hook_point().map(|h| h.x.round()),
            Some(60.0)
        );
        assert!(state.player.mode.is_hooked());
    }

    #[test]
    fn test_miss_keeps_mode() {
        let mut state = playing_state(vec![Rect::new(0.0, 300.0, 50.0, 20.0)]);
        state.player.vel = Vec2::new(1.0, 2.0);
        apply_event(&mut state, InputEvent::PointerDown { x: 100.0, y: 0.0 });
        assert_eq!(state.player.mode, Locomotion::Free);
        assert_eq!(state.player.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_pointer_up_releases() {
        let mut state = playing_state(vec![]);
        state.player.mode = Locomotion::Dangling { hook: Vec2::ZERO };
        apply_event(&mut state, InputEvent::PointerUp);
        assert_eq!(state.player.mode, Locomotion::Free);
        assert_eq!(state.drain_events(), vec![SimEvent::Released]);
    }

    #[test]
    fn test_jump_requires_ground_or_dangle() {
        let mut state = playing_state(vec![]);
        state.player.grounded = false;
        apply_event(&mut state, InputEvent::Jump);
        assert_eq!(state.player.vel.y, 0.0);

        state.player.grounded = true;
        state.player.can_jump = true;
        apply_event(&mut state, InputEvent::Jump);
        assert_eq!(state.player.vel.y, -15.0);
        assert!(!state.player.can_jump);

        // A second jump before landing again does nothing
        state.player.vel.y = 0.0;
        apply_event(&mut state, InputEvent::Jump);
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_jump_from_dangle_lets_go() {
        let mut state = playing_state(vec![]);
        state.player.mode = Locomotion::Dangling { hook: Vec2::new(0.0, -100.0) };
        apply_event(&mut state, InputEvent::Jump);
        assert_eq!(state.player.mode, Locomotion::Free);
        assert_eq!(state.player.vel.y, -15.0);
    }

    #[test]
    fn test_menu_ignores_input() {
        let mut state = GameState::new(1, 800.0, 600.0, Settings::default());
        apply_event(&mut state, InputEvent::PointerMove { x: 500.0, y: 0.0 });
        apply_event(&mut state, InputEvent::Jump);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.hammer.angle, 0.0);
    }

    #[test]
    fn test_jump_after_game_over_restarts() {
        let mut state = playing_state(vec![]);
        state.phase = GamePhase::GameOver;
        apply_event(&mut state, InputEvent::PointerDown { x: 0.0, y: 0.0 });
        assert_eq!(state.phase, GamePhase::GameOver);

        apply_event(&mut state, InputEvent::Jump);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.run, 2);
    }
}
