//! Input collection
//!
//! Keyboard state and pointer/touch gestures are folded into a `TickInput`
//! snapshot that the simulation samples once per tick.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::DRAG_HIT_RADIUS;
use crate::sim::TickInput;

/// An in-progress drag of the butterfly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub start_x: f32,
    pub current_x: f32,
}

impl DragState {
    pub fn delta(&self) -> f32 {
        self.current_x - self.start_x
    }
}

/// What a pointer press turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Press landed on the butterfly, drag steering begins
    Drag,
    /// Press landed elsewhere, jump on the next tick if grounded
    TapJump,
}

/// Accumulates raw events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    held: HashSet<String>,
    drag: Option<DragState>,
    tap_jump: bool,
}

fn is_left_key(key: &str) -> bool {
    matches!(key, "ArrowLeft" | "a" | "A")
}

fn is_right_key(key: &str) -> bool {
    matches!(key, "ArrowRight" | "d" | "D")
}

fn is_jump_key(key: &str) -> bool {
    matches!(key, " " | "ArrowUp" | "w" | "W")
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true when the host should suppress the
    /// browser default (space would otherwise scroll the page).
    pub fn key_down(&mut self, key: &str) -> bool {
        self.held.insert(key.to_string());
        key == " "
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Pointer or touch press at `pos` (canvas coordinates)
    pub fn pointer_down(&mut self, pos: Vec2, player_center: Vec2) -> PointerAction {
        if pos.distance(player_center) < DRAG_HIT_RADIUS {
            self.drag = Some(DragState {
                start_x: pos.x,
                current_x: pos.x,
            });
            PointerAction::Drag
        } else {
            self.tap_jump = true;
            PointerAction::TapJump
        }
    }

    /// Pointer or touch moved; only matters while dragging
    pub fn pointer_move(&mut self, x: f32) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current_x = x;
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    /// Snapshot for one tick. One-shot inputs are consumed.
    pub fn sample(&mut self) -> TickInput {
        let held = |pred: fn(&str) -> bool| self.held.iter().any(|k| pred(k.as_str()));
        let input = TickInput {
            move_left: held(is_left_key),
            move_right: held(is_right_key),
            jump: held(is_jump_key),
            drag: self.drag.map(|d| d.delta()),
            tap_jump: self.tap_jump,
        };
        self.tap_jump = false;
        input
    }

    /// Forget everything (focus lost, level restarted)
    pub fn clear(&mut self) {
        self.held.clear();
        self.drag = None;
        self.tap_jump = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let mut input = InputCollector::new();
        assert!(!input.key_down("a"));
        assert!(input.key_down(" "));
        let tick = input.sample();
        assert!(tick.move_left);
        assert!(!tick.move_right);
        assert!(tick.jump);

        input.key_up("a");
        input.key_up(" ");
        input.key_down("D");
        input.key_down("ArrowUp");
        let tick = input.sample();
        assert!(!tick.move_left);
        assert!(tick.move_right);
        assert!(tick.jump);
    }

    #[test]
    fn test_held_keys_persist_across_samples() {
        let mut input = InputCollector::new();
        input.key_down("ArrowLeft");
        assert!(input.sample().move_left);
        assert!(input.sample().move_left);
        input.key_up("ArrowLeft");
        assert!(!input.sample().move_left);
    }

    #[test]
    fn test_either_case_holds_direction() {
        let mut input = InputCollector::new();
        input.key_down("a");
        input.key_down("A");
        input.key_up("a");
        assert!(input.sample().move_left);
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut input = InputCollector::new();
        input.key_down("q");
        assert_eq!(input.sample(), TickInput::default());
    }

    #[test]
    fn test_press_near_player_starts_drag() {
        let mut input = InputCollector::new();
        let player = Vec2::new(120.0, 420.0);
        let action = input.pointer_down(Vec2::new(150.0, 430.0), player);
        assert_eq!(action, PointerAction::Drag);

        input.pointer_move(110.0);
        let tick = input.sample();
        assert_eq!(tick.drag, Some(-40.0));
        assert!(!tick.tap_jump);

        input.pointer_up();
        assert_eq!(input.sample().drag, None);
    }

    #[test]
    fn test_press_far_away_is_one_shot_jump() {
        let mut input = InputCollector::new();
        let player = Vec2::new(120.0, 420.0);
        let action = input.pointer_down(Vec2::new(600.0, 100.0), player);
        assert_eq!(action, PointerAction::TapJump);
        assert!(input.drag().is_none());

        assert!(input.sample().tap_jump);
        assert!(!input.sample().tap_jump);
    }

    #[test]
    fn test_move_without_drag_ignored() {
        let mut input = InputCollector::new();
        input.pointer_move(300.0);
        assert!(input.drag().is_none());
    }

    #[test]
    fn test_clear() {
        let mut input = InputCollector::new();
        input.key_down("d");
        input.pointer_down(Vec2::ZERO, Vec2::ZERO);
        input.clear();
        assert_eq!(input.sample(), TickInput::default());
    }
}
