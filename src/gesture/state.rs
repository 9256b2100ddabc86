//! Both-buttons drag gesture state machine.
//!
//! Holding left and right together arms the gesture (`BothDown`). The next move
//! captures the reference Y and starts `Tracking`; from then on every move is
//! swallowed and replaced by a scroll until either button is released.

use serde::Serialize;

use crate::gesture::response::compute_magnitude;
use crate::models::config::ScaleConfig;
use crate::models::events::{MessageKind, RawMouseEvent};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    BothDown,
    Tracking,
}

/// What the hook layer should do with the event that was just handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PassThrough,
    Suppress,
    SuppressAndScroll(i32),
}

/// Button flags and phase, owned by the single hook callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureState {
    left_down: bool,
    right_down: bool,
    phase: Phase,
    /// Only meaningful while `phase == Tracking`.
    reference_y: i32,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn left_down(&self) -> bool {
        self.left_down
    }

    pub fn right_down(&self) -> bool {
        self.right_down
    }

    pub fn reference_y(&self) -> Option<i32> {
        (self.phase == Phase::Tracking).then_some(self.reference_y)
    }

    /// Advances the machine by one event and returns the action for it.
    pub fn handle_event(&mut self, event: &RawMouseEvent, scale: &ScaleConfig) -> Action {
        match event.kind {
            MessageKind::LeftDown => {
                self.left_down = true;
                self.arm_if_both_down();
            }
            MessageKind::RightDown => {
                self.right_down = true;
                self.arm_if_both_down();
            }
            MessageKind::LeftUp => {
                self.left_down = false;
                self.phase = Phase::Idle;
            }
            MessageKind::RightUp => {
                self.right_down = false;
                self.phase = Phase::Idle;
            }
            MessageKind::Move => return self.handle_move(event.y, scale),
            MessageKind::Other { .. } => {}
        }
        Action::PassThrough
    }

    fn arm_if_both_down(&mut self) {
        if self.left_down && self.right_down {
            self.phase = Phase::BothDown;
        }
    }

    fn handle_move(&mut self, y: i32, scale: &ScaleConfig) -> Action {
        match self.phase {
            Phase::Idle => Action::PassThrough,
            Phase::BothDown => {
                self.phase = Phase::Tracking;
                self.reference_y = y;
                Action::PassThrough
            }
            Phase::Tracking => Action::SuppressAndScroll(compute_magnitude(
                self.reference_y,
                y,
                scale.linear,
                scale.quadratic,
            )),
        }
    }
}
