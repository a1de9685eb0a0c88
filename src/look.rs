/// The shared look-around signal.
///
/// The player "looks" left or right by holding an arrow key or parking the
/// crosshair in an edge strip. While looking, the background scrolls and every
/// entity on it shifts with it, until the view hits an end of the background,
/// at which point the signal becomes clamped and nothing shifts.

use crate::constants::{BACKGROUND_WIDTH, LOOK_EDGE_ZONE, SCROLL_SPEED, VIEW_WIDTH};
use crate::entities::{Cursor, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LookAround {
    #[default]
    Idle,
    ScrollLeft,
    ScrollRight,
    ClampedLeft,
    ClampedRight,
}

impl LookAround {
    /// Direction in which content on the background moves across the screen:
    /// +1 while looking left, -1 while looking right, 0 otherwise.
    pub fn shift(self) -> f32 {
        match self {
            LookAround::ScrollLeft => 1.0,
            LookAround::ScrollRight => -1.0,
            LookAround::Idle | LookAround::ClampedLeft | LookAround::ClampedRight => 0.0,
        }
    }

    /// Horizontal screen velocity of anything pinned to the background.
    pub fn scroll_velocity(self) -> f32 {
        self.shift() * SCROLL_SPEED
    }
}

/// The direction the player is asking to look. Held keys win over the
/// crosshair edge strips.
pub fn requested(cursor: &Cursor, keys: Option<Direction>) -> Option<Direction> {
    if keys.is_some() {
        return keys;
    }
    if cursor.x < LOOK_EDGE_ZONE {
        Some(Direction::Left)
    } else if cursor.x > VIEW_WIDTH - LOOK_EDGE_ZONE {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Resolve a request against the current scroll offset.
pub fn resolve(request: Option<Direction>, scroll_offset: f32) -> LookAround {
    match request {
        None => LookAround::Idle,
        Some(Direction::Left) if scroll_offset <= 0.0 => LookAround::ClampedLeft,
        Some(Direction::Left) => LookAround::ScrollLeft,
        Some(Direction::Right) if scroll_offset >= max_offset() => LookAround::ClampedRight,
        Some(Direction::Right) => LookAround::ScrollRight,
    }
}

pub fn max_offset() -> f32 {
    BACKGROUND_WIDTH - VIEW_WIDTH
}

/// Move the view for one step of `dt` seconds.
///
/// Returns the new offset and the screen distance that background content
/// actually moved, which is less than the nominal scroll when the view runs
/// into an end of the background mid-step.
pub fn scroll(look: LookAround, scroll_offset: f32, dt: f32) -> (f32, f32) {
    let wanted = -look.scroll_velocity() * dt;
    let new_offset = (scroll_offset + wanted).clamp(0.0, max_offset());
    (new_offset, scroll_offset - new_offset)
}
