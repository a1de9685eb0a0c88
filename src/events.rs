/// Events crossing the boundary between the frontend and the game core.

use crate::entities::{Direction, Kind, Point, SizeClass};
use crate::scene::{Button, Scene};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Raw input, already translated out of the terminal's vocabulary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Relative crosshair motion in world units.
    MouseMove { dx: f32, dy: f32 },
    /// A press at the game's own cursor position.
    MouseDown(MouseButton),
    /// Keyboard shortcut for a menu label.
    Press(Button),
    PauseToggle,
    Reload,
    /// Fire at the cursor from the keyboard.
    Fire,
    /// Held arrow keys this frame.
    LookKeys(Option<Direction>),
}

/// Things that happened, for audio and logging.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    SceneChanged { from: Scene, to: Scene },
    RoundStarted,
    CountdownBeep { remaining: u32 },
    Shot { at: Point },
    EmptyMagazine,
    Reloaded,
    Hit {
        kind: Kind,
        size: SizeClass,
        points: i64,
    },
    Spawned { kind: Kind, id: u64 },
    Evicted { kind: Kind, id: u64 },
    TimeWarning { remaining: u32 },
    RoundOver { score: i64 },
    Quit,
}
