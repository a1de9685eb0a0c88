/// All game entity types — pure data, no logic.
///
/// Behaviour lives in `sprite` (per-entity motion and hit-testing),
/// `spawner` (population) and `compute` (round flow).

use std::collections::BTreeMap;

use crate::constants::{
    BIRD_SIZE, DARK_BIRD_SIZE, FLOWER_SIZE, MAGAZINE_SIZE, NORMAL_HIT_FRACTION, NORMAL_SCALE,
    SMALL_HIT_FRACTION, SMALL_SCALE, VIEW_HEIGHT, VIEW_WIDTH,
};
use crate::look::LookAround;
use crate::scene::Scene;
use crate::schedule::Schedule;
use crate::timer::Countdown;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Flower,
    Bird,
    DarkBird,
}

impl Kind {
    /// Sprite bounding box at scale 1.0.
    pub fn sprite_size(self) -> (f32, f32) {
        match self {
            Kind::Flower => FLOWER_SIZE,
            Kind::Bird => BIRD_SIZE,
            Kind::DarkBird => DARK_BIRD_SIZE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Kind::Flower => "flower",
            Kind::Bird => "bird",
            Kind::DarkBird => "dark bird",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Normal,
}

impl SizeClass {
    pub fn scale(self) -> f32 {
        match self {
            SizeClass::Small => SMALL_SCALE,
            SizeClass::Normal => NORMAL_SCALE,
        }
    }

    /// Half-width / half-height fractions of the scaled sprite box that
    /// count as a hit.
    pub fn hit_fraction(self) -> (f32, f32) {
        match self {
            SizeClass::Small => SMALL_HIT_FRACTION,
            SizeClass::Normal => NORMAL_HIT_FRACTION,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

// ── Shootable entities ───────────────────────────────────────────────────────

/// State of the short death sequence played after a hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Falling {
    /// Seconds since the hit.
    pub elapsed: f32,
    /// Rotation in turns (1.0 = full circle).
    pub rotation: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Monotonic per game; lower ids are older.
    pub id: u64,
    pub kind: Kind,
    pub size: SizeClass,
    pub pos: Point,
    pub scale: f32,
    pub alive: bool,
    pub direction: Direction,
    /// Set once the entity has been hit.
    pub falling: Option<Falling>,
}

/// A floating score label shown where a hit landed.
#[derive(Clone, Debug, PartialEq)]
pub struct ScorePopup {
    pub pos: Point,
    pub points: i64,
    /// Seconds left on screen.
    pub ttl: f32,
}

// ── Round ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    pub score: i64,
    pub ammo_loaded: u32,
    /// Shots fired this round.
    pub ammo_spent: u32,
    /// Shots that downed at least one entity.
    pub shots_landed: u32,
    pub hits_by_kind: BTreeMap<Kind, u32>,
}

impl Round {
    pub fn new() -> Self {
        Round {
            score: 0,
            ammo_loaded: MAGAZINE_SIZE,
            ammo_spent: 0,
            shots_landed: 0,
            hits_by_kind: BTreeMap::new(),
        }
    }

    pub fn hits(&self) -> u32 {
        self.hits_by_kind.values().sum()
    }

    pub fn hits_of(&self, kind: Kind) -> u32 {
        self.hits_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Landed shots as a percentage of shots fired.
    pub fn accuracy(&self) -> f32 {
        if self.ammo_spent == 0 {
            0.0
        } else {
            self.shots_landed as f32 * 100.0 / self.ammo_spent as f32
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Round::new()
    }
}

// ── Cursor ───────────────────────────────────────────────────────────────────

/// Crosshair position, owned by the game and always inside the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

impl Cursor {
    pub fn centered() -> Self {
        Cursor {
            x: VIEW_WIDTH / 2.0,
            y: VIEW_HEIGHT / 2.0,
        }
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.x = (self.x + dx).clamp(0.0, VIEW_WIDTH - 1.0);
        self.y = (self.y + dy).clamp(0.0, VIEW_HEIGHT - 1.0);
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub scene: Scene,
    pub round: Round,
    pub cursor: Cursor,
    /// Horizontal look-around request from held arrow keys, if any.
    pub look_keys: Option<Direction>,
    pub look: LookAround,
    /// Left edge of the view in background coordinates,
    /// `0 ..= BACKGROUND_WIDTH - VIEW_WIDTH`.
    pub scroll_offset: f32,
    pub flowers: Vec<Entity>,
    pub birds: Vec<Entity>,
    pub dark_birds: Vec<Entity>,
    pub popups: Vec<ScorePopup>,
    pub countdown: Countdown,
    pub round_timer: Countdown,
    pub schedule: Schedule,
    /// Round length without the lead-in.
    pub round_seconds: u32,
    pub next_id: u64,
    pub frame: u64,
}

impl GameState {
    pub fn collection(&self, kind: Kind) -> &Vec<Entity> {
        match kind {
            Kind::Flower => &self.flowers,
            Kind::Bird => &self.birds,
            Kind::DarkBird => &self.dark_birds,
        }
    }

    pub fn collection_mut(&mut self, kind: Kind) -> &mut Vec<Entity> {
        match kind {
            Kind::Flower => &mut self.flowers,
            Kind::Bird => &mut self.birds,
            Kind::DarkBird => &mut self.dark_birds,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.scene.is_paused()
    }
}
