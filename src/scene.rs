/// Top-level game flow: which screen is up and how input moves between them.

use crate::entities::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Scene {
    #[default]
    Start,
    Instructions,
    ConfirmExit,
    PreRoundCountdown,
    /// The round is live. `paused` freezes motion, spawning and the clock.
    Playing {
        paused: bool,
    },
    Ended,
}

impl Scene {
    pub fn is_paused(self) -> bool {
        matches!(self, Scene::Playing { paused: true })
    }

    /// Live play: entities move, spawners run, shots land.
    pub fn is_live(self) -> bool {
        matches!(self, Scene::Playing { paused: false })
    }

    pub fn name(self) -> &'static str {
        match self {
            Scene::Start => "start",
            Scene::Instructions => "instructions",
            Scene::ConfirmExit => "confirm-exit",
            Scene::PreRoundCountdown => "countdown",
            Scene::Playing { paused: false } => "playing",
            Scene::Playing { paused: true } => "paused",
            Scene::Ended => "ended",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Start,
    Instructions,
    Exit,
    Yes,
    No,
    Back,
    Ok,
}

impl Button {
    pub fn label(self) -> &'static str {
        match self {
            Button::Start => "Start",
            Button::Instructions => "Instructions",
            Button::Exit => "Exit",
            Button::Yes => "Yes",
            Button::No => "No",
            Button::Back => "Back",
            Button::Ok => "OK",
        }
    }
}

/// Axis-aligned screen region, stored as centre and half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub cx: f32,
    pub cy: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Rect {
    const fn around(cx: f32, cy: f32, half_w: f32, half_h: f32) -> Self {
        Rect {
            cx,
            cy,
            half_w,
            half_h,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        (p.x - self.cx).abs() <= self.half_w && (p.y - self.cy).abs() <= self.half_h
    }
}

const START_MENU: [(Button, Rect); 3] = [
    (Button::Start, Rect::around(400.0, 260.0, 100.0, 20.0)),
    (Button::Instructions, Rect::around(400.0, 320.0, 120.0, 20.0)),
    (Button::Exit, Rect::around(400.0, 380.0, 100.0, 20.0)),
];
const CONFIRM_EXIT: [(Button, Rect); 2] = [
    (Button::Yes, Rect::around(330.0, 340.0, 50.0, 20.0)),
    (Button::No, Rect::around(470.0, 340.0, 50.0, 20.0)),
];
const INSTRUCTIONS: [(Button, Rect); 1] =
    [(Button::Back, Rect::around(400.0, 520.0, 80.0, 20.0))];
const ENDED: [(Button, Rect); 1] = [(Button::Ok, Rect::around(400.0, 440.0, 80.0, 20.0))];

/// Clickable labels on `scene`.
pub fn buttons(scene: Scene) -> &'static [(Button, Rect)] {
    match scene {
        Scene::Start => &START_MENU,
        Scene::ConfirmExit => &CONFIRM_EXIT,
        Scene::Instructions => &INSTRUCTIONS,
        Scene::Ended => &ENDED,
        Scene::PreRoundCountdown | Scene::Playing { .. } => &[],
    }
}

/// The button under `point` on `scene`, if any.
pub fn button_at(scene: Scene, point: Point) -> Option<Button> {
    buttons(scene)
        .iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(button, _)| *button)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Click(Button),
    PauseToggle,
    CountdownExpired,
    RoundExpired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(Scene),
    Quit,
}

/// The flow table. Anything not listed leaves the scene unchanged.
pub fn next(scene: Scene, trigger: Trigger) -> Transition {
    use Transition::{Goto, Quit, Stay};
    match (scene, trigger) {
        (Scene::Start, Trigger::Click(Button::Start)) => Goto(Scene::PreRoundCountdown),
        (Scene::Start, Trigger::Click(Button::Instructions)) => Goto(Scene::Instructions),
        (Scene::Start, Trigger::Click(Button::Exit)) => Goto(Scene::ConfirmExit),
        (Scene::ConfirmExit, Trigger::Click(Button::Yes)) => Quit,
        (Scene::ConfirmExit, Trigger::Click(Button::No)) => Goto(Scene::Start),
        (Scene::Instructions, Trigger::Click(Button::Back)) => Goto(Scene::Start),
        (Scene::PreRoundCountdown, Trigger::CountdownExpired) => {
            Goto(Scene::Playing { paused: false })
        }
        (Scene::Playing { paused }, Trigger::PauseToggle) => {
            Goto(Scene::Playing { paused: !paused })
        }
        (Scene::Playing { paused: false }, Trigger::RoundExpired) => Goto(Scene::Ended),
        (Scene::Ended, Trigger::Click(Button::Ok)) => Goto(Scene::Start),
        _ => Stay,
    }
}
