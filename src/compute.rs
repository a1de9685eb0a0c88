/// Game-flow functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState` together with the events the step produced.  Apart from
/// `tracing` output, side effects are limited to the injected RNG.

use rand::Rng;
use tracing::{debug, info};

use crate::constants::{
    COUNTDOWN_SECONDS, CURSOR_KEY_STEP, DARK_BIRD_SPAWN_INTERVAL, BIRD_SPAWN_INTERVAL,
    FLOWER_SPAWN_INTERVAL, MAGAZINE_SIZE, POPUP_RISE_SPEED, POPUP_SECONDS, ROUND_LEAD_IN_SECONDS,
    WARNING_THRESHOLD,
};
use crate::entities::{Cursor, Entity, GameState, Kind, Point, Round, ScorePopup};
use crate::events::{GameEvent, InputEvent, MouseButton};
use crate::look::{self, LookAround};
use crate::scene::{self, Scene, Transition, Trigger};
use crate::schedule::{Job, Schedule};
use crate::spawner;
use crate::timer::{Countdown, TickResult};

/// Hit-test order for a shot.
pub const SHOT_ORDER: [Kind; 3] = [Kind::Bird, Kind::DarkBird, Kind::Flower];

/// Arrow-key equivalents for moving the crosshair from the keyboard.
pub fn cursor_step(dx: f32, dy: f32) -> InputEvent {
    InputEvent::MouseMove {
        dx: dx * CURSOR_KEY_STEP,
        dy: dy * CURSOR_KEY_STEP,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn new_schedule() -> Schedule {
    Schedule::new()
        .every(1.0, Job::CountdownTick)
        .every(1.0, Job::RoundTimerTick)
        .every(FLOWER_SPAWN_INTERVAL, Job::SpawnFlower)
        .every(BIRD_SPAWN_INTERVAL, Job::SpawnBird)
        .every(DARK_BIRD_SPAWN_INTERVAL, Job::SpawnDarkBird)
}

/// Build the start-screen state for a round of `round_seconds`.
pub fn init_state(round_seconds: u32) -> GameState {
    GameState {
        scene: Scene::Start,
        round: Round::new(),
        cursor: Cursor::centered(),
        look_keys: None,
        look: LookAround::Idle,
        scroll_offset: look::max_offset() / 2.0,
        flowers: Vec::new(),
        birds: Vec::new(),
        dark_birds: Vec::new(),
        popups: Vec::new(),
        countdown: Countdown::new(COUNTDOWN_SECONDS),
        round_timer: Countdown::new(round_seconds + ROUND_LEAD_IN_SECONDS),
        schedule: new_schedule(),
        round_seconds,
        next_id: 0,
        frame: 0,
    }
}

/// Clear everything a round accumulates.
fn reset_round(state: &mut GameState) {
    state.round = Round::new();
    state.flowers.clear();
    state.birds.clear();
    state.dark_birds.clear();
    state.popups.clear();
    state.look = LookAround::Idle;
    state.scroll_offset = look::max_offset() / 2.0;
    state.countdown.rewind();
    state.round_timer.rewind();
    state.schedule.disable_all();
}

// ── Scene transitions ────────────────────────────────────────────────────────

fn apply_trigger(state: &mut GameState, trigger: Trigger, events: &mut Vec<GameEvent>) {
    let from = state.scene;
    let to = match scene::next(from, trigger) {
        Transition::Stay => return,
        Transition::Quit => {
            info!("exit confirmed");
            events.push(GameEvent::Quit);
            return;
        }
        Transition::Goto(to) => to,
    };

    match (from, to) {
        (_, Scene::PreRoundCountdown) => {
            reset_round(state);
            state.countdown.reset();
            state.schedule.set_enabled(Job::CountdownTick, true);
            events.push(GameEvent::RoundStarted);
            events.push(GameEvent::CountdownBeep {
                remaining: state.countdown.remaining(),
            });
        }
        (Scene::PreRoundCountdown, Scene::Playing { .. }) => {
            state.schedule.set_enabled(Job::CountdownTick, false);
            state.round_timer.reset();
            for job in [
                Job::RoundTimerTick,
                Job::SpawnFlower,
                Job::SpawnBird,
                Job::SpawnDarkBird,
            ] {
                state.schedule.set_enabled(job, true);
            }
        }
        (_, Scene::Ended) => {
            state.schedule.disable_all();
            state.round_timer.stop();
            state.look = LookAround::Idle;
            info!(
                score = state.round.score,
                shots = state.round.ammo_spent,
                hits = state.round.hits(),
                "round over"
            );
            events.push(GameEvent::RoundOver {
                score: state.round.score,
            });
        }
        (Scene::Ended, Scene::Start) => reset_round(state),
        _ => {}
    }

    info!(from = from.name(), to = to.name(), "scene change");
    state.scene = to;
    events.push(GameEvent::SceneChanged { from, to });
}

// ── Shooting ─────────────────────────────────────────────────────────────────

/// Fire one round at `point`.
///
/// Every live entity in every collection is tested, in `SHOT_ORDER`, and
/// every hit scores. An empty magazine only produces `EmptyMagazine`.
fn fire_at(state: &mut GameState, point: Point, events: &mut Vec<GameEvent>) {
    if state.round.ammo_loaded == 0 {
        events.push(GameEvent::EmptyMagazine);
        return;
    }
    state.round.ammo_loaded -= 1;
    state.round.ammo_spent += 1;
    events.push(GameEvent::Shot { at: point });

    let mut downed: Vec<(Kind, Entity)> = Vec::new();
    for kind in SHOT_ORDER {
        for entity in state.collection_mut(kind).iter_mut() {
            if entity.check_hit(point) {
                downed.push((kind, entity.clone()));
            }
        }
    }

    if !downed.is_empty() {
        state.round.shots_landed += 1;
    }
    for (kind, entity) in downed {
        let points = entity.points();
        state.round.score += points;
        *state.round.hits_by_kind.entry(kind).or_insert(0) += 1;
        state.popups.push(ScorePopup {
            pos: entity.pos,
            points,
            ttl: POPUP_SECONDS,
        });
        debug!(kind = kind.label(), id = entity.id, points, "hit");
        events.push(GameEvent::Hit {
            kind,
            size: entity.size,
            points,
        });
    }
}

fn reload_magazine(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.round.ammo_loaded < MAGAZINE_SIZE {
        state.round.ammo_loaded = MAGAZINE_SIZE;
        events.push(GameEvent::Reloaded);
    }
}

/// Fire at the cursor if the round is live.
pub fn fire(state: &GameState) -> (GameState, Vec<GameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    if next.scene.is_live() {
        let at = next.cursor.point();
        fire_at(&mut next, at, &mut events);
    }
    (next, events)
}

/// Refill the magazine if the round is live.
pub fn reload(state: &GameState) -> (GameState, Vec<GameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    if next.scene.is_live() {
        reload_magazine(&mut next, &mut events);
    }
    (next, events)
}

// ── Input routing ────────────────────────────────────────────────────────────

fn click(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let at = state.cursor.point();
    if let Some(button) = scene::button_at(state.scene, at) {
        apply_trigger(state, Trigger::Click(button), events);
    } else if state.scene.is_live() {
        fire_at(state, at, events);
    }
}

/// Route one input event according to the current scene.
pub fn handle_input(state: &GameState, input: &InputEvent) -> (GameState, Vec<GameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();

    match *input {
        InputEvent::MouseMove { dx, dy } => next.cursor.move_by(dx, dy),
        InputEvent::MouseDown(MouseButton::Left) | InputEvent::Fire => {
            click(&mut next, &mut events)
        }
        InputEvent::MouseDown(MouseButton::Right) | InputEvent::Reload => {
            if next.scene.is_live() {
                reload_magazine(&mut next, &mut events);
            }
        }
        InputEvent::Press(button) => apply_trigger(&mut next, Trigger::Click(button), &mut events),
        InputEvent::PauseToggle => apply_trigger(&mut next, Trigger::PauseToggle, &mut events),
        InputEvent::LookKeys(direction) => next.look_keys = direction,
    }

    (next, events)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Drop entities that finished falling or left the background.
fn compact(entities: &mut Vec<Entity>, scroll_offset: f32) {
    entities.retain(|e| !e.is_finished() && !e.is_off_field(scroll_offset));
}

fn move_world(state: &mut GameState, dt: f32) {
    let request = look::requested(&state.cursor, state.look_keys);
    state.look = look::resolve(request, state.scroll_offset);
    let (offset, background_dx) = look::scroll(state.look, state.scroll_offset, dt);
    state.scroll_offset = offset;

    for kind in SHOT_ORDER {
        let entities = state.collection_mut(kind);
        for entity in entities.iter_mut() {
            entity.update(dt, background_dx);
        }
        compact(entities, offset);
    }

    for popup in &mut state.popups {
        popup.ttl -= dt;
        popup.pos.x += background_dx;
        popup.pos.y -= POPUP_RISE_SPEED * dt;
    }
    state.popups.retain(|p| p.ttl > 0.0);
}

fn run_job(state: &mut GameState, job: Job, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    match job {
        Job::CountdownTick => match state.countdown.tick() {
            TickResult::Running { remaining } => {
                events.push(GameEvent::CountdownBeep { remaining })
            }
            TickResult::Expired => apply_trigger(state, Trigger::CountdownExpired, events),
            TickResult::Idle => {}
        },
        Job::RoundTimerTick => {
            if !state.scene.is_live() {
                return;
            }
            match state.round_timer.tick() {
                TickResult::Running { remaining } if remaining <= WARNING_THRESHOLD => {
                    events.push(GameEvent::TimeWarning { remaining })
                }
                TickResult::Expired => apply_trigger(state, Trigger::RoundExpired, events),
                _ => {}
            }
        }
        Job::SpawnFlower | Job::SpawnBird | Job::SpawnDarkBird => {
            if !state.scene.is_live() {
                return;
            }
            let kind = match job {
                Job::SpawnFlower => Kind::Flower,
                Job::SpawnBird => Kind::Bird,
                _ => Kind::DarkBird,
            };
            let (id, evicted) = spawner::spawn(state, kind, rng);
            debug!(kind = kind.label(), id, evicted = evicted.len(), "spawn");
            events.push(GameEvent::Spawned { kind, id });
            for id in evicted {
                events.push(GameEvent::Evicted { kind, id });
            }
        }
    }
}

/// Advance the simulation by `dt` seconds.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded RNG).
///
/// While paused nothing but the frame counter moves.
pub fn tick(state: &GameState, dt: f32, rng: &mut impl Rng) -> (GameState, Vec<GameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    next.frame += 1;

    let clock_runs = match next.scene {
        Scene::PreRoundCountdown => true,
        Scene::Playing { paused } => !paused,
        _ => false,
    };
    if !clock_runs {
        return (next, events);
    }

    if next.scene.is_live() {
        move_world(&mut next, dt);
    }

    for job in next.schedule.advance(dt) {
        run_job(&mut next, job, rng, &mut events);
    }

    (next, events)
}

/// Seconds left on the round clock, as shown to the player.
pub fn time_remaining(state: &GameState) -> u32 {
    state.round_timer.remaining().min(state.round_seconds)
}

/// True while the clock should be drawn in its warning colour.
pub fn time_is_short(state: &GameState) -> bool {
    let remaining = time_remaining(state);
    matches!(state.scene, Scene::Playing { .. }) && remaining > 0 && remaining <= WARNING_THRESHOLD
}
