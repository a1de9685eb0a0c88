use shooting_birds::compute::*;
use shooting_birds::constants::{MAGAZINE_SIZE, MAX_BIRDS, MAX_DARK_BIRDS, MAX_FLOWERS};
use shooting_birds::entities::*;
use shooting_birds::events::{GameEvent, InputEvent, MouseButton};
use shooting_birds::scene::{Button, Scene};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn input(state: &GameState, event: InputEvent) -> (GameState, Vec<GameEvent>) {
    handle_input(state, &event)
}

/// Start a round and run the three-second countdown.
fn playing_state(round_seconds: u32) -> GameState {
    let mut rng = seeded_rng();
    let (mut s, _) = input(&init_state(round_seconds), InputEvent::Press(Button::Start));
    for _ in 0..3 {
        s = tick(&s, 1.0, &mut rng).0;
    }
    assert_eq!(s.scene, Scene::Playing { paused: false });
    s
}

fn place(state: &mut GameState, kind: Kind, size: SizeClass, x: f32, y: f32) {
    let id = state.next_id;
    state.next_id += 1;
    let e = Entity::new(id, kind, size, Point::new(x, y), Direction::Right);
    state.collection_mut(kind).push(e);
}

fn aim(state: &GameState, x: f32, y: f32) -> GameState {
    let dx = x - state.cursor.x;
    let dy = y - state.cursor.y;
    input(state, InputEvent::MouseMove { dx, dy }).0
}

fn shoot(state: &GameState, x: f32, y: f32) -> (GameState, Vec<GameEvent>) {
    let aimed = aim(state, x, y);
    input(&aimed, InputEvent::MouseDown(MouseButton::Left))
}

fn total_entities(s: &GameState) -> usize {
    s.flowers.len() + s.birds.len() + s.dark_birds.len()
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_starts_on_menu() {
    let s = init_state(60);
    assert_eq!(s.scene, Scene::Start);
    assert_eq!(s.round.score, 0);
    assert_eq!(s.round.ammo_loaded, MAGAZINE_SIZE);
    assert_eq!(total_entities(&s), 0);
    assert_eq!(s.frame, 0);
}

#[test]
fn round_timer_includes_lead_in() {
    let s = init_state(60);
    assert_eq!(s.round_timer.start_value(), 61);
}

#[test]
fn displayed_time_never_exceeds_round_length() {
    let mut rng = seeded_rng();
    let s = playing_state(60);
    assert_eq!(time_remaining(&s), 60);
    let s = tick(&s, 1.0, &mut rng).0;
    assert_eq!(time_remaining(&s), 60);
    let s = tick(&s, 1.0, &mut rng).0;
    assert_eq!(time_remaining(&s), 59);
}

// ── Scene flow ────────────────────────────────────────────────────────────────

#[test]
fn clicking_start_label_begins_countdown() {
    let s = init_state(60);
    let (s2, events) = shoot(&s, 400.0, 260.0);
    assert_eq!(s2.scene, Scene::PreRoundCountdown);
    assert!(events.contains(&GameEvent::RoundStarted));
    assert_eq!(s2.countdown.remaining(), 3);
}

#[test]
fn clicking_empty_menu_space_does_nothing() {
    let s = init_state(60);
    let (s2, events) = shoot(&s, 50.0, 50.0);
    assert_eq!(s2.scene, Scene::Start);
    assert!(events.is_empty());
}

#[test]
fn countdown_reaches_playing_after_three_ticks() {
    let mut rng = seeded_rng();
    let (mut s, _) = input(&init_state(60), InputEvent::Press(Button::Start));
    s = tick(&s, 1.0, &mut rng).0;
    assert_eq!(s.scene, Scene::PreRoundCountdown);
    s = tick(&s, 1.0, &mut rng).0;
    assert_eq!(s.scene, Scene::PreRoundCountdown);
    s = tick(&s, 1.0, &mut rng).0;
    assert_eq!(s.scene, Scene::Playing { paused: false });
    assert!(s.round_timer.is_running());
    assert_eq!(s.round_timer.remaining(), 61);
}

#[test]
fn countdown_beeps_each_second() {
    let mut rng = seeded_rng();
    let (s, _) = input(&init_state(60), InputEvent::Press(Button::Start));
    let (_, events) = tick(&s, 1.0, &mut rng);
    assert!(events.contains(&GameEvent::CountdownBeep { remaining: 2 }));
}

#[test]
fn exit_asks_for_confirmation() {
    let s = init_state(60);
    let (s, _) = input(&s, InputEvent::Press(Button::Exit));
    assert_eq!(s.scene, Scene::ConfirmExit);

    let (back, events) = input(&s, InputEvent::Press(Button::No));
    assert_eq!(back.scene, Scene::Start);
    assert!(!events.contains(&GameEvent::Quit));

    let (_, events) = input(&s, InputEvent::Press(Button::Yes));
    assert!(events.contains(&GameEvent::Quit));
}

#[test]
fn instructions_and_back() {
    let (s, _) = input(&init_state(60), InputEvent::Press(Button::Instructions));
    assert_eq!(s.scene, Scene::Instructions);
    let (s, _) = shoot(&s, 400.0, 520.0);
    assert_eq!(s.scene, Scene::Start);
}

#[test]
fn round_ends_when_clock_runs_out() {
    let mut rng = seeded_rng();
    let mut s = playing_state(2); // 3 ticks including lead-in
    let mut ended_with = None;
    for _ in 0..3 {
        let (next, events) = tick(&s, 1.0, &mut rng);
        for e in &events {
            if let GameEvent::RoundOver { score } = e {
                ended_with = Some(*score);
            }
        }
        s = next;
    }
    assert_eq!(s.scene, Scene::Ended);
    assert_eq!(ended_with, Some(s.round.score));
    assert!(!s.round_timer.is_running());
}

#[test]
fn ended_round_is_frozen() {
    let mut rng = seeded_rng();
    let mut s = playing_state(1);
    for _ in 0..2 {
        s = tick(&s, 1.0, &mut rng).0;
    }
    assert_eq!(s.scene, Scene::Ended);
    let before = s.clone();
    let s2 = tick(&s, 5.0, &mut rng).0;
    assert_eq!(s2.round, before.round);
    assert_eq!(total_entities(&s2), total_entities(&before));
}

#[test]
fn ok_returns_to_start_with_full_reset() {
    let mut rng = seeded_rng();
    let mut s = playing_state(1);
    s.round.score = 99;
    place(&mut s, Kind::Bird, SizeClass::Normal, 100.0, 100.0);
    for _ in 0..2 {
        s = tick(&s, 1.0, &mut rng).0;
    }
    assert_eq!(s.scene, Scene::Ended);

    let (s, _) = input(&s, InputEvent::Press(Button::Ok));
    assert_eq!(s.scene, Scene::Start);
    assert_eq!(s.round.score, 0);
    assert_eq!(s.round.ammo_loaded, MAGAZINE_SIZE);
    assert_eq!(total_entities(&s), 0);
}

#[test]
fn second_round_countdown_shows_full_clock() {
    let mut rng = seeded_rng();
    let mut s = playing_state(2);
    for _ in 0..3 {
        s = tick(&s, 1.0, &mut rng).0;
    }
    assert_eq!(s.scene, Scene::Ended);
    assert_eq!(time_remaining(&s), 0);

    let (s, _) = input(&s, InputEvent::Press(Button::Ok));
    assert_eq!(time_remaining(&s), 2);
    let (s, _) = input(&s, InputEvent::Press(Button::Start));
    assert_eq!(s.scene, Scene::PreRoundCountdown);
    assert_eq!(time_remaining(&s), 2);
    assert!(!s.round_timer.is_running());
}

#[test]
fn warning_fires_in_last_ten_seconds() {
    let mut rng = seeded_rng();
    let s = playing_state(5);
    let (s, events) = tick(&s, 1.0, &mut rng);
    assert!(events.contains(&GameEvent::TimeWarning { remaining: 5 }));
    assert!(time_is_short(&s));

    let long = playing_state(60);
    let (long, events) = tick(&long, 1.0, &mut rng);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::TimeWarning { .. })));
    assert!(!time_is_short(&long));
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn pause_toggle_twice_is_identity() {
    let s = playing_state(60);
    let (paused, _) = input(&s, InputEvent::PauseToggle);
    assert_eq!(paused.scene, Scene::Playing { paused: true });
    let (resumed, _) = input(&paused, InputEvent::PauseToggle);
    assert_eq!(resumed.scene, s.scene);
    assert_eq!(resumed.round_timer, s.round_timer);
}

#[test]
fn pause_freezes_clock_motion_and_spawning() {
    let mut rng = seeded_rng();
    let mut s = playing_state(60);
    place(&mut s, Kind::Bird, SizeClass::Normal, 400.0, 100.0);
    let (mut paused, _) = input(&s, InputEvent::PauseToggle);
    for _ in 0..30 {
        paused = tick(&paused, 1.0, &mut rng).0;
    }
    assert_eq!(paused.round_timer.remaining(), s.round_timer.remaining());
    assert_eq!(paused.birds, s.birds);
    assert_eq!(total_entities(&paused), 1);
}

#[test]
fn pause_key_is_ignored_outside_play() {
    let (s, events) = input(&init_state(60), InputEvent::PauseToggle);
    assert_eq!(s.scene, Scene::Start);
    assert!(events.is_empty());
}

#[test]
fn no_shooting_while_paused() {
    let s = playing_state(60);
    let (paused, _) = input(&s, InputEvent::PauseToggle);
    let (after, events) = input(&paused, InputEvent::Fire);
    assert_eq!(after.round.ammo_loaded, MAGAZINE_SIZE);
    assert!(events.is_empty());
}

// ── Timer monotonicity ────────────────────────────────────────────────────────

#[test]
fn round_clock_never_increases_while_playing() {
    let mut rng = seeded_rng();
    let mut s = playing_state(60);
    let mut last = s.round_timer.remaining();
    for _ in 0..200 {
        s = tick(&s, 1.0 / 30.0, &mut rng).0;
        let now = s.round_timer.remaining();
        assert!(now <= last);
        last = now;
    }
    assert!(last < 61);
}

// ── Shooting & magazine ───────────────────────────────────────────────────────

#[test]
fn firing_spends_one_round() {
    let s = playing_state(60);
    let (s2, events) = shoot(&s, 400.0, 300.0);
    assert_eq!(s2.round.ammo_loaded, MAGAZINE_SIZE - 1);
    assert_eq!(s2.round.ammo_spent, 1);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Shot { .. })));
}

#[test]
fn empty_magazine_clicks_and_scores_nothing() {
    let mut s = playing_state(60);
    place(&mut s, Kind::Bird, SizeClass::Normal, 400.0, 300.0);
    s.round.ammo_loaded = 0;
    let (s2, events) = shoot(&s, 400.0, 300.0);
    assert_eq!(events, vec![GameEvent::EmptyMagazine]);
    assert_eq!(s2.round.score, 0);
    assert_eq!(s2.round.ammo_loaded, 0);
    assert!(s2.birds[0].alive);
}

#[test]
fn magazine_stays_within_bounds() {
    let mut s = playing_state(60);
    for _ in 0..(MAGAZINE_SIZE + 4) {
        s = fire(&s).0;
        assert!(s.round.ammo_loaded <= MAGAZINE_SIZE);
    }
    assert_eq!(s.round.ammo_loaded, 0);
    assert_eq!(s.round.ammo_spent, MAGAZINE_SIZE);
}

#[test]
fn reload_refills_instantly() {
    let mut s = playing_state(60);
    s.round.ammo_loaded = 2;
    let (s2, events) = input(&s, InputEvent::MouseDown(MouseButton::Right));
    assert_eq!(s2.round.ammo_loaded, MAGAZINE_SIZE);
    assert_eq!(events, vec![GameEvent::Reloaded]);

    // Already full: nothing to do
    let (s3, events) = reload(&s2);
    assert_eq!(s3.round.ammo_loaded, MAGAZINE_SIZE);
    assert!(events.is_empty());
}

#[test]
fn bird_then_small_dark_bird_scores_minus_fifteen() {
    let mut s = playing_state(60);
    place(&mut s, Kind::Bird, SizeClass::Normal, 200.0, 150.0);
    place(&mut s, Kind::DarkBird, SizeClass::Small, 600.0, 120.0);

    let (s, _) = shoot(&s, 200.0, 150.0);
    assert_eq!(s.round.score, 10);
    let (s, events) = shoot(&s, 600.0, 120.0);
    assert_eq!(s.round.score, -15);
    assert!(events.contains(&GameEvent::Hit {
        kind: Kind::DarkBird,
        size: SizeClass::Small,
        points: -25
    }));
}

#[test]
fn dead_entity_is_not_scored_twice() {
    let mut s = playing_state(60);
    place(&mut s, Kind::Bird, SizeClass::Normal, 300.0, 200.0);
    let (s, _) = shoot(&s, 300.0, 200.0);
    let (s, events) = shoot(&s, 300.0, 200.0);
    assert_eq!(s.round.score, 10);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Hit { .. })));
    assert_eq!(s.round.hits(), 1);
}

#[test]
fn one_shot_hits_every_overlapping_entity() {
    let mut s = playing_state(60);
    place(&mut s, Kind::Bird, SizeClass::Normal, 300.0, 450.0);
    place(&mut s, Kind::Bird, SizeClass::Normal, 305.0, 452.0);
    place(&mut s, Kind::Flower, SizeClass::Normal, 300.0, 455.0);
    let (s, events) = shoot(&s, 300.0, 450.0);
    let hits = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Hit { .. }))
        .count();
    assert_eq!(hits, 3);
    assert_eq!(s.round.score, 30);
    assert_eq!(s.round.shots_landed, 1);
    assert_eq!(s.round.hits_of(Kind::Bird), 2);
    assert_eq!(s.popups.len(), 3);
}

#[test]
fn hit_entity_falls_then_disappears() {
    let mut rng = seeded_rng();
    let mut s = playing_state(60);
    place(&mut s, Kind::Bird, SizeClass::Normal, 400.0, 200.0);
    let (mut s, _) = shoot(&s, 400.0, 200.0);
    let id = s.birds[0].id;
    s = aim(&s, 400.0, 300.0);
    for _ in 0..30 {
        s = tick(&s, 1.0 / 30.0, &mut rng).0;
    }
    assert!(s.birds.iter().all(|b| b.id != id));
}

// ── Look-around & motion ──────────────────────────────────────────────────────

#[test]
fn held_left_key_scrolls_and_carries_flowers() {
    let mut rng = seeded_rng();
    let mut s = playing_state(60);
    place(&mut s, Kind::Flower, SizeClass::Normal, 300.0, 500.0);
    let offset = s.scroll_offset;
    let (s, _) = input(&s, InputEvent::LookKeys(Some(Direction::Left)));
    let (s, _) = tick(&s, 0.5, &mut rng);
    assert_eq!(s.scroll_offset, offset - 80.0);
    assert_eq!(s.flowers[0].pos.x, 380.0);
}

#[test]
fn cursor_in_edge_strip_scrolls_right() {
    let mut rng = seeded_rng();
    let s = playing_state(60);
    let offset = s.scroll_offset;
    let s = aim(&s, 790.0, 300.0);
    let (s, _) = tick(&s, 0.5, &mut rng);
    assert_eq!(s.scroll_offset, offset + 80.0);
}

#[test]
fn scrolling_stops_at_background_end() {
    let mut rng = seeded_rng();
    let mut s = playing_state(60);
    place(&mut s, Kind::Flower, SizeClass::Normal, 300.0, 500.0);
    s.scroll_offset = 0.0;
    let (s, _) = input(&s, InputEvent::LookKeys(Some(Direction::Left)));
    let (s, _) = tick(&s, 0.5, &mut rng);
    assert_eq!(s.scroll_offset, 0.0);
    assert_eq!(s.flowers[0].pos.x, 300.0);
}

#[test]
fn mouse_move_clamps_cursor() {
    let s = init_state(60);
    let (s, _) = input(&s, InputEvent::MouseMove { dx: -5000.0, dy: 0.0 });
    assert_eq!(s.cursor.x, 0.0);
}

// ── Spawning during play ──────────────────────────────────────────────────────

#[test]
fn spawners_populate_the_field() {
    let mut rng = seeded_rng();
    let mut s = playing_state(60);
    for _ in 0..(30 * 5) {
        s = tick(&s, 1.0 / 30.0, &mut rng).0;
    }
    assert!(!s.flowers.is_empty());
    assert!(!s.birds.is_empty());
    assert!(!s.dark_birds.is_empty());
}

#[test]
fn population_caps_hold_every_tick() {
    let mut rng = seeded_rng();
    let mut s = playing_state(60);
    for _ in 0..(30 * 50) {
        s = tick(&s, 1.0 / 30.0, &mut rng).0;
        assert!(s.flowers.len() <= MAX_FLOWERS);
        assert!(s.birds.len() <= MAX_BIRDS);
        assert!(s.dark_birds.len() <= MAX_DARK_BIRDS);
    }
}

#[test]
fn nothing_spawns_before_play() {
    let mut rng = seeded_rng();
    let (mut s, _) = input(&init_state(60), InputEvent::Press(Button::Start));
    for _ in 0..2 {
        s = tick(&s, 1.0, &mut rng).0;
    }
    assert_eq!(total_entities(&s), 0);
}

#[test]
fn tick_does_not_mutate_original() {
    let mut rng = seeded_rng();
    let s = playing_state(60);
    let _ = tick(&s, 2.0, &mut rng);
    assert_eq!(s.round_timer.remaining(), 61);
    assert_eq!(total_entities(&s), 0);
}
