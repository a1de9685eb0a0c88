/// Population management: periodic spawning against fixed caps with
/// oldest-first eviction.

use rand::Rng;

use crate::constants::{
    BACKGROUND_WIDTH, BIRD_BAND, DARK_BIRD_BAND, FLOWER_BAND, MAX_BIRDS, MAX_DARK_BIRDS,
    MAX_FLOWERS, SPAWN_MARGIN, VIEW_WIDTH,
};
use crate::entities::{Direction, Entity, GameState, Kind, Point, SizeClass};

pub fn cap_for(kind: Kind) -> usize {
    match kind {
        Kind::Flower => MAX_FLOWERS,
        Kind::Bird => MAX_BIRDS,
        Kind::DarkBird => MAX_DARK_BIRDS,
    }
}

fn band_for(kind: Kind) -> (f32, f32) {
    match kind {
        Kind::Flower => FLOWER_BAND,
        Kind::Bird => BIRD_BAND,
        Kind::DarkBird => DARK_BIRD_BAND,
    }
}

/// Build a fresh entity of `kind` at a random spot suited to it.
///
/// Birds enter from just beyond the view edge opposite their flight
/// direction; flowers are planted anywhere on the background.
pub fn make_entity(
    id: u64,
    kind: Kind,
    scroll_offset: f32,
    rng: &mut impl Rng,
) -> Entity {
    let size = if rng.gen_bool(0.35) {
        SizeClass::Small
    } else {
        SizeClass::Normal
    };
    let direction = if rng.gen_bool(0.5) {
        Direction::Left
    } else {
        Direction::Right
    };
    let (lo, hi) = band_for(kind);
    let y = rng.gen_range(lo..=hi);

    let x = match kind {
        Kind::Flower => {
            let bg_left = -scroll_offset;
            rng.gen_range(bg_left..bg_left + BACKGROUND_WIDTH)
        }
        Kind::Bird | Kind::DarkBird => {
            let margin = SPAWN_MARGIN * size.scale();
            match direction {
                Direction::Right => -margin,
                Direction::Left => VIEW_WIDTH + margin,
            }
        }
    };

    Entity::new(id, kind, size, Point::new(x, y), direction)
}

/// Drop the oldest members until `entities` fits `cap`.
/// Returns the evicted ids, oldest first.
pub fn evict_oldest(entities: &mut Vec<Entity>, cap: usize) -> Vec<u64> {
    let mut evicted = Vec::new();
    while entities.len() > cap {
        let Some(oldest) = entities
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| e.id)
            .map(|(i, _)| i)
        else {
            break;
        };
        evicted.push(entities.remove(oldest).id);
    }
    evicted
}

/// Append a new entity of `kind` and enforce its cap.
/// Returns the spawned id and any evicted ids.
pub fn spawn(state: &mut GameState, kind: Kind, rng: &mut impl Rng) -> (u64, Vec<u64>) {
    let id = state.next_id;
    state.next_id += 1;
    let entity = make_entity(id, kind, state.scroll_offset, rng);
    let collection = state.collection_mut(kind);
    collection.push(entity);
    let evicted = evict_oldest(collection, cap_for(kind));
    (id, evicted)
}
