/// Per-entity behaviour: motion, hit-testing, culling and scoring.

use crate::constants::{
    BACKGROUND_WIDTH, BIRD_SPEED, CULL_MARGIN, FALL_DURATION, FALL_SPEED, FALL_TURNS_PER_SECOND,
};
use crate::entities::{Direction, Entity, Falling, Kind, Point, SizeClass};

/// Points awarded (or taken) for hitting an entity.
pub fn score_for(kind: Kind, size: SizeClass) -> i64 {
    match (kind, size) {
        (Kind::Bird, SizeClass::Normal) => 10,
        (Kind::Bird, SizeClass::Small) => 25,
        (Kind::DarkBird, SizeClass::Normal) => -10,
        (Kind::DarkBird, SizeClass::Small) => -25,
        (Kind::Flower, SizeClass::Normal) => 10,
        (Kind::Flower, SizeClass::Small) => 25,
    }
}

impl Entity {
    pub fn new(id: u64, kind: Kind, size: SizeClass, pos: Point, direction: Direction) -> Self {
        Entity {
            id,
            kind,
            size,
            pos,
            scale: size.scale(),
            alive: true,
            direction,
            falling: None,
        }
    }

    /// Own horizontal speed in world units per second, ignoring the scroll.
    /// Flowers never move under their own power.
    pub fn flight_velocity(&self) -> f32 {
        match self.kind {
            Kind::Flower => 0.0,
            Kind::Bird | Kind::DarkBird => self.direction.sign() * BIRD_SPEED,
        }
    }

    /// Advance by `dt` seconds. `background_dx` is how far the background
    /// moved across the screen during this step; everything follows it.
    pub fn update(&mut self, dt: f32, background_dx: f32) {
        self.pos.x += background_dx;
        match self.falling.as_mut() {
            Some(fall) => {
                fall.elapsed += dt;
                fall.rotation += FALL_TURNS_PER_SECOND * dt;
                self.pos.y += FALL_SPEED * dt;
            }
            None => {
                self.pos.x += self.flight_velocity() * dt;
            }
        }
    }

    /// Half extents of the hit window.
    pub fn hit_extents(&self) -> (f32, f32) {
        let (w, h) = self.kind.sprite_size();
        let (fx, fy) = self.size.hit_fraction();
        (w * self.scale * fx, h * self.scale * fy)
    }

    pub fn contains(&self, point: Point) -> bool {
        let (hw, hh) = self.hit_extents();
        (point.x - self.pos.x).abs() <= hw && (point.y - self.pos.y).abs() <= hh
    }

    /// Test a shot at `point`. Returns true only for the shot that kills the
    /// entity; dead entities never register again.
    pub fn check_hit(&mut self, point: Point) -> bool {
        if !self.alive || !self.contains(point) {
            return false;
        }
        self.alive = false;
        self.falling = Some(Falling {
            elapsed: 0.0,
            rotation: 0.0,
        });
        true
    }

    pub fn points(&self) -> i64 {
        score_for(self.kind, self.size)
    }

    /// The death sequence has played out.
    pub fn is_finished(&self) -> bool {
        self.falling
            .map(|fall| fall.elapsed >= FALL_DURATION)
            .unwrap_or(false)
    }

    /// Outside the background span (plus a scale-dependent margin) given the
    /// view's current offset into the background.
    pub fn is_off_field(&self, scroll_offset: f32) -> bool {
        let margin = CULL_MARGIN * self.scale;
        let left = -scroll_offset - margin;
        let right = -scroll_offset + BACKGROUND_WIDTH + margin;
        self.pos.x < left || self.pos.x > right
    }
}
