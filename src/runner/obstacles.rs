//! Cactus field: spawning, scrolling, culling, and the collision query.

use rand::Rng;
use web_sys::CanvasRenderingContext2d;

use super::rect::Rect;
use super::sprites::{draw_sprite, Sprites};
use super::world::BASE_SCROLL_SPEED;

/// Cactus silhouettes in logical px, index-aligned with `sprites::CACTUS_PATHS`.
pub const CACTUS_SIZES: [(f64, f64); 3] = [
    (48.0 / 1.5, 100.0 / 1.5),
    (98.0 / 1.5, 100.0 / 1.5),
    (68.0 / 1.5, 70.0 / 1.5),
];
/// Spawn gap range in ms.
pub const SPAWN_GAP_MIN_MS: f64 = 500.0;
pub const SPAWN_GAP_MAX_MS: f64 = 2000.0;
/// Hard lower bound a sampled gap can never sink below, however the range
/// above is tuned.
pub const SPAWN_GAP_FLOOR_MS: f64 = 50.0;
/// New cacti enter this many canvas widths from the left edge, well past the
/// right edge.
pub const SPAWN_X_FACTOR: f64 = 1.5;

#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    /// Index into [`CACTUS_SIZES`].
    pub kind: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn hit_box(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    gap_left_ms: f64,
    canvas_width: f64,
    canvas_height: f64,
    scale: f64,
}

impl ObstacleField {
    pub fn new(scale: f64, canvas_width: f64, canvas_height: f64, rng: &mut impl Rng) -> Self {
        ObstacleField {
            obstacles: Vec::new(),
            gap_left_ms: sample_spawn_gap(rng),
            canvas_width,
            canvas_height,
            scale,
        }
    }

    /// Ticks the spawn timer, scrolls every cactus left, and drops the ones
    /// fully past the left edge. New cacti are appended at the fixed entry
    /// column, so the list stays sorted by ascending x.
    pub fn update(&mut self, speed: f64, delta_ms: f64, rng: &mut impl Rng) {
        self.gap_left_ms -= delta_ms;
        if self.gap_left_ms <= 0.0 {
            self.spawn(rng);
            self.gap_left_ms = sample_spawn_gap(rng);
        }
        let travelled = speed * delta_ms * BASE_SCROLL_SPEED * self.scale;
        for obstacle in &mut self.obstacles {
            obstacle.x -= travelled;
        }
        self.obstacles.retain(|o| o.x > -o.width);
    }

    fn spawn(&mut self, rng: &mut impl Rng) {
        let kind = rng.gen_range(0..CACTUS_SIZES.len());
        let (width, height) = CACTUS_SIZES[kind];
        let width = width * self.scale;
        let height = height * self.scale;
        self.obstacles.push(Obstacle {
            kind,
            x: self.canvas_width * SPAWN_X_FACTOR,
            y: self.canvas_height - height,
            width,
            height,
        });
    }

    /// True iff `target` strictly overlaps any cactus.
    pub fn collides_with(&self, target: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.hit_box().intersects(target))
    }

    pub fn draw(&self, ctx: &CanvasRenderingContext2d, sprites: &Sprites) {
        for obstacle in &self.obstacles {
            if let Some(image) = sprites.cacti.get(obstacle.kind) {
                draw_sprite(ctx, image, obstacle.x, obstacle.y, obstacle.width, obstacle.height);
            }
        }
    }

    /// Clears the field and re-arms the spawn timer.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.obstacles.clear();
        self.gap_left_ms = sample_spawn_gap(rng);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

/// Samples the next spawn gap from the configured range.
pub fn sample_spawn_gap(rng: &mut impl Rng) -> f64 {
    spawn_gap_within(rng, SPAWN_GAP_MIN_MS, SPAWN_GAP_MAX_MS)
}

/// Gap sampling that tolerates an inverted or non-positive range; the result
/// never sinks below [`SPAWN_GAP_FLOOR_MS`].
pub fn spawn_gap_within(rng: &mut impl Rng, min_ms: f64, max_ms: f64) -> f64 {
    let lo = min_ms.min(max_ms).max(SPAWN_GAP_FLOOR_MS);
    let hi = max_ms.max(lo);
    rng.gen_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn field_with(obstacles: Vec<Obstacle>) -> ObstacleField {
        let mut rng = seeded_rng();
        let mut field = ObstacleField::new(1.0, 800.0, 200.0, &mut rng);
        field.obstacles = obstacles;
        field
    }

    fn cactus_at(x: f64, width: f64) -> Obstacle {
        Obstacle { kind: 0, x, y: 0.0, width, height: 200.0 }
    }

    #[test]
    fn overlapping_obstacle_collides() {
        let field = field_with(vec![cactus_at(100.0, 40.0)]);
        let player_box = Rect::new(120.0, 0.0, 10.0, 200.0);
        assert!(field.collides_with(&player_box));
    }

    #[test]
    fn obstacle_short_of_the_player_does_not_collide() {
        // Right edge at 90 never reaches a box starting at 120.
        let field = field_with(vec![cactus_at(50.0, 40.0)]);
        let player_box = Rect::new(120.0, 0.0, 10.0, 200.0);
        assert!(!field.collides_with(&player_box));
    }

    #[test]
    fn touching_right_edge_does_not_collide() {
        let field = field_with(vec![cactus_at(80.0, 40.0)]);
        let player_box = Rect::new(120.0, 0.0, 10.0, 200.0);
        assert!(!field.collides_with(&player_box), "zero-width contact is not a hit");
    }

    #[test]
    fn obstacles_past_the_left_edge_are_dropped() {
        let mut rng = seeded_rng();
        let mut field = field_with(vec![cactus_at(5.0, 40.0)]);
        // Keep the spawn timer quiet while the cactus walks out.
        field.gap_left_ms = f64::MAX;
        for _ in 0..20 {
            field.update(1.0, 16.0, &mut rng);
            for o in field.obstacles() {
                assert!(o.x + o.width > 0.0, "right edge {} fell past the origin", o.x + o.width);
            }
        }
        assert!(field.obstacles().is_empty(), "off-screen cactus must be culled");
    }

    #[test]
    fn spawn_gaps_stay_in_the_configured_range() {
        let mut rng = seeded_rng();
        for _ in 0..1000 {
            let gap = sample_spawn_gap(&mut rng);
            assert!((SPAWN_GAP_MIN_MS..=SPAWN_GAP_MAX_MS).contains(&gap), "gap {gap} out of range");
        }
    }

    #[test]
    fn misconfigured_gap_ranges_are_clamped_positive() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let gap = spawn_gap_within(&mut rng, -250.0, 0.0);
            assert!(gap >= SPAWN_GAP_FLOOR_MS, "gap {gap} under the floor");
        }
        for _ in 0..100 {
            let inverted = spawn_gap_within(&mut rng, 2000.0, 500.0);
            assert!((500.0..=2000.0).contains(&inverted), "inverted range mishandled: {inverted}");
        }
    }

    #[test]
    fn spawned_kinds_come_from_the_size_table() {
        let mut rng = seeded_rng();
        let mut field = ObstacleField::new(1.0, 800.0, 200.0, &mut rng);
        // Force a chain of immediate spawns.
        for _ in 0..50 {
            field.gap_left_ms = 0.0;
            field.update(1.0, 1.0, &mut rng);
        }
        assert!(!field.obstacles().is_empty());
        for o in field.obstacles() {
            assert!(o.kind < CACTUS_SIZES.len());
            let (w, h) = CACTUS_SIZES[o.kind];
            assert!((o.width - w).abs() < 1e-9 && (o.height - h).abs() < 1e-9);
        }
    }

    #[test]
    fn reset_clears_the_field() {
        let mut rng = seeded_rng();
        let mut field = field_with(vec![cactus_at(100.0, 40.0), cactus_at(400.0, 40.0)]);
        field.reset(&mut rng);
        assert!(field.obstacles().is_empty());
        assert!(field.gap_left_ms >= SPAWN_GAP_FLOOR_MS);
    }
}
