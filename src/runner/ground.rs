//! Endlessly scrolling ground strip.

use web_sys::CanvasRenderingContext2d;

use super::sprites::{draw_sprite, Sprites};
use super::world::BASE_SCROLL_SPEED;

pub const GROUND_WIDTH: f64 = 2400.0;
pub const GROUND_HEIGHT: f64 = 24.0;

#[derive(Debug)]
pub struct Ground {
    offset: f64,
    tile_width: f64,
    height: f64,
    y: f64,
    scale: f64,
}

impl Ground {
    pub fn new(scale: f64, canvas_height: f64) -> Self {
        let height = GROUND_HEIGHT * scale;
        Ground {
            offset: 0.0,
            tile_width: GROUND_WIDTH * scale,
            height,
            y: canvas_height - height,
            scale,
        }
    }

    /// Scrolls left. The offset stays within `[0, tile_width)` so the strip
    /// repeats seamlessly no matter how large a delta arrives.
    pub fn update(&mut self, speed: f64, delta_ms: f64) {
        let travelled = speed * delta_ms * BASE_SCROLL_SPEED * self.scale;
        self.offset = (self.offset + travelled).rem_euclid(self.tile_width);
    }

    /// Two copies of the tile cover the canvas at every offset.
    pub fn draw(&self, ctx: &CanvasRenderingContext2d, sprites: &Sprites) {
        draw_sprite(ctx, &sprites.ground, -self.offset, self.y, self.tile_width, self.height);
        draw_sprite(
            ctx,
            &sprites.ground,
            self.tile_width - self.offset,
            self.y,
            self.tile_width,
            self.height,
        );
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_wraps_within_one_tile() {
        let mut ground = Ground::new(1.0, 200.0);
        for _ in 0..10_000 {
            ground.update(3.0, 16.0);
            assert!(
                ground.offset() >= 0.0 && ground.offset() < ground.tile_width(),
                "offset {} escaped [0, {})",
                ground.offset(),
                ground.tile_width()
            );
        }
    }

    #[test]
    fn a_delta_longer_than_a_tile_still_wraps() {
        let mut ground = Ground::new(1.0, 200.0);
        // One update travelling several tile widths.
        ground.update(1.0, GROUND_WIDTH * 7.0);
        assert!(ground.offset() >= 0.0 && ground.offset() < ground.tile_width());
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut ground = Ground::new(1.0, 200.0);
        ground.update(1.0, 500.0);
        assert!(ground.offset() > 0.0);
        ground.reset();
        assert_eq!(ground.offset(), 0.0);
    }
}
