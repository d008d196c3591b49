//! The runner sprite: jump physics, run animation, collision box.

use web_sys::CanvasRenderingContext2d;

use super::rect::Rect;
use super::sprites::{draw_sprite, Sprites};

pub const PLAYER_WIDTH: f64 = 88.0 / 1.5;
pub const PLAYER_HEIGHT: f64 = 94.0 / 1.5;
pub const PLAYER_X: f64 = 10.0;
/// Gap between the sprite's feet and the canvas bottom while grounded.
pub const STAND_CLEARANCE: f64 = 1.5;
/// Jump heights measured up from the canvas bottom, in logical px.
pub const MIN_JUMP_HEIGHT: f64 = 150.0;
pub const MAX_JUMP_HEIGHT: f64 = super::world::GAME_HEIGHT;
/// Downward acceleration in logical px per ms².
pub const GRAVITY: f64 = 0.0045;
/// Run-cycle flip interval in speed-scaled ms.
pub const RUN_FRAME_INTERVAL_MS: f64 = 200.0;
pub const RUN_FRAME_COUNT: usize = 2;
/// Fraction of the sprite trimmed from each side for the collision box, so
/// grazing a cactus is forgiven.
pub const HITBOX_INSET: f64 = 1.0 / 5.0;

#[derive(Debug)]
pub struct Player {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    standing_y: f64,
    /// Sprite top at the lowest point a held jump may be cut.
    min_jump_y: f64,
    /// Sprite top at the highest allowed apex.
    ceiling_y: f64,
    /// Vertical velocity in px/ms, positive down.
    vy: f64,
    airborne: bool,
    jump_held: bool,
    gravity: f64,
    launch_speed: f64,
    frame_index: usize,
    frame_timer_ms: f64,
}

impl Player {
    pub fn new(scale: f64, canvas_height: f64) -> Self {
        let width = PLAYER_WIDTH * scale;
        let height = PLAYER_HEIGHT * scale;
        let standing_y = canvas_height - height - STAND_CLEARANCE * scale;
        let min_jump_y = canvas_height - MIN_JUMP_HEIGHT * scale;
        let ceiling_y = (canvas_height - MAX_JUMP_HEIGHT * scale).max(0.0);
        let gravity = GRAVITY * scale;
        // Launch speed sized so an uninterrupted ascent peaks exactly at the
        // ceiling.
        let launch_speed = (2.0 * gravity * (standing_y - ceiling_y)).sqrt();
        Player {
            x: PLAYER_X * scale,
            y: standing_y,
            width,
            height,
            standing_y,
            min_jump_y,
            ceiling_y,
            vy: 0.0,
            airborne: false,
            jump_held: false,
            gravity,
            launch_speed,
            frame_index: 0,
            frame_timer_ms: RUN_FRAME_INTERVAL_MS,
        }
    }

    /// Launches a jump if grounded; records the held input either way.
    pub fn press_jump(&mut self) {
        self.jump_held = true;
        if !self.airborne {
            self.airborne = true;
            self.vy = -self.launch_speed;
        }
    }

    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    pub fn update(&mut self, speed: f64, delta_ms: f64) {
        self.advance_run_animation(speed, delta_ms);
        if !self.airborne {
            return;
        }
        // Releasing the jump above the min-jump line cuts the ascent short,
        // giving tap jumps a lower arc than held ones.
        if self.vy < 0.0 && !self.jump_held && self.y <= self.min_jump_y {
            self.vy = 0.0;
        }
        self.vy += self.gravity * delta_ms;
        self.y += self.vy * delta_ms;
        if self.y < self.ceiling_y {
            self.y = self.ceiling_y;
            self.vy = self.vy.max(0.0);
        }
        if self.y >= self.standing_y {
            self.y = self.standing_y;
            self.vy = 0.0;
            self.airborne = false;
        }
    }

    fn advance_run_animation(&mut self, speed: f64, delta_ms: f64) {
        if self.airborne {
            return;
        }
        self.frame_timer_ms -= delta_ms * speed;
        if self.frame_timer_ms <= 0.0 {
            self.frame_index = (self.frame_index + 1) % RUN_FRAME_COUNT;
            self.frame_timer_ms = RUN_FRAME_INTERVAL_MS;
        }
    }

    pub fn collision_box(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
            .inset(self.width * HITBOX_INSET, self.height * HITBOX_INSET)
    }

    pub fn draw(&self, ctx: &CanvasRenderingContext2d, sprites: &Sprites) {
        let image = if self.airborne {
            &sprites.player_jump
        } else {
            &sprites.player_run[self.frame_index]
        };
        draw_sprite(ctx, image, self.x, self.y, self.width, self.height);
    }

    pub fn reset(&mut self) {
        self.y = self.standing_y;
        self.vy = 0.0;
        self.airborne = false;
        self.jump_held = false;
        self.frame_index = 0;
        self.frame_timer_ms = RUN_FRAME_INTERVAL_MS;
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn standing_y(&self) -> f64 {
        self.standing_y
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_animation_flips_every_interval() {
        let mut player = Player::new(1.0, 200.0);
        player.update(1.0, RUN_FRAME_INTERVAL_MS + 1.0);
        assert_eq!(player.frame_index, 1);
        player.update(1.0, RUN_FRAME_INTERVAL_MS + 1.0);
        assert_eq!(player.frame_index, 0);
    }

    #[test]
    fn run_animation_speeds_up_with_game_speed() {
        let mut player = Player::new(1.0, 200.0);
        // Half the interval at double speed flips the frame.
        player.update(2.0, RUN_FRAME_INTERVAL_MS / 2.0);
        assert_eq!(player.frame_index, 1);
    }

    #[test]
    fn animation_freezes_while_airborne() {
        let mut player = Player::new(1.0, 200.0);
        player.press_jump();
        player.update(1.0, RUN_FRAME_INTERVAL_MS * 2.0);
        assert_eq!(player.frame_index, 0);
    }

    #[test]
    fn collision_box_is_inset_on_every_side() {
        let player = Player::new(1.0, 200.0);
        let hit = player.collision_box();
        let inset_x = player.width * HITBOX_INSET;
        let inset_y = player.height * HITBOX_INSET;
        assert!((hit.x - (player.x + inset_x)).abs() < 1e-9);
        assert!((hit.y - (player.y + inset_y)).abs() < 1e-9);
        assert!((hit.width - player.width * (1.0 - 2.0 * HITBOX_INSET)).abs() < 1e-9);
        assert!((hit.height - player.height * (1.0 - 2.0 * HITBOX_INSET)).abs() < 1e-9);
    }

    #[test]
    fn second_press_while_airborne_does_not_relaunch() {
        let mut player = Player::new(1.0, 200.0);
        player.press_jump();
        player.update(1.0, 16.0);
        let vy_before = player.vy;
        player.press_jump();
        assert!((player.vy - vy_before).abs() < 1e-12, "mid-air press must not reset velocity");
    }

    #[test]
    fn reset_puts_the_player_back_on_the_ground() {
        let mut player = Player::new(1.0, 200.0);
        player.press_jump();
        player.update(1.0, 50.0);
        assert!(player.is_airborne());
        player.reset();
        assert!(!player.is_airborne());
        assert!((player.y() - player.standing_y()).abs() < 1e-12);
        assert_eq!(player.frame_index, 0);
    }
}
