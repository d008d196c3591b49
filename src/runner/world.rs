//! The game world: owned components, the run phase, and the per-frame rules.

use rand::Rng;

use super::ground::Ground;
use super::input::InputEdge;
use super::obstacles::ObstacleField;
use super::player::Player;
use super::score::Score;

/// Logical board size; the canvas is this times the scale ratio.
pub const GAME_WIDTH: f64 = 800.0;
pub const GAME_HEIGHT: f64 = 200.0;
pub const GAME_SPEED_START: f64 = 1.0;
/// Speed gained per active ms. The ramp never stops.
pub const GAME_SPEED_INCREMENT: f64 = 0.00001;
/// Ground and cacti scroll this many logical px per ms at speed 1.
pub const BASE_SCROLL_SPEED: f64 = 0.5;
/// Restart gestures are ignored this long after a run ends, so the gesture
/// that ended the run cannot also restart it.
pub const RESTART_ARM_DELAY_MS: f64 = 1000.0;

/// Where a run currently stands. `GameOver` remembers when it happened so the
/// arming delay is plain timestamp arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunPhase {
    WaitingToStart,
    Active,
    GameOver { since_ms: f64 },
}

/// Owns one of each component. Pure simulation: all randomness comes through
/// the caller's `Rng`, all timing through the caller's timestamps, so whole
/// runs replay deterministically in tests.
pub struct World {
    phase: RunPhase,
    speed: f64,
    scale: f64,
    canvas_width: f64,
    canvas_height: f64,
    pub player: Player,
    pub ground: Ground,
    pub obstacles: ObstacleField,
    pub score: Score,
}

impl World {
    /// Builds a world at the given scale with the persisted best score.
    pub fn new(scale: f64, best_score: u32, rng: &mut impl Rng) -> Self {
        let canvas_width = GAME_WIDTH * scale;
        let canvas_height = GAME_HEIGHT * scale;
        World {
            phase: RunPhase::WaitingToStart,
            speed: GAME_SPEED_START,
            scale,
            canvas_width,
            canvas_height,
            player: Player::new(scale, canvas_height),
            ground: Ground::new(scale, canvas_height),
            obstacles: ObstacleField::new(scale, canvas_width, canvas_height, rng),
            score: Score::new(best_score),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Applies one queued input edge against the current phase.
    pub fn apply_edge(&mut self, edge: InputEdge, now_ms: f64, rng: &mut impl Rng) {
        match (self.phase, edge) {
            (RunPhase::WaitingToStart, InputEdge::PointerDown | InputEdge::TouchStart) => {
                log::info!("run started");
                self.phase = RunPhase::Active;
            }
            (RunPhase::Active, InputEdge::KeyDown | InputEdge::PointerDown) => {
                self.player.press_jump();
            }
            (RunPhase::Active, InputEdge::KeyUp | InputEdge::PointerUp) => {
                self.player.release_jump();
            }
            (
                RunPhase::GameOver { since_ms },
                InputEdge::KeyUp | InputEdge::PointerDown | InputEdge::TouchStart,
            ) if now_ms - since_ms >= RESTART_ARM_DELAY_MS => {
                log::info!("restart");
                self.reset(rng);
            }
            _ => {}
        }
    }

    /// One simulation step. Outside the active phase this is a no-op. Returns
    /// the new record to persist when the run just ended on one.
    pub fn advance(&mut self, now_ms: f64, delta_ms: f64, rng: &mut impl Rng) -> Option<u32> {
        if self.phase != RunPhase::Active {
            return None;
        }
        self.ground.update(self.speed, delta_ms);
        self.obstacles.update(self.speed, delta_ms, rng);
        self.player.update(self.speed, delta_ms);
        self.score.update(delta_ms);
        self.speed += delta_ms * GAME_SPEED_INCREMENT;
        if self.obstacles.collides_with(&self.player.collision_box()) {
            self.phase = RunPhase::GameOver { since_ms: now_ms };
            let record = self.score.record_high_score();
            log::info!(
                "run over at {} points (best {})",
                self.score.points(),
                self.score.best()
            );
            return record;
        }
        None
    }

    /// Puts every component back to its starting state and begins a fresh
    /// run. The best score carries over.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.player.reset();
        self.ground.reset();
        self.obstacles.reset(rng);
        self.score.reset();
        self.speed = GAME_SPEED_START;
        self.phase = RunPhase::Active;
    }

    /// Rebuilds the sprite components at a new scale after a viewport change.
    /// The run phase, speed, and best score carry over.
    pub fn rescale(&mut self, scale: f64, rng: &mut impl Rng) {
        self.scale = scale;
        self.canvas_width = GAME_WIDTH * scale;
        self.canvas_height = GAME_HEIGHT * scale;
        self.player = Player::new(scale, self.canvas_height);
        self.ground = Ground::new(scale, self.canvas_height);
        self.obstacles = ObstacleField::new(scale, self.canvas_width, self.canvas_height, rng);
        self.score = Score::new(self.score.best());
    }
}
