//! Survival score and the persisted best.

use web_sys::CanvasRenderingContext2d;

use super::sprites::GAME_FONT;

/// One display point per this many ms survived.
pub const SCORE_MS_PER_POINT: f64 = 100.0;
pub const SCORE_FONT_PX: f64 = 20.0;
pub const SCORE_COLOR: &str = "#525250";

#[derive(Debug)]
pub struct Score {
    accumulated_ms: f64,
    best: u32,
    beat_best: bool,
}

impl Score {
    /// `best` is the persisted high score loaded by the caller.
    pub fn new(best: u32) -> Self {
        Score {
            accumulated_ms: 0.0,
            best,
            beat_best: false,
        }
    }

    /// Accrues active time and latches the beat-the-best flag the moment the
    /// display score passes the stored best.
    pub fn update(&mut self, delta_ms: f64) {
        self.accumulated_ms += delta_ms;
        if self.points() > self.best {
            self.beat_best = true;
        }
    }

    pub fn points(&self) -> u32 {
        (self.accumulated_ms / SCORE_MS_PER_POINT) as u32
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn beat_best(&self) -> bool {
        self.beat_best
    }

    /// Called once on game-over. Updates the stored best and returns the new
    /// record for persistence, if this run set one.
    pub fn record_high_score(&mut self) -> Option<u32> {
        let points = self.points();
        if points > self.best {
            self.best = points;
            Some(points)
        } else {
            None
        }
    }

    /// Zeroes the current run. The best is kept.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
        self.beat_best = false;
    }

    /// Current score right-aligned, zero-padded to six digits; once this run
    /// beats the stored best, an `HI` readout tracks the record live.
    pub fn draw(&self, ctx: &CanvasRenderingContext2d, canvas_width: f64, scale: f64) {
        ctx.set_font(&format!("{}px '{}'", SCORE_FONT_PX * scale, GAME_FONT));
        ctx.set_fill_style_str(SCORE_COLOR);
        ctx.set_text_align("right");
        ctx.set_text_baseline("top");
        let margin = 10.0 * scale;
        let y = 10.0 * scale;
        ctx.fill_text(&format!("{:06}", self.points()), canvas_width - margin, y)
            .ok();
        if self.beat_best {
            let record = self.points().max(self.best);
            ctx.fill_text(
                &format!("HI {record:06}"),
                canvas_width - margin - 125.0 * scale,
                y,
            )
            .ok();
        }
    }
}
