//! Cactus Dash core crate.
//!
//! A browser endless runner: the runner sprite jumps over scrolling cacti,
//! score accrues with survival time, and the best score is kept in
//! localStorage. `start_game()` is the single entrypoint; gameplay lives in
//! the [`runner`] module with the pure simulation kept separate from the DOM
//! glue so the logic tests run natively.

use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::world::{RunPhase, World};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    runner::start_runner_mode()
}
