//! High-score persistence in localStorage.

use web_sys::Storage;

pub const HIGH_SCORE_KEY: &str = "cactus-dash.high-score";

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
}

/// Reads the persisted best score; absent or unparseable values count as 0.
pub fn load_best() -> u32 {
    local_storage()
        .and_then(|storage| storage.get_item(HIGH_SCORE_KEY).ok())
        .flatten()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}

/// Writes the new best as decimal text. Storage being unavailable (private
/// browsing, quota) only costs persistence, never the run.
pub fn store_best(best: u32) {
    match local_storage() {
        Some(storage) => {
            if storage.set_item(HIGH_SCORE_KEY, &best.to_string()).is_err() {
                log::warn!("failed to persist high score {best}");
            }
        }
        None => log::warn!("localStorage unavailable, high score not persisted"),
    }
}
