//! Sprite images and the guarded draw helper.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Display font for score and overlay text.
pub const GAME_FONT: &str = "Etude Noire";

pub const PLAYER_RUN_PATHS: [&str; 2] = ["images/player_run1.png", "images/player_run2.png"];
pub const PLAYER_JUMP_PATH: &str = "images/player_jump.png";
pub const GROUND_PATH: &str = "images/ground.png";
/// Index-aligned with `obstacles::CACTUS_SIZES`.
pub const CACTUS_PATHS: [&str; 3] = [
    "images/cactus_1.png",
    "images/cactus_2.png",
    "images/cactus_3.png",
];

pub struct Sprites {
    pub player_run: [HtmlImageElement; 2],
    pub player_jump: HtmlImageElement,
    pub ground: HtmlImageElement,
    pub cacti: Vec<HtmlImageElement>,
}

impl Sprites {
    /// Kicks off loading for every sprite. Images finish in the background;
    /// draws before completion are skipped.
    pub fn load() -> Result<Self, JsValue> {
        let cacti = CACTUS_PATHS
            .iter()
            .map(|path| load_image(path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sprites {
            player_run: [
                load_image(PLAYER_RUN_PATHS[0])?,
                load_image(PLAYER_RUN_PATHS[1])?,
            ],
            player_jump: load_image(PLAYER_JUMP_PATH)?,
            ground: load_image(GROUND_PATH)?,
            cacti,
        })
    }
}

fn load_image(path: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(path);
    Ok(image)
}

/// Draws `image` scaled into the given box. Images that have not finished
/// loading are skipped for this frame.
pub fn draw_sprite(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) {
    if !image.complete() {
        return;
    }
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
        .ok();
}
