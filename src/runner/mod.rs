//! DOM glue for the runner: canvas, listeners, the frame loop, rendering.
//!
//! Everything here funnels into the pure [`world::World`] simulation. DOM
//! events only push [`input::InputEdge`] values onto a queue; the frame
//! callback drains the queue, steps the world, persists a new best score if
//! the run just ended on one, and redraws.

pub mod ground;
pub mod input;
pub mod obstacles;
pub mod player;
pub mod rect;
pub mod score;
pub mod sprites;
pub mod storage;
pub mod world;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use input::{InputEdge, InputQueue};
use sprites::{Sprites, GAME_FONT};
use world::{RunPhase, World, GAME_HEIGHT, GAME_WIDTH};

const CANVAS_ID: &str = "game";
const JUMP_KEY: &str = "Space";

struct RunnerApp {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    world: World,
    sprites: Sprites,
    rng: StdRng,
    input: InputQueue,
    previous_time: Option<f64>,
}

type FrameCallback = Closure<dyn FnMut(f64)>;

thread_local! {
    static APP: RefCell<Option<RunnerApp>> = RefCell::new(None);
    static LOOP_RUNNING: Cell<bool> = Cell::new(false);
}

/// Builds the canvas and world, wires the listeners, and starts the loop.
pub fn start_runner_mode() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = ensure_canvas(&document)?;
    let scale = scale_ratio(&window);
    size_canvas(&canvas, scale);
    let ctx = context_2d(&canvas)?;

    let mut rng = StdRng::from_entropy();
    let best = storage::load_best();
    let world = World::new(scale, best, &mut rng);
    let sprites = Sprites::load()?;

    install_input_listeners(&document, &canvas)?;
    install_resize_listeners(&window)?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(RunnerApp {
            canvas,
            ctx,
            world,
            sprites,
            rng,
            input: InputQueue::new(),
            previous_time: None,
        });
    });

    log::info!("cactus dash ready (scale {scale:.2}, best {best})");

    // Two start requests: one waits on the display font so the first frames
    // use the real face, one fires right away in case the font never
    // resolves. The starter is idempotent, so only one loop ever runs.
    start_after_fonts(&document);
    start_frame_loop()?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Canvas and viewport
// -----------------------------------------------------------------------------

/// Reuses an existing `#game` canvas or creates one under `<body>`.
fn ensure_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(existing) = document.get_element_by_id(CANVAS_ID) {
        return existing
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("#game exists but is not a canvas"));
    }
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("canvas creation returned a non-canvas"))?;
    canvas.set_id(CANVAS_ID);
    canvas.set_attribute("style", "display:block;margin:0 auto;touch-action:none;")?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&canvas)?;
    Ok(canvas)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has unexpected type"))
}

/// Fit-to-smaller-dimension scale for the logical 800x200 board.
fn scale_ratio(window: &Window) -> f64 {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(GAME_WIDTH);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(GAME_HEIGHT);
    (width / GAME_WIDTH).min(height / GAME_HEIGHT)
}

fn size_canvas(canvas: &HtmlCanvasElement, scale: f64) {
    canvas.set_width((GAME_WIDTH * scale) as u32);
    canvas.set_height((GAME_HEIGHT * scale) as u32);
}

// -----------------------------------------------------------------------------
// Listeners
// -----------------------------------------------------------------------------

fn install_input_listeners(
    document: &Document,
    canvas: &HtmlCanvasElement,
) -> Result<(), JsValue> {
    let keydown = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if evt.code() == JUMP_KEY {
            evt.prevent_default();
            push_edge(InputEdge::KeyDown);
        }
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();

    let keyup = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if evt.code() == JUMP_KEY {
            push_edge(InputEdge::KeyUp);
        }
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
    keyup.forget();

    let mousedown = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        push_edge(InputEdge::PointerDown);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
    mousedown.forget();

    let mouseup = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        push_edge(InputEdge::PointerUp);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
    mouseup.forget();

    // The default stays untouched: a tap's synthetic mousedown is the jump
    // press on touch screens.
    let touchstart = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        push_edge(InputEdge::TouchStart);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref())?;
    touchstart.forget();

    Ok(())
}

fn push_edge(edge: InputEdge) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.input.push(edge);
        }
    });
}

fn install_resize_listeners(window: &Window) -> Result<(), JsValue> {
    let on_change = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        rescale_to_viewport();
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("resize", on_change.as_ref().unchecked_ref())?;
    if let Ok(screen) = window.screen() {
        screen
            .orientation()
            .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    }
    on_change.forget();
    Ok(())
}

fn rescale_to_viewport() {
    if let Some(window) = web_sys::window() {
        let scale = scale_ratio(&window);
        APP.with(|cell| {
            let mut borrow = cell.borrow_mut();
            if let Some(app) = borrow.as_mut() {
                size_canvas(&app.canvas, scale);
                let RunnerApp { world, rng, .. } = &mut *app;
                world.rescale(scale, rng);
                log::debug!("rescaled to {scale:.2}");
            }
        });
    }
}

// -----------------------------------------------------------------------------
// Frame loop
// -----------------------------------------------------------------------------

/// Starts the loop once the display font is usable, so the overlays and score
/// never flash a fallback face.
fn start_after_fonts(document: &Document) {
    let promise = document.fonts().load(&format!("16px '{GAME_FONT}'"));
    spawn_local(async move {
        JsFuture::from(promise).await.ok();
        log::debug!("display font ready");
        start_frame_loop().ok();
    });
}

/// Registers the self-rescheduling frame callback. Idempotent: a second call
/// while a loop is running does nothing.
fn start_frame_loop() -> Result<(), JsValue> {
    if LOOP_RUNNING.with(|flag| flag.get()) {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let handle = callback.clone();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        frame(timestamp);
        if let Some(window) = web_sys::window() {
            if let Some(cb) = handle.borrow().as_ref() {
                window
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .ok();
            }
        }
    }) as Box<dyn FnMut(f64)>));
    {
        let borrow = callback.borrow();
        let cb = borrow
            .as_ref()
            .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    LOOP_RUNNING.with(|flag| flag.set(true));
    Ok(())
}

fn frame(now_ms: f64) {
    APP.with(|cell| {
        let mut borrow = cell.borrow_mut();
        if let Some(app) = borrow.as_mut() {
            // The first callback only records its timestamp; physics wants a
            // real delta.
            let previous = app.previous_time.replace(now_ms);
            let delta_ms = match previous {
                Some(previous) => now_ms - previous,
                None => return,
            };
            let RunnerApp { world, rng, input, .. } = &mut *app;
            for edge in input.drain() {
                world.apply_edge(edge, now_ms, rng);
            }
            if let Some(best) = world.advance(now_ms, delta_ms, rng) {
                storage::store_best(best);
            }
            render(app);
        }
    });
}

// -----------------------------------------------------------------------------
// Rendering
// -----------------------------------------------------------------------------

fn render(app: &RunnerApp) {
    let ctx = &app.ctx;
    let world = &app.world;
    let width = world.canvas_width();
    let height = world.canvas_height();
    // White wash, then back-to-front sprites.
    ctx.set_fill_style_str("white");
    ctx.fill_rect(0.0, 0.0, width, height);
    world.ground.draw(ctx, &app.sprites);
    world.obstacles.draw(ctx, &app.sprites);
    world.player.draw(ctx, &app.sprites);
    world.score.draw(ctx, width, world.scale());
    match world.phase() {
        RunPhase::WaitingToStart => draw_start_prompt(ctx, width, height, world.scale()),
        RunPhase::GameOver { .. } => draw_game_over(ctx, width, height, world.scale()),
        RunPhase::Active => {}
    }
}

fn draw_game_over(ctx: &CanvasRenderingContext2d, width: f64, height: f64, scale: f64) {
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str("#525250");
    ctx.set_font(&format!("{}px '{}'", 70.0 * scale, GAME_FONT));
    ctx.fill_text("GAME OVER", width / 2.0, height / 2.0).ok();
    ctx.set_font(&format!("{}px '{}'", 16.0 * scale, GAME_FONT));
    ctx.fill_text("Press to play again", width / 2.0, height / 2.0 + 50.0 * scale)
        .ok();
}

fn draw_start_prompt(ctx: &CanvasRenderingContext2d, width: f64, height: f64, scale: f64) {
    let font_px = 24.0 * scale;
    ctx.set_font(&format!("{font_px}px '{GAME_FONT}'"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let label = "Play";
    let text_width = ctx
        .measure_text(label)
        .map(|m| m.width())
        .unwrap_or(font_px * 2.0);
    let pad_x = 24.0 * scale;
    let pad_y = 14.0 * scale;
    let box_w = text_width + 2.0 * pad_x;
    let box_h = font_px + 2.0 * pad_y;
    let x = (width - box_w) / 2.0;
    let y = (height - box_h) / 2.0;
    fill_rounded_rect(ctx, x, y, box_w, box_h, 10.0 * scale);
    ctx.set_fill_style_str("white");
    ctx.fill_text(label, width / 2.0, y + box_h / 2.0).ok();
}

/// Rounded-rectangle button plate behind the start label.
fn fill_rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    ctx.set_fill_style_str("#33322f");
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.quadratic_curve_to(x + w, y, x + w, y + r);
    ctx.line_to(x + w, y + h - r);
    ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
    ctx.line_to(x + r, y + h);
    ctx.quadratic_curve_to(x, y + h, x, y + h - r);
    ctx.line_to(x, y + r);
    ctx.quadratic_curve_to(x, y, x + r, y);
    ctx.close_path();
    ctx.fill();
}
