// Browser smoke tests, run with `wasm-pack test --headless --chrome`.
// They stick to the pure simulation types so no canvas or DOM setup is
// needed; the point is that the world ticks the same inside the wasm sandbox
// as it does natively.
#![cfg(target_arch = "wasm32")]

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

use cactus_dash::runner::input::InputEdge;
use cactus_dash::runner::world::GAME_SPEED_START;
use cactus_dash::{RunPhase, World};

wasm_bindgen_test_configure!(run_in_browser);

// A seeded world starts on a tap and ramps speed frame over frame.
#[wasm_bindgen_test]
fn a_tap_starts_the_run_and_speed_ramps() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut world = World::new(1.0, 0, &mut rng);
    assert_eq!(world.phase(), RunPhase::WaitingToStart);

    world.apply_edge(InputEdge::TouchStart, 0.0, &mut rng);
    assert_eq!(world.phase(), RunPhase::Active);

    let mut now = 0.0;
    for _ in 0..10 {
        now += 16.0;
        world.advance(now, 16.0, &mut rng);
    }
    assert!(world.speed() > GAME_SPEED_START);
    assert_eq!(world.score.points(), 1, "160 ms of survival is one point");
}

// Key edges reach the player: a press launches, a release cuts, and the
// player still lands on its own.
#[wasm_bindgen_test]
fn key_edges_drive_the_jump() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut world = World::new(1.0, 0, &mut rng);
    world.apply_edge(InputEdge::PointerDown, 0.0, &mut rng);

    world.apply_edge(InputEdge::KeyDown, 0.0, &mut rng);
    assert!(world.player.is_airborne());

    let mut now = 0.0;
    for _ in 0..4 {
        now += 16.0;
        world.advance(now, 16.0, &mut rng);
    }
    world.apply_edge(InputEdge::KeyUp, now, &mut rng);
    assert!(world.player.is_airborne());

    for _ in 0..200 {
        now += 16.0;
        world.advance(now, 16.0, &mut rng);
        if !world.player.is_airborne() {
            break;
        }
    }
    assert!(!world.player.is_airborne(), "a cut jump must land by itself");
    assert_eq!(world.player.y(), world.player.standing_y());
}
