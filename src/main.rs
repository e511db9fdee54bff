//! Voidfall headless demo
//!
//! Drives one scripted session against the sim exactly the way a host scene
//! would: resolved steering input in, wall-clock ticks, and synthesized
//! solver contact events for the collisions a real physics pass would
//! report. Useful for eyeballing the event stream with RUST_LOG=debug.

use glam::Vec2;

use voidfall::sim::{Contact, EntityKind, GamePhase, GameState};
use voidfall::vec2::Size;
use voidfall::{MusicControl, Tuning};

const FRAME: f64 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let mut music = MusicControl::default();
    music.start();

    let scene = Size::new(480.0, 320.0);
    let mut game = GameState::new(scene, 0xC0FFEE, Tuning::default(), music);
    let mut now = 0.0;

    // Steer toward the top-right corner for a second of wall time; coins
    // spawn along the off-screen perimeter while we fly
    game.begin_steering(Vec2::new(480.0, 320.0));
    for _ in 0..60 {
        game.update(now);
        now += FRAME;
    }
    game.end_steering();

    // A real solver would report the ship overlapping a coin; synthesize it
    let first_coin = game
        .world
        .iter()
        .find(|e| matches!(e.kind, EntityKind::Coin(_)))
        .map(|e| e.id);
    if let Some(coin) = first_coin {
        game.contact_began(&Contact::between(game.player, coin));
    }
    log::info!("score after collecting: {}", game.score());

    // Drift into the first black hole and ride the session out
    game.contact_began(&Contact::between(game.black_holes[0], game.player));
    while game.phase != GamePhase::GameOver {
        game.update(now);
        now += FRAME;
    }

    for event in game.world.events.drain(..) {
        log::info!("event: {event:?}");
    }
    log::info!(
        "session over after {:.2}s, final score {}",
        now,
        game.score()
    );
}
