//! Game loop and state machine
//!
//! One update per rendered frame, driven by the host's wall clock. The loop
//! advances coin spawning and player thrust, watches for the player's
//! removal, and walks Playing -> Transitioning -> GameOver exactly once per
//! session. The game-over delay is an explicit deadline polled each tick,
//! never a platform deferred-dispatch primitive.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::contact::{self, Contact};
use super::spawn::CoinSpawner;
use super::world::{Entity, EntityId, GameEvent, World};
use crate::audio::MusicControl;
use crate::consts::category;
use crate::tuning::Tuning;
use crate::vec2::{Rect, Size};

/// Session state machine. Reaches GameOver at most once; there is no path
/// back out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player gone; waiting out the real-time delay before the game-over
    /// scene is requested
    Transitioning { deadline: f64 },
    GameOver,
}

/// One full game session: world, spawner, input surface, and the loop
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub world: World,
    pub music: MusicControl,
    pub player: EntityId,
    pub black_holes: Vec<EntityId>,
    pub spawner: CoinSpawner,
    pub phase: GamePhase,
    /// Current scene bounds
    pub bounds: Rect,
    /// World-edge boundary body handed to the solver; owns no entity, so
    /// its contacts resolve to nothing
    pub boundary: PhysicsBody,
    last_update: Option<f64>,
    /// Last score observed while the player was still in the world
    final_score: u32,
}

impl GameState {
    /// New session in a scene of `size`. The spawn-selection RNG is seeded
    /// for reproducibility.
    pub fn new(size: Size, seed: u64, tuning: Tuning, music: MusicControl) -> Self {
        let mut world = World::new();

        let player = world.insert(Entity::player(
            Rect::from_size(size).center(),
            tuning.ship_size,
        ));

        // Two holes; radius 0 (no footprint) until the first layout pass
        let black_holes: Vec<EntityId> = (0..2)
            .map(|_| world.insert(Entity::black_hole(Vec2::ZERO, 0.0, tuning.black_hole_attraction)))
            .collect();

        let spawner = CoinSpawner::new(seed, tuning.coin_spawn_interval, tuning.coin_radius);

        let mut state = Self {
            world,
            music,
            player,
            black_holes,
            spawner,
            phase: GamePhase::Playing,
            bounds: Rect::from_size(size),
            boundary: world_boundary(Rect::from_size(size)),
            last_update: None,
            final_score: 0,
            tuning,
        };
        state.resize(size);
        state
    }

    /// Score for on-screen display: the live player's count, or the final
    /// count once the player has been consumed
    pub fn score(&self) -> u32 {
        self.world
            .get(self.player)
            .and_then(|e| e.player_state())
            .map_or(self.final_score, |p| p.score)
    }

    // --- Input surface (resolved touch/pointer events) ---

    pub fn begin_steering(&mut self, target: Vec2) {
        self.steer(Some(target));
    }

    pub fn update_steering_target(&mut self, target: Vec2) {
        self.steer(Some(target));
    }

    pub fn end_steering(&mut self) {
        self.steer(None);
    }

    fn steer(&mut self, target: Option<Vec2>) {
        let speed = self.tuning.movement_speed;
        if let Some(entity) = self.world.get_mut(self.player) {
            entity.set_steering(target, speed);
        }
    }

    // --- Contact surface (forwarded from the solver's collision pass) ---

    pub fn contact_began(&mut self, contact: &Contact) {
        contact::dispatch_begin(&mut self.world, contact);
    }

    pub fn contact_ended(&mut self, contact: &Contact) {
        contact::dispatch_end(&mut self.world, contact);
    }

    /// Relayout for new scene bounds: rebuild the world-edge boundary,
    /// resize and reposition the black holes, and recompute the spawn
    /// point set
    pub fn resize(&mut self, size: Size) {
        self.bounds = Rect::from_size(size);
        self.boundary = world_boundary(self.bounds);

        let radius = self.tuning.black_hole_radius_factor * size.min_dimension();
        let positions = [
            Vec2::new(0.25 * size.width, 0.5 * size.height),
            Vec2::new(0.75 * size.width, 0.5 * size.height),
        ];
        for (id, position) in self.black_holes.iter().zip(positions) {
            if let Some(hole) = self.world.get_mut(*id) {
                hole.position = position;
                hole.set_black_hole_radius(radius);
            }
        }

        self.spawner.reconfigure(
            self.bounds,
            self.tuning.spawn_margin,
            self.tuning.spawn_spacing,
        );

        log::info!("scene resized to {}x{}", size.width, size.height);
    }

    /// Advance the session by wall-clock time.
    ///
    /// The very first call only records the timestamp; with no prior instant
    /// there is no delta to integrate. Every later call computes
    /// `dt = current_time - last`, spawns coins on cadence, integrates
    /// player thrust, advances consume sequences, and checks the phase
    /// transitions. Once past Playing, the tick stops advancing movement and
    /// spawns; only the game-over deadline is polled.
    pub fn update(&mut self, current_time: f64) {
        let last = self.last_update.replace(current_time);

        match self.phase {
            GamePhase::GameOver => {}

            GamePhase::Transitioning { deadline } => {
                if current_time >= deadline {
                    self.phase = GamePhase::GameOver;
                    self.music.set_volume(self.tuning.game_over_music_volume);
                    self.world.events.push(GameEvent::GameOver {
                        score: self.final_score,
                        size: self.bounds.size,
                    });
                    log::info!("game over, final score {}", self.final_score);
                }
            }

            GamePhase::Playing => {
                let Some(last) = last else {
                    return;
                };
                let dt = (current_time - last) as f32;

                self.spawner.tick(current_time, &mut self.world);

                if let Some(player) = self.world.get_mut(self.player) {
                    player.integrate_movement(dt);
                }

                // Snapshot the score while the player can still be read;
                // from here on a consume sequence may remove it
                if let Some(player) = self.world.get(self.player).and_then(|e| e.player_state()) {
                    self.final_score = player.score;
                }

                self.world.advance_actions(dt);

                if !self.world.contains(self.player) {
                    let deadline = current_time + self.tuning.game_over_delay;
                    self.phase = GamePhase::Transitioning { deadline };
                    log::info!(
                        "player consumed; game over in {:.1}s",
                        self.tuning.game_over_delay
                    );
                }
            }
        }
    }
}

fn world_boundary(bounds: Rect) -> PhysicsBody {
    let mut boundary = PhysicsBody::edge_loop(bounds);
    boundary.category = category::WORLD;
    boundary.restitution = 0.0;
    boundary.friction = 0.0;
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::EntityKind;
    use crate::vec2::Vector2;

    fn test_state() -> GameState {
        GameState::new(
            Size::new(400.0, 300.0),
            12345,
            Tuning::default(),
            MusicControl::default(),
        )
    }

    fn player_velocity(state: &GameState) -> Vec2 {
        state
            .world
            .get(state.player)
            .unwrap()
            .body
            .as_ref()
            .unwrap()
            .velocity
    }

    #[test]
    fn test_first_tick_records_without_integrating() {
        let mut state = test_state();
        state.begin_steering(Vec2::new(400.0, 300.0));

        state.update(100.0);
        assert_eq!(player_velocity(&state), Vec2::ZERO);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_second_tick_integrates_thrust_along_facing() {
        let mut state = test_state();
        state.begin_steering(Vec2::new(400.0, 150.0));

        state.update(100.0);
        state.update(100.1);

        // movement_speed 150 * dt 0.1 = 15 units along the facing angle
        let velocity = player_velocity(&state);
        assert!((velocity.magnitude() - 15.0).abs() < 1e-3);

        let facing = state.world.get(state.player).unwrap().rotation;
        assert!((velocity.y.atan2(velocity.x) - facing).abs() < 1e-3);
    }

    #[test]
    fn test_steering_toggle_zeroes_speed() {
        let mut state = test_state();
        state.begin_steering(Vec2::new(10.0, 10.0));
        state.end_steering();

        state.update(0.0);
        state.update(0.1);
        assert_eq!(player_velocity(&state), Vec2::ZERO);

        let player = state
            .world
            .get(state.player)
            .unwrap()
            .player_state()
            .unwrap();
        assert_eq!(player.orientation_target, None);
    }

    #[test]
    fn test_coins_spawn_on_cadence_while_playing() {
        let mut state = test_state();
        let before = state.world.len();

        state.update(0.0);
        state.update(0.25);

        let coins = state
            .world
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Coin(_)))
            .count();
        assert_eq!(coins, 1);
        assert_eq!(state.world.len(), before + 1);
    }

    #[test]
    fn test_resize_lays_out_holes_and_boundary() {
        let mut state = test_state();
        state.resize(Size::new(800.0, 600.0));

        assert_eq!(state.bounds, Rect::new(0.0, 0.0, 800.0, 600.0));

        for (i, id) in state.black_holes.iter().enumerate() {
            let entity = state.world.get(*id).unwrap();
            let hole = entity.black_hole_state().unwrap();
            // 0.15 x the smaller scene dimension
            assert!((hole.radius - 90.0).abs() < 1e-3);
            assert!(entity.body.is_some());

            let expected_x = if i == 0 { 200.0 } else { 600.0 };
            assert_eq!(entity.position, Vec2::new(expected_x, 300.0));
        }
    }

    #[test]
    fn test_consumption_runs_the_full_game_over_flow() {
        let mut state = test_state();
        let hole = state.black_holes[0];

        state.update(0.0);
        state.contact_began(&Contact::between(hole, state.player));

        // Detached from physics control immediately
        let entity = state.world.get(state.player).unwrap();
        assert!(entity.body.is_none());
        assert!(entity.action.is_some());

        // Step past the consume sequence duration
        let mut now = 0.0;
        while state.world.contains(state.player) {
            now += 0.1;
            state.update(now);
            assert!(now < 2.0, "consume sequence never finished");
        }
        let GamePhase::Transitioning { deadline } = state.phase else {
            panic!("expected Transitioning, got {:?}", state.phase);
        };
        assert!((deadline - (now + 0.5)).abs() < 1e-9);

        // Deadline not reached yet: still transitioning
        state.update(now + 0.4);
        assert!(matches!(state.phase, GamePhase::Transitioning { .. }));

        // Past the deadline: game over, scene request carries score + size
        state.update(now + 0.6);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.world.events.contains(&GameEvent::GameOver {
            score: 0,
            size: Size::new(400.0, 300.0),
        }));
        assert_eq!(state.music.volume(), 0.4);
    }

    #[test]
    fn test_score_survives_player_removal() {
        let mut state = test_state();

        // Score a coin by hand
        let coin = state.world.insert(Entity::coin(Vec2::ZERO, 8.0));
        state.contact_began(&Contact::between(state.player, coin));
        assert_eq!(state.score(), 1);

        // Tick once so the loop observes the score, then consume the player
        state.update(0.0);
        state.update(0.1);
        state.contact_began(&Contact::between(state.black_holes[0], state.player));

        let mut now = 0.1;
        while state.phase != GamePhase::GameOver {
            now += 0.1;
            state.update(now);
            assert!(now < 3.0, "never reached game over");
        }

        assert_eq!(state.score(), 1);
        assert!(
            state
                .world
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { score: 1, .. }))
        );
    }

    #[test]
    fn test_updates_stop_advancing_after_playing() {
        let mut state = test_state();
        state.update(0.0);
        state.contact_began(&Contact::between(state.black_holes[0], state.player));

        let mut now = 0.0;
        while state.phase != GamePhase::GameOver {
            now += 0.1;
            state.update(now);
            assert!(now < 3.0);
        }

        // Long stretch of further ticks: no spawns, no phase change
        let entities = state.world.len();
        for _ in 0..20 {
            now += 0.5;
            state.update(now);
        }
        assert_eq!(state.world.len(), entities);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_contact_with_unowned_boundary_body_is_ignored() {
        let mut state = test_state();

        state.contact_began(&Contact {
            body_a: Some(state.player),
            body_b: None,
        });

        assert_eq!(state.score(), 0);
        assert!(state.world.events.is_empty());
    }
}
