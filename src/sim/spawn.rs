//! Coin spawning
//!
//! Spawn points sit on the perimeter of the playable bounds, expanded
//! outward so coins materialize just off-screen. On a fixed cadence the
//! spawner picks one point uniformly at random and drops a coin into the
//! world there.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::world::{Entity, EntityId, World};
use crate::vec2::Rect;

/// Invoke `f` at points along the rectangle's perimeter: once at the origin,
/// then walking the four edges in clockwise order, one point every
/// `interval` units along each edge, never stepping past an edge's far
/// corner. Each edge restarts its distance count from its own start corner,
/// so points bracketing a corner may sit closer together than `interval`;
/// that quantization is deliberate. A zero-area rectangle yields only the
/// origin.
pub fn walk_edges(rect: Rect, interval: f32, f: &mut impl FnMut(Vec2)) {
    debug_assert!(interval > 0.0, "walk interval must be positive");

    f(rect.origin);

    if rect.is_empty() {
        return;
    }

    // Min-y edge, left to right
    let mut point = rect.origin;
    while point.x + interval <= rect.max_x() {
        point.x += interval;
        f(point);
    }

    // Max-x edge, bottom to top
    let mut point = Vec2::new(rect.max_x(), rect.min_y());
    while point.y + interval <= rect.max_y() {
        point.y += interval;
        f(point);
    }

    // Max-y edge, right to left
    let mut point = Vec2::new(rect.max_x(), rect.max_y());
    while point.x - interval >= rect.min_x() {
        point.x -= interval;
        f(point);
    }

    // Min-x edge, top to bottom
    let mut point = Vec2::new(rect.min_x(), rect.max_y());
    while point.y - interval >= rect.min_y() {
        point.y -= interval;
        f(point);
    }
}

/// Periodic coin producer over a set of perimeter spawn points
#[derive(Debug, Clone)]
pub struct CoinSpawner {
    points: Vec<Vec2>,
    /// Seconds between spawns
    interval: f64,
    coin_radius: f32,
    last_spawn: f64,
    rng: Pcg32,
}

impl CoinSpawner {
    pub fn new(seed: u64, interval: f64, coin_radius: f32) -> Self {
        Self {
            points: Vec::new(),
            interval,
            coin_radius,
            last_spawn: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Recompute the spawn point set for new bounds, discarding the old set.
    /// Bounds are expanded by `margin` so coins don't spawn on screen;
    /// points are placed every `spacing` units of edge length.
    pub fn reconfigure(&mut self, bounds: Rect, margin: f32, spacing: f32) {
        let spawn_rect = bounds.outset(margin, margin);

        let mut points = Vec::new();
        walk_edges(spawn_rect, spacing, &mut |p| points.push(p));
        self.points = points;

        log::info!("spawn points rebuilt: {} along perimeter", self.points.len());
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Spawn a coin if the cadence interval has elapsed since the last one.
    /// With no configured points this tick is a no-op.
    pub fn tick(&mut self, now: f64, world: &mut World) -> Option<EntityId> {
        if now - self.last_spawn <= self.interval {
            return None;
        }
        if self.points.is_empty() {
            return None;
        }

        let point = self.points[self.rng.random_range(0..self.points.len())];
        let id = world.insert(Entity::coin(point, self.coin_radius));
        self.last_spawn = now;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_walk(rect: Rect, interval: f32) -> Vec<Vec2> {
        let mut points = Vec::new();
        walk_edges(rect, interval, &mut |p| points.push(p));
        points
    }

    #[test]
    fn test_walk_square_with_even_interval() {
        let points = collect_walk(Rect::new(0.0, 0.0, 100.0, 100.0), 20.0);

        // floor(100 / 20) = 5 points per edge, plus the leading origin. The
        // min-x edge walks all the way back down to the origin, so (0, 0)
        // appears twice; per-edge distance accounting accepts that.
        assert_eq!(points.len(), 21);

        assert_eq!(points[0], Vec2::ZERO);
        assert_eq!(points[1], Vec2::new(20.0, 0.0));
        assert_eq!(points[5], Vec2::new(100.0, 0.0));
        assert_eq!(points[10], Vec2::new(100.0, 100.0));
        assert_eq!(points[15], Vec2::new(0.0, 100.0));
        assert_eq!(points[20], Vec2::ZERO);

        // No point ever leaves the perimeter band
        for p in &points {
            assert!((0.0..=100.0).contains(&p.x));
            assert!((0.0..=100.0).contains(&p.y));
            let on_edge = p.x == 0.0 || p.x == 100.0 || p.y == 0.0 || p.y == 100.0;
            assert!(on_edge, "{p:?} not on an edge");
        }
    }

    #[test]
    fn test_walk_never_oversteps_far_corner() {
        // 100-unit edges with a 30-unit interval: floor(100 / 30) = 3 points
        // per edge, the last one 10 units short of each far corner
        let points = collect_walk(Rect::new(0.0, 0.0, 100.0, 100.0), 30.0);
        assert_eq!(points.len(), 1 + 4 * 3);
        assert!(points.contains(&Vec2::new(90.0, 0.0)));
        assert!(!points.contains(&Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_walk_restarts_count_at_each_corner() {
        let points = collect_walk(Rect::new(0.0, 0.0, 50.0, 50.0), 30.0);

        // One 30-unit step fits per edge; the corner points cluster at 20
        // units from each far corner rather than spacing evenly around
        assert_eq!(
            points,
            vec![
                Vec2::ZERO,
                Vec2::new(30.0, 0.0),
                Vec2::new(50.0, 30.0),
                Vec2::new(20.0, 50.0),
                Vec2::new(0.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_walk_degenerate_rect_yields_origin_only() {
        let points = collect_walk(Rect::new(7.0, -3.0, 0.0, 0.0), 20.0);
        assert_eq!(points, vec![Vec2::new(7.0, -3.0)]);

        let points = collect_walk(Rect::new(0.0, 0.0, 100.0, 0.0), 20.0);
        assert_eq!(points, vec![Vec2::ZERO]);
    }

    #[test]
    fn test_spawner_cadence() {
        let mut world = World::new();
        let mut spawner = CoinSpawner::new(7, 0.2, 8.0);
        spawner.reconfigure(Rect::new(0.0, 0.0, 100.0, 100.0), 20.0, 20.0);

        // Not enough time elapsed yet
        assert!(spawner.tick(0.1, &mut world).is_none());
        assert_eq!(world.len(), 0);

        let id = spawner.tick(0.25, &mut world).expect("cadence elapsed");
        assert!(world.contains(id));

        // Cadence restarts from the last spawn
        assert!(spawner.tick(0.3, &mut world).is_none());
        assert!(spawner.tick(0.5, &mut world).is_some());
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_spawner_with_no_points_is_noop() {
        let mut world = World::new();
        let mut spawner = CoinSpawner::new(7, 0.2, 8.0);

        for i in 1..50 {
            assert!(spawner.tick(f64::from(i), &mut world).is_none());
        }
        assert!(world.is_empty());
    }

    #[test]
    fn test_spawner_selection_is_uniform_across_points() {
        let mut world = World::new();
        let mut spawner = CoinSpawner::new(42, 0.0, 8.0);
        // Tiny rect: exactly 5 points (origin twice, three corners once)
        spawner.reconfigure(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0, 1.0);
        assert_eq!(spawner.points().len(), 5);

        let mut now = 0.0;
        for _ in 0..500 {
            now += 1.0;
            spawner.tick(now, &mut world).expect("should spawn every tick");
        }

        // Every configured point gets picked; rough balance, not exactness
        for point in spawner.points() {
            let hits = world.iter().filter(|e| e.position == *point).count();
            assert!(hits > 0, "point {point:?} never selected");
        }
    }

    #[test]
    fn test_reconfigure_discards_previous_points() {
        let mut spawner = CoinSpawner::new(1, 0.2, 8.0);
        spawner.reconfigure(Rect::new(0.0, 0.0, 100.0, 100.0), 20.0, 20.0);
        let old_len = spawner.points().len();

        spawner.reconfigure(Rect::new(0.0, 0.0, 40.0, 40.0), 20.0, 20.0);
        assert_ne!(spawner.points().len(), old_len);
        // Old 140x140 outset perimeter had points at x = 120; gone now
        assert!(spawner.points().iter().all(|p| p.x <= 60.0));
    }
}
