//! Combat minigame entities and hit detection

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Simulate, StepEnv};
use crate::consts::*;

/// A descending enemy fighter
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub active: bool,
    /// Phase offset for the horizontal sway
    pub x_offset: f32,
}

impl Enemy {
    /// Spawn just above the top edge at a random column
    pub fn spawn(rng: &mut Pcg32, viewport: Vec2) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * viewport.x, -ENEMY_MARGIN),
            speed: ENEMY_MIN_SPEED + rng.random::<f32>() * ENEMY_SPEED_SPREAD,
            size: ENEMY_SIZE,
            active: true,
            x_offset: rng.random::<f32>() * ENEMY_PHASE_RANGE,
        }
    }
}

impl Simulate for Enemy {
    fn step(&mut self, env: &StepEnv, _rng: &mut Pcg32) {
        if !self.active {
            return;
        }

        self.pos.y += self.speed;
        self.pos.x += ((self.pos.y + self.x_offset) * ENEMY_SWAY_FREQUENCY).sin()
            * ENEMY_SWAY_AMPLITUDE;

        if self.pos.y > env.viewport.y + ENEMY_MARGIN {
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// A player shot travelling straight up
#[derive(Debug, Clone)]
pub struct Laser {
    pub pos: Vec2,
    pub active: bool,
}

impl Laser {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, active: true }
    }
}

impl Simulate for Laser {
    fn step(&mut self, _env: &StepEnv, _rng: &mut Pcg32) {
        if !self.active {
            return;
        }

        self.pos.y -= LASER_SPEED;
        if self.pos.y < 0.0 {
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// A registered laser/enemy hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub laser: usize,
    pub enemy: usize,
    /// Where the enemy was destroyed
    pub pos: Vec2,
}

/// Test every active laser against every active enemy
///
/// Both sides of a hit are deactivated in place. A laser stops after its
/// first hit; with overlapping enemies the earliest inserted one is credited.
/// Nothing is removed here, callers drop inactive entries afterwards.
pub fn resolve_collisions(lasers: &mut [Laser], enemies: &mut [Enemy]) -> Vec<Hit> {
    let mut hits = Vec::new();

    for (laser_idx, laser) in lasers.iter_mut().enumerate() {
        if !laser.active {
            continue;
        }

        for (enemy_idx, enemy) in enemies.iter_mut().enumerate() {
            if !enemy.active {
                continue;
            }

            if laser.pos.distance(enemy.pos) < HIT_RADIUS {
                enemy.active = false;
                laser.active = false;
                hits.push(Hit {
                    laser: laser_idx,
                    enemy: enemy_idx,
                    pos: enemy.pos,
                });
                break;
            }
        }
    }

    hits
}

/// Drop every inactive entity from a live collection
pub fn retain_active<T: Simulate>(entities: &mut Vec<T>) {
    entities.retain(|e| e.is_active());
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    fn env() -> StepEnv {
        StepEnv {
            viewport: VIEW,
            warp_mode: false,
            speed_multiplier: IDLE_SPEED,
        }
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            speed: 2.0,
            size: ENEMY_SIZE,
            active: true,
            x_offset: 0.0,
        }
    }

    #[test]
    fn test_enemy_spawn_above_top() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            let enemy = Enemy::spawn(&mut rng, VIEW);
            assert_eq!(enemy.pos.y, -ENEMY_MARGIN);
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x < VIEW.x);
            assert!(enemy.speed >= 2.0 && enemy.speed < 5.0);
            assert!(enemy.active);
        }
    }

    #[test]
    fn test_enemy_sways_while_descending() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut enemy = enemy_at(400.0, 100.0);
        enemy.step(&env(), &mut rng);
        assert_eq!(enemy.pos.y, 102.0);
        let expected_x = 400.0 + (102.0f32 * 0.01).sin() * 2.0;
        assert!((enemy.pos.x - expected_x).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_leaves_below_margin() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut enemy = enemy_at(400.0, 649.0);
        enemy.step(&env(), &mut rng);
        assert!(!enemy.active);
    }

    #[test]
    fn test_laser_moves_up_and_expires() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut laser = Laser::new(Vec2::new(10.0, 20.0));
        laser.step(&env(), &mut rng);
        assert_eq!(laser.pos.y, 5.0);
        assert!(laser.active);
        laser.step(&env(), &mut rng);
        assert!(!laser.active);
    }

    #[test]
    fn test_single_hit_per_laser() {
        let mut lasers = vec![Laser::new(Vec2::new(100.0, 100.0))];
        let mut enemies = vec![enemy_at(105.0, 100.0), enemy_at(95.0, 100.0)];

        let hits = resolve_collisions(&mut lasers, &mut enemies);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].enemy, 0);
        assert!(!lasers[0].active);
        assert!(!enemies[0].active);
        assert!(enemies[1].active);
    }

    #[test]
    fn test_miss_outside_radius() {
        let mut lasers = vec![Laser::new(Vec2::new(100.0, 100.0))];
        let mut enemies = vec![enemy_at(100.0, 120.0)];
        let hits = resolve_collisions(&mut lasers, &mut enemies);
        assert!(hits.is_empty());
        assert!(lasers[0].active && enemies[0].active);
    }

    #[test]
    fn test_two_lasers_cannot_share_an_enemy() {
        let mut lasers = vec![
            Laser::new(Vec2::new(100.0, 100.0)),
            Laser::new(Vec2::new(101.0, 100.0)),
        ];
        let mut enemies = vec![enemy_at(100.0, 105.0)];
        let hits = resolve_collisions(&mut lasers, &mut enemies);
        assert_eq!(hits.len(), 1);
        assert!(lasers[1].active);
    }

    #[test]
    fn test_retain_active_drops_dead_entities() {
        let mut lasers = vec![
            Laser::new(Vec2::ZERO),
            Laser { pos: Vec2::ZERO, active: false },
            Laser::new(Vec2::ONE),
        ];
        retain_active(&mut lasers);
        assert_eq!(lasers.len(), 2);
        assert!(lasers.iter().all(|l| l.active));
    }

    proptest! {
        #[test]
        fn prop_close_pair_always_hits(dx in -14.0f32..14.0, dy in -14.0f32..14.0) {
            let mut lasers = vec![Laser::new(Vec2::new(300.0, 300.0))];
            let mut enemies = vec![enemy_at(300.0 + dx, 300.0 + dy)];
            let hits = resolve_collisions(&mut lasers, &mut enemies);
            prop_assert_eq!(hits.len(), 1);
            prop_assert!(!lasers[0].active);
            prop_assert!(!enemies[0].active);
        }

        #[test]
        fn prop_hits_never_exceed_lasers(
            laser_xs in proptest::collection::vec(0.0f32..200.0, 0..8),
            enemy_xs in proptest::collection::vec(0.0f32..200.0, 0..8),
        ) {
            let mut lasers: Vec<_> = laser_xs
                .iter()
                .map(|&x| Laser::new(Vec2::new(x, 50.0)))
                .collect();
            let mut enemies: Vec<_> = enemy_xs.iter().map(|&x| enemy_at(x, 50.0)).collect();
            let hits = resolve_collisions(&mut lasers, &mut enemies);
            prop_assert!(hits.len() <= lasers.len().min(enemies.len()));
            let dead_lasers = lasers.iter().filter(|l| !l.active).count();
            let dead_enemies = enemies.iter().filter(|e| !e.active).count();
            prop_assert_eq!(dead_lasers, hits.len());
            prop_assert_eq!(dead_enemies, hits.len());
        }
    }
}
